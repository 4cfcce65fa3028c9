use super::filter::FilterSource;
use super::project::ProjectService;
use crate::Result;
use codeprompt_core::Filter;
use codeprompt_index::{Database, ProjectRecord};
use codeprompt_types::{FileRecord, ProjectPath};
use serde::Serialize;
use std::collections::BTreeMap;

/// File metadata as reported by `analyze filter` and `analyze summary`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileEntry {
    pub relative_path: String,
    pub filename: String,
    pub extension: String,
    pub size_bytes: u64,
    pub line_count: u64,
    pub is_text: bool,
}

impl From<FileRecord> for FileEntry {
    fn from(record: FileRecord) -> Self {
        Self {
            relative_path: record.relative_path,
            filename: record.filename,
            extension: record.extension,
            size_bytes: record.size_bytes,
            line_count: record.line_count,
            is_text: record.is_text,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SummaryReport {
    pub file_count: usize,
    pub total_size_bytes: u64,
    pub files: Vec<FileEntry>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtStats {
    pub file_count: usize,
    pub total_size: u64,
    pub total_lines: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatsReport {
    pub total_files: usize,
    pub total_size: u64,
    pub total_lines: u64,
    pub by_extension: BTreeMap<String, ExtStats>,
}

/// Key used in `byExtension` for files without an extension
pub const NO_EXTENSION: &str = "no_extension";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TreeStatus {
    Included,
    Excluded,
}

/// One node of the cached file tree.
///
/// Files carry `size_bytes` and `status`; directories carry the totals of
/// every file below them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TreeNode {
    pub name: String,
    pub path: String,
    pub is_dir: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<TreeStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size_bytes: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_size_bytes: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_file_count: Option<usize>,
    pub children: Vec<TreeNode>,
}

impl TreeNode {
    /// Plain-text rendering: the root name, then one connector line per node.
    pub fn render_text(&self) -> String {
        let mut out = String::new();
        out.push_str(&self.name);
        out.push('\n');
        render_children(self, "", &mut out);
        out
    }
}

fn render_children(node: &TreeNode, prefix: &str, out: &mut String) {
    let last = node.children.len().saturating_sub(1);
    for (i, child) in node.children.iter().enumerate() {
        let connector = if i == last { "└── " } else { "├── " };

        let size_info = if child.is_dir {
            format!(
                " ({} files, {} bytes)",
                child.total_file_count.unwrap_or(0),
                child.total_size_bytes.unwrap_or(0)
            )
        } else {
            format!(" ({} bytes)", child.size_bytes.unwrap_or(0))
        };
        let marker = match child.status {
            Some(TreeStatus::Excluded) => " [excluded]",
            _ => "",
        };

        out.push_str(prefix);
        out.push_str(connector);
        out.push_str(&child.name);
        out.push_str(&size_info);
        out.push_str(marker);
        out.push('\n');

        if child.is_dir {
            let extension = if i == last { "    " } else { "│   " };
            render_children(child, &format!("{}{}", prefix, extension), out);
        }
    }
}

#[derive(Default)]
struct DirBuilder {
    dirs: BTreeMap<String, DirBuilder>,
    files: BTreeMap<String, (u64, TreeStatus)>,
}

impl DirBuilder {
    fn insert(&mut self, relative_path: &str, size: u64, status: TreeStatus) {
        let mut dir = self;
        let mut parts = relative_path.split('/').peekable();
        while let Some(part) = parts.next() {
            if parts.peek().is_none() {
                dir.files.insert(part.to_string(), (size, status));
            } else {
                dir = dir.dirs.entry(part.to_string()).or_default();
            }
        }
    }

    fn build(self, name: String, path: String) -> TreeNode {
        let mut children = Vec::with_capacity(self.dirs.len() + self.files.len());
        let mut total_size = 0u64;
        let mut total_count = 0usize;

        for (dir_name, dir) in self.dirs {
            let child_path = join_key(&path, &dir_name);
            let node = dir.build(dir_name, child_path);
            total_size += node.total_size_bytes.unwrap_or(0);
            total_count += node.total_file_count.unwrap_or(0);
            children.push(node);
        }
        for (file_name, (size, status)) in self.files {
            total_size += size;
            total_count += 1;
            children.push(TreeNode {
                path: join_key(&path, &file_name),
                name: file_name,
                is_dir: false,
                status: Some(status),
                size_bytes: Some(size),
                total_size_bytes: None,
                total_file_count: None,
                children: Vec::new(),
            });
        }

        TreeNode {
            name,
            path,
            is_dir: true,
            status: None,
            size_bytes: None,
            total_size_bytes: Some(total_size),
            total_file_count: Some(total_count),
            children,
        }
    }
}

fn join_key(parent: &str, name: &str) -> String {
    if parent == "." {
        name.to_string()
    } else {
        format!("{}/{}", parent, name)
    }
}

/// Build the tree of `records` under a root labelled `root_name`
pub fn build_tree(root_name: String, records: &[FileRecord], filter: &Filter) -> TreeNode {
    let mut root = DirBuilder::default();
    for record in records {
        let status = if filter.is_included(&record.relative_path) {
            TreeStatus::Included
        } else {
            TreeStatus::Excluded
        };
        root.insert(&record.relative_path, record.size_bytes, status);
    }
    root.build(root_name, ".".to_string())
}

/// Read-only queries over a project's cached files. Nothing here touches
/// the filesystem.
pub struct AnalyzeService<'a> {
    db: &'a Database,
}

impl<'a> AnalyzeService<'a> {
    pub fn new(db: &'a Database) -> Self {
        Self { db }
    }

    fn open(&self, raw_path: &str) -> Result<(ProjectPath, ProjectRecord)> {
        ProjectService::new(self.db).require(raw_path)
    }

    /// Every cached record, ordered by relative path
    pub fn list_records(&self, raw_path: &str) -> Result<Vec<FileRecord>> {
        let (_, project) = self.open(raw_path)?;
        Ok(self.db.list_files(project.id)?)
    }

    /// Relative paths selected by the filter, ordered
    pub fn filtered_paths(&self, raw_path: &str, source: &FilterSource) -> Result<Vec<String>> {
        let (_, project) = self.open(raw_path)?;
        let filter = source.resolve(self.db, project.id)?;
        let paths = self.db.list_paths(project.id)?;
        Ok(filter
            .select(paths.iter().map(String::as_str))
            .into_iter()
            .map(str::to_string)
            .collect())
    }

    pub fn filter(&self, raw_path: &str, source: &FilterSource) -> Result<Vec<FileEntry>> {
        let (_, project) = self.open(raw_path)?;
        let filter = source.resolve(self.db, project.id)?;
        let records = self.db.list_files(project.id)?;
        Ok(records
            .into_iter()
            .filter(|r| filter.is_included(&r.relative_path))
            .map(FileEntry::from)
            .collect())
    }

    pub fn summary(&self, raw_path: &str, source: &FilterSource) -> Result<SummaryReport> {
        let files = self.filter(raw_path, source)?;
        Ok(SummaryReport {
            file_count: files.len(),
            total_size_bytes: files.iter().map(|f| f.size_bytes).sum(),
            files,
        })
    }

    /// Per-extension totals over the whole cache, ignoring any filter
    pub fn stats(&self, raw_path: &str) -> Result<StatsReport> {
        let (_, project) = self.open(raw_path)?;
        let mut report = StatsReport::default();

        for stat in self.db.extension_stats(project.id)? {
            let key = if stat.extension.is_empty() {
                NO_EXTENSION.to_string()
            } else {
                stat.extension
            };
            let entry = report.by_extension.entry(key).or_default();
            entry.file_count += stat.file_count;
            entry.total_size += stat.total_size;
            entry.total_lines += stat.total_lines;

            report.total_files += stat.file_count;
            report.total_size += stat.total_size;
            report.total_lines += stat.total_lines;
        }
        Ok(report)
    }

    pub fn tree(&self, raw_path: &str, source: &FilterSource) -> Result<TreeNode> {
        let (path, project) = self.open(raw_path)?;
        let filter = source.resolve(self.db, project.id)?;
        let records = self.db.list_files(project.id)?;
        Ok(build_tree(path.name(), &records, &filter))
    }
}

use super::ignores::IgnoreRules;
use super::inspect::inspect_file;
use crate::path::relative_key;
use crate::{Error, Result};
use codeprompt_types::FileRecord;
use crossbeam_channel::{Receiver, Sender, bounded, unbounded};
use std::path::{Path, PathBuf};
use std::thread;
use tracing::{debug, info, trace};
use walkdir::WalkDir;

struct Job {
    path: PathBuf,
    relative_path: String,
}

/// Walks one project root and fans per-file work out to a worker pool.
pub struct Scanner {
    root: PathBuf,
    rules: IgnoreRules,
    include_binary: bool,
    workers: usize,
}

impl Scanner {
    pub fn new(root: impl Into<PathBuf>, rules: IgnoreRules) -> Self {
        let workers = thread::available_parallelism()
            .map(|n| n.get())
            .unwrap_or(4);
        Self {
            root: root.into(),
            rules,
            include_binary: false,
            workers,
        }
    }

    pub fn include_binary(mut self, include: bool) -> Self {
        self.include_binary = include;
        self
    }

    pub fn workers(mut self, workers: usize) -> Self {
        self.workers = workers.max(1);
        self
    }

    /// Scan the tree. Records come back sorted by relative path.
    ///
    /// Files that cannot be read are dropped from the result. A failure of
    /// the walk itself (for example an unreadable root) aborts the scan.
    pub fn scan(&self) -> Result<Vec<FileRecord>> {
        if !self.root.is_dir() {
            return Err(Error::Config(format!(
                "project path is not a directory: {}",
                self.root.display()
            )));
        }

        info!(root = %self.root.display(), workers = self.workers, "scan started");

        let (result_tx, result_rx) = unbounded::<FileRecord>();

        thread::scope(|scope| -> Result<()> {
            let (job_tx, job_rx) = bounded::<Job>(self.workers * 2);

            let mut handles = Vec::with_capacity(self.workers);
            for i in 0..self.workers {
                let rx = job_rx.clone();
                let tx = result_tx.clone();
                let include_binary = self.include_binary;
                let handle = thread::Builder::new()
                    .name(format!("scan-worker-{}", i))
                    .spawn_scoped(scope, move || run_worker(rx, tx, include_binary))
                    .map_err(|e| Error::Scan(format!("failed to spawn worker: {}", e)))?;
                handles.push(handle);
            }
            drop(job_rx);

            let walked = self.walk(&job_tx);
            drop(job_tx);

            for handle in handles {
                if handle.join().is_err() {
                    return Err(Error::Scan("scan worker panicked".to_string()));
                }
            }
            walked
        })?;
        drop(result_tx);

        let mut records: Vec<FileRecord> = result_rx.iter().collect();
        records.sort_by(|a, b| a.relative_path.cmp(&b.relative_path));

        info!(files = records.len(), "scan finished");
        Ok(records)
    }

    fn walk(&self, jobs: &Sender<Job>) -> Result<()> {
        walk_files(&self.root, &self.rules, |path, relative_path| {
            jobs.send(Job {
                path,
                relative_path,
            })
            .map_err(|_| Error::Scan("scan workers stopped accepting files".to_string()))?;
            Ok(true)
        })
    }
}

/// Depth-first walk of `root` visiting every regular file the rules keep.
///
/// Ignored directories are pruned without being read; symlinks are not
/// followed. `visit` gets the absolute path and the `/`-separated relative
/// path and returns `false` to stop the walk early.
pub fn walk_files<F>(root: &Path, rules: &IgnoreRules, mut visit: F) -> Result<()>
where
    F: FnMut(PathBuf, String) -> Result<bool>,
{
    let mut entries = WalkDir::new(root)
        .follow_links(false)
        .sort_by_file_name()
        .into_iter();

    while let Some(entry) = entries.next() {
        let entry = entry?;
        if entry.depth() == 0 {
            continue;
        }

        let is_dir = entry.file_type().is_dir();
        let relative_path = relative_key(root, entry.path());

        if rules.is_ignored(&relative_path, is_dir) {
            if is_dir {
                trace!(path = %relative_path, "pruned directory");
                entries.skip_current_dir();
            }
            continue;
        }

        if !entry.file_type().is_file() {
            continue;
        }

        if !visit(entry.into_path(), relative_path)? {
            break;
        }
    }
    Ok(())
}

fn run_worker(jobs: Receiver<Job>, results: Sender<FileRecord>, include_binary: bool) {
    for job in jobs.iter() {
        match inspect_file(&job.path, job.relative_path, include_binary) {
            Ok(Some(record)) => {
                if results.send(record).is_err() {
                    return;
                }
            }
            Ok(None) => {}
            Err(e) => {
                debug!(path = %job.path.display(), error = %e, "skipping unreadable file");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn write(root: &Path, rel: &str, content: &[u8]) {
        let path = root.join(rel);
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(path, content).unwrap();
    }

    #[test]
    fn test_scan_single_worker() {
        let dir = TempDir::new().unwrap();
        write(dir.path(), "b.txt", b"b\n");
        write(dir.path(), "a/c.txt", b"c\n");

        let records = Scanner::new(dir.path(), IgnoreRules::none())
            .workers(1)
            .scan()
            .unwrap();
        let paths: Vec<&str> = records.iter().map(|r| r.relative_path.as_str()).collect();
        assert_eq!(paths, vec!["a/c.txt", "b.txt"]);
    }

    #[test]
    fn test_scan_many_files_many_workers() {
        let dir = TempDir::new().unwrap();
        for i in 0..200 {
            write(dir.path(), &format!("d{}/f{}.txt", i % 7, i), b"x\n");
        }

        let records = Scanner::new(dir.path(), IgnoreRules::none())
            .workers(8)
            .scan()
            .unwrap();
        assert_eq!(records.len(), 200);
        assert!(
            records
                .windows(2)
                .all(|w| w[0].relative_path < w[1].relative_path)
        );
    }

    #[test]
    fn test_missing_root_is_fatal() {
        let dir = TempDir::new().unwrap();
        let missing = dir.path().join("nope");
        let err = Scanner::new(&missing, IgnoreRules::none())
            .scan()
            .unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }
}

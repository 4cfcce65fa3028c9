use crate::types::PriorityArg;
use clap::Args;
use codeprompt_runtime::FilterSource;
use codeprompt_types::{FilterSpec, ScanOptions};

#[derive(Debug, Clone, Args)]
pub struct ProjectArgs {
    #[arg(long, help = "Path to the project directory")]
    pub project_path: String,
}

#[derive(Debug, Clone, Default, Args)]
pub struct ScanArgs {
    #[arg(long, help = "Reconcile against the cached snapshot instead of replacing it")]
    pub incremental: bool,

    #[arg(long, help = "Include binary files (default is text only)")]
    pub include_binary: bool,

    #[arg(long, help = "Do not apply the project's .gitignore")]
    pub no_git_ignores: bool,

    #[arg(long, help = "Do not skip common dependency and build directories")]
    pub no_preset_excludes: bool,
}

impl ScanArgs {
    pub fn to_options(&self) -> ScanOptions {
        ScanOptions {
            incremental: self.incremental,
            include_binary: self.include_binary,
            no_git_ignores: self.no_git_ignores,
            no_preset_excludes: self.no_preset_excludes,
        }
    }
}

#[derive(Debug, Clone, Default, Args)]
pub struct FilterArgs {
    #[arg(long, help = "Use a saved filter profile")]
    pub profile_name: Option<String>,

    #[arg(long, help = "Inline filter JSON, e.g. '{\"includeExts\":[\"go\"]}'")]
    pub filter_json: Option<String>,
}

impl FilterArgs {
    pub fn to_source(&self) -> FilterSource {
        FilterSource {
            profile_name: self.profile_name.clone(),
            filter_json: self.filter_json.clone(),
            raw: None,
        }
    }
}

#[derive(Debug, Clone, Args)]
pub struct RawFilterArgs {
    #[arg(long, default_value = "", help = "Comma-separated regexes of files to include")]
    pub includes: String,

    #[arg(long, default_value = "", help = "Comma-separated regexes of files to exclude")]
    pub excludes: String,

    #[arg(
        long,
        default_value = "includes",
        help = "Which list wins when a file matches both"
    )]
    pub priority: PriorityArg,
}

impl RawFilterArgs {
    pub fn to_spec(&self) -> Option<FilterSpec> {
        let spec = FilterSpec::from_raw_lists(&self.includes, &self.excludes, self.priority.into());
        if spec.includes.is_empty() && spec.excludes.is_empty() {
            None
        } else {
            Some(spec)
        }
    }
}

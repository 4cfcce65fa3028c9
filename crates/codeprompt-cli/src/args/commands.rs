use super::common::{FilterArgs, ProjectArgs, RawFilterArgs, ScanArgs};
use crate::types::TreeFormat;
use clap::Subcommand;

#[derive(Subcommand)]
pub enum Commands {
    #[command(about = "Build the metadata cache or check whether it is current")]
    Cache {
        #[command(subcommand)]
        command: CacheCommand,
    },

    #[command(about = "Manage cached projects")]
    Project {
        #[command(subcommand)]
        command: ProjectCommand,
    },

    #[command(about = "Manage saved filter profiles")]
    Profiles {
        #[command(subcommand)]
        command: ProfilesCommand,
    },

    #[command(about = "Query the cached metadata without touching the filesystem")]
    Analyze {
        #[command(subcommand)]
        command: AnalyzeCommand,
    },

    #[command(about = "Read the content of filtered files")]
    Content {
        #[command(subcommand)]
        command: ContentCommand,
    },
}

#[derive(Subcommand)]
pub enum CacheCommand {
    #[command(about = "Scan a project and refresh its cache")]
    Update {
        #[command(flatten)]
        project: ProjectArgs,

        #[command(flatten)]
        scan: ScanArgs,

        #[arg(long, help = "Emit progress events as JSON lines on stderr")]
        progress: bool,
    },

    #[command(about = "Report whether the cache is stale without rescanning")]
    Status {
        #[command(flatten)]
        project: ProjectArgs,

        #[command(flatten)]
        scan: ScanArgs,
    },
}

#[derive(Subcommand)]
pub enum ProjectCommand {
    #[command(about = "Register a project without scanning it")]
    Add {
        #[command(flatten)]
        project: ProjectArgs,
    },

    #[command(about = "List cached projects")]
    List,

    #[command(about = "Delete a project with its cached files and profiles")]
    Delete {
        #[command(flatten)]
        project: ProjectArgs,
    },
}

#[derive(Subcommand)]
pub enum ProfilesCommand {
    #[command(about = "Save or overwrite a filter profile")]
    Save {
        #[command(flatten)]
        project: ProjectArgs,

        #[arg(long, help = "Profile name")]
        name: String,

        #[arg(long, help = "Filter JSON for the profile")]
        data: String,
    },

    #[command(about = "List a project's profiles")]
    List {
        #[command(flatten)]
        project: ProjectArgs,
    },

    #[command(about = "Show one profile's filter JSON")]
    Load {
        #[command(flatten)]
        project: ProjectArgs,

        #[arg(long, help = "Profile name")]
        name: String,
    },

    #[command(about = "Delete a profile")]
    Delete {
        #[command(flatten)]
        project: ProjectArgs,

        #[arg(long, help = "Profile name")]
        name: String,
    },
}

#[derive(Subcommand)]
pub enum AnalyzeCommand {
    #[command(about = "List metadata of the files a filter selects")]
    Filter {
        #[command(flatten)]
        project: ProjectArgs,

        #[command(flatten)]
        filter: FilterArgs,
    },

    #[command(about = "Count and size of the files a filter selects")]
    Summary {
        #[command(flatten)]
        project: ProjectArgs,

        #[command(flatten)]
        filter: FilterArgs,
    },

    #[command(about = "Per-extension file, size and line totals")]
    Stats {
        #[command(flatten)]
        project: ProjectArgs,
    },

    #[command(about = "File tree with directory totals, annotated by a filter")]
    Tree {
        #[command(flatten)]
        project: ProjectArgs,

        #[command(flatten)]
        filter: FilterArgs,

        #[arg(long, default_value = "json")]
        format: TreeFormat,
    },
}

#[derive(Subcommand)]
pub enum ContentCommand {
    #[command(about = "Print the content of the files a filter selects")]
    Get {
        #[command(flatten)]
        project: ProjectArgs,

        #[command(flatten)]
        filter: FilterArgs,

        #[command(flatten)]
        raw: RawFilterArgs,
    },
}

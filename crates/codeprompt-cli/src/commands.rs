use super::args::{
    AnalyzeCommand, CacheCommand, Cli, Commands, ContentCommand, ProfilesCommand, ProjectCommand,
};
use super::context::ExecutionContext;
use super::handlers;
use crate::logging;
use anyhow::Result;

pub fn run(cli: Cli) -> Result<()> {
    logging::init(cli.log_level);

    let ctx = ExecutionContext::new(cli.data_dir.as_deref(), cli.db.as_deref())?;

    match cli.command {
        Commands::Cache { command } => match command {
            CacheCommand::Update {
                project,
                scan,
                progress,
            } => handlers::cache::update(&ctx, &project.project_path, scan.to_options(), progress),
            CacheCommand::Status { project, scan } => {
                handlers::cache::status(&ctx, &project.project_path, scan.to_options())
            }
        },

        Commands::Project { command } => match command {
            ProjectCommand::Add { project } => handlers::project::add(&ctx, &project.project_path),
            ProjectCommand::List => handlers::project::list(&ctx),
            ProjectCommand::Delete { project } => {
                handlers::project::delete(&ctx, &project.project_path)
            }
        },

        Commands::Profiles { command } => match command {
            ProfilesCommand::Save {
                project,
                name,
                data,
            } => handlers::profiles::save(&ctx, &project.project_path, &name, &data),
            ProfilesCommand::List { project } => {
                handlers::profiles::list(&ctx, &project.project_path)
            }
            ProfilesCommand::Load { project, name } => {
                handlers::profiles::load(&ctx, &project.project_path, &name)
            }
            ProfilesCommand::Delete { project, name } => {
                handlers::profiles::delete(&ctx, &project.project_path, &name)
            }
        },

        Commands::Analyze { command } => match command {
            AnalyzeCommand::Filter { project, filter } => {
                handlers::analyze::filter(&ctx, &project.project_path, &filter.to_source())
            }
            AnalyzeCommand::Summary { project, filter } => {
                handlers::analyze::summary(&ctx, &project.project_path, &filter.to_source())
            }
            AnalyzeCommand::Stats { project } => {
                handlers::analyze::stats(&ctx, &project.project_path)
            }
            AnalyzeCommand::Tree {
                project,
                filter,
                format,
            } => handlers::analyze::tree(&ctx, &project.project_path, &filter.to_source(), format),
        },

        Commands::Content { command } => match command {
            ContentCommand::Get {
                project,
                filter,
                raw,
            } => {
                let mut source = filter.to_source();
                source.raw = raw.to_spec();
                handlers::content::get(&ctx, &project.project_path, &source)
            }
        },
    }
}

use crate::context::ExecutionContext;
use crate::output;
use anyhow::Result;
use codeprompt_core::normalize_project_path;
use codeprompt_runtime::{RefreshService, StatusService};
use codeprompt_types::ScanOptions;

pub fn update(
    ctx: &ExecutionContext,
    project_path: &str,
    flags: ScanOptions,
    progress: bool,
) -> Result<()> {
    let path = normalize_project_path(project_path)?;
    let config = ctx.config()?;
    let options = config.scan_options(flags);
    let db = ctx.db()?;

    let service = RefreshService::new(db, config.batch_size());
    let outcome = service.run(&path, &options, |event| {
        if progress {
            output::emit_progress(&event);
        }
    })?;

    output::print_success(&outcome)
}

pub fn status(ctx: &ExecutionContext, project_path: &str, flags: ScanOptions) -> Result<()> {
    let path = normalize_project_path(project_path)?;
    let options = ctx.config()?.scan_options(flags);
    let report = StatusService::new(ctx.db()?).check(&path, &options)?;
    output::print_success(&report)
}

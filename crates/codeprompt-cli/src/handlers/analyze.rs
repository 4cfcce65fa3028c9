use crate::context::ExecutionContext;
use crate::output;
use crate::types::TreeFormat;
use anyhow::Result;
use codeprompt_runtime::{AnalyzeService, FilterSource};
use is_terminal::IsTerminal;
use std::io::Write;

pub fn filter(ctx: &ExecutionContext, project_path: &str, source: &FilterSource) -> Result<()> {
    let files = AnalyzeService::new(ctx.db()?).filter(project_path, source)?;
    output::print_success(&files)
}

pub fn summary(ctx: &ExecutionContext, project_path: &str, source: &FilterSource) -> Result<()> {
    let report = AnalyzeService::new(ctx.db()?).summary(project_path, source)?;
    output::print_success(&report)
}

pub fn stats(ctx: &ExecutionContext, project_path: &str) -> Result<()> {
    let report = AnalyzeService::new(ctx.db()?).stats(project_path)?;
    output::print_success(&report)
}

pub fn tree(
    ctx: &ExecutionContext,
    project_path: &str,
    source: &FilterSource,
    format: TreeFormat,
) -> Result<()> {
    let tree = AnalyzeService::new(ctx.db()?).tree(project_path, source)?;

    match format {
        TreeFormat::Json => output::print_success(&tree),
        TreeFormat::Text => {
            let color = std::io::stdout().is_terminal();
            let mut stdout = std::io::stdout().lock();
            write!(stdout, "{}", output::render_tree(&tree, color))?;
            Ok(())
        }
    }
}

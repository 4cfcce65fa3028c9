use crate::context::ExecutionContext;
use crate::output;
use anyhow::Result;
use codeprompt_runtime::ProjectService;

pub fn add(ctx: &ExecutionContext, project_path: &str) -> Result<()> {
    let project = ProjectService::new(ctx.db()?).add(project_path)?;
    output::print_success(&project)
}

pub fn list(ctx: &ExecutionContext) -> Result<()> {
    let projects = ProjectService::new(ctx.db()?).list()?;
    output::print_success(&projects)
}

pub fn delete(ctx: &ExecutionContext, project_path: &str) -> Result<()> {
    let path = ProjectService::new(ctx.db()?).delete(project_path)?;
    output::print_success(&format!(
        "Project '{}' and all its data deleted successfully.",
        path
    ))
}

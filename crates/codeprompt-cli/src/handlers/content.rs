use crate::context::ExecutionContext;
use crate::output;
use anyhow::Result;
use codeprompt_runtime::{ContentService, FilterSource};

pub fn get(ctx: &ExecutionContext, project_path: &str, source: &FilterSource) -> Result<()> {
    let contents = ContentService::new(ctx.db()?).get(project_path, source)?;
    output::print_success(&contents)
}

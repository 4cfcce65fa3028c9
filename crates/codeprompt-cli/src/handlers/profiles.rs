use crate::context::ExecutionContext;
use crate::output;
use anyhow::{Context, Result};
use codeprompt_runtime::ProfileService;
use serde_json::{Value, json};

pub fn save(ctx: &ExecutionContext, project_path: &str, name: &str, data: &str) -> Result<()> {
    ProfileService::new(ctx.db()?).save(project_path, name, data)?;
    output::print_success(&format!("Profile '{}' saved successfully.", name.trim()))
}

pub fn list(ctx: &ExecutionContext, project_path: &str) -> Result<()> {
    let profiles = ProfileService::new(ctx.db()?).list(project_path)?;
    let entries: Vec<Value> = profiles
        .into_iter()
        .map(|p| {
            let data = serde_json::from_str(&p.data_json).unwrap_or(Value::String(p.data_json));
            json!({ "name": p.name, "data": data })
        })
        .collect();
    output::print_success(&entries)
}

/// Prints the stored filter as a JSON object, not as an escaped string.
pub fn load(ctx: &ExecutionContext, project_path: &str, name: &str) -> Result<()> {
    let stored = ProfileService::new(ctx.db()?).load(project_path, name)?;
    let value: Value = serde_json::from_str(&stored)
        .with_context(|| format!("profile '{}' holds invalid JSON", name))?;
    output::print_success(&value)
}

pub fn delete(ctx: &ExecutionContext, project_path: &str, name: &str) -> Result<()> {
    ProfileService::new(ctx.db()?).delete(project_path, name)?;
    output::print_success(&format!("Profile '{}' deleted successfully.", name))
}

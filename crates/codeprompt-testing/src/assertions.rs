//! Checks over the `{"status": ..., "data"|"message": ...}` envelopes.

use anyhow::{Context, Result};
use serde_json::Value;

/// Unwrap a success envelope, failing on any other shape.
pub fn success_data(envelope: &Value) -> Result<Value> {
    if envelope["status"] != "success" {
        anyhow::bail!("Expected status 'success', got {}", envelope["status"]);
    }
    envelope
        .get("data")
        .cloned()
        .context("Success envelope has no 'data' member")
}

/// Assert that an error envelope's message contains `needle`.
pub fn assert_error_contains(envelope: &Value, needle: &str) -> Result<()> {
    if envelope["status"] != "error" {
        anyhow::bail!("Expected status 'error', got {}", envelope["status"]);
    }
    let message = envelope["message"]
        .as_str()
        .context("Error envelope has no 'message' string")?;
    if !message.contains(needle) {
        anyhow::bail!("Expected error message to contain {:?}, got {:?}", needle, message);
    }
    Ok(())
}

/// Relative paths listed by `analyze filter` data.
pub fn file_paths(data: &Value) -> Result<Vec<String>> {
    let files = data.as_array().context("Expected an array of files")?;
    files
        .iter()
        .enumerate()
        .map(|(i, f)| {
            f["relative_path"]
                .as_str()
                .map(String::from)
                .with_context(|| format!("File {} missing relative_path", i))
        })
        .collect()
}

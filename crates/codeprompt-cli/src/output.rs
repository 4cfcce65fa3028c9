//! JSON envelopes on stdout/stderr. stdout carries only results.

use anyhow::Result;
use codeprompt_runtime::{RefreshProgress, TreeNode};
use owo_colors::OwoColorize;
use serde::Serialize;
use std::io::Write;

#[derive(Serialize)]
struct Success<'a, T: Serialize> {
    status: &'static str,
    data: &'a T,
}

#[derive(Serialize)]
struct Failure<'a> {
    status: &'static str,
    message: &'a str,
}

#[derive(Serialize)]
struct Progress<'a> {
    #[serde(rename = "type")]
    kind: &'static str,
    event: &'a RefreshProgress,
}

pub fn success_envelope<T: Serialize>(data: &T) -> Result<String> {
    Ok(serde_json::to_string_pretty(&Success {
        status: "success",
        data,
    })?)
}

pub fn error_envelope(message: &str) -> String {
    let failure = Failure {
        status: "error",
        message,
    };
    serde_json::to_string_pretty(&failure)
        .unwrap_or_else(|_| format!("{{\"status\":\"error\",\"message\":{:?}}}", message))
}

pub fn print_success<T: Serialize>(data: &T) -> Result<()> {
    let body = success_envelope(data)?;
    let mut stdout = std::io::stdout().lock();
    writeln!(stdout, "{}", body)?;
    Ok(())
}

pub fn print_error(err: &anyhow::Error) {
    eprintln!("{}", error_envelope(&err.to_string()));
}

/// One progress event as a single JSON line on stderr
pub fn emit_progress(event: &RefreshProgress) {
    let line = serde_json::to_string(&Progress {
        kind: "progress",
        event,
    });
    if let Ok(line) = line {
        let mut stderr = std::io::stderr().lock();
        let _ = writeln!(stderr, "{}", line);
    }
}

/// Text tree; excluded files are dimmed when `color` is set
pub fn render_tree(tree: &TreeNode, color: bool) -> String {
    let plain = tree.render_text();
    if !color {
        return plain;
    }

    let mut out = String::with_capacity(plain.len());
    for line in plain.lines() {
        if line.ends_with(" [excluded]") {
            out.push_str(&line.dimmed().to_string());
        } else {
            out.push_str(line);
        }
        out.push('\n');
    }
    out
}

use chrono::{DateTime, SecondsFormat, Utc};
use codeprompt_types::{FileRecord, ProjectId, SnapshotEntry};
use rusqlite::types::{Type, Value};
use rusqlite::{Connection, Row, params, params_from_iter};
use std::collections::HashMap;

use crate::Result;
use crate::records::ExtensionStat;

const COLUMNS: &str = "relative_path, filename, extension, size_bytes, line_count, is_text, last_mod_time, content_hash";

/// Bound parameters per inserted row: project id plus the eight columns
const PARAMS_PER_ROW: usize = 9;

/// SQLITE_MAX_VARIABLE_NUMBER of the bundled SQLite
const MAX_BOUND_PARAMS: usize = 32766;

/// Clamp a configured batch size so one statement never binds more than
/// `MAX_BOUND_PARAMS` values. `fixed` counts parameters bound once per
/// statement, `per_item` those bound per row or path.
fn chunk_len(batch_size: usize, fixed: usize, per_item: usize) -> usize {
    batch_size.clamp(1, (MAX_BOUND_PARAMS - fixed) / per_item)
}

pub fn format_mod_time(ts: &DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Nanos, true)
}

fn parse_mod_time(raw: &str, column: usize) -> rusqlite::Result<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(raw)
        .map(|ts| ts.with_timezone(&Utc))
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(column, Type::Text, Box::new(e)))
}

fn from_row(row: &Row<'_>) -> rusqlite::Result<FileRecord> {
    let raw_time: String = row.get(6)?;
    Ok(FileRecord {
        relative_path: row.get(0)?,
        filename: row.get(1)?,
        extension: row.get::<_, Option<String>>(2)?.unwrap_or_default(),
        size_bytes: row.get::<_, i64>(3)? as u64,
        line_count: row.get::<_, i64>(4)? as u64,
        is_text: row.get(5)?,
        last_mod_time: parse_mod_time(&raw_time, 6)?,
        content_hash: row.get(7)?,
    })
}

fn placeholders(n: usize) -> String {
    vec!["?"; n].join(", ")
}

/// Multi-row INSERT, `batch_size` rows per statement.
pub fn insert_batch(
    conn: &Connection,
    project_id: ProjectId,
    records: &[FileRecord],
    batch_size: usize,
) -> Result<()> {
    for chunk in records.chunks(chunk_len(batch_size, 0, PARAMS_PER_ROW)) {
        let row = format!("({})", placeholders(PARAMS_PER_ROW));
        let rows = vec![row.as_str(); chunk.len()].join(", ");
        let sql = format!(
            "INSERT INTO file_metadata (project_id, {}) VALUES {}",
            COLUMNS, rows
        );

        let mut values: Vec<Value> = Vec::with_capacity(chunk.len() * PARAMS_PER_ROW);
        for rec in chunk {
            values.push(Value::Integer(project_id.get()));
            values.push(Value::Text(rec.relative_path.clone()));
            values.push(Value::Text(rec.filename.clone()));
            values.push(Value::Text(rec.extension.clone()));
            values.push(Value::Integer(rec.size_bytes as i64));
            values.push(Value::Integer(rec.line_count as i64));
            values.push(Value::Integer(rec.is_text as i64));
            values.push(Value::Text(format_mod_time(&rec.last_mod_time)));
            values.push(Value::Text(rec.content_hash.clone()));
        }

        conn.execute(&sql, params_from_iter(values.iter()))?;
    }
    Ok(())
}

pub fn update_each(conn: &Connection, project_id: ProjectId, records: &[FileRecord]) -> Result<()> {
    let mut stmt = conn.prepare_cached(
        r#"
        UPDATE file_metadata
        SET filename = ?3, extension = ?4, size_bytes = ?5, line_count = ?6,
            is_text = ?7, last_mod_time = ?8, content_hash = ?9
        WHERE project_id = ?1 AND relative_path = ?2
        "#,
    )?;

    for rec in records {
        stmt.execute(params![
            project_id.get(),
            rec.relative_path,
            rec.filename,
            rec.extension,
            rec.size_bytes as i64,
            rec.line_count as i64,
            rec.is_text,
            format_mod_time(&rec.last_mod_time),
            rec.content_hash,
        ])?;
    }
    Ok(())
}

/// Chunked `DELETE ... IN (...)`, `batch_size` paths per statement.
pub fn delete_batch(
    conn: &Connection,
    project_id: ProjectId,
    paths: &[String],
    batch_size: usize,
) -> Result<()> {
    for chunk in paths.chunks(chunk_len(batch_size, 1, 1)) {
        let sql = format!(
            "DELETE FROM file_metadata WHERE project_id = ? AND relative_path IN ({})",
            placeholders(chunk.len())
        );
        let mut values: Vec<Value> = Vec::with_capacity(chunk.len() + 1);
        values.push(Value::Integer(project_id.get()));
        values.extend(chunk.iter().map(|p| Value::Text(p.clone())));
        conn.execute(&sql, params_from_iter(values.iter()))?;
    }
    Ok(())
}

pub fn delete_all(conn: &Connection, project_id: ProjectId) -> Result<usize> {
    let removed = conn.execute(
        "DELETE FROM file_metadata WHERE project_id = ?1",
        [project_id.get()],
    )?;
    Ok(removed)
}

pub fn list(conn: &Connection, project_id: ProjectId) -> Result<Vec<FileRecord>> {
    let mut stmt = conn.prepare(&format!(
        "SELECT {} FROM file_metadata WHERE project_id = ?1 ORDER BY relative_path ASC",
        COLUMNS
    ))?;

    let files = stmt
        .query_map([project_id.get()], from_row)?
        .collect::<std::result::Result<Vec<_>, rusqlite::Error>>()?;

    Ok(files)
}

/// Records for the given paths, ordered by path; unknown paths are skipped.
pub fn get_many(
    conn: &Connection,
    project_id: ProjectId,
    paths: &[&str],
    batch_size: usize,
) -> Result<Vec<FileRecord>> {
    let mut files = Vec::with_capacity(paths.len());
    for chunk in paths.chunks(chunk_len(batch_size, 1, 1)) {
        let sql = format!(
            "SELECT {} FROM file_metadata WHERE project_id = ? AND relative_path IN ({})",
            COLUMNS,
            placeholders(chunk.len())
        );
        let mut values: Vec<Value> = Vec::with_capacity(chunk.len() + 1);
        values.push(Value::Integer(project_id.get()));
        values.extend(chunk.iter().map(|p| Value::Text((*p).to_string())));

        let mut stmt = conn.prepare(&sql)?;
        let rows = stmt
            .query_map(params_from_iter(values.iter()), from_row)?
            .collect::<std::result::Result<Vec<_>, rusqlite::Error>>()?;
        files.extend(rows);
    }
    files.sort_by(|a, b| a.relative_path.cmp(&b.relative_path));
    Ok(files)
}

pub fn paths(conn: &Connection, project_id: ProjectId) -> Result<Vec<String>> {
    let mut stmt = conn.prepare(
        "SELECT relative_path FROM file_metadata WHERE project_id = ?1 ORDER BY relative_path ASC",
    )?;
    let paths = stmt
        .query_map([project_id.get()], |row| row.get(0))?
        .collect::<std::result::Result<Vec<_>, rusqlite::Error>>()?;
    Ok(paths)
}

pub fn snapshot(conn: &Connection, project_id: ProjectId) -> Result<HashMap<String, SnapshotEntry>> {
    let mut stmt = conn.prepare(
        r#"
        SELECT relative_path, last_mod_time, content_hash
        FROM file_metadata
        WHERE project_id = ?1
        "#,
    )?;

    let entries = stmt
        .query_map([project_id.get()], |row| {
            let raw_time: String = row.get(1)?;
            Ok((
                row.get::<_, String>(0)?,
                SnapshotEntry {
                    last_mod_time: parse_mod_time(&raw_time, 1)?,
                    content_hash: row.get(2)?,
                },
            ))
        })?
        .collect::<std::result::Result<HashMap<_, _>, rusqlite::Error>>()?;

    Ok(entries)
}

pub fn extension_stats(conn: &Connection, project_id: ProjectId) -> Result<Vec<ExtensionStat>> {
    let mut stmt = conn.prepare(
        r#"
        SELECT COALESCE(extension, ''), COUNT(*), SUM(size_bytes), SUM(line_count)
        FROM file_metadata
        WHERE project_id = ?1
        GROUP BY COALESCE(extension, '')
        ORDER BY 1 ASC
        "#,
    )?;

    let stats = stmt
        .query_map([project_id.get()], |row| {
            Ok(ExtensionStat {
                extension: row.get(0)?,
                file_count: row.get::<_, i64>(1)? as usize,
                total_size: row.get::<_, i64>(2)? as u64,
                total_lines: row.get::<_, i64>(3)? as u64,
            })
        })?
        .collect::<std::result::Result<Vec<_>, rusqlite::Error>>()?;

    Ok(stats)
}

pub fn count(conn: &Connection, project_id: ProjectId) -> Result<usize> {
    let count: i64 = conn.query_row(
        "SELECT COUNT(*) FROM file_metadata WHERE project_id = ?1",
        [project_id.get()],
        |row| row.get(0),
    )?;
    Ok(count as usize)
}

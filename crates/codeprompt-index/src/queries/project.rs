use codeprompt_types::{NOT_SCANNED_YET, ProjectId};
use rusqlite::{Connection, OptionalExtension, Row, params};

use crate::Result;
use crate::records::{ProjectRecord, ProjectSummary};

fn from_row(row: &Row<'_>) -> rusqlite::Result<ProjectRecord> {
    Ok(ProjectRecord {
        id: ProjectId::new(row.get(0)?),
        project_path: row.get(1)?,
        last_scan_timestamp: row.get(2)?,
    })
}

pub fn get_by_path(conn: &Connection, project_path: &str) -> Result<Option<ProjectRecord>> {
    let result = conn
        .query_row(
            r#"
        SELECT id, project_path, last_scan_timestamp
        FROM projects
        WHERE project_path = ?1
        "#,
            [project_path],
            from_row,
        )
        .optional()?;

    Ok(result)
}

pub fn get(conn: &Connection, id: ProjectId) -> Result<Option<ProjectRecord>> {
    let result = conn
        .query_row(
            r#"
        SELECT id, project_path, last_scan_timestamp
        FROM projects
        WHERE id = ?1
        "#,
            [id.get()],
            from_row,
        )
        .optional()?;

    Ok(result)
}

/// Insert the project if it is new; existing rows are left untouched.
pub fn insert_if_missing(conn: &Connection, project_path: &str) -> Result<()> {
    conn.execute(
        r#"
        INSERT INTO projects (project_path, last_scan_timestamp)
        VALUES (?1, ?2)
        ON CONFLICT(project_path) DO NOTHING
        "#,
        params![project_path, NOT_SCANNED_YET],
    )?;

    Ok(())
}

pub fn list(conn: &Connection) -> Result<Vec<ProjectSummary>> {
    let mut stmt = conn.prepare(
        r#"
        SELECT p.id, p.project_path, p.last_scan_timestamp, COUNT(f.relative_path)
        FROM projects p
        LEFT JOIN file_metadata f ON f.project_id = p.id
        GROUP BY p.id
        ORDER BY p.project_path ASC
        "#,
    )?;

    let projects = stmt
        .query_map([], |row| {
            Ok(ProjectSummary {
                id: ProjectId::new(row.get(0)?),
                project_path: row.get(1)?,
                last_scan_timestamp: row.get(2)?,
                file_count: row.get::<_, i64>(3)? as usize,
            })
        })?
        .collect::<std::result::Result<Vec<_>, rusqlite::Error>>()?;

    Ok(projects)
}

/// Returns the number of rows removed (0 or 1).
pub fn delete(conn: &Connection, project_path: &str) -> Result<usize> {
    let removed = conn.execute(
        "DELETE FROM projects WHERE project_path = ?1",
        [project_path],
    )?;
    Ok(removed)
}

pub fn set_last_scan(conn: &Connection, id: ProjectId, timestamp: &str) -> Result<()> {
    conn.execute(
        "UPDATE projects SET last_scan_timestamp = ?1 WHERE id = ?2",
        params![timestamp, id.get()],
    )?;
    Ok(())
}

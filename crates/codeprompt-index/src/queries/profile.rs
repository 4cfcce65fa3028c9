use codeprompt_types::ProjectId;
use rusqlite::{Connection, OptionalExtension, params};

use crate::Result;
use crate::records::ProfileRecord;

pub fn upsert(conn: &Connection, project_id: ProjectId, name: &str, data_json: &str) -> Result<()> {
    conn.execute(
        r#"
        INSERT INTO profiles (project_id, profile_name, profile_data_json)
        VALUES (?1, ?2, ?3)
        ON CONFLICT(project_id, profile_name) DO UPDATE SET
            profile_data_json = excluded.profile_data_json
        "#,
        params![project_id.get(), name, data_json],
    )?;

    Ok(())
}

pub fn get(conn: &Connection, project_id: ProjectId, name: &str) -> Result<Option<String>> {
    let result = conn
        .query_row(
            r#"
        SELECT profile_data_json
        FROM profiles
        WHERE project_id = ?1 AND profile_name = ?2
        "#,
            params![project_id.get(), name],
            |row| row.get(0),
        )
        .optional()?;

    Ok(result)
}

pub fn list(conn: &Connection, project_id: ProjectId) -> Result<Vec<ProfileRecord>> {
    let mut stmt = conn.prepare(
        r#"
        SELECT profile_name, profile_data_json
        FROM profiles
        WHERE project_id = ?1
        ORDER BY profile_name ASC
        "#,
    )?;

    let profiles = stmt
        .query_map([project_id.get()], |row| {
            Ok(ProfileRecord {
                name: row.get(0)?,
                data_json: row.get(1)?,
            })
        })?
        .collect::<std::result::Result<Vec<_>, rusqlite::Error>>()?;

    Ok(profiles)
}

/// Returns the number of rows removed (0 or 1).
pub fn delete(conn: &Connection, project_id: ProjectId, name: &str) -> Result<usize> {
    let removed = conn.execute(
        "DELETE FROM profiles WHERE project_id = ?1 AND profile_name = ?2",
        params![project_id.get(), name],
    )?;
    Ok(removed)
}

use rusqlite::Connection;

use crate::Result;

// Schema version (increment when changing table definitions)
pub const SCHEMA_VERSION: i32 = 1;

// Version 0 is an unversioned database with the same layout; adopt it as-is.
pub fn init_schema(conn: &Connection) -> Result<()> {
    let current_version: i32 = conn.query_row("PRAGMA user_version", [], |row| row.get(0))?;

    if current_version != 0 && current_version != SCHEMA_VERSION {
        drop_all_tables(conn)?;
    }

    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS projects (
            id                  INTEGER PRIMARY KEY AUTOINCREMENT,
            project_path        TEXT NOT NULL UNIQUE,
            last_scan_timestamp TEXT NOT NULL
        );

        CREATE TABLE IF NOT EXISTS file_metadata (
            project_id    INTEGER NOT NULL,
            relative_path TEXT NOT NULL,
            filename      TEXT NOT NULL,
            extension     TEXT,
            size_bytes    INTEGER NOT NULL,
            line_count    INTEGER NOT NULL,
            is_text       BOOLEAN NOT NULL,
            last_mod_time TEXT NOT NULL,
            content_hash  TEXT NOT NULL,
            UNIQUE (project_id, relative_path),
            FOREIGN KEY (project_id) REFERENCES projects(id) ON DELETE CASCADE
        );

        CREATE TABLE IF NOT EXISTS profiles (
            id                INTEGER PRIMARY KEY AUTOINCREMENT,
            project_id        INTEGER NOT NULL,
            profile_name      TEXT NOT NULL,
            profile_data_json TEXT NOT NULL,
            UNIQUE (project_id, profile_name),
            FOREIGN KEY (project_id) REFERENCES projects(id) ON DELETE CASCADE
        );

        CREATE INDEX IF NOT EXISTS idx_file_metadata_project_id ON file_metadata(project_id);
        "#,
    )?;

    conn.execute(&format!("PRAGMA user_version = {}", SCHEMA_VERSION), [])?;

    Ok(())
}

fn drop_all_tables(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
        DROP TABLE IF EXISTS file_metadata;
        DROP TABLE IF EXISTS profiles;
        DROP TABLE IF EXISTS projects;
        "#,
    )?;
    Ok(())
}

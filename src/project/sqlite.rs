//! SQLite-based project store.
//!
//! Article, script and settings are stored as JSON columns; listing reads only
//! the columns it needs plus the scene count from the script JSON.

use super::{now, NewProject, Project, ProjectStore, ProjectSummary};
use crate::error::{Result, StoryreelError};
use async_trait::async_trait;
use chrono::{DateTime, SecondsFormat, Utc};
use rusqlite::{params, Connection, OptionalExtension, Row};
use std::path::Path;
use std::sync::{Mutex, MutexGuard};
use tracing::{debug, info, instrument};
use uuid::Uuid;

const SCHEMA: &str = r#"
    CREATE TABLE IF NOT EXISTS projects (
        id TEXT PRIMARY KEY,
        title TEXT NOT NULL,
        url TEXT NOT NULL,
        article_json TEXT,
        script_json TEXT,
        settings_json TEXT NOT NULL,
        created_at TEXT NOT NULL,
        updated_at TEXT NOT NULL
    );

    CREATE INDEX IF NOT EXISTS idx_projects_updated_at ON projects(updated_at);
"#;

/// id, title, url, article, script, settings, created, updated
type ProjectRow = (
    String,
    String,
    String,
    Option<String>,
    Option<String>,
    String,
    String,
    String,
);

/// SQLite-based project store.
pub struct SqliteProjectStore {
    conn: Mutex<Connection>,
}

impl SqliteProjectStore {
    /// Open (or create) the project database at `path`.
    #[instrument(skip_all)]
    pub fn new(path: &Path) -> Result<Self> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let conn = Connection::open(path)?;
        conn.execute_batch("PRAGMA journal_mode=WAL;")?;
        conn.execute_batch(SCHEMA)?;

        info!("Initialized project store at {:?}", path);

        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// Create an in-memory store (useful for testing).
    pub fn in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        conn.execute_batch(SCHEMA)?;

        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    fn lock(&self) -> Result<MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|e| StoryreelError::ProjectStore(format!("Failed to acquire lock: {}", e)))
    }

    fn read_row(row: &Row<'_>) -> rusqlite::Result<ProjectRow> {
        Ok((
            row.get(0)?,
            row.get(1)?,
            row.get(2)?,
            row.get(3)?,
            row.get(4)?,
            row.get(5)?,
            row.get(6)?,
            row.get(7)?,
        ))
    }

    fn decode_project(
        (id, title, url, article_json, script_json, settings_json, created_at, updated_at): ProjectRow,
    ) -> Result<Project> {
        Ok(Project {
            id: parse_id(&id)?,
            title,
            url,
            article_data: article_json.map(|j| serde_json::from_str(&j)).transpose()?,
            script: script_json.map(|j| serde_json::from_str(&j)).transpose()?,
            settings: serde_json::from_str(&settings_json)?,
            created_at: parse_timestamp(&created_at),
            updated_at: parse_timestamp(&updated_at),
        })
    }
}

fn parse_id(id: &str) -> Result<Uuid> {
    Uuid::parse_str(id)
        .map_err(|e| StoryreelError::ProjectStore(format!("Invalid project id {}: {}", id, e)))
}

fn parse_timestamp(value: &str) -> DateTime<Utc> {
    DateTime::parse_from_rfc3339(value)
        .map(|dt| dt.with_timezone(&Utc))
        .unwrap_or_else(|_| Utc::now())
}

/// Fixed-width RFC 3339 so lexical order matches time order.
fn format_timestamp(value: &DateTime<Utc>) -> String {
    value.to_rfc3339_opts(SecondsFormat::Micros, true)
}

fn encode_optional<T: serde::Serialize>(value: &Option<T>) -> Result<Option<String>> {
    Ok(value.as_ref().map(serde_json::to_string).transpose()?)
}

#[async_trait]
impl ProjectStore for SqliteProjectStore {
    #[instrument(skip(self, project), fields(title = %project.title))]
    async fn create(&self, project: NewProject) -> Result<Project> {
        project.validate()?;
        let project = project.into_project(Uuid::new_v4(), now());

        let conn = self.lock()?;
        conn.execute(
            r#"
            INSERT INTO projects
            (id, title, url, article_json, script_json, settings_json, created_at, updated_at)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)
            "#,
            params![
                project.id.to_string(),
                project.title,
                project.url,
                encode_optional(&project.article_data)?,
                encode_optional(&project.script)?,
                serde_json::to_string(&project.settings)?,
                format_timestamp(&project.created_at),
                format_timestamp(&project.updated_at),
            ],
        )?;

        info!("Created project {}", project.id);
        Ok(project)
    }

    #[instrument(skip(self))]
    async fn list(&self, limit: usize) -> Result<Vec<ProjectSummary>> {
        let conn = self.lock()?;

        let mut stmt = conn.prepare(
            r#"
            SELECT id, title, url, script_json, created_at, updated_at
            FROM projects
            ORDER BY updated_at DESC
            LIMIT ?1
            "#,
        )?;

        let rows = stmt.query_map(params![limit as i64], |row| {
            Ok((
                row.get::<_, String>(0)?,
                row.get::<_, String>(1)?,
                row.get::<_, String>(2)?,
                row.get::<_, Option<String>>(3)?,
                row.get::<_, String>(4)?,
                row.get::<_, String>(5)?,
            ))
        })?;

        let mut summaries = Vec::new();
        for row in rows {
            let (id, title, url, script_json, created_at, updated_at) = row?;
            let scene_count = script_json
                .and_then(|j| serde_json::from_str::<serde_json::Value>(&j).ok())
                .and_then(|v| v["scenes"].as_array().map(|a| a.len()))
                .unwrap_or(0);

            summaries.push(ProjectSummary {
                id: parse_id(&id)?,
                title,
                url,
                scene_count,
                created_at: parse_timestamp(&created_at),
                updated_at: parse_timestamp(&updated_at),
            });
        }

        debug!("Listed {} projects", summaries.len());
        Ok(summaries)
    }

    #[instrument(skip(self))]
    async fn get(&self, id: &Uuid) -> Result<Option<Project>> {
        let conn = self.lock()?;

        let row = conn
            .query_row(
                r#"
                SELECT id, title, url, article_json, script_json, settings_json,
                       created_at, updated_at
                FROM projects
                WHERE id = ?1
                "#,
                params![id.to_string()],
                Self::read_row,
            )
            .optional()?;

        row.map(Self::decode_project).transpose()
    }

    #[instrument(skip(self, project))]
    async fn update(&self, id: &Uuid, project: NewProject) -> Result<Project> {
        project.validate()?;

        let conn = self.lock()?;
        let created_at: String = conn
            .query_row(
                "SELECT created_at FROM projects WHERE id = ?1",
                params![id.to_string()],
                |row| row.get(0),
            )
            .optional()?
            .ok_or_else(|| StoryreelError::ProjectNotFound(id.to_string()))?;
        let project = project.into_project(*id, parse_timestamp(&created_at));

        let changed = conn.execute(
            r#"
            UPDATE projects
            SET title = ?2, url = ?3, article_json = ?4, script_json = ?5,
                settings_json = ?6, updated_at = ?7
            WHERE id = ?1
            "#,
            params![
                project.id.to_string(),
                project.title,
                project.url,
                encode_optional(&project.article_data)?,
                encode_optional(&project.script)?,
                serde_json::to_string(&project.settings)?,
                format_timestamp(&project.updated_at),
            ],
        )?;
        if changed == 0 {
            return Err(StoryreelError::ProjectNotFound(id.to_string()));
        }

        info!("Updated project {}", project.id);
        Ok(project)
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: &Uuid) -> Result<bool> {
        let conn = self.lock()?;
        let deleted = conn.execute("DELETE FROM projects WHERE id = ?1", params![id.to_string()])?;

        info!("Deleted {} project(s) with id {}", deleted, id);
        Ok(deleted > 0)
    }
}

use crate::config::{Config, IN_MEMORY};
use crate::model::{Note, NoteId, NoteInput};
use crate::store::NoteStore;
use anyhow::Result;
use async_trait::async_trait;
use libsql::{Builder, Connection, Database as LibsqlDatabase};
use std::path::Path;
use std::time::Duration;

const SYSTEM_MIGRATIONS: &[(&str, &str)] =
    &[("system/000_migrations_table.sql", include_str!("migrations/system/000_migrations_table.sql"))];

const MIGRATIONS: &[(&str, &str)] = &[("001_notes.sql", include_str!("migrations/001_notes.sql"))];

const NOTE_COLUMNS: &str = "id, title, note_text";

pub struct Database {
    db: LibsqlDatabase,
    conn: Connection,
    replica: bool,
}

impl Database {
    pub fn connection(&self) -> &Connection {
        &self.conn
    }

    pub fn is_replica(&self) -> bool {
        self.replica
    }

    /// Pulls remote changes into an embedded replica. No-op for local databases.
    pub async fn sync(&self) -> Result<()> {
        if self.replica {
            self.db
                .sync()
                .await
                .map_err(|e| anyhow::anyhow!("sync failed: {}", e))?;
        }
        Ok(())
    }

    async fn is_migration_applied(conn: &Connection, name: &str) -> Result<bool> {
        let query = "SELECT 1 FROM _migrations WHERE name = ?";
        match conn.query(query, libsql::params![name]).await {
            Ok(mut rows) => Ok(rows.next().await?.is_some()),
            Err(e) => {
                if e.to_string().contains("no such table") {
                    Ok(false)
                } else {
                    Err(e.into())
                }
            }
        }
    }

    async fn record_migration(conn: &Connection, name: &str) -> Result<()> {
        let query = r#"
            INSERT INTO _migrations (name, applied_at)
            VALUES (?, strftime('%Y-%m-%dT%H:%M:%fZ', 'now'))
        "#;
        conn.execute(query, libsql::params![name]).await?;
        Ok(())
    }

    async fn run_migration(conn: &Connection, name: &str, sql: &str) -> Result<()> {
        if Self::is_migration_applied(conn, name).await? {
            tracing::debug!("migration {} already applied, skipping", name);
            return Ok(());
        }

        tracing::info!("applying migration: {}", name);
        conn.execute_batch(sql)
            .await
            .map_err(|e| anyhow::anyhow!("failed to execute migration {name}: {e}"))?;

        Self::record_migration(conn, name).await?;
        Ok(())
    }

    /// Opens the database named in the config. Relative file names resolve against `data_dir`.
    pub async fn new(cfg: &Config, data_dir: &Path) -> Result<Self> {
        let name = cfg.app.get_db();

        let db = match (&cfg.app.turso_url, &cfg.app.turso_auth_token) {
            (Some(url), Some(token)) => {
                tracing::info!("[db] running in synced database mode (offline writes)");
                let sync_interval = Duration::from_secs(cfg.app.sync_interval_seconds);
                Builder::new_synced_database(data_dir.join(name), url.clone(), token.clone())
                    .sync_interval(sync_interval)
                    .build()
                    .await?
            }
            _ if name == IN_MEMORY => {
                tracing::info!("[db] running in-memory, notes are lost on exit");
                Builder::new_local(IN_MEMORY).build().await?
            }
            _ => Builder::new_local(data_dir.join(name)).build().await?,
        };

        Self::setup(db, cfg.app.is_replica()).await
    }

    /// Fresh in-memory database with the schema applied.
    pub async fn in_memory() -> Result<Self> {
        let db = Builder::new_local(IN_MEMORY).build().await?;
        Self::setup(db, false).await
    }

    async fn setup(db: LibsqlDatabase, replica: bool) -> Result<Self> {
        let conn = db.connect()?;
        conn.query("SELECT 1", ()).await?;

        for (filename, sql) in SYSTEM_MIGRATIONS.iter().chain(MIGRATIONS) {
            Self::run_migration(&conn, filename, sql).await?;
        }

        Ok(Database { db, conn, replica })
    }

    fn row_to_note(row: &libsql::Row) -> Result<Note> {
        Ok(Note {
            id: NoteId::from_row(row.get::<String>(0)?),
            title: row.get::<Option<String>>(1)?,
            note_text: row.get::<Option<String>>(2)?,
        })
    }

    async fn query_one(&self, query: &str, params: impl libsql::params::IntoParams) -> Result<Option<Note>> {
        let mut rows = self.conn.query(query, params).await?;
        match rows.next().await? {
            Some(row) => Ok(Some(Self::row_to_note(&row)?)),
            None => Ok(None),
        }
    }
}

#[async_trait]
impl NoteStore for Database {
    async fn find(&self) -> Result<Vec<Note>> {
        let query = format!("SELECT {NOTE_COLUMNS} FROM notes ORDER BY rowid");
        let mut rows = self.conn.query(&query, ()).await?;

        let mut notes = vec![];
        while let Some(row) = rows.next().await? {
            notes.push(Self::row_to_note(&row)?);
        }
        Ok(notes)
    }

    async fn create(&self, input: NoteInput) -> Result<Note> {
        let query = format!("INSERT INTO notes (title, note_text) VALUES (?, ?) RETURNING {NOTE_COLUMNS}");
        match self.query_one(&query, libsql::params![input.title, input.note]).await? {
            Some(note) => Ok(note),
            None => anyhow::bail!("Failed to create note"),
        }
    }

    async fn find_by_id(&self, id: &NoteId) -> Result<Option<Note>> {
        let query = format!("SELECT {NOTE_COLUMNS} FROM notes WHERE id = ?");
        self.query_one(&query, libsql::params![id.as_str()]).await
    }

    async fn update(&self, id: &NoteId, input: NoteInput) -> Result<Option<Note>> {
        let query = format!(
            r#"
            UPDATE notes
            SET title = COALESCE(?, title), note_text = COALESCE(?, note_text)
            WHERE id = ?
            RETURNING {NOTE_COLUMNS}
            "#
        );
        self.query_one(&query, libsql::params![input.title, input.note, id.as_str()])
            .await
    }

    async fn remove(&self, id: &NoteId) -> Result<Option<Note>> {
        let query = format!("DELETE FROM notes WHERE id = ? RETURNING {NOTE_COLUMNS}");
        self.query_one(&query, libsql::params![id.as_str()]).await
    }
}

use anyhow::Result;
use chrono::Utc;
use rusqlite::Connection;
use std::path::PathBuf;

use crate::models::Job;

const SAVED_JOBS_KEY: &str = "saved_jobs";

/// Opaque get/set-string storage: one SQLite table acting as a key-value
/// store, one key per serialized collection.
pub struct Storage {
    conn: Connection,
}

impl Storage {
    pub fn open() -> Result<Self> {
        let path = Self::default_path()?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        Self::from_connection(Connection::open(&path)?)
    }

    #[cfg(test)]
    pub fn open_in_memory() -> Result<Self> {
        Self::from_connection(Connection::open_in_memory()?)
    }

    fn from_connection(conn: Connection) -> Result<Self> {
        conn.execute_batch(
            r#"
            CREATE TABLE IF NOT EXISTS kv (
                key TEXT PRIMARY KEY,
                value TEXT NOT NULL
            );
            "#,
        )?;
        Ok(Self { conn })
    }

    fn default_path() -> Result<PathBuf> {
        // Use XDG data directory or fallback
        if let Some(proj_dirs) = directories::ProjectDirs::from("", "", "jobfinder") {
            Ok(proj_dirs.data_dir().join("jobfinder.db"))
        } else {
            Ok(PathBuf::from("jobfinder.db"))
        }
    }

    pub fn get(&self, key: &str) -> Result<Option<String>> {
        let result = self
            .conn
            .query_row("SELECT value FROM kv WHERE key = ?1", [key], |row| {
                row.get(0)
            });
        match result {
            Ok(value) => Ok(Some(value)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    pub fn set(&self, key: &str, value: &str) -> Result<()> {
        self.conn.execute(
            "INSERT INTO kv (key, value) VALUES (?1, ?2)
             ON CONFLICT(key) DO UPDATE SET value = excluded.value",
            [key, value],
        )?;
        Ok(())
    }
}

/// Single source of truth for which jobs the user has saved. Hydrated once
/// at open; every mutation rewrites the whole collection (last writer wins).
pub struct JobStore {
    storage: Storage,
    saved: Vec<Job>,
}

impl JobStore {
    pub fn open() -> Result<Self> {
        Ok(Self::with_storage(Storage::open()?))
    }

    /// Unreadable or corrupt storage degrades to an empty collection so a
    /// bad disk state never blocks startup.
    pub fn with_storage(storage: Storage) -> Self {
        let saved = match storage.get(SAVED_JOBS_KEY) {
            Ok(Some(raw)) => match serde_json::from_str(&raw) {
                Ok(jobs) => jobs,
                Err(e) => {
                    eprintln!("Failed to load saved jobs: {}", e);
                    Vec::new()
                }
            },
            Ok(None) => Vec::new(),
            Err(e) => {
                eprintln!("Failed to load saved jobs: {}", e);
                Vec::new()
            }
        };
        Self { storage, saved }
    }

    pub fn saved_jobs(&self) -> &[Job] {
        &self.saved
    }

    /// Idempotent: saving an id that is already present leaves the
    /// collection unchanged and skips the write.
    pub fn save_job(&mut self, job: &Job) -> &[Job] {
        if self.is_saved(&job.id) {
            return &self.saved;
        }
        let mut entry = job.clone();
        entry.is_saved = true;
        entry.saved_at = Some(Utc::now());
        self.saved.push(entry);
        self.persist();
        &self.saved
    }

    /// Idempotent: removing an absent id is a no-op with no write.
    pub fn remove_job(&mut self, id: &str) -> &[Job] {
        let before = self.saved.len();
        self.saved.retain(|job| job.id != id);
        if self.saved.len() != before {
            self.persist();
        }
        &self.saved
    }

    pub fn is_saved(&self, id: &str) -> bool {
        self.saved.iter().any(|job| job.id == id)
    }

    // Always snapshots the collection as it stands right now, so rapid
    // successive mutations each persist the latest state. A failed write is
    // logged and accepted: in-memory state stays authoritative for the
    // session, the mutation may just not survive the next cold start.
    fn persist(&self) {
        let payload = match serde_json::to_string(&self.saved) {
            Ok(payload) => payload,
            Err(e) => {
                eprintln!("Failed to serialize saved jobs: {}", e);
                return;
            }
        };
        if let Err(e) = self.storage.set(SAVED_JOBS_KEY, &payload) {
            eprintln!("Failed to persist saved jobs: {}", e);
        }
    }
}

//! Relational store gateway.
//!
//! A [`Database`] owns one SQLite connection behind a mutex. Callers borrow it for a single unit
//! of work with [`Database::with_connection`]; the handle itself is cheap to clone and is passed
//! explicitly to services rather than held in a global.

pub mod repository;
pub mod sqlite;

pub use sqlite::*;

use crate::config::CoreConfig;
use rusqlite::Connection;
use std::sync::{Arc, Mutex};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DatabaseError {
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("Migration failed at version {version}: {reason}")]
    MigrationFailed { version: i64, reason: String },

    #[error("database connection lock poisoned")]
    LockPoisoned,
}

/// Shared handle to the relational store.
#[derive(Clone, Debug)]
pub struct Database {
    conn: Arc<Mutex<Connection>>,
}

impl Database {
    /// Open the store described by `cfg`, running any pending migrations.
    pub fn open(cfg: &CoreConfig) -> Result<Self, DatabaseError> {
        let conn = if cfg.is_in_memory() {
            open_memory_database()?
        } else {
            open_database(cfg.database_path())?
        };
        tracing::info!(
            path = %cfg.database_path().display(),
            "database ready"
        );
        Ok(Self::from_connection(conn))
    }

    /// Open a private in-memory store (for testing and ephemeral runs).
    pub fn open_in_memory() -> Result<Self, DatabaseError> {
        Ok(Self::from_connection(open_memory_database()?))
    }

    pub fn from_connection(conn: Connection) -> Self {
        Self {
            conn: Arc::new(Mutex::new(conn)),
        }
    }

    /// Run `f` with exclusive access to the connection.
    ///
    /// The lock is held until `f` returns, so a transaction opened inside `f` is never observed
    /// half-applied by another caller of the same handle.
    pub fn with_connection<T, E, F>(&self, f: F) -> Result<T, E>
    where
        F: FnOnce(&mut Connection) -> Result<T, E>,
        E: From<DatabaseError>,
    {
        let mut guard = self.conn.lock().map_err(|_| DatabaseError::LockPoisoned)?;
        f(&mut guard)
    }
}

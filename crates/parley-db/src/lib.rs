//! # parley-db
//!
//! libSQL-backed usage ledger for Parley.
//!
//! The usage ledger is the one piece of state shared across concurrent
//! requests and across process instances, so it lives in the database
//! rather than in process memory. Everything else in the analysis pipeline
//! is pure and needs no synchronization.
//!
//! Uses the `libsql` crate (C `SQLite` fork) — stable API, `RETURNING`
//! support, and embedded-replica compatibility if the ledger ever moves to
//! a hosted database.

pub mod error;
pub mod helpers;
pub mod ledger;
mod migrations;

pub use ledger::{BudgetPolicy, UsageDay};

use error::DatabaseError;
use libsql::Builder;

/// Central database handle for Parley's persisted state.
///
/// Wraps a libSQL database and connection; migrations run automatically on
/// open.
pub struct ParleyDb {
    #[allow(dead_code)]
    db: libsql::Database,
    conn: libsql::Connection,
}

impl ParleyDb {
    /// Open a local database at the given path (`":memory:"` for tests).
    ///
    /// Runs migrations automatically on first open.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the database cannot be opened or
    /// migrations fail.
    pub async fn open_local(path: &str) -> Result<Self, DatabaseError> {
        let db = Builder::new_local(path).build().await?;
        let conn = db.connect()?;

        let parley_db = Self { db, conn };
        parley_db.run_migrations().await?;
        Ok(parley_db)
    }

    /// Open the database at the configured path.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the database cannot be opened or
    /// migrations fail.
    pub async fn open_from(config: &parley_config::DatabaseConfig) -> Result<Self, DatabaseError> {
        Self::open_local(&config.path).await
    }

    /// Access the underlying libSQL connection for direct queries.
    #[must_use]
    pub const fn conn(&self) -> &libsql::Connection {
        &self.conn
    }
}

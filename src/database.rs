//! Database initialization and table definitions
//!
//! This module handles the setup and configuration of the embedded redb database.
//! It defines the database tables and provides initialization functions.

use redb::{Database, TableDefinition};
use std::sync::Arc;

/// Main table for storing movie records
///
/// Key: store-generated movie ID as string
/// Value: JSON-serialized Movie as string
///
/// Example:
/// - Key: "1767000000000000Ab3xYz"
/// - Value: '{"id":"1767000000000000Ab3xYz","movieName":"Foo",...}'
///
/// The microsecond-timestamp prefix of the key keeps the table's natural
/// B-Tree ordering equal to insertion order, so listing movies needs no
/// secondary index.
pub const TABLE_MOVIES: TableDefinition<&str, &str> = TableDefinition::new("movies_v1");

/// Table holding the singleton admin counters record
///
/// Key: always [`ADMIN_KEY`]
/// Value: JSON-serialized AdminCounters as string
///
/// The record is created lazily on the first visit-tracking call, so this
/// table holds either zero or one row.
pub const TABLE_ADMIN: TableDefinition<&str, &str> = TableDefinition::new("admin_v1");

/// Fixed key under which the singleton counters record is stored
pub const ADMIN_KEY: &str = "counters";

/// Application state shared across all request handlers
///
/// Wraps the database in an Arc for thread-safe sharing across async
/// handlers, plus the HTTP client and base URL used by the download proxy.
#[derive(Clone)]
pub struct AppState {
    /// Thread-safe reference to the embedded database
    pub db: Arc<Database>,

    /// Reused connection pool for upstream file-host requests
    pub http: reqwest::Client,

    /// Base URL of the external file host (e.g. "https://drive.google.com")
    pub upstream_url: String,
}

impl AppState {
    /// Builds the shared state from an opened database
    ///
    /// The upstream file-host base URL is read from the `UPSTREAM_URL`
    /// environment variable and defaults to Google Drive.
    pub fn new(db: Database) -> Self {
        let upstream_url = std::env::var("UPSTREAM_URL")
            .unwrap_or_else(|_| "https://drive.google.com".to_string());

        AppState {
            db: Arc::new(db),
            http: reqwest::Client::new(),
            upstream_url,
        }
    }
}

/// Initializes the embedded database and creates required tables
///
/// This function:
/// 1. Creates or opens the database file at the specified path
/// 2. Opens both the movies table and the admin counters table
/// 3. Commits the transaction to ensure tables are persisted
///
/// # Arguments
///
/// * `db_path` - File path where the database should be stored (e.g., "data.db")
///
/// # Returns
///
/// * `Ok(Database)` - Successfully initialized database instance
/// * `Err(redb::Error)` - Database initialization error
pub fn init_db(db_path: &str) -> Result<Database, redb::Error> {
    // Create or open the database file
    let db = Database::create(db_path)?;

    // Begin a write transaction to create tables
    let write_txn = db.begin_write()?;
    {
        write_txn.open_table(TABLE_MOVIES)?;
        write_txn.open_table(TABLE_ADMIN)?;
    }

    // Commit the transaction to persist the table structures
    write_txn.commit()?;

    Ok(db)
}

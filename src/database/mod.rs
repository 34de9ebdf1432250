//! navsync database layer.
//!
//! Provides the SQLite connection and schema migrations behind [`crate::storage::SqliteStorage`].
//!
//! # Usage
//!
//! ```no_run
//! use navsync::database::Database;
//!
//! let db = Database::open("navsync.db").expect("failed to open database");
//! let conn = db.connection();
//! ```

pub mod connection;
pub mod migrations;

pub use connection::Database;

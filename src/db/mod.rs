//! Database module: the credential store backing both login endpoints.
//!
//! Layout:
//! - `models.rs`: row structs and the dynamic row shape returned by interpolated queries
//! - `schema.rs`: SQL DDL and seed data (SQLite)
//! - `sqlite.rs`: `CredentialStore`, lifecycle and read paths

pub mod models;
pub mod schema;
pub mod sqlite;

pub use models::{DynamicRow, PublicUser, UserSummary};
pub use schema::{SQLITE_INIT, SQLITE_SEED};
pub use sqlite::{CredentialStore, InitOutcome, SqlitePool};

use chrono::NaiveDateTime;
use serde::Serialize;
use sqlx::FromRow;

/// A row as the engine returned it, keyed by column name. Interpolated queries can produce any
/// shape (a UNION decides its own columns), so these rows are never typed.
pub type DynamicRow = serde_json::Map<String, serde_json::Value>;

/// The hardened login projection. There is no password field to leak.
#[derive(Debug, Clone, Serialize, PartialEq, FromRow)]
pub struct PublicUser {
    pub id: i64,
    pub username: String,
    pub role: Option<String>,
}

#[derive(Debug, Clone, Serialize, PartialEq, FromRow)]
pub struct UserSummary {
    pub id: i64,
    pub username: String,
    pub role: Option<String>,
    pub created_at: Option<NaiveDateTime>,
}

use axum::{Json, http::StatusCode, response::IntoResponse};
use sqlx::Error as SqlxError;
use thiserror::Error as ThisError;

use crate::types::response::{
    ApiErrorBody, ApiErrorResponse, MalformedLoginBody, MalformedSearchBody, SafeFailureBody,
};
use crate::types::{Endpoint, timestamp};

#[derive(Debug, ThisError)]
pub enum LabError {
    #[error("input exceeds {limit} characters")]
    InputTooLong { limit: usize },

    /// The engine rejected interpolated SQL. `message` is the engine's own text.
    #[error("malformed query on {endpoint}: {message}")]
    MalformedQuery {
        endpoint: Endpoint,
        query: String,
        message: String,
    },

    #[error("query execution failed")]
    QueryFailed,

    #[error("missing `search` parameter")]
    MissingSearchTerm,

    #[error("Database error: {0}")]
    DatabaseError(#[from] SqlxError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Config error: {0}")]
    Config(#[from] Box<figment::Error>),
}

impl From<figment::Error> for LabError {
    fn from(e: figment::Error) -> Self {
        LabError::Config(Box::new(e))
    }
}

impl IntoResponse for LabError {
    fn into_response(self) -> axum::response::Response {
        match self {
            LabError::InputTooLong { .. } => (
                StatusCode::BAD_REQUEST,
                Json(SafeFailureBody {
                    endpoint: Endpoint::LoginSafe.label(),
                    success: false,
                    error: "input exceeds length limit",
                    security_info: "limiting input length is a baseline security measure",
                }),
            )
                .into_response(),
            LabError::QueryFailed => (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(SafeFailureBody {
                    endpoint: Endpoint::LoginSafe.label(),
                    success: false,
                    error: "query execution failed",
                    security_info: "parameterized queries prevented SQL injection",
                }),
            )
                .into_response(),
            LabError::MalformedQuery {
                endpoint: Endpoint::AdvancedVuln,
                query,
                message,
            } => (
                StatusCode::BAD_REQUEST,
                Json(MalformedSearchBody {
                    error: message,
                    executed_sql: query,
                    note: "SQL errors usually indicate an injection attempt",
                }),
            )
                .into_response(),
            LabError::MalformedQuery {
                endpoint,
                query,
                message,
            } => (
                StatusCode::BAD_REQUEST,
                Json(MalformedLoginBody {
                    endpoint: endpoint.label(),
                    success: false,
                    error: message,
                    executed_sql: query,
                    security_warning: "a SQL syntax error may indicate an injection attempt",
                    timestamp: timestamp(),
                }),
            )
                .into_response(),
            LabError::MissingSearchTerm => (
                StatusCode::BAD_REQUEST,
                Json(serde_json::json!({ "error": "search parameter is required" })),
            )
                .into_response(),
            LabError::DatabaseError(_) | LabError::Io(_) | LabError::Config(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiErrorResponse {
                    error: ApiErrorBody {
                        code: "INTERNAL_ERROR".to_string(),
                        message: "An internal server error occurred.".to_string(),
                    },
                }),
            )
                .into_response(),
        }
    }
}

/// Engine text for a failed statement, without sqlx's own prefix.
pub fn engine_message(err: &SqlxError) -> String {
    match err {
        SqlxError::Database(db) => db.message().to_string(),
        SqlxError::Protocol(msg) => msg.clone(),
        other => other.to_string(),
    }
}

use axum::{
    Json,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use tracing::{error, info};

use crate::db::InitOutcome;
use crate::error::LabError;
use crate::router::LabState;
use crate::types::response::{SetupResponse, StatsResponse, UsersResponse};
use crate::types::timestamp;

/// GET /setup -> create and seed the store if it does not exist yet.
pub async fn setup(State(state): State<LabState>) -> Response {
    match state.store.init().await {
        Ok(outcome) => {
            info!(?outcome, "database setup requested over HTTP");
            let message = match outcome {
                InitOutcome::Created => "database initialized",
                InitOutcome::AlreadyPresent => "database already initialized",
            };
            Json(SetupResponse {
                status: "success",
                message: message.to_string(),
                timestamp: Some(timestamp()),
            })
            .into_response()
        }
        Err(e) => {
            error!(error = %e, "database initialization failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(SetupResponse {
                    status: "error",
                    message: format!("database initialization failed: {e}"),
                    timestamp: None,
                }),
            )
                .into_response()
        }
    }
}

/// GET /users -> every user without the password column.
pub async fn list_users(State(state): State<LabState>) -> Result<Json<UsersResponse>, LabError> {
    let users = state.store.list_users().await?;
    Ok(Json(UsersResponse {
        total_users: users.len(),
        users,
        timestamp: timestamp(),
    }))
}

/// GET /stats -> attack log totals and the most recent entries.
pub async fn attack_stats(
    State(state): State<LabState>,
) -> Result<Json<StatsResponse>, LabError> {
    let log = &state.attack_log;
    Ok(Json(StatsResponse {
        database_file: state.store.path().display().to_string(),
        attack_log_file: log.path().display().to_string(),
        log_exists: log.exists().await?,
        total_attacks: log.count().await?,
        recent_attacks: log.read_recent(state.recent_attacks).await?,
        timestamp: timestamp(),
    }))
}

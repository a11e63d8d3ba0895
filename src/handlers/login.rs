use axum::{
    Json,
    extract::{Query, State},
};
use serde::Deserialize;

use crate::error::LabError;
use crate::router::LabState;
use crate::types::response::{
    PROTECTION_MECHANISMS, SEARCH_EXAMPLE_PAYLOADS, SafeAnalysis, SafeLoginResponse,
    SearchResponse, VulnerableAnalysis, VulnerableLoginResponse,
};
use crate::types::{Endpoint, timestamp};

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct LoginQuery {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct SearchQuery {
    pub search: String,
}

/// GET /login_vuln -> interpolated login. A malformed statement comes back as 400 with the
/// engine error and the executed SQL.
pub async fn login_vuln(
    State(state): State<LabState>,
    Query(q): Query<LoginQuery>,
) -> Result<Json<VulnerableLoginResponse>, LabError> {
    let login = state
        .unsafe_authenticator()
        .authenticate(&q.username, &q.password)
        .await?;

    Ok(Json(VulnerableLoginResponse {
        endpoint: Endpoint::LoginVuln.label(),
        success: login.success(),
        user_count: login.user_count(),
        executed_sql: login.executed_sql,
        users: login.rows,
        security_analysis: VulnerableAnalysis {
            vulnerability_detected: true,
            risk_level: "HIGH",
            attack_patterns: login.patterns,
        },
        timestamp: timestamp(),
    }))
}

/// GET /login_safe -> bound-parameter login. 400 on oversized input, generic 500 on store
/// failure.
pub async fn login_safe(
    State(state): State<LabState>,
    Query(q): Query<LoginQuery>,
) -> Result<Json<SafeLoginResponse>, LabError> {
    let login = state
        .safe_authenticator()
        .authenticate(&q.username, &q.password)
        .await?;

    Ok(Json(SafeLoginResponse {
        endpoint: Endpoint::LoginSafe.label(),
        success: login.success(),
        user_count: login.users.len(),
        security_analysis: SafeAnalysis {
            vulnerability_detected: false,
            risk_level: "LOW",
            protection_mechanisms: PROTECTION_MECHANISMS,
            suspicious_input_detected: login.suspicious_input_detected(),
            attack_patterns_neutralized: login.neutralized_patterns(),
        },
        users: login.users,
        timestamp: timestamp(),
    }))
}

/// GET /advanced_vuln -> interpolated search that joins in `sensitive_data`.
pub async fn advanced_vuln(
    State(state): State<LabState>,
    Query(q): Query<SearchQuery>,
) -> Result<Json<SearchResponse>, LabError> {
    let result = state.unsafe_authenticator().search(&q.search).await?;

    Ok(Json(SearchResponse {
        search_term: q.search,
        results: result.rows,
        executed_sql: result.executed_sql,
        warning: "this endpoint demonstrates a more complex SQL injection scenario",
        example_payloads: SEARCH_EXAMPLE_PAYLOADS,
    }))
}

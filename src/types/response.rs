use serde::Serialize;

use crate::db::models::{DynamicRow, PublicUser, UserSummary};
use crate::service::classifier::AttackPatterns;

#[derive(Debug, Serialize)]
pub struct VulnerableLoginResponse {
    pub endpoint: &'static str,
    pub success: bool,
    pub user_count: usize,
    pub users: Vec<DynamicRow>,
    pub executed_sql: String,
    pub security_analysis: VulnerableAnalysis,
    pub timestamp: String,
}

#[derive(Debug, Serialize)]
pub struct VulnerableAnalysis {
    pub vulnerability_detected: bool,
    pub risk_level: &'static str,
    pub attack_patterns: AttackPatterns,
}

#[derive(Debug, Serialize)]
pub struct SafeLoginResponse {
    pub endpoint: &'static str,
    pub success: bool,
    pub user_count: usize,
    pub users: Vec<PublicUser>,
    pub security_analysis: SafeAnalysis,
    pub timestamp: String,
}

#[derive(Debug, Serialize)]
pub struct SafeAnalysis {
    pub vulnerability_detected: bool,
    pub risk_level: &'static str,
    pub protection_mechanisms: [&'static str; 4],
    pub suspicious_input_detected: bool,
    pub attack_patterns_neutralized: Vec<&'static str>,
}

pub const PROTECTION_MECHANISMS: [&str; 4] = [
    "parameterized query",
    "input length limit",
    "sensitive field filtering",
    "error message control",
];

/// Body for the hardened endpoint's failures. Carries no query text or engine detail.
#[derive(Debug, Serialize)]
pub struct SafeFailureBody {
    pub endpoint: &'static str,
    pub success: bool,
    pub error: &'static str,
    pub security_info: &'static str,
}

/// Body for a login the engine rejected as invalid SQL. Leaks everything on purpose.
#[derive(Debug, Serialize)]
pub struct MalformedLoginBody {
    pub endpoint: &'static str,
    pub success: bool,
    pub error: String,
    pub executed_sql: String,
    pub security_warning: &'static str,
    pub timestamp: String,
}

#[derive(Debug, Serialize)]
pub struct SearchResponse {
    pub search_term: String,
    pub results: Vec<DynamicRow>,
    pub executed_sql: String,
    pub warning: &'static str,
    pub example_payloads: [&'static str; 3],
}

pub const SEARCH_EXAMPLE_PAYLOADS: [&str; 3] = [
    "admin' UNION SELECT username,password,'SECRET' FROM users/*",
    "' OR 1=1--",
    "test' AND (SELECT COUNT(*) FROM users)>0--",
];

#[derive(Debug, Serialize)]
pub struct MalformedSearchBody {
    pub error: String,
    pub executed_sql: String,
    pub note: &'static str,
}

#[derive(Debug, Serialize)]
pub struct SetupResponse {
    pub status: &'static str,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct UsersResponse {
    pub total_users: usize,
    pub users: Vec<UserSummary>,
    pub timestamp: String,
}

#[derive(Debug, Serialize)]
pub struct StatsResponse {
    pub database_file: String,
    pub attack_log_file: String,
    pub log_exists: bool,
    pub total_attacks: usize,
    pub recent_attacks: Vec<String>,
    pub timestamp: String,
}

/// Standardized API error response body
#[derive(Debug, Serialize)]
pub struct ApiErrorBody {
    pub code: String,
    pub message: String,
}

#[derive(Debug, Serialize)]
pub struct ApiErrorResponse {
    pub error: ApiErrorBody,
}

//! The deliberately injectable query paths.
//!
//! Everything here builds SQL by pasting request input into the statement text with no
//! escaping, then runs that text verbatim. Engine errors go back to the caller untouched.

use tracing::{error, info, warn};

use crate::db::{CredentialStore, DynamicRow};
use crate::error::{LabError, engine_message};
use crate::service::attack_log::AttackLog;
use crate::service::classifier::{AttackPatterns, InjectionClassifier};
use crate::types::Endpoint;

/// Outcome of an interpolated login that the engine accepted.
#[derive(Debug)]
pub struct UnsafeLogin {
    /// Full rows, passwords included, in whatever shape the statement produced.
    pub rows: Vec<DynamicRow>,
    pub executed_sql: String,
    pub patterns: AttackPatterns,
}

impl UnsafeLogin {
    pub fn success(&self) -> bool {
        !self.rows.is_empty()
    }

    pub fn user_count(&self) -> usize {
        self.rows.len()
    }
}

#[derive(Debug)]
pub struct SearchResult {
    pub rows: Vec<DynamicRow>,
    pub executed_sql: String,
}

pub fn login_sql(username: &str, password: &str) -> String {
    format!("SELECT * FROM users WHERE username='{username}' AND password='{password}'")
}

pub fn search_sql(term: &str) -> String {
    format!(
        r#"
    SELECT u.username, u.role, s.secret_info
    FROM users u
    LEFT JOIN sensitive_data s ON u.id = s.user_id
    WHERE u.username LIKE '%{term}%'
    OR u.role LIKE '%{term}%'
    "#
    )
}

pub struct UnsafeAuthenticator<'a> {
    store: &'a CredentialStore,
    attack_log: &'a AttackLog,
    classifier: &'a dyn InjectionClassifier,
}

impl<'a> UnsafeAuthenticator<'a> {
    pub fn new(
        store: &'a CredentialStore,
        attack_log: &'a AttackLog,
        classifier: &'a dyn InjectionClassifier,
    ) -> Self {
        Self {
            store,
            attack_log,
            classifier,
        }
    }

    /// Interpolated login. Suspicious input is logged before the statement runs, so a payload
    /// that breaks the SQL still leaves an entry.
    pub async fn authenticate(
        &self,
        username: &str,
        password: &str,
    ) -> Result<UnsafeLogin, LabError> {
        let endpoint = Endpoint::LoginVuln;
        let patterns = AttackPatterns::classify(self.classifier, username, password);
        let query = login_sql(username, password);

        if patterns.is_suspicious() {
            self.attack_log
                .record(
                    endpoint.as_str(),
                    &query,
                    &format!("user:{username}, pass:{password}"),
                )
                .await?;
            warn!(
                %endpoint,
                username,
                password,
                patterns = ?patterns.combined(),
                "suspicious SQL injection attempt"
            );
        }

        match self.store.query_text(&query).await {
            Ok(rows) => {
                info!(%endpoint, rows = rows.len(), "vulnerable login served");
                Ok(UnsafeLogin {
                    rows,
                    executed_sql: query,
                    patterns,
                })
            }
            Err(e) => {
                let message = engine_message(&e);
                error!(%endpoint, error = %message, "SQL execution error");
                Err(LabError::MalformedQuery {
                    endpoint,
                    query,
                    message,
                })
            }
        }
    }

    /// Interpolated LIKE search over users joined with their secrets. Not screened by the
    /// classifier and never logged to the attack log.
    pub async fn search(&self, term: &str) -> Result<SearchResult, LabError> {
        if term.is_empty() {
            return Err(LabError::MissingSearchTerm);
        }
        let endpoint = Endpoint::AdvancedVuln;
        let query = search_sql(term);

        match self.store.query_text(&query).await {
            Ok(rows) => {
                info!(%endpoint, rows = rows.len(), "vulnerable search served");
                Ok(SearchResult {
                    rows,
                    executed_sql: query,
                })
            }
            Err(e) => {
                let message = engine_message(&e);
                error!(%endpoint, error = %message, "SQL execution error");
                Err(LabError::MalformedQuery {
                    endpoint,
                    query,
                    message,
                })
            }
        }
    }
}

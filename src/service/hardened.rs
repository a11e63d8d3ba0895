//! The hardened login: a fixed template with bound parameters.

use tracing::{error, info, warn};

use crate::config::SAFE_INPUT_MAX_CHARS;
use crate::db::{CredentialStore, PublicUser};
use crate::error::LabError;
use crate::service::attack_log::AttackLog;
use crate::service::classifier::{AttackPatterns, InjectionClassifier};
use crate::types::Endpoint;

/// Statement text for every hardened login. Input only ever travels as bound values.
pub const SAFE_LOGIN_SQL: &str = "SELECT id, username, role FROM users WHERE username=? AND password=?";

#[derive(Debug)]
pub struct SafeLogin {
    pub users: Vec<PublicUser>,
    pub patterns: AttackPatterns,
}

impl SafeLogin {
    pub fn success(&self) -> bool {
        !self.users.is_empty()
    }

    pub fn suspicious_input_detected(&self) -> bool {
        self.patterns.is_suspicious()
    }

    /// What the classifier flagged; binding made it inert.
    pub fn neutralized_patterns(&self) -> Vec<&'static str> {
        self.patterns.combined()
    }
}

pub struct SafeAuthenticator<'a> {
    store: &'a CredentialStore,
    attack_log: &'a AttackLog,
    classifier: &'a dyn InjectionClassifier,
}

impl<'a> SafeAuthenticator<'a> {
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

    /// Length check first, then the bound query. Classification never changes the query; a
    /// suspicious request is only noted in the attack log with its parameter tuple, and a log
    /// that cannot be written does not stop the login.
    pub async fn authenticate(&self, username: &str, password: &str) -> Result<SafeLogin, LabError> {
        let endpoint = Endpoint::LoginSafe;
        if exceeds_limit(username) || exceeds_limit(password) {
            return Err(LabError::InputTooLong {
                limit: SAFE_INPUT_MAX_CHARS,
            });
        }

        let patterns = AttackPatterns::classify(self.classifier, username, password);
        if patterns.is_suspicious() {
            if let Err(e) = self
                .attack_log
                .record(
                    endpoint.as_str(),
                    &format!("{SAFE_LOGIN_SQL} | params: {:?}", (username, password)),
                    &format!("user:{username}, pass:{password}"),
                )
                .await
            {
                warn!(%endpoint, error = %e, "failed to record attack attempt");
            }
            info!(
                %endpoint,
                username,
                patterns = ?patterns.combined(),
                "suspicious input neutralized by parameter binding"
            );
        }

        match self
            .store
            .find_public_users(SAFE_LOGIN_SQL, username, password)
            .await
        {
            Ok(users) => {
                info!(%endpoint, rows = users.len(), "safe login served");
                Ok(SafeLogin { users, patterns })
            }
            Err(e) => {
                error!(%endpoint, error = %e, "database query failed");
                Err(LabError::QueryFailed)
            }
        }
    }
}

fn exceeds_limit(field: &str) -> bool {
    field.chars().count() > SAFE_INPUT_MAX_CHARS
}

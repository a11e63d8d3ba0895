use std::sync::Arc;

use axum::{Router, routing::get};

use crate::config::Config;
use crate::db::CredentialStore;
use crate::handlers::{admin, index, login};
use crate::service::attack_log::AttackLog;
use crate::service::classifier::{InjectionClassifier, SignatureList};
use crate::service::hardened::SafeAuthenticator;
use crate::service::vulnerable::UnsafeAuthenticator;

/// Shared per-process handles. Every request borrows them; nothing here is global.
#[derive(Clone)]
pub struct LabState {
    pub store: CredentialStore,
    pub attack_log: AttackLog,
    pub classifier: Arc<dyn InjectionClassifier>,
    pub recent_attacks: usize,
}

impl LabState {
    pub fn new(
        store: CredentialStore,
        attack_log: AttackLog,
        classifier: Arc<dyn InjectionClassifier>,
        recent_attacks: usize,
    ) -> Self {
        Self {
            store,
            attack_log,
            classifier,
            recent_attacks,
        }
    }

    pub fn from_config(cfg: &Config) -> Self {
        Self::new(
            CredentialStore::open(&cfg.database_path),
            AttackLog::new(&cfg.attack_log_path),
            Arc::new(SignatureList::default()),
            cfg.recent_attacks,
        )
    }

    pub fn unsafe_authenticator(&self) -> UnsafeAuthenticator<'_> {
        UnsafeAuthenticator::new(&self.store, &self.attack_log, self.classifier.as_ref())
    }

    pub fn safe_authenticator(&self) -> SafeAuthenticator<'_> {
        SafeAuthenticator::new(&self.store, &self.attack_log, self.classifier.as_ref())
    }
}

pub fn lab_router(state: LabState) -> Router {
    Router::new()
        .route("/", get(index::index))
        .route("/setup", get(admin::setup))
        .route("/login_vuln", get(login::login_vuln))
        .route("/login_safe", get(login::login_safe))
        .route("/advanced_vuln", get(login::advanced_vuln))
        .route("/users", get(admin::list_users))
        .route("/stats", get(admin::attack_stats))
        .with_state(state)
}

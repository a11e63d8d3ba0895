#![allow(dead_code)]

use std::sync::Arc;

use axum::{
    Router,
    body::{Body, to_bytes},
    http::{Request, StatusCode},
};
use serde_json::Value;
use sqli_lab::LabState;
use sqli_lab::db::CredentialStore;
use sqli_lab::service::{AttackLog, SignatureList};
use tempfile::TempDir;
use tower::ServiceExt;

/// A store and attack log living in their own temp directory.
pub struct Lab {
    pub dir: TempDir,
    pub state: LabState,
}

impl Lab {
    pub fn unseeded() -> Self {
        let dir = tempfile::tempdir().expect("failed to create temp dir");
        let state = LabState::new(
            CredentialStore::open(dir.path().join("demo.db")),
            AttackLog::new(dir.path().join("attack_log.txt")),
            Arc::new(SignatureList::default()),
            10,
        );
        Self { dir, state }
    }

    pub async fn seeded() -> Self {
        let lab = Self::unseeded();
        lab.state.store.init().await.expect("failed to seed store");
        lab
    }

    pub fn router(&self) -> Router {
        sqli_lab::lab_router(self.state.clone())
    }

    pub async fn attack_count(&self) -> usize {
        self.state.attack_log.count().await.expect("failed to count attack log")
    }
}

pub fn uri(path: &str, params: &[(&str, &str)]) -> String {
    let qs = url::form_urlencoded::Serializer::new(String::new())
        .extend_pairs(params)
        .finish();
    if qs.is_empty() {
        path.to_string()
    } else {
        format!("{path}?{qs}")
    }
}

pub async fn get(app: &Router, uri: &str) -> (StatusCode, String) {
    let resp = app
        .clone()
        .oneshot(
            Request::builder()
                .method("GET")
                .uri(uri)
                .body(Body::empty())
                .expect("failed to build request"),
        )
        .await
        .expect("request failed");
    let status = resp.status();
    let body = to_bytes(resp.into_body(), usize::MAX)
        .await
        .expect("failed to read response body");
    let text = String::from_utf8(body.to_vec()).expect("response body was not utf-8");
    (status, text)
}

pub async fn get_json(app: &Router, uri: &str) -> (StatusCode, Value) {
    let (status, text) = get(app, uri).await;
    let value = serde_json::from_str(&text).expect("response body was not JSON");
    (status, value)
}

/// True if any object anywhere in `value` has a key named `key`.
pub fn has_key(value: &Value, key: &str) -> bool {
    match value {
        Value::Object(map) => map.contains_key(key) || map.values().any(|v| has_key(v, key)),
        Value::Array(items) => items.iter().any(|v| has_key(v, key)),
        _ => false,
    }
}

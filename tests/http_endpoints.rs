mod common;

use axum::http::StatusCode;
use common::{Lab, get, get_json, has_key, uri};
use serde_json::Value;

#[tokio::test]
async fn index_serves_html() {
    let lab = Lab::unseeded();
    let (status, body) = get(&lab.router(), "/").await;

    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("/login_vuln"));
    assert!(body.contains("/login_safe"));
}

#[tokio::test]
async fn setup_is_idempotent() {
    let lab = Lab::unseeded();
    let app = lab.router();

    let (status, body) = get_json(&app, "/setup").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "success");
    assert_eq!(body["message"], "database initialized");

    let (status, body) = get_json(&app, "/setup").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "database already initialized");

    let (_, users) = get_json(&app, "/users").await;
    assert_eq!(users["total_users"], 4);
}

#[tokio::test]
async fn users_listing_hides_passwords() {
    let lab = Lab::seeded().await;
    let (status, body) = get_json(&lab.router(), "/users").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["users"][0]["username"], "admin");
    assert!(body["users"][0]["created_at"].is_string());
    assert!(!has_key(&body, "password"));
}

#[tokio::test]
async fn vulnerable_login_exposes_sql_and_rows() {
    let lab = Lab::seeded().await;
    let (status, body) = get_json(
        &lab.router(),
        &uri("/login_vuln", &[("username", "admin'--"), ("password", "any")]),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["endpoint"], "vulnerable");
    assert_eq!(body["success"], true);
    assert_eq!(body["user_count"], 1);
    assert_eq!(body["users"][0]["password"], "admin123");
    assert_eq!(
        body["executed_sql"],
        "SELECT * FROM users WHERE username='admin'--' AND password='any'"
    );
    assert_eq!(body["security_analysis"]["risk_level"], "HIGH");
    assert_eq!(
        body["security_analysis"]["attack_patterns"]["username"],
        serde_json::json!(["'", "--"])
    );
    assert_eq!(
        body["security_analysis"]["attack_patterns"]["password"],
        serde_json::json!([])
    );
}

#[tokio::test]
async fn vulnerable_login_malformed_sql_is_400_with_engine_error() {
    let lab = Lab::seeded().await;
    let (status, body) = get_json(
        &lab.router(),
        &uri(
            "/login_vuln",
            &[
                ("username", "' UNION SELECT 1,username,password FROM users--"),
                ("password", "any"),
            ],
        ),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);
    assert!(body["error"].as_str().is_some_and(|e| e.contains("UNION")));
    assert!(
        body["executed_sql"]
            .as_str()
            .is_some_and(|q| q.contains("UNION SELECT 1,username,password"))
    );
    assert!(body["security_warning"].is_string());
}

#[tokio::test]
async fn safe_login_succeeds_without_password_field() {
    let lab = Lab::seeded().await;
    let (status, body) = get_json(
        &lab.router(),
        &uri("/login_safe", &[("username", "alice"), ("password", "alice_password")]),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["endpoint"], "safe");
    assert_eq!(body["success"], true);
    assert_eq!(body["users"][0]["username"], "alice");
    assert_eq!(body["users"][0]["role"], "user");
    assert!(!has_key(&body, "password"));
    assert_eq!(body["security_analysis"]["suspicious_input_detected"], false);
}

#[tokio::test]
async fn safe_login_rejects_injection() {
    let lab = Lab::seeded().await;
    let (status, body) = get_json(
        &lab.router(),
        &uri("/login_safe", &[("username", "admin'--"), ("password", "any")]),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], false);
    assert_eq!(body["user_count"], 0);
    assert_eq!(body["security_analysis"]["suspicious_input_detected"], true);
    assert_eq!(
        body["security_analysis"]["attack_patterns_neutralized"],
        serde_json::json!(["'", "--"])
    );
    assert!(!has_key(&body, "password"));
    assert!(!has_key(&body, "executed_sql"));
}

#[tokio::test]
async fn safe_login_too_long_is_400() {
    let lab = Lab::seeded().await;
    let long = "a".repeat(51);
    let (status, body) = get_json(
        &lab.router(),
        &uri("/login_safe", &[("username", long.as_str()), ("password", "x")]),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);
    assert_eq!(lab.attack_count().await, 0);
}

#[tokio::test]
async fn store_failures_differ_by_endpoint() {
    let lab = Lab::unseeded();
    let app = lab.router();
    let params = [("username", "admin"), ("password", "admin123")];

    let (status, body) = get_json(&app, &uri("/login_safe", &params)).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error"], "query execution failed");
    assert!(!has_key(&body, "executed_sql"));

    let (status, body) = get_json(&app, &uri("/login_vuln", &params)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["executed_sql"].is_string());
}

#[tokio::test]
async fn missing_parameters_default_to_empty() {
    let lab = Lab::seeded().await;
    let (status, body) = get_json(&lab.router(), "/login_vuln").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], false);
    assert_eq!(
        body["executed_sql"],
        "SELECT * FROM users WHERE username='' AND password=''"
    );
}

#[tokio::test]
async fn stats_reflect_attack_log() {
    let lab = Lab::seeded().await;
    let app = lab.router();

    let (_, before) = get_json(&app, "/stats").await;
    assert_eq!(before["log_exists"], false);
    assert_eq!(before["total_attacks"], 0);

    for i in 0..12 {
        let name = format!("user{i}'--");
        let _ = get(&app, &uri("/login_vuln", &[("username", name.as_str()), ("password", "x")])).await;
    }

    let (status, after) = get_json(&app, "/stats").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(after["log_exists"], true);
    assert_eq!(after["total_attacks"], 12);
    let recent = after["recent_attacks"].as_array().expect("array");
    assert_eq!(recent.len(), 10);
    assert!(recent.last().and_then(Value::as_str).is_some_and(|l| l.contains("user11'--")));
}

#[tokio::test]
async fn advanced_search_leaks_secrets() {
    let lab = Lab::seeded().await;
    let app = lab.router();

    let (status, body) = get_json(&app, &uri("/advanced_vuln", &[("search", "' OR 1=1--")])).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["results"].as_array().map(Vec::len), Some(4));
    assert!(body["example_payloads"].is_array());

    let (status, body) = get_json(&app, "/advanced_vuln").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].is_string());

    // a lone quote pairs with its copy on the next line, so the statement still parses
    let (status, body) = get_json(&app, &uri("/advanced_vuln", &[("search", "'")])).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["results"].is_array());

    let (status, body) = get_json(
        &app,
        &uri(
            "/advanced_vuln",
            &[("search", "' UNION SELECT username,password FROM users/*")],
        ),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["executed_sql"].is_string());
    assert!(body["note"].is_string());
}

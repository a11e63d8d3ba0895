//! SQL DDL and seed rows for the credential store.

/// Tables for the lab:
/// - `users`: plaintext passwords on purpose, `role` defaults to `user`
/// - `sensitive_data`: secrets loosely tied to a user, only reachable through injection
pub const SQLITE_INIT: &str = r#"
CREATE TABLE users (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    username TEXT UNIQUE NOT NULL,
    password TEXT NOT NULL,
    role TEXT DEFAULT 'user',
    created_at TIMESTAMP DEFAULT CURRENT_TIMESTAMP
);

CREATE TABLE sensitive_data (
    id INTEGER PRIMARY KEY,
    user_id INTEGER,
    secret_info TEXT,
    FOREIGN KEY (user_id) REFERENCES users (id)
);
"#;

pub const SQLITE_SEED: &str = r#"
INSERT INTO users (username, password, role) VALUES
    ('admin', 'admin123', 'administrator'),
    ('alice', 'alice_password', 'user'),
    ('bob', 'bob123', 'user'),
    ('test_user', 'test123', 'user');

INSERT INTO sensitive_data (user_id, secret_info) VALUES
    (1, 'Top Secret Admin Data'),
    (2, 'Alice Personal Information'),
    (3, 'Bob Confidential Records');
"#;

pub const SEEDED_USERS: i64 = 4;
pub const SEEDED_SECRETS: i64 = 3;

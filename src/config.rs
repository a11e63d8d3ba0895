use figment::{
    Figment,
    providers::{Env, Serialized},
};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::error::LabError;

/// Environment prefix for overrides, e.g. `SQLI_LAB_LISTEN_ADDR=0.0.0.0:5000`.
pub const ENV_PREFIX: &str = "SQLI_LAB_";

/// Longest username or password the hardened login accepts, in characters.
pub const SAFE_INPUT_MAX_CHARS: usize = 50;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub database_path: PathBuf,
    pub attack_log_path: PathBuf,
    pub listen_addr: String,
    pub loglevel: String,
    /// How many attack log lines `/stats` returns.
    pub recent_attacks: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database_path: PathBuf::from("demo.db"),
            attack_log_path: PathBuf::from("attack_log.txt"),
            listen_addr: "127.0.0.1:5000".to_string(),
            loglevel: "info".to_string(),
            recent_attacks: 10,
        }
    }
}

impl Config {
    /// Defaults, then `SQLI_LAB_*` environment variables.
    pub fn load() -> Result<Self, LabError> {
        Self::figment().extract().map_err(LabError::from)
    }

    pub fn figment() -> Figment {
        Figment::from(Serialized::defaults(Config::default())).merge(Env::prefixed(ENV_PREFIX))
    }
}

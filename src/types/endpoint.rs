use serde::Serialize;
use std::fmt;

/// The query surfaces the lab exposes. The string form is what lands in the attack log.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Endpoint {
    LoginVuln,
    LoginSafe,
    AdvancedVuln,
}

impl Endpoint {
    pub fn as_str(self) -> &'static str {
        match self {
            Endpoint::LoginVuln => "login_vuln",
            Endpoint::LoginSafe => "login_safe",
            Endpoint::AdvancedVuln => "advanced_vuln",
        }
    }

    /// Short label used in the `endpoint` field of login responses.
    pub fn label(self) -> &'static str {
        match self {
            Endpoint::LoginVuln | Endpoint::AdvancedVuln => "vulnerable",
            Endpoint::LoginSafe => "safe",
        }
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

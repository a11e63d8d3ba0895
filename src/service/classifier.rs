use serde::Serialize;

/// Substrings that mark input as suspicious, matched against the lower-cased input.
///
/// This is signature matching and nothing more: a payload that avoids every entry, for example
/// by re-spacing `or 1=1` or URL-encoding its quote, is classified as clean.
pub const SQL_SIGNATURES: &[&str] = &[
    "'", "\"", "--", "/*", "*/", "union", "select", "drop", "delete", "insert", "update",
    "or 1=1", "and 1=1", "xp_", "sp_",
];

/// Classifies raw request input as suspicious or not.
pub trait InjectionClassifier: Send + Sync {
    fn classify(&self, input: &str) -> Classification;
}

/// Patterns an input matched, in signature-list order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Classification {
    pub matched: Vec<&'static str>,
}

impl Classification {
    pub fn is_suspicious(&self) -> bool {
        !self.matched.is_empty()
    }
}

/// Per-field matches for a two-field login.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct AttackPatterns {
    pub username: Vec<&'static str>,
    pub password: Vec<&'static str>,
}

impl AttackPatterns {
    pub fn classify(classifier: &dyn InjectionClassifier, username: &str, password: &str) -> Self {
        Self {
            username: classifier.classify(username).matched,
            password: classifier.classify(password).matched,
        }
    }

    pub fn is_suspicious(&self) -> bool {
        !self.username.is_empty() || !self.password.is_empty()
    }

    /// Username matches followed by password matches, duplicates kept.
    pub fn combined(&self) -> Vec<&'static str> {
        self.username
            .iter()
            .chain(self.password.iter())
            .copied()
            .collect()
    }
}

/// Classifier over a fixed signature list.
pub struct SignatureList {
    signatures: &'static [&'static str],
}

impl SignatureList {
    pub fn new(signatures: &'static [&'static str]) -> Self {
        Self { signatures }
    }
}

impl Default for SignatureList {
    fn default() -> Self {
        Self::new(SQL_SIGNATURES)
    }
}

impl InjectionClassifier for SignatureList {
    fn classify(&self, input: &str) -> Classification {
        let lowered = input.to_lowercase();
        Classification {
            matched: self
                .signatures
                .iter()
                .copied()
                .filter(|sig| lowered.contains(sig))
                .collect(),
        }
    }
}

pub mod attack_log;
pub mod classifier;
pub mod hardened;
pub mod vulnerable;

pub use attack_log::AttackLog;
pub use classifier::{AttackPatterns, Classification, InjectionClassifier, SignatureList};
pub use hardened::{SafeAuthenticator, SafeLogin};
pub use vulnerable::{SearchResult, UnsafeAuthenticator, UnsafeLogin};

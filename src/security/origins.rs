//! CORS origin allow-list.
//!
//! # Responsibilities
//! - Build the allow-list once from the built-in origins and the environment
//! - Answer exact-match membership for the `Origin` request header
//!
//! # Design Decisions
//! - Exact, case-sensitive string comparison; no wildcards or normalization
//! - `SEONAUT_ALLOWED_ORIGINS` replaces the built-ins and wins over
//!   `SEONAUT_FRONTEND_URL`, which only appends

use crate::config::env::{Environment, ALLOWED_ORIGINS_VAR, FRONTEND_URL_VAR};

/// Origins allowed when the environment does not replace the list.
pub const DEFAULT_ALLOWED_ORIGINS: [&str; 5] = [
    "https://codified-seo.vercel.app",
    "http://localhost:3000",
    "http://localhost:3001",
    "http://localhost:5173",
    "http://localhost:8080",
];

/// Immutable set of origins allowed to read cross-origin responses.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OriginPolicy {
    origins: Vec<String>,
}

impl OriginPolicy {
    /// Build a policy from an explicit list.
    ///
    /// Duplicates and empty entries are dropped; first occurrence order is kept.
    pub fn new<I, S>(origins: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut unique: Vec<String> = Vec::new();
        for origin in origins {
            let origin = origin.into();
            if !origin.is_empty() && !unique.contains(&origin) {
                unique.push(origin);
            }
        }
        Self { origins: unique }
    }

    /// Build the policy from the environment snapshot.
    pub fn from_env(env: &Environment) -> Self {
        if let Some(list) = env.get(ALLOWED_ORIGINS_VAR) {
            return Self::new(list.split(','));
        }

        let mut policy = Self::default();
        if let Some(frontend) = env.get(FRONTEND_URL_VAR) {
            policy = Self::new(policy.origins.into_iter().chain([frontend.to_string()]));
        }
        policy
    }

    /// Whether `origin` may read cross-origin responses.
    pub fn is_allowed(&self, origin: &str) -> bool {
        self.origins.iter().any(|allowed| allowed == origin)
    }

    pub fn origins(&self) -> &[String] {
        &self.origins
    }
}

impl Default for OriginPolicy {
    fn default() -> Self {
        Self::new(DEFAULT_ALLOWED_ORIGINS)
    }
}

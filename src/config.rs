//! Editor configuration resolved from the environment.
//!
//! Values load from process environment variables, with a `.env` file as
//! fallback via `dotenvy`. Everything has a sensible local-dev default, so
//! [`EditorConfig::default`] works without any environment at all.

use crate::session::CreditLedger;

/// Runtime configuration for the editor and its backend clients.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EditorConfig {
    /// API root, without a trailing slash, e.g. `http://localhost:8000/api`.
    pub api_base_url: String,
    /// Free execution requests per session.
    pub credit_quota: u32,
    /// Model used when an engine node does not pick one.
    pub default_model: String,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            api_base_url: "http://localhost:8000/api".to_string(),
            credit_quota: CreditLedger::DEFAULT_QUOTA,
            default_model: "gemini-2.0-flash".to_string(),
        }
    }
}

impl EditorConfig {
    /// Resolve configuration from `STACKWEAVE_API_URL`,
    /// `STACKWEAVE_CREDIT_QUOTA`, and `STACKWEAVE_DEFAULT_MODEL`, reading a
    /// `.env` file first if present. Unset or unparseable values fall back
    /// to the defaults.
    #[must_use]
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();
        let defaults = Self::default();
        Self {
            api_base_url: std::env::var("STACKWEAVE_API_URL")
                .map(|url| url.trim_end_matches('/').to_string())
                .unwrap_or(defaults.api_base_url),
            credit_quota: std::env::var("STACKWEAVE_CREDIT_QUOTA")
                .ok()
                .and_then(|raw| raw.parse().ok())
                .unwrap_or(defaults.credit_quota),
            default_model: std::env::var("STACKWEAVE_DEFAULT_MODEL")
                .unwrap_or(defaults.default_model),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_point_at_local_backend() {
        let config = EditorConfig::default();
        assert_eq!(config.api_base_url, "http://localhost:8000/api");
        assert_eq!(config.credit_quota, 10);
        assert_eq!(config.default_model, "gemini-2.0-flash");
    }
}

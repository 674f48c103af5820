use std::str::FromStr;

use keyword_tables::{DEFAULT_KEYWORD, TableStrategy};
use worker::Env;

pub const DEFAULT_MAX_UPLOAD_BYTES: usize = 50 * 1024 * 1024;

/// Settings read from the worker environment, with fallbacks for unset or invalid values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub default_keyword: String,
    pub strategy: TableStrategy,
    pub max_upload_bytes: usize,
}

impl AppConfig {
    pub fn from_env(env: &Env) -> Self {
        let var = |name: &str| env.var(name).ok().map(|value| value.to_string());
        Self::from_vars(
            var("DEFAULT_KEYWORD"),
            var("TABLE_STRATEGY"),
            var("MAX_UPLOAD_BYTES"),
        )
    }

    #[must_use]
    pub fn from_vars(
        default_keyword: Option<String>,
        strategy: Option<String>,
        max_upload_bytes: Option<String>,
    ) -> Self {
        Self {
            default_keyword: default_keyword
                .filter(|value| !value.trim().is_empty())
                .unwrap_or_else(|| DEFAULT_KEYWORD.to_string()),
            strategy: strategy
                .and_then(|value| TableStrategy::from_str(&value).ok())
                .unwrap_or_default(),
            max_upload_bytes: max_upload_bytes
                .and_then(|value| value.trim().parse::<usize>().ok())
                .filter(|value| *value > 0)
                .unwrap_or(DEFAULT_MAX_UPLOAD_BYTES),
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self::from_vars(None, None, None)
    }
}

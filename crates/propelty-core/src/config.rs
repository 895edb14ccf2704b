use std::collections::HashMap;
use std::str::FromStr;

/// A source of configuration values keyed by environment variable name.
///
/// Services read settings through this trait so tests can substitute a map for the
/// process environment.
pub trait EnvSource {
    fn var(&self, key: &str) -> Option<String>;
}

/// The real process environment.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessEnv;

impl EnvSource for ProcessEnv {
    fn var(&self, key: &str) -> Option<String> {
        std::env::var(key).ok()
    }
}

impl EnvSource for HashMap<String, String> {
    fn var(&self, key: &str) -> Option<String> {
        self.get(key).cloned()
    }
}

impl EnvSource for HashMap<&str, &str> {
    fn var(&self, key: &str) -> Option<String> {
        self.get(key).map(|v| (*v).to_owned())
    }
}

/// Errors raised while loading configuration.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("missing required env var {0}")]
    Missing(&'static str),
    #[error("invalid value for env var {key}: {value:?}")]
    Invalid { key: &'static str, value: String },
}

/// Read a variable, treating an empty value as unset.
pub fn optional(env: &impl EnvSource, key: &str) -> Option<String> {
    env.var(key).filter(|v| !v.is_empty())
}

/// Read a variable that must be present and non-empty.
pub fn required(env: &impl EnvSource, key: &'static str) -> Result<String, ConfigError> {
    optional(env, key).ok_or(ConfigError::Missing(key))
}

/// Parse a variable, falling back to `default` when it is unset or empty.
pub fn parse_or<T: FromStr>(
    env: &impl EnvSource,
    key: &'static str,
    default: T,
) -> Result<T, ConfigError> {
    match optional(env, key) {
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|_| ConfigError::Invalid { key, value: raw }),
        None => Ok(default),
    }
}

/// `"1"`-style switch: true only when the value (or `default` when unset) is exactly `"1"`.
pub fn flag(env: &impl EnvSource, key: &str, default: &str) -> bool {
    env.var(key).as_deref().unwrap_or(default) == "1"
}

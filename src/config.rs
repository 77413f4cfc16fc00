//! Layered configuration for the converter.
//!
//! Precedence, lowest to highest:
//!
//! 1. built-in defaults
//! 2. environment variables (`FIXTURES2JSON_OUTPUT`, `FIXTURES2JSON_PRETTY`,
//!    `FIXTURES2JSON_STRICT`)
//! 3. CLI flags
//!
//! Every resolved value remembers its [`ConfigSource`] so the binary can log
//! where a setting came from.

use std::path::PathBuf;

use crate::error::FixtureError;
use crate::output::DEFAULT_OUTPUT;

pub const ENV_OUTPUT: &str = "FIXTURES2JSON_OUTPUT";
pub const ENV_PRETTY: &str = "FIXTURES2JSON_PRETTY";
pub const ENV_STRICT: &str = "FIXTURES2JSON_STRICT";

// ============================================================================
// Configuration Sources
// ============================================================================

/// Configuration value source (for precedence tracking).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ConfigSource {
    /// Built-in default value.
    Default = 0,
    /// From environment variable.
    EnvVar = 1,
    /// From CLI flag (highest precedence).
    CliFlag = 2,
}

/// A configuration value with its source.
#[derive(Debug, Clone, PartialEq)]
pub struct ConfigValue<T> {
    pub value: T,
    pub source: ConfigSource,
}

impl<T> ConfigValue<T> {
    pub fn new(value: T, source: ConfigSource) -> Self {
        ConfigValue { value, source }
    }

    /// Merge with another value, preferring higher precedence.
    pub fn merge(self, other: Self) -> Self {
        if other.source >= self.source {
            other
        } else {
            self
        }
    }

    fn merge_opt(self, other: Option<Self>) -> Self {
        match other {
            Some(other) => self.merge(other),
            None => self,
        }
    }
}

// ============================================================================
// Overrides and Resolution
// ============================================================================

/// Values supplied on the command line. `None` means "not given".
#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
    /// -j/--jsonfile
    pub output: Option<PathBuf>,
    /// --pretty
    pub pretty: Option<bool>,
    /// --strict
    pub strict: Option<bool>,
}

/// Fully resolved converter settings.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedConfig {
    pub output: ConfigValue<PathBuf>,
    pub pretty: ConfigValue<bool>,
    pub strict: ConfigValue<bool>,
}

impl ResolvedConfig {
    /// Resolve against the process environment.
    pub fn resolve(overrides: &CliOverrides) -> Result<Self, FixtureError> {
        Self::resolve_with(|key| std::env::var(key).ok(), overrides)
    }

    /// Resolve with an explicit environment lookup.
    pub fn resolve_with<F>(env: F, overrides: &CliOverrides) -> Result<Self, FixtureError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let from_env_bool = |key: &str| -> Result<Option<ConfigValue<bool>>, FixtureError> {
            env(key)
                .map(|raw| parse_bool(key, &raw).map(|b| ConfigValue::new(b, ConfigSource::EnvVar)))
                .transpose()
        };
        let from_cli = |value: Option<bool>| value.map(|b| ConfigValue::new(b, ConfigSource::CliFlag));

        let output = ConfigValue::new(PathBuf::from(DEFAULT_OUTPUT), ConfigSource::Default)
            .merge_opt(
                env(ENV_OUTPUT)
                    .filter(|s| !s.is_empty())
                    .map(|s| ConfigValue::new(PathBuf::from(s), ConfigSource::EnvVar)),
            )
            .merge_opt(
                overrides
                    .output
                    .clone()
                    .map(|p| ConfigValue::new(p, ConfigSource::CliFlag)),
            );

        let pretty = ConfigValue::new(false, ConfigSource::Default)
            .merge_opt(from_env_bool(ENV_PRETTY)?)
            .merge_opt(from_cli(overrides.pretty));

        let strict = ConfigValue::new(false, ConfigSource::Default)
            .merge_opt(from_env_bool(ENV_STRICT)?)
            .merge_opt(from_cli(overrides.strict));

        Ok(ResolvedConfig {
            output,
            pretty,
            strict,
        })
    }
}

fn parse_bool(key: &str, raw: &str) -> Result<bool, FixtureError> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "" | "0" | "false" | "no" | "off" => Ok(false),
        other => Err(FixtureError::invalid_args(format!(
            "{}: expected a boolean, got '{}'",
            key, other
        ))),
    }
}

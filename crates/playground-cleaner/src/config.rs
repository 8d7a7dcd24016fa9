//! Cleaner configuration.

use std::path::PathBuf;
use std::time::Duration;

use playground_store::StoreConfig;

/// Invalid configuration value.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The retention window is negative.
    #[error("SWEEP_DAY_DIFF must not be negative, got {0}")]
    NegativeDayDiff(i32),

    /// A duration setting is zero.
    #[error("{0} must be greater than zero")]
    ZeroDuration(&'static str),

    /// A variable is set but cannot be parsed.
    #[error("invalid value for {var}: {value:?}")]
    Invalid {
        /// Variable name.
        var: &'static str,
        /// The rejected value.
        value: String,
    },
}

/// Cleaner configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct CleanerConfig {
    /// Store selection and location.
    pub store: StoreConfig,

    /// Snippets unused for at least this many days are deleted (default: 30).
    pub day_diff: i32,

    /// Seconds between sweeps (default: 86400).
    pub interval_seconds: u64,

    /// Deadline for one sweep in seconds (default: 600).
    pub timeout_seconds: u64,

    /// Run a single sweep and exit instead of scheduling.
    pub run_once: bool,
}

impl CleanerConfig {
    /// Load configuration from environment variables.
    ///
    /// Unset variables take their defaults.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Invalid` if a variable is set to a value that
    /// cannot be parsed.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Load configuration through `lookup`, which maps a variable name to its value.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Invalid` if a value is set but cannot be parsed.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        Ok(Self {
            store: StoreConfig {
                data_dir: lookup("DATA_DIR").map_or(defaults.store.data_dir, PathBuf::from),
                project_id: lookup("PROJECT_ID").unwrap_or(defaults.store.project_id),
                mock: parse_flag(&lookup, "STORE_MOCK")?.unwrap_or(defaults.store.mock),
            },
            day_diff: parse_value(&lookup, "SWEEP_DAY_DIFF")?.unwrap_or(defaults.day_diff),
            interval_seconds: parse_value(&lookup, "SWEEP_INTERVAL_SECONDS")?
                .unwrap_or(defaults.interval_seconds),
            timeout_seconds: parse_value(&lookup, "SWEEP_TIMEOUT_SECONDS")?
                .unwrap_or(defaults.timeout_seconds),
            run_once: parse_flag(&lookup, "SWEEP_RUN_ONCE")?.unwrap_or(defaults.run_once),
        })
    }

    /// Check the values a sweep cannot run with.
    ///
    /// # Errors
    ///
    /// Returns an error if `day_diff` is negative or a duration is zero.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.day_diff < 0 {
            return Err(ConfigError::NegativeDayDiff(self.day_diff));
        }
        if self.interval_seconds == 0 {
            return Err(ConfigError::ZeroDuration("SWEEP_INTERVAL_SECONDS"));
        }
        if self.timeout_seconds == 0 {
            return Err(ConfigError::ZeroDuration("SWEEP_TIMEOUT_SECONDS"));
        }
        Ok(())
    }

    /// Time between sweeps.
    #[must_use]
    pub const fn interval(&self) -> Duration {
        Duration::from_secs(self.interval_seconds)
    }

    /// Deadline for one sweep.
    #[must_use]
    pub const fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds)
    }
}

impl Default for CleanerConfig {
    fn default() -> Self {
        Self {
            store: StoreConfig::default(),
            day_diff: 30,
            interval_seconds: 24 * 60 * 60,
            timeout_seconds: 600,
            run_once: false,
        }
    }
}

fn parse_value<T, F>(lookup: &F, var: &'static str) -> Result<Option<T>, ConfigError>
where
    T: std::str::FromStr,
    F: Fn(&str) -> Option<String>,
{
    lookup(var)
        .map(|value| {
            value
                .trim()
                .parse()
                .map_err(|_| ConfigError::Invalid { var, value })
        })
        .transpose()
}

fn parse_flag<F>(lookup: &F, var: &'static str) -> Result<Option<bool>, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    lookup(var)
        .map(|value| match value.trim().to_ascii_lowercase().as_str() {
            "1" | "true" | "yes" => Ok(true),
            "0" | "false" | "no" | "" => Ok(false),
            _ => Err(ConfigError::Invalid { var, value }),
        })
        .transpose()
}

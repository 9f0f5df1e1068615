//! Configuration loading and typed config structures for the Farmstead client.
//!
//! The configuration lives in `farmstead.yaml` next to the binary. Every
//! field has a default, so an empty or partial file is valid and a missing
//! file simply means "use defaults".

use std::path::{Path, PathBuf};

use serde::Deserialize;

use farmstead_types::Season;
use farmstead_world::YieldModifiers;

/// Environment variable that overrides [`ClientConfig::account_path`].
pub const ACCOUNT_PATH_ENV: &str = "FARMSTEAD_ACCOUNT_PATH";

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Failed to read the configuration file from disk.
    #[error("failed to read config file: {source}")]
    Io {
        /// The underlying I/O error.
        #[from]
        source: std::io::Error,
    },

    /// Failed to parse YAML content.
    #[error("failed to parse config YAML: {source}")]
    Yaml {
        /// The underlying YAML parse error.
        source: serde_yml::Error,
    },

    /// A season name that is not one of spring, summer, fall, winter.
    #[error("unknown season: {name}")]
    UnknownSeason {
        /// The name as written in the file.
        name: String,
    },
}

impl From<serde_yml::Error> for ConfigError {
    fn from(source: serde_yml::Error) -> Self {
        Self::Yaml { source }
    }
}

/// Top-level client configuration.
///
/// Mirrors the structure of `farmstead.yaml`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct FarmsteadConfig {
    /// Polling and account source settings.
    #[serde(default)]
    pub client: ClientConfig,

    /// Multipliers fed to the yield projection.
    #[serde(default, rename = "yield")]
    pub yields: YieldConfig,

    /// Logging configuration.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl FarmsteadConfig {
    /// Load configuration from a YAML file at the given path.
    ///
    /// `FARMSTEAD_ACCOUNT_PATH` overrides `client.account_path` when set.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] if the file cannot be read, or
    /// [`ConfigError::Yaml`] if the content is not valid YAML.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::parse(&contents)
    }

    /// Parse configuration from a YAML string.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Yaml`] if the string is not valid YAML.
    pub fn parse(yaml: &str) -> Result<Self, ConfigError> {
        // serde_yml reads an empty document as null rather than an empty map.
        let mut config: Self = if yaml.trim().is_empty() {
            Self::default()
        } else {
            serde_yml::from_str(yaml)?
        };
        config.client.apply_env_overrides();
        Ok(config)
    }
}

/// Polling and account source settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ClientConfig {
    /// Milliseconds between account fetches.
    #[serde(default = "default_poll_interval_ms")]
    pub poll_interval_ms: u64,

    /// Path of the decoded player account JSON.
    #[serde(default = "default_account_path")]
    pub account_path: PathBuf,
}

impl ClientConfig {
    /// Override the account path with `FARMSTEAD_ACCOUNT_PATH` when set.
    pub fn apply_env_overrides(&mut self) {
        if let Ok(val) = std::env::var(ACCOUNT_PATH_ENV) {
            self.account_path = PathBuf::from(val);
        }
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            poll_interval_ms: default_poll_interval_ms(),
            account_path: default_account_path(),
        }
    }
}

/// Yield projection inputs that do not come from the account.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct YieldConfig {
    /// Soil moisture in percent applied to every plot.
    #[serde(default = "default_water_level")]
    pub water_level: u8,

    /// Current season name.
    #[serde(default = "default_season")]
    pub season: String,
}

impl YieldConfig {
    /// The configured season.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::UnknownSeason`] if the name is not recognised.
    pub fn season(&self) -> Result<Season, ConfigError> {
        Season::from_name(&self.season).ok_or_else(|| ConfigError::UnknownSeason {
            name: self.season.clone(),
        })
    }

    /// Yield modifiers for the configured moisture and season.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::UnknownSeason`] if the season is not recognised.
    pub fn modifiers(&self) -> Result<YieldModifiers, ConfigError> {
        Ok(YieldModifiers::for_conditions(self.water_level, self.season()?))
    }
}

impl Default for YieldConfig {
    fn default() -> Self {
        Self {
            water_level: default_water_level(),
            season: default_season(),
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error), used when `RUST_LOG`
    /// is unset.
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

const fn default_poll_interval_ms() -> u64 {
    5_000
}

fn default_account_path() -> PathBuf {
    PathBuf::from("account.json")
}

const fn default_water_level() -> u8 {
    100
}

fn default_season() -> String {
    "spring".to_owned()
}

fn default_log_level() -> String {
    "info".to_owned()
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;

    use super::*;

    #[test]
    fn default_config_is_valid() {
        let config = FarmsteadConfig::default();
        assert_eq!(config.client.poll_interval_ms, 5_000);
        assert_eq!(config.yields.water_level, 100);
        assert_eq!(config.yields.season().ok(), Some(Season::Spring));
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn parse_full_yaml() {
        let yaml = r#"
client:
  poll_interval_ms: 2500

yield:
  water_level: 45
  season: "Summer"

logging:
  level: "debug"
"#;

        let config = FarmsteadConfig::parse(yaml);
        assert!(config.is_ok());
        let config = config.ok().unwrap_or_default();

        assert_eq!(config.client.poll_interval_ms, 2_500);
        assert_eq!(config.yields.season().ok(), Some(Season::Summer));
        assert_eq!(config.logging.level, "debug");

        let modifiers = config.yields.modifiers().ok().unwrap_or_default();
        assert_eq!(modifiers.water_multiplier, Decimal::new(85, 2));
        assert_eq!(modifiers.season, Some(Season::Summer));
    }

    #[test]
    fn parse_minimal_yaml() {
        let yaml = "yield:\n  water_level: 30\n";
        let config = FarmsteadConfig::parse(yaml);
        assert!(config.is_ok());
        let config = config.ok().unwrap_or_default();

        assert_eq!(config.yields.water_level, 30);
        // Everything else uses defaults
        assert_eq!(config.client.poll_interval_ms, 5_000);
        assert_eq!(config.yields.season, "spring");
    }

    #[test]
    fn parse_empty_yaml() {
        assert!(FarmsteadConfig::parse("").is_ok());
    }

    #[test]
    fn unknown_season_rejected() {
        let config = FarmsteadConfig::parse("yield:\n  season: monsoon\n");
        let config = config.ok().unwrap_or_default();
        assert!(matches!(
            config.yields.modifiers(),
            Err(ConfigError::UnknownSeason { name }) if name == "monsoon"
        ));
    }

    #[test]
    fn malformed_yaml_is_an_error() {
        let result = FarmsteadConfig::parse("client: [not, a, map");
        assert!(matches!(result, Err(ConfigError::Yaml { .. })));
    }

    #[test]
    fn load_project_config_file() {
        let path = Path::new(env!("CARGO_MANIFEST_DIR"))
            .join("..")
            .join("..")
            .join("farmstead.yaml");
        if path.exists() {
            let config = FarmsteadConfig::from_file(&path);
            assert!(config.is_ok(), "Failed to load project config: {config:?}");
        }
    }
}

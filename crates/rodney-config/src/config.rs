//! Configuration types and loading for the rodney system.
//!
//! The main entry point is [`RodneyConfig`], which represents the contents of
//! `.rodney/config.yaml`. Configuration is loaded with [`load_config`] and
//! saved with [`save_config`]. Loading layers `RODNEY_*` environment
//! variables over the file, using `__` to reach into sections
//! (`RODNEY_API__TOKEN`).

use figment::Figment;
use figment::providers::{Env, Format, Serialized, Yaml};
use rodney_core::ActionKind;
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

/// The name of the config file inside the `.rodney/` directory.
pub const CONFIG_FILE_NAME: &str = "config.yaml";

/// Prefix for environment overrides.
pub const ENV_PREFIX: &str = "RODNEY_";

/// String settings whose environment values are taken verbatim instead of
/// being parsed as numbers, booleans or dicts.
const STRING_KEYS: &[&str] = &[
    "api.endpoint",
    "api.token",
    "api.api_version",
    "defaults.formula",
    "defaults.target_column",
];

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

/// Errors that can occur during configuration operations.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The configuration file could not be read or written.
    #[error("failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),

    /// The configuration could not be serialized to YAML.
    #[error("failed to write config file: {0}")]
    WriteError(#[from] serde_yaml::Error),

    /// The layered configuration (file + environment) was invalid.
    #[error("failed to parse config: {0}")]
    ParseError(#[from] Box<figment::Error>),

    /// A configuration value was invalid.
    #[error("invalid configuration value for key '{key}': {reason}")]
    InvalidValue {
        /// The configuration key that had an invalid value.
        key: String,
        /// A description of why the value is invalid.
        reason: String,
    },
}

/// A specialized `Result` type for configuration operations.
pub type Result<T> = std::result::Result<T, ConfigError>;

// ---------------------------------------------------------------------------
// Sub-configs
// ---------------------------------------------------------------------------

/// Remote API section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiConfig {
    /// GraphQL endpoint URL.
    #[serde(default = "default_endpoint")]
    pub endpoint: String,

    /// API token sent in the `Authorization` header.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,

    /// Value for the `API-Version` header, if pinned.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_version: Option<String>,

    /// Overall request timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            token: None,
            api_version: None,
            timeout_secs: default_timeout_secs(),
        }
    }
}

fn default_endpoint() -> String {
    "https://api.monday.com/v2".to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

/// Defaults applied when the command line leaves something out.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DefaultsConfig {
    /// Formula used when none is given.
    #[serde(default = "default_formula")]
    pub formula: String,

    /// Action selected when `--action` is not given.
    #[serde(default)]
    pub action: ActionKind,

    /// Target column for `update_column` when `--target` is not given.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_column: Option<String>,
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self {
            formula: default_formula(),
            action: ActionKind::default(),
            target_column: None,
        }
    }
}

fn default_formula() -> String {
    "{Status} - {Name}".to_string()
}

// ---------------------------------------------------------------------------
// Top-level config
// ---------------------------------------------------------------------------

/// The full contents of `.rodney/config.yaml`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RodneyConfig {
    #[serde(default)]
    pub api: ApiConfig,

    #[serde(default)]
    pub defaults: DefaultsConfig,

    /// Emit JSON output by default.
    #[serde(default)]
    pub json: bool,
}

impl RodneyConfig {
    /// Check values that deserialize fine but cannot be used.
    pub fn validate(&self) -> Result<()> {
        if self.api.endpoint.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                key: "api.endpoint".into(),
                reason: "must not be empty".into(),
            });
        }
        if self.api.timeout_secs == 0 {
            return Err(ConfigError::InvalidValue {
                key: "api.timeout_secs".into(),
                reason: "must be at least 1".into(),
            });
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Load / save
// ---------------------------------------------------------------------------

/// Load configuration for the given `.rodney/` directory.
///
/// Layers, lowest priority first: built-in defaults, `config.yaml` (skipped
/// when missing or empty), `RODNEY_*` environment variables. `config_dir`
/// may be `None` when no directory was found; then only defaults and the
/// environment apply.
pub fn load_config(config_dir: Option<&Path>) -> Result<RodneyConfig> {
    let mut figment = Figment::from(Serialized::defaults(RodneyConfig::default()));

    if let Some(dir) = config_dir {
        let config_path = dir.join(CONFIG_FILE_NAME);
        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            // An empty file is valid and yields default config.
            if !content.trim().is_empty() {
                figment = figment.merge(Yaml::string(&content));
            }
        }
    }

    figment = figment.merge(
        Env::prefixed(ENV_PREFIX)
            .split("__")
            .filter(|key| !STRING_KEYS.iter().any(|k| key.as_str().eq_ignore_ascii_case(k))),
    );
    for key in STRING_KEYS {
        if let Ok(value) = std::env::var(env_var_name(key)) {
            figment = figment.merge(Serialized::default(key, value));
        }
    }

    let config: RodneyConfig = figment.extract().map_err(Box::new)?;
    config.validate()?;
    Ok(config)
}

/// `api.token` -> `RODNEY_API__TOKEN`.
fn env_var_name(key: &str) -> String {
    format!("{ENV_PREFIX}{}", key.replace('.', "__").to_uppercase())
}

/// Save configuration to `.rodney/config.yaml`, creating the directory if
/// needed.
pub fn save_config(config_dir: &Path, config: &RodneyConfig) -> Result<()> {
    std::fs::create_dir_all(config_dir)?;

    let config_path = config_dir.join(CONFIG_FILE_NAME);
    let yaml = serde_yaml::to_string(config)?;
    std::fs::write(config_path, yaml)?;
    Ok(())
}

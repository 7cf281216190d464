//! Query configuration.
//!
//! Settings are read from the `[typequery]` section of `config/config.toml`,
//! with `TYPEQUERY__TYPEQUERY__*` environment variables layered on top
//! (e.g. `TYPEQUERY__TYPEQUERY__QUERY_BATCH_SIZE=250`).

use config::{Config, ConfigError, Environment, File};
use once_cell::sync::Lazy;
use serde::Deserialize;
use std::path::Path;

const CONFIG_FILE: &str = "config/config.toml";
const SECTION: &str = "typequery";

/// Process-wide configuration, loaded on first use.
///
/// A missing or unreadable configuration falls back to [`QueryConfig::default`].
pub static DEFAULT_CONFIG: Lazy<QueryConfig> = Lazy::new(|| match QueryConfig::load() {
    Ok(cfg) => cfg,
    Err(err) => {
        log::warn!("typequery configuration could not be loaded, using defaults: {err}");
        QueryConfig::default()
    }
});

/// Batch sizes applied to fetch paths that load outside the main SQL statement
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct QueryConfig {
    /// Parent identities per secondary query for `Query` and `Cache` fetches
    #[serde(default = "default_query_batch_size")]
    pub query_batch_size: u32,
    /// Parent identities per lazy load for `Lazy` fetches
    #[serde(default = "default_lazy_batch_size")]
    pub lazy_batch_size: u32,
}

fn default_query_batch_size() -> u32 {
    100
}

fn default_lazy_batch_size() -> u32 {
    10
}

impl Default for QueryConfig {
    fn default() -> Self {
        Self {
            query_batch_size: default_query_batch_size(),
            lazy_batch_size: default_lazy_batch_size(),
        }
    }
}

impl QueryConfig {
    /// Load from `config/config.toml`, falling back to env vars.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_layered(Path::new(CONFIG_FILE))
    }

    /// Optional `file` plus env; an unreadable file is retried env-only
    fn load_layered(file: &Path) -> Result<Self, ConfigError> {
        let builder = Config::builder()
            .add_source(File::from(file).required(false))
            .add_source(env_source());

        let settings = match builder.build() {
            Ok(cfg) => cfg,
            Err(err) => {
                // File exists but is unreadable or malformed: retry with env only
                if file.exists() {
                    log::warn!("failed to load {}, falling back to env: {err}", file.display());
                }
                Config::builder()
                    .add_source(env_source())
                    .build()
                    .map_err(|env_err| {
                        ConfigError::Message(format!(
                            "Failed to load configuration from file and env: {err}, then env-only error: {env_err}"
                        ))
                    })?
            }
        };

        Self::from_settings(&settings)
    }

    /// Load from an explicit TOML file. Environment overrides still apply.
    pub fn load_from(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let settings = Config::builder()
            .add_source(File::from(path.as_ref()))
            .add_source(env_source())
            .build()?;

        Self::from_settings(&settings)
    }

    fn from_settings(settings: &Config) -> Result<Self, ConfigError> {
        match settings.get::<QueryConfig>(SECTION) {
            Ok(cfg) => Ok(cfg),
            Err(ConfigError::NotFound(_)) => Ok(Self::default()),
            Err(e) => Err(ConfigError::Message(format!(
                "typequery configuration section is invalid: {e}"
            ))),
        }
    }
}

fn env_source() -> Environment {
    Environment::with_prefix("TYPEQUERY").separator("__")
}

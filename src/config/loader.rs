use std::{env, fs, path::{Path, PathBuf}};
use crate::errors::ConfigError;

use super::injector_config::InjectorConfig;

/// Environment variable pointing at the configuration file
pub const CONFIG_ENV_VAR: &str = "INJECTOR_CONFIG";
/// File used when the environment variable is not set
pub const DEFAULT_CONFIG_FILE: &str = "injector.toml";

/// Configuration loader responsible for loading config from files and environment
pub struct ConfigLoader {
    path: PathBuf,
}

impl ConfigLoader {
    /// Create a new config loader with the default path
    pub fn new() -> Self {
        let path = env::var_os(CONFIG_ENV_VAR)
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_FILE));
        Self { path }
    }

    /// Create a config loader with a custom path (for testing)
    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load and validate the configuration file
    pub fn load(&self) -> Result<InjectorConfig, ConfigError> {
        let origin = self.path.display().to_string();
        let content = fs::read_to_string(&self.path)
            .map_err(|e| ConfigError::FileRead(origin.clone(), e))?;
        parse(&content, origin)
    }

    /// Parse configuration from a string
    pub fn parse_str(content: &str) -> Result<InjectorConfig, ConfigError> {
        parse(content, "<inline>".to_string())
    }
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}

fn parse(content: &str, origin: String) -> Result<InjectorConfig, ConfigError> {
    let config: InjectorConfig =
        toml::from_str(content).map_err(|e| ConfigError::TomlParse(origin.clone(), e))?;
    config.validate()?;
    tracing::debug!(
        origin = %origin,
        values = config.values.len(),
        children = config.children.len(),
        "Loaded injector configuration"
    );
    Ok(config)
}

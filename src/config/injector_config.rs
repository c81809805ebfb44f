use crate::errors::ConfigError;
use crate::infrastructure::{Injector, InjectorOptions, Instance, Provider, ProviderDef};
use crate::logging::LoggingConfig;
use serde::Deserialize;
use std::sync::Arc;

use super::loader::ConfigLoader;

/// Declarative description of an injector tree.
///
/// ```toml
/// name = "Root"
///
/// [values]
/// "app.name" = "demo"
///
/// [[children]]
/// name = "Storage"
/// values = { "db.pool_size" = 16 }
/// ```
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct InjectorConfig {
    pub name: Option<String>,
    /// Registered as value providers keyed by name
    pub values: toml::Table,
    pub children: Vec<InjectorConfig>,
    pub logging: Option<LoggingConfig>,
}

impl InjectorConfig {
    /// Load configuration from the default location
    pub fn load() -> Result<Self, ConfigError> {
        ConfigLoader::new().load()
    }

    /// Check names across the whole tree
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.validate_at("root")
    }

    fn validate_at(&self, path: &str) -> Result<(), ConfigError> {
        if let Some(name) = &self.name {
            if name.trim().is_empty() {
                return Err(ConfigError::Invalid(format!(
                    "injector name at {} must not be empty",
                    path
                )));
            }
        }
        for (index, child) in self.children.iter().enumerate() {
            child.validate_at(&format!("{}.children[{}]", path, index))?;
        }
        Ok(())
    }

    /// Logging settings of the root, falling back to the defaults
    pub fn logging_config(&self) -> LoggingConfig {
        self.logging.clone().unwrap_or_default()
    }

    /// Value providers for the `[values]` table
    pub fn value_providers(&self) -> Vec<ProviderDef> {
        self.values
            .iter()
            .map(|(key, value)| Provider::instance(key.clone(), to_instance(value.clone())).into())
            .collect()
    }

    /// Builds every child injector and returns the options for the root, so
    /// code-defined providers can still be added.
    pub fn into_options(self) -> InjectorOptions {
        let mut options = InjectorOptions::new().providers(self.value_providers());
        options.name = self.name;
        for child in self.children {
            options = options.child(Arc::new(child.build()));
        }
        options
    }

    pub fn build(self) -> Injector {
        Injector::new(self.into_options())
    }
}

fn to_instance(value: toml::Value) -> Instance {
    match value {
        toml::Value::String(text) => Arc::new(text),
        toml::Value::Integer(number) => Arc::new(number),
        toml::Value::Float(number) => Arc::new(number),
        toml::Value::Boolean(flag) => Arc::new(flag),
        other => Arc::new(other),
    }
}

pub mod injector_config;
pub mod loader;

// Re-export commonly used types
pub use injector_config::InjectorConfig;
pub use loader::{ConfigLoader, CONFIG_ENV_VAR, DEFAULT_CONFIG_FILE};

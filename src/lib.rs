//! Hierarchical dependency injection.
//!
//! An [`Injector`] owns a registry of providers and an ordered list of child
//! injectors. `get` serves from its cache, then its own providers, then asks
//! each child in turn; class providers have their declared constructor and
//! field dependencies resolved against the same injector.

pub mod config;
pub mod errors;
pub mod identifier;
pub mod infrastructure;
pub mod logging;

// Re-export commonly used items for convenience
pub use config::InjectorConfig;
pub use errors::{ConfigError, ResolveError};
pub use identifier::{Identifier, Token, TypeKey};
pub use infrastructure::{
    Arguments, ClassRef, ContainerStats, Declaration, Declarations, Injectable, InjectionTarget,
    Injector, InjectorOptions, Instance, Provider, ProviderDef, DEFAULT_INJECTOR_NAME,
};

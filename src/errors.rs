use crate::identifier::{Identifier, TypeKey};
use thiserror::Error;

/// 解析错误
#[derive(Debug, Error)]
pub enum ResolveError {
    /// 注入器及其子注入器中都找不到该标识符
    #[error("No provider for {identifier} found in injector '{container}'")]
    NotFound {
        identifier: Identifier,
        container: String,
    },
    /// 构造类型时无法满足其声明的依赖
    #[error(
        "Unable to resolve {missing} required by {consumer} at position {position} in injector '{container}'"
    )]
    DependencyNotFound {
        missing: Identifier,
        consumer: TypeKey,
        container: String,
        position: usize,
    },
    #[error("Value resolved for {identifier} is not a {expected}")]
    TypeMismatch {
        identifier: Identifier,
        expected: &'static str,
    },
    #[error("{consumer} expects an injected argument at position {position}")]
    MissingArgument { consumer: TypeKey, position: usize },
    #[error("{consumer} has no injectable field '{field}'")]
    UnknownField { consumer: TypeKey, field: String },
    /// 工厂或构造函数内部的任意错误，原样传播
    #[error("Provider failed: {0}")]
    Provider(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl ResolveError {
    pub fn not_found(identifier: Identifier, container: &str) -> Self {
        ResolveError::NotFound {
            identifier,
            container: container.to_string(),
        }
    }

    /// Wraps an arbitrary failure raised by a factory or constructor body.
    pub fn provider(error: impl Into<Box<dyn std::error::Error + Send + Sync>>) -> Self {
        ResolveError::Provider(error.into())
    }

    /// `true` when this is the not-found failure for exactly `identifier`.
    pub fn is_not_found_for(&self, identifier: &Identifier) -> bool {
        matches!(self, ResolveError::NotFound { identifier: missing, .. } if missing == identifier)
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read file '{0}': {1}")]
    FileRead(String, #[source] std::io::Error),
    #[error("Failed to parse TOML from '{0}': {1}")]
    TomlParse(String, #[source] toml::de::Error),
    #[error("Invalid injector configuration: {0}")]
    Invalid(String),
}

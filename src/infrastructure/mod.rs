//! 基础设施层
//!
//! 依赖注入容器的实现，包括：
//! - 提供者定义与注册表
//! - 可构造类型及其依赖声明
//! - 分层注入器

pub mod class;
pub mod container;
pub mod metadata;
pub mod provider;
pub mod registry;

// 重新导出API
pub use class::{Arguments, ClassRef, Declaration, Declarations, Injectable, InjectionTarget};
pub use container::{ContainerStats, Injector, InjectorOptions, DEFAULT_INJECTOR_NAME};
pub use provider::{FactoryFn, Instance, Provider, ProviderDef};
pub use registry::ProviderRegistry;

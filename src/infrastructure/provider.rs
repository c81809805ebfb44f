//! 服务提供者定义
//!
//! 提供者是为某个标识符产生值的配方：固定值、可构造类型或工厂函数。

use super::class::{ClassRef, Injectable};
use super::container::Injector;
use crate::errors::ResolveError;
use crate::identifier::Identifier;
use std::any::Any;
use std::fmt;
use std::sync::Arc;

/// 已解析的实例
pub type Instance = Arc<dyn Any + Send + Sync>;

/// 工厂函数，参数为注册该提供者的注入器
pub type FactoryFn = Arc<dyn Fn(&Injector) -> Result<Instance, ResolveError> + Send + Sync>;

/// 提供者
#[derive(Clone)]
pub enum Provider {
    /// 原样返回的值
    Value { provide: Identifier, value: Instance },
    /// 构造类型实例
    Class { provide: Identifier, class: ClassRef },
    /// 调用工厂函数
    Factory { provide: Identifier, factory: FactoryFn },
}

impl Provider {
    pub fn value<T: Any + Send + Sync>(provide: impl Into<Identifier>, value: T) -> Self {
        Provider::Value {
            provide: provide.into(),
            value: Arc::new(value),
        }
    }

    /// 使用已有实例，保持其身份
    pub fn instance(provide: impl Into<Identifier>, value: Instance) -> Self {
        Provider::Value {
            provide: provide.into(),
            value,
        }
    }

    pub fn class<T: Injectable>(provide: impl Into<Identifier>) -> Self {
        Provider::Class {
            provide: provide.into(),
            class: ClassRef::of::<T>(),
        }
    }

    pub fn factory<T, F>(provide: impl Into<Identifier>, factory: F) -> Self
    where
        T: Any + Send + Sync,
        F: Fn(&Injector) -> Result<T, ResolveError> + Send + Sync + 'static,
    {
        Provider::Factory {
            provide: provide.into(),
            factory: Arc::new(
                move |injector: &Injector| -> Result<Instance, ResolveError> {
                    Ok(Arc::new(factory(injector)?) as Instance)
                },
            ),
        }
    }

    /// 工厂直接返回实例（例如转发另一个标识符的解析结果）
    pub fn factory_instance<F>(provide: impl Into<Identifier>, factory: F) -> Self
    where
        F: Fn(&Injector) -> Result<Instance, ResolveError> + Send + Sync + 'static,
    {
        Provider::Factory {
            provide: provide.into(),
            factory: Arc::new(factory),
        }
    }

    pub fn provide(&self) -> &Identifier {
        match self {
            Provider::Value { provide, .. }
            | Provider::Class { provide, .. }
            | Provider::Factory { provide, .. } => provide,
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Provider::Value { .. } => "value",
            Provider::Class { .. } => "class",
            Provider::Factory { .. } => "factory",
        }
    }
}

impl fmt::Debug for Provider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Provider::Value { provide, .. } => {
                f.debug_struct("Value").field("provide", provide).finish_non_exhaustive()
            }
            Provider::Class { provide, class } => f
                .debug_struct("Class")
                .field("provide", provide)
                .field("class", class)
                .finish(),
            Provider::Factory { provide, .. } => {
                f.debug_struct("Factory").field("provide", provide).finish_non_exhaustive()
            }
        }
    }
}

/// 初始提供者列表中的一项：完整提供者，或裸类型简写
#[derive(Debug, Clone)]
pub enum ProviderDef {
    Provider(Provider),
    Class(ClassRef),
}

impl ProviderDef {
    /// 裸类型规范化为以自身为键的类型提供者
    pub fn normalize(self) -> Provider {
        match self {
            ProviderDef::Provider(provider) => provider,
            ProviderDef::Class(class) => Provider::Class {
                provide: class.identifier(),
                class,
            },
        }
    }
}

impl From<Provider> for ProviderDef {
    fn from(provider: Provider) -> Self {
        ProviderDef::Provider(provider)
    }
}

impl From<ClassRef> for ProviderDef {
    fn from(class: ClassRef) -> Self {
        ProviderDef::Class(class)
    }
}

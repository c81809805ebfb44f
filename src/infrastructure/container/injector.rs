//! 分层依赖注入容器
//!
//! 解析顺序：缓存 -> 本地注册表 -> 按顺序委托给子注入器 -> 报告未找到。
//! - 本地提供者的解析结果缓存在本注入器上，永不失效
//! - 子注入器的结果只缓存在产生它的子注入器上
//! - 未找到错误只在搜索耗尽处产生，祖先注入器不会改写其名称

use super::stats::{ContainerStats, InnerStats};
use crate::errors::ResolveError;
use crate::identifier::Identifier;
use crate::infrastructure::class::{downcast, Injectable};
use crate::infrastructure::provider::{Instance, Provider, ProviderDef};
use crate::infrastructure::registry::ProviderRegistry;
use dashmap::DashMap;
use parking_lot::Mutex;
use std::any::Any;
use std::fmt;
use std::sync::atomic::Ordering;
use std::sync::{Arc, OnceLock};

/// 未指定名称时使用的名称
pub const DEFAULT_INJECTOR_NAME: &str = "Injector";

/// 缓存槽 - 解析期间持有 `init`，保证同一标识符只解析一次；
/// 已解析的值无需加锁即可读取
#[derive(Default)]
struct Slot {
    value: OnceLock<Instance>,
    init: Mutex<()>,
}

/// 注入器构造选项
#[derive(Default)]
pub struct InjectorOptions {
    pub name: Option<String>,
    pub initial_providers: Vec<ProviderDef>,
    pub children: Vec<Arc<Injector>>,
}

impl InjectorOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn provider(mut self, provider: impl Into<ProviderDef>) -> Self {
        self.initial_providers.push(provider.into());
        self
    }

    pub fn providers<I>(mut self, providers: I) -> Self
    where
        I: IntoIterator<Item = ProviderDef>,
    {
        self.initial_providers.extend(providers);
        self
    }

    /// 裸类型简写，等价于以类型自身为键的类型提供者
    pub fn class<T: Injectable>(self) -> Self {
        self.provider(crate::infrastructure::class::ClassRef::of::<T>())
    }

    pub fn child(mut self, child: impl Into<Arc<Injector>>) -> Self {
        self.children.push(child.into());
        self
    }
}

/// 注入器
pub struct Injector {
    name: String,
    registry: ProviderRegistry,
    /// 实例缓存 - 只包含本地提供者的结果
    cache: DashMap<Identifier, Arc<Slot>>,
    children: Vec<Arc<Injector>>,
    stats: InnerStats,
}

impl Injector {
    pub fn new(options: InjectorOptions) -> Self {
        let InjectorOptions {
            name,
            initial_providers,
            children,
        } = options;
        let name = name.unwrap_or_else(|| DEFAULT_INJECTOR_NAME.to_string());
        let registry = ProviderRegistry::from_definitions(initial_providers);

        tracing::debug!(
            injector = %name,
            providers = registry.len(),
            children = children.len(),
            "Injector created"
        );

        Self {
            name,
            registry,
            cache: DashMap::new(),
            children,
            stats: InnerStats::default(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn children(&self) -> &[Arc<Injector>] {
        &self.children
    }

    pub fn registry(&self) -> &ProviderRegistry {
        &self.registry
    }

    /// 解析标识符 - 主要API
    pub fn get(&self, identifier: impl Into<Identifier>) -> Result<Instance, ResolveError> {
        self.lookup(&identifier.into())
    }

    /// 解析并向下转型
    pub fn get_as<T: Any + Send + Sync>(
        &self,
        identifier: impl Into<Identifier>,
    ) -> Result<Arc<T>, ResolveError> {
        let identifier = identifier.into();
        let instance = self.lookup(&identifier)?;
        downcast(&identifier, instance)
    }

    /// 以类型自身为键解析
    pub fn resolve<T: Injectable>(&self) -> Result<Arc<T>, ResolveError> {
        self.get_as::<T>(Identifier::of::<T>())
    }

    /// 标识符是否已缓存在本注入器上
    ///
    /// 不会等待正在进行的解析：解析中的标识符视为未缓存
    pub fn is_cached(&self, identifier: impl Into<Identifier>) -> bool {
        let Some(slot) = self.slot(&identifier.into()) else {
            return false;
        };
        slot.value.get().is_some()
    }

    pub(crate) fn lookup(&self, identifier: &Identifier) -> Result<Instance, ResolveError> {
        self.stats.total_resolutions.fetch_add(1, Ordering::Relaxed);

        // 检查缓存
        if let Some(instance) = self.cached(identifier) {
            self.stats.cache_hits.fetch_add(1, Ordering::Relaxed);
            tracing::trace!(injector = %self.name, identifier = %identifier, "Cache hit");
            return Ok(instance);
        }

        // 本地提供者
        if let Some(provider) = self.registry.get(identifier) {
            return self.resolve_local(identifier, provider);
        }

        // 委托给子注入器
        for child in &self.children {
            self.stats.delegations.fetch_add(1, Ordering::Relaxed);
            tracing::trace!(
                injector = %self.name,
                child = %child.name,
                identifier = %identifier,
                "Delegating to child injector"
            );
            match child.lookup(identifier) {
                Ok(instance) => return Ok(instance),
                Err(err) if err.is_not_found_for(identifier) => continue,
                Err(err) => return Err(err),
            }
        }

        Err(ResolveError::not_found(identifier.clone(), &self.name))
    }

    fn cached(&self, identifier: &Identifier) -> Option<Instance> {
        self.slot(identifier)?.value.get().cloned()
    }

    /// 克隆槽后立即释放分片锁
    fn slot(&self, identifier: &Identifier) -> Option<Arc<Slot>> {
        self.cache.get(identifier).map(|slot| slot.value().clone())
    }

    fn resolve_local(
        &self,
        identifier: &Identifier,
        provider: &Provider,
    ) -> Result<Instance, ResolveError> {
        // 获取或创建缓存槽；克隆后立即释放分片锁
        let slot = self
            .cache
            .entry(identifier.clone())
            .or_insert_with(|| Arc::new(Slot::default()))
            .value()
            .clone();

        let _init = slot.init.lock();
        // 等待期间可能已被其他线程解析
        if let Some(instance) = slot.value.get() {
            self.stats.cache_hits.fetch_add(1, Ordering::Relaxed);
            return Ok(instance.clone());
        }

        self.stats.cache_misses.fetch_add(1, Ordering::Relaxed);
        tracing::debug!(
            injector = %self.name,
            identifier = %identifier,
            kind = provider.kind(),
            "Resolving provider"
        );

        let instance = self.instantiate(provider)?;
        // 持有 init 时槽不可能已被写入
        let _ = slot.value.set(instance.clone());
        self.stats.cached_instances.fetch_add(1, Ordering::Relaxed);
        Ok(instance)
    }

    fn instantiate(&self, provider: &Provider) -> Result<Instance, ResolveError> {
        match provider {
            Provider::Value { value, .. } => Ok(value.clone()),
            Provider::Factory { factory, .. } => factory(self),
            Provider::Class { class, .. } => self.construct(class),
        }
    }

    /// 获取容器统计信息
    pub fn stats(&self) -> ContainerStats {
        self.stats.snapshot(self.registry.len())
    }
}

impl Default for Injector {
    fn default() -> Self {
        Self::new(InjectorOptions::default())
    }
}

impl fmt::Debug for Injector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Injector")
            .field("name", &self.name)
            .field("providers", &self.registry.len())
            .field("children", &self.children)
            .finish()
    }
}

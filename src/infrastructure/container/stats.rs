use std::sync::atomic::{AtomicUsize, Ordering};

/// 内部容器统计信息（原子计数器）
#[derive(Default)]
pub(crate) struct InnerStats {
    pub(crate) total_resolutions: AtomicUsize,
    pub(crate) cache_hits: AtomicUsize,
    pub(crate) cache_misses: AtomicUsize,
    pub(crate) delegations: AtomicUsize,
    pub(crate) cached_instances: AtomicUsize,
}

impl InnerStats {
    pub(crate) fn snapshot(&self, registered_providers: usize) -> ContainerStats {
        ContainerStats {
            total_resolutions: self.total_resolutions.load(Ordering::Relaxed),
            cache_hits: self.cache_hits.load(Ordering::Relaxed),
            cache_misses: self.cache_misses.load(Ordering::Relaxed),
            delegations: self.delegations.load(Ordering::Relaxed),
            registered_providers,
            cached_instances: self.cached_instances.load(Ordering::Relaxed),
        }
    }
}

/// 容器统计信息
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContainerStats {
    /// 总解析次数（含来自父注入器的委托）
    pub total_resolutions: usize,
    /// 缓存命中次数
    pub cache_hits: usize,
    /// 缓存未命中次数，即本地提供者的实际解析次数
    pub cache_misses: usize,
    /// 委托给子注入器的次数
    pub delegations: usize,
    /// 注册的提供者数量
    pub registered_providers: usize,
    /// 已缓存的实例数量
    pub cached_instances: usize,
}

impl ContainerStats {
    /// 获取总解析次数
    pub fn total(&self) -> usize {
        self.total_resolutions
    }

    /// 获取缓存命中率
    pub fn hit_rate(&self) -> f64 {
        let total = self.cache_hits + self.cache_misses;
        if total == 0 {
            0.0
        } else {
            self.cache_hits as f64 / total as f64
        }
    }

    /// 获取性能指标摘要
    pub fn summary(&self) -> String {
        format!(
            "{} resolutions, {:.1}% cache hit rate, {} delegations, {}/{} providers cached",
            self.total_resolutions,
            self.hit_rate() * 100.0,
            self.delegations,
            self.cached_instances,
            self.registered_providers
        )
    }
}

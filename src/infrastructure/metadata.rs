//! 依赖声明注册表
//!
//! 进程级、只增不减的 类型 -> 声明列表 映射。类型第一次被查询时调用其
//! `Injectable::declare` 收集声明，此后所有注入器共享同一份结果。

use super::class::{ClassRef, Declaration, Injectable};
use dashmap::DashMap;
use lazy_static::lazy_static;
use std::any::TypeId;
use std::sync::Arc;

lazy_static! {
    static ref DECLARATIONS: DashMap<TypeId, Arc<[Declaration]>> = DashMap::new();
}

/// 获取类型的依赖声明（按声明顺序）
pub fn declarations_of(class: &ClassRef) -> Arc<[Declaration]> {
    if let Some(found) = DECLARATIONS.get(&class.type_id()) {
        return found.value().clone();
    }

    // 在分片写锁内收集，并发的首次查询只会调用一次 declare
    DECLARATIONS
        .entry(class.type_id())
        .or_insert_with(|| {
            let collected: Arc<[Declaration]> = class.collect_declarations().into();
            tracing::trace!(
                class = class.key().name(),
                count = collected.len(),
                "Registered dependency declarations"
            );
            collected
        })
        .value()
        .clone()
}

/// 泛型便捷方法
pub fn declarations<T: Injectable>() -> Arc<[Declaration]> {
    declarations_of(&ClassRef::of::<T>())
}

/// 类型是否已经登记过声明
pub fn is_registered(class: &ClassRef) -> bool {
    DECLARATIONS.contains_key(&class.type_id())
}

//! 提供者注册表
//!
//! 注入器构造时一次性填充；每个标识符至多对应一个提供者，重复注册时后者覆盖前者。

use super::provider::{Provider, ProviderDef};
use crate::identifier::Identifier;
use std::collections::HashMap;

#[derive(Debug, Default)]
pub struct ProviderRegistry {
    providers: HashMap<Identifier, Provider>,
    /// 首次注册顺序，仅用于诊断
    order: Vec<Identifier>,
}

impl ProviderRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_definitions<I>(definitions: I) -> Self
    where
        I: IntoIterator<Item = ProviderDef>,
    {
        let mut registry = Self::new();
        for definition in definitions {
            registry.insert(definition.normalize());
        }
        registry
    }

    fn insert(&mut self, provider: Provider) {
        let identifier = provider.provide().clone();
        match self.providers.insert(identifier.clone(), provider) {
            Some(previous) => {
                tracing::debug!(
                    identifier = %identifier,
                    replaced = previous.kind(),
                    "Duplicate provider registration, last one wins"
                );
            }
            None => self.order.push(identifier),
        }
    }

    pub fn get(&self, identifier: &Identifier) -> Option<&Provider> {
        self.providers.get(identifier)
    }

    pub fn contains(&self, identifier: &Identifier) -> bool {
        self.providers.contains_key(identifier)
    }

    pub fn len(&self) -> usize {
        self.providers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.providers.is_empty()
    }

    /// 按注册顺序列出标识符
    pub fn identifiers(&self) -> impl Iterator<Item = &Identifier> {
        self.order.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[test]
    fn last_registration_wins() {
        let registry = ProviderRegistry::from_definitions(vec![
            Provider::value("port", 80_i64).into(),
            Provider::value("host", "localhost").into(),
            Provider::value("port", 8080_i64).into(),
        ]);

        assert_eq!(registry.len(), 2);
        let Some(Provider::Value { value, .. }) = registry.get(&Identifier::from("port")) else {
            panic!("expected a value provider");
        };
        assert_eq!(*Arc::clone(value).downcast::<i64>().unwrap(), 8080);
    }

    #[test]
    fn identifiers_keep_first_registration_order() {
        let registry = ProviderRegistry::from_definitions(vec![
            Provider::value("b", 1_i64).into(),
            Provider::value("a", 2_i64).into(),
            Provider::value("b", 3_i64).into(),
        ]);

        let names: Vec<String> = registry.identifiers().map(|id| id.to_string()).collect();
        assert_eq!(names, vec!["'b'", "'a'"]);
    }

    #[test]
    fn empty_registry() {
        let registry = ProviderRegistry::from_definitions(Vec::new());

        assert!(registry.is_empty());
        assert!(!registry.contains(&Identifier::from("anything")));
    }
}

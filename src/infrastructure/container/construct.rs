//! 带依赖注入的实例构造
//!
//! 构造函数参数按位置解析后一次性传入；字段在构造完成后逐个赋值。
//! 任何依赖解析失败都被替换为 `DependencyNotFound`，构造随即中止。

use super::injector::Injector;
use crate::errors::ResolveError;
use crate::infrastructure::class::{Arguments, ClassRef, Declaration, InjectionTarget};
use crate::infrastructure::metadata;
use crate::infrastructure::provider::Instance;
use std::sync::Arc;

impl Injector {
    pub(crate) fn construct(&self, class: &ClassRef) -> Result<Instance, ResolveError> {
        let declarations = metadata::declarations_of(class);
        let (mut parameters, fields): (Vec<&Declaration>, Vec<&Declaration>) = declarations
            .iter()
            .partition(|declaration| declaration.is_constructor_parameter());
        parameters.sort_by_key(|declaration| declaration.position);

        let mut values = Vec::with_capacity(parameters.len());
        for declaration in parameters {
            let value = self.dependency(class, declaration)?;
            values.push((declaration.position, declaration.identifier.clone(), value));
        }

        let mut args = Arguments::new(class.key(), values);
        let mut instance = class.construct(&mut args)?;

        for declaration in fields {
            let InjectionTarget::Field(key) = &declaration.target else {
                continue;
            };
            let value = self.dependency(class, declaration)?;
            class.inject_field(&mut *instance, key, value)?;
        }

        Ok(Arc::from(instance))
    }

    fn dependency(
        &self,
        consumer: &ClassRef,
        declaration: &Declaration,
    ) -> Result<Instance, ResolveError> {
        self.lookup(&declaration.identifier).map_err(|cause| {
            tracing::debug!(
                injector = %self.name(),
                consumer = %consumer.key(),
                position = declaration.position,
                cause = %cause,
                "Dependency resolution failed"
            );
            ResolveError::DependencyNotFound {
                missing: declaration.identifier.clone(),
                consumer: consumer.key(),
                container: self.name().to_string(),
                position: declaration.position,
            }
        })
    }
}

//! Constructible types.
//!
//! A type that can be built by a class provider implements [`Injectable`]. It
//! declares which identifiers must be injected into its constructor and
//! fields, and knows how to build itself from the resolved constructor
//! arguments. [`ClassRef`] is the type-erased handle providers store.

use crate::errors::ResolveError;
use crate::identifier::{Identifier, TypeKey};
use crate::infrastructure::provider::Instance;
use std::any::{Any, TypeId};
use std::fmt;
use std::sync::Arc;

/// Where a declared dependency is injected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InjectionTarget {
    ConstructorParameter,
    Field(&'static str),
}

/// One "inject this identifier here" declaration of a type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Declaration {
    /// Declaration index, shared by constructor parameters and fields.
    pub position: usize,
    pub identifier: Identifier,
    pub target: InjectionTarget,
}

impl Declaration {
    pub fn is_constructor_parameter(&self) -> bool {
        self.target == InjectionTarget::ConstructorParameter
    }
}

/// Builder handed to [`Injectable::declare`].
///
/// Positions are assigned in the order the declarations are made, starting
/// at 0, across constructor parameters and fields alike.
#[derive(Debug, Default)]
pub struct Declarations {
    entries: Vec<Declaration>,
}

impl Declarations {
    pub fn new() -> Self {
        Self::default()
    }

    /// Declares the next constructor parameter.
    pub fn constructor(&mut self, identifier: impl Into<Identifier>) -> &mut Self {
        self.push(identifier.into(), InjectionTarget::ConstructorParameter)
    }

    /// Declares a field assigned after construction.
    pub fn field(&mut self, key: &'static str, identifier: impl Into<Identifier>) -> &mut Self {
        self.push(identifier.into(), InjectionTarget::Field(key))
    }

    fn push(&mut self, identifier: Identifier, target: InjectionTarget) -> &mut Self {
        let position = self.entries.len();
        self.entries.push(Declaration {
            position,
            identifier,
            target,
        });
        self
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn into_vec(self) -> Vec<Declaration> {
        self.entries
    }
}

/// Resolved constructor arguments, in position order.
pub struct Arguments {
    consumer: TypeKey,
    values: Vec<(usize, Identifier, Instance)>,
    cursor: usize,
}

impl Arguments {
    pub(crate) fn new(consumer: TypeKey, values: Vec<(usize, Identifier, Instance)>) -> Self {
        Self {
            consumer,
            values,
            cursor: 0,
        }
    }

    /// Takes the next constructor argument.
    pub fn next<T: Any + Send + Sync>(&mut self) -> Result<Arc<T>, ResolveError> {
        let (_, identifier, value) =
            self.values
                .get(self.cursor)
                .ok_or(ResolveError::MissingArgument {
                    consumer: self.consumer,
                    position: self.cursor,
                })?;
        self.cursor += 1;
        downcast(identifier, value.clone())
    }

    /// Argument declared at `position`.
    pub fn at<T: Any + Send + Sync>(&self, position: usize) -> Result<Arc<T>, ResolveError> {
        let (_, identifier, value) = self
            .values
            .iter()
            .find(|(declared, _, _)| *declared == position)
            .ok_or(ResolveError::MissingArgument {
                consumer: self.consumer,
                position,
            })?;
        downcast(identifier, value.clone())
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

pub(crate) fn downcast<T: Any + Send + Sync>(
    identifier: &Identifier,
    value: Instance,
) -> Result<Arc<T>, ResolveError> {
    value
        .downcast::<T>()
        .map_err(|_| ResolveError::TypeMismatch {
            identifier: identifier.clone(),
            expected: std::any::type_name::<T>(),
        })
}

/// A type a class provider can construct.
///
/// ```rust
/// use std::sync::Arc;
/// use injector::{Arguments, Declarations, Injectable, Instance, ResolveError};
///
/// struct Config;
///
/// impl Injectable for Config {
///     fn construct(_: &mut Arguments) -> Result<Self, ResolveError> {
///         Ok(Config)
///     }
/// }
///
/// struct Server {
///     config: Arc<Config>,
///     port: Option<Arc<i64>>,
/// }
///
/// impl Injectable for Server {
///     fn declare(deps: &mut Declarations) {
///         deps.constructor(injector::Identifier::of::<Config>())
///             .field("port", "port");
///     }
///
///     fn construct(args: &mut Arguments) -> Result<Self, ResolveError> {
///         Ok(Server { config: args.next()?, port: None })
///     }
///
///     fn inject_field(&mut self, key: &str, value: Instance) -> Result<(), ResolveError> {
///         if key == "port" {
///             self.port = value.downcast().ok();
///         }
///         Ok(())
///     }
/// }
/// ```
pub trait Injectable: Any + Send + Sync + Sized {
    /// Declares injected dependencies. Called once per type, on first lookup.
    ///
    /// Runs while the declaration registry entry is locked, so it must only
    /// fill `deps` and never look up declarations of other types.
    fn declare(_deps: &mut Declarations) {}

    /// Builds the value from the resolved constructor arguments.
    fn construct(args: &mut Arguments) -> Result<Self, ResolveError>;

    /// Assigns a resolved field dependency.
    fn inject_field(&mut self, key: &str, _value: Instance) -> Result<(), ResolveError> {
        Err(ResolveError::UnknownField {
            consumer: TypeKey::of::<Self>(),
            field: key.to_string(),
        })
    }
}

type ConstructFn = fn(&mut Arguments) -> Result<Box<dyn Any + Send + Sync>, ResolveError>;
type InjectFieldFn = fn(&mut (dyn Any + Send + Sync), &str, Instance) -> Result<(), ResolveError>;

/// Type-erased handle to an [`Injectable`] type.
#[derive(Clone, Copy)]
pub struct ClassRef {
    key: TypeKey,
    declare: fn(&mut Declarations),
    construct: ConstructFn,
    inject_field: InjectFieldFn,
}

impl ClassRef {
    pub fn of<T: Injectable>() -> Self {
        Self {
            key: TypeKey::of::<T>(),
            declare: T::declare,
            construct: construct_erased::<T>,
            inject_field: inject_field_erased::<T>,
        }
    }

    pub fn key(&self) -> TypeKey {
        self.key
    }

    pub fn type_id(&self) -> TypeId {
        self.key.type_id()
    }

    pub fn identifier(&self) -> Identifier {
        Identifier::Type(self.key)
    }

    pub(crate) fn collect_declarations(&self) -> Vec<Declaration> {
        let mut declarations = Declarations::new();
        (self.declare)(&mut declarations);
        declarations.into_vec()
    }

    pub(crate) fn construct(
        &self,
        args: &mut Arguments,
    ) -> Result<Box<dyn Any + Send + Sync>, ResolveError> {
        (self.construct)(args)
    }

    pub(crate) fn inject_field(
        &self,
        target: &mut (dyn Any + Send + Sync),
        key: &str,
        value: Instance,
    ) -> Result<(), ResolveError> {
        (self.inject_field)(target, key, value)
    }
}

impl fmt::Debug for ClassRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ClassRef({})", self.key.name())
    }
}

impl PartialEq for ClassRef {
    fn eq(&self, other: &Self) -> bool {
        self.key == other.key
    }
}

impl Eq for ClassRef {}

fn construct_erased<T: Injectable>(
    args: &mut Arguments,
) -> Result<Box<dyn Any + Send + Sync>, ResolveError> {
    Ok(Box::new(T::construct(args)?))
}

fn inject_field_erased<T: Injectable>(
    target: &mut (dyn Any + Send + Sync),
    key: &str,
    value: Instance,
) -> Result<(), ResolveError> {
    match target.downcast_mut::<T>() {
        Some(instance) => instance.inject_field(key, value),
        None => Err(ResolveError::TypeMismatch {
            identifier: Identifier::of::<T>(),
            expected: std::any::type_name::<T>(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Plain;

    impl Injectable for Plain {
        fn construct(_: &mut Arguments) -> Result<Self, ResolveError> {
            Ok(Plain)
        }
    }

    struct Mixed;

    impl Injectable for Mixed {
        fn declare(deps: &mut Declarations) {
            deps.field("logger", "logger")
                .constructor("db")
                .constructor("cache");
        }

        fn construct(_: &mut Arguments) -> Result<Self, ResolveError> {
            Ok(Mixed)
        }
    }

    #[test]
    fn positions_are_shared_across_targets() {
        let declarations = ClassRef::of::<Mixed>().collect_declarations();

        let positions: Vec<_> = declarations
            .iter()
            .map(|d| (d.position, d.is_constructor_parameter()))
            .collect();
        assert_eq!(positions, vec![(0, false), (1, true), (2, true)]);
        assert_eq!(declarations[0].target, InjectionTarget::Field("logger"));
    }

    #[test]
    fn undeclared_type_has_no_declarations() {
        assert!(ClassRef::of::<Plain>().collect_declarations().is_empty());
    }

    #[test]
    fn default_field_injection_rejects_unknown_fields() {
        let class = ClassRef::of::<Plain>();
        let mut args = Arguments::new(class.key(), Vec::new());
        let mut instance = class.construct(&mut args).unwrap();

        let result = class.inject_field(instance.as_mut(), "missing", Arc::new(1_i64));

        assert!(matches!(
            result,
            Err(ResolveError::UnknownField { ref field, .. }) if field == "missing"
        ));
    }

    #[test]
    fn arguments_downcast_in_order() {
        let mut args = Arguments::new(
            TypeKey::of::<Plain>(),
            vec![
                (0, Identifier::from("name"), Arc::new(String::from("svc")) as Instance),
                (2, Identifier::from("port"), Arc::new(8080_i64) as Instance),
            ],
        );

        assert_eq!(*args.next::<String>().unwrap(), "svc");
        assert_eq!(*args.at::<i64>(2).unwrap(), 8080);
        assert!(matches!(
            args.next::<String>(),
            Err(ResolveError::TypeMismatch { .. })
        ));
        assert!(matches!(
            args.next::<String>(),
            Err(ResolveError::MissingArgument { position: 2, .. })
        ));
    }
}

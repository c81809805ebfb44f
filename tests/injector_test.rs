//! 注入器行为测试

use injector::{
    Arguments, ClassRef, Declarations, Identifier, Injectable, Injector, InjectorOptions, Instance,
    Provider, ResolveError, TypeKey,
};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

#[derive(Debug)]
struct Test;

impl Injectable for Test {
    fn construct(_: &mut Arguments) -> Result<Self, ResolveError> {
        Ok(Test)
    }
}

/// 构造函数依赖 Test
#[derive(Debug)]
struct WithConstructorDep {
    dep: Arc<Test>,
}

impl Injectable for WithConstructorDep {
    fn declare(deps: &mut Declarations) {
        deps.constructor(Identifier::of::<Test>());
    }

    fn construct(args: &mut Arguments) -> Result<Self, ResolveError> {
        Ok(WithConstructorDep { dep: args.next()? })
    }
}

/// 字段依赖 Test
#[derive(Debug, Default)]
struct WithFieldDep {
    dep: Option<Arc<Test>>,
}

impl Injectable for WithFieldDep {
    fn declare(deps: &mut Declarations) {
        deps.field("dep", Identifier::of::<Test>());
    }

    fn construct(_: &mut Arguments) -> Result<Self, ResolveError> {
        Ok(WithFieldDep::default())
    }

    fn inject_field(&mut self, key: &str, value: Instance) -> Result<(), ResolveError> {
        match key {
            "dep" => {
                self.dep = value.downcast().ok();
                Ok(())
            }
            _ => Err(ResolveError::provider(format!("unexpected field {}", key))),
        }
    }
}

#[test]
fn test_resolves_a_value() {
    let injector = Injector::new(InjectorOptions::new().provider(Provider::value("value", true)));

    assert!(*injector.get_as::<bool>("value").unwrap());
}

#[test]
fn test_value_identity_is_preserved() {
    let shared: Instance = Arc::new(String::from("shared"));
    let injector = Injector::new(
        InjectorOptions::new().provider(Provider::instance("value", shared.clone())),
    );

    assert!(Arc::ptr_eq(&injector.get("value").unwrap(), &shared));
}

#[test]
fn test_resolves_a_class() {
    let injector = Injector::new(
        InjectorOptions::new().provider(Provider::class::<Test>(Identifier::of::<Test>())),
    );

    assert!(injector.get(Identifier::of::<Test>()).unwrap().is::<Test>());
}

#[test]
fn test_resolves_a_factory_with_owning_injector() {
    let seen: Arc<Mutex<Option<usize>>> = Arc::new(Mutex::new(None));
    let seen_clone = seen.clone();
    let injector = Injector::new(InjectorOptions::new().provider(Provider::factory(
        Identifier::of::<Test>(),
        move |injector: &Injector| {
            *seen_clone.lock().unwrap() = Some(injector as *const Injector as usize);
            Ok(true)
        },
    )));

    assert!(*injector.get_as::<bool>(Identifier::of::<Test>()).unwrap());
    assert_eq!(
        *seen.lock().unwrap(),
        Some(&injector as *const Injector as usize)
    );
}

#[test]
fn test_caches_resolved_values() {
    let injector = Injector::new(InjectorOptions::new().class::<Test>());

    let first = injector.resolve::<Test>().unwrap();
    let second = injector.resolve::<Test>().unwrap();

    assert!(Arc::ptr_eq(&first, &second));
}

#[test]
fn test_resolves_constructor_dependencies() {
    let injector = Injector::new(
        InjectorOptions::new()
            .provider(Provider::class::<Test>(Identifier::of::<Test>()))
            .provider(Provider::class::<WithConstructorDep>(
                Identifier::of::<WithConstructorDep>(),
            )),
    );

    let consumer = injector.resolve::<WithConstructorDep>().unwrap();

    assert!(Arc::ptr_eq(&consumer.dep, &injector.resolve::<Test>().unwrap()));
}

#[test]
fn test_unresolvable_constructor_dependency() {
    let injector = Injector::new(
        InjectorOptions::new()
            .name("Parent")
            .class::<WithConstructorDep>(),
    );

    let err = injector.resolve::<WithConstructorDep>().unwrap_err();

    match err {
        ResolveError::DependencyNotFound {
            missing,
            consumer,
            container,
            position,
        } => {
            assert_eq!(missing, Identifier::of::<Test>());
            assert_eq!(consumer, TypeKey::of::<WithConstructorDep>());
            assert_eq!(container, "Parent");
            assert_eq!(position, 0);
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn test_resolves_field_dependencies() {
    let injector = Injector::new(
        InjectorOptions::new()
            .class::<Test>()
            .class::<WithFieldDep>(),
    );

    let consumer = injector.resolve::<WithFieldDep>().unwrap();
    let dep = consumer.dep.as_ref().expect("field should be injected");

    assert!(Arc::ptr_eq(dep, &injector.resolve::<Test>().unwrap()));
}

#[test]
fn test_unresolvable_field_dependency() {
    let injector = Injector::new(InjectorOptions::new().name("Parent").class::<WithFieldDep>());

    let err = injector.resolve::<WithFieldDep>().unwrap_err();

    match err {
        ResolveError::DependencyNotFound {
            missing,
            consumer,
            container,
            position,
        } => {
            assert_eq!(missing, Identifier::of::<Test>());
            assert_eq!(consumer, TypeKey::of::<WithFieldDep>());
            assert_eq!(container, "Parent");
            assert_eq!(position, 0);
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn test_resolves_a_child_dependency() {
    let child = Injector::new(InjectorOptions::new().class::<Test>());
    let injector = Injector::new(InjectorOptions::new().child(child));

    assert!(injector.get(Identifier::of::<Test>()).unwrap().is::<Test>());
}

#[test]
fn test_not_found_names_the_parent() {
    let child = Injector::new(InjectorOptions::new().name("Child"));
    let injector = Injector::new(InjectorOptions::new().name("Parent").child(child));

    let err = injector.get(Identifier::of::<Test>()).unwrap_err();

    match err {
        ResolveError::NotFound {
            identifier,
            container,
        } => {
            assert_eq!(identifier, Identifier::of::<Test>());
            assert_eq!(container, "Parent");
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn test_factory_error_in_child_keeps_child_name() {
    let child = Injector::new(InjectorOptions::new().name("Child").provider(
        Provider::factory_instance("test", |injector: &Injector| injector.get("test2")),
    ));
    let injector = Injector::new(InjectorOptions::new().name("Parent").child(child));

    let err = injector.get("test").unwrap_err();

    match err {
        ResolveError::NotFound {
            identifier,
            container,
        } => {
            assert_eq!(identifier, Identifier::from("test2"));
            assert_eq!(container, "Child");
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn test_bare_class_shorthand() {
    let injector = Injector::new(InjectorOptions::new().provider(ClassRef::of::<Test>()));

    assert!(injector.registry().contains(&Identifier::of::<Test>()));
    assert!(injector.resolve::<Test>().is_ok());
}

#[test]
fn test_constructor_runs_once() {
    static CONSTRUCTED: AtomicUsize = AtomicUsize::new(0);

    struct Counted;

    impl Injectable for Counted {
        fn construct(_: &mut Arguments) -> Result<Self, ResolveError> {
            CONSTRUCTED.fetch_add(1, Ordering::SeqCst);
            Ok(Counted)
        }
    }

    let injector = Injector::new(InjectorOptions::new().class::<Counted>());
    for _ in 0..5 {
        injector.get(Identifier::of::<Counted>()).unwrap();
    }

    assert_eq!(CONSTRUCTED.load(Ordering::SeqCst), 1);
}

//! A key submitted twice for the same base and argument list aborts startup.

use factory_registry::{
    impl_upcast, init, register_factory, registrations, Construct, ErrorKind, Factory,
    FactoryRegistry, RegistryError,
};

pub trait Plugin {
    fn name(&self) -> &'static str;
}

struct Alpha;
struct Beta;

impl Plugin for Alpha {
    fn name(&self) -> &'static str {
        "alpha"
    }
}

impl Plugin for Beta {
    fn name(&self) -> &'static str {
        "beta"
    }
}

impl Construct<()> for Alpha {
    fn construct(_: ()) -> Self {
        Alpha
    }
}

impl Construct<()> for Beta {
    fn construct(_: ()) -> Self {
        Beta
    }
}

impl_upcast!(dyn Plugin => Alpha, Beta);

register_factory!(&'static str, "loader", dyn Plugin, Alpha);
register_factory!(&'static str, "loader", dyn Plugin, Beta);

#[test]
fn test_duplicate_key_fails_startup() {
    let err = init().err().unwrap();
    assert_eq!(err.kind(), ErrorKind::DuplicateRegistration);

    match &err {
        RegistryError::DuplicateRegistration {
            key, args, location, ..
        } => {
            assert_eq!(key, "\"loader\"");
            assert_eq!(*args, "()");
            assert!(location.file.ends_with("duplicate_registration.rs"));
        }
        other => panic!("unexpected error: {other}"),
    }
    assert!(err.to_string().contains("is already registered for dyn"));
}

#[test]
fn test_failure_is_cached() {
    let first = init().err().unwrap();
    let second = init().err().unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_first_creator_is_kept() {
    let _ = init();

    let registry = FactoryRegistry::<&'static str, dyn Plugin, ()>::instance();
    assert_eq!(registry.len(), 1);
    assert_eq!(registrations().count(), 2);

    // Units run in unspecified order, so either one may have won.
    let plugin = Factory::<&'static str, dyn Plugin>::create("loader", ()).unwrap();
    assert!(["alpha", "beta"].contains(&plugin.name()));
}

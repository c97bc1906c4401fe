//! Registry Invariant Tests
//!
//! - First registration for a target is authoritative forever
//! - Re-registration never fails, even with a different field set
//! - Concurrent first registration yields exactly one schema
//! - Unknown targets are reported, not defaulted

use std::sync::{Arc, Barrier};
use std::thread;

use argbind::{with_validation, ErrorCode, Field, SchemaRegistry, ValueType};
use serde_json::{json, Value};

fn text() -> Field {
    Field::builder().of_type(ValueType::String).build().unwrap()
}

fn number() -> Field {
    Field::builder().of_type(ValueType::Int).build().unwrap()
}

/// Second registration with a different field set is silently discarded.
#[test]
fn test_second_registration_discarded() {
    let registry = SchemaRegistry::new();
    registry.register("app::Account", [("email", text())]);
    registry.register("app::Account", [("email", number()), ("age", number())]);

    let schema = registry.get_schema("app::Account").unwrap();
    assert_eq!(schema.len(), 1);
    assert!(!schema.contains("age"));

    // the first declaration still governs binding
    assert!(registry
        .create_binder("app::Account", [("email", json!("a@b.io"))])
        .is_ok());
    assert_eq!(
        registry
            .create_binder("app::Account", [("email", json!(1))])
            .unwrap_err()
            .code(),
        ErrorCode::TypeMismatch
    );
}

/// Racing first registrations agree on one winner.
#[test]
fn test_concurrent_registration_single_winner() {
    let registry = Arc::new(SchemaRegistry::new());
    let barrier = Arc::new(Barrier::new(16));

    let handles: Vec<_> = (0..16)
        .map(|i| {
            let registry = Arc::clone(&registry);
            let barrier = Arc::clone(&barrier);
            thread::spawn(move || {
                barrier.wait();
                registry.register("race", [(format!("f{}", i), text())])
            })
        })
        .collect();

    let seen: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();
    let winner = registry.get_schema("race").unwrap();
    assert!(seen.iter().all(|s| Arc::ptr_eq(s, &winner)));
    assert_eq!(winner.len(), 1);
}

/// Binding against an unregistered target is a reported error.
#[test]
fn test_unknown_target() {
    let registry = SchemaRegistry::new();
    let err = registry
        .create_binder("never::registered", Vec::<(String, Value)>::new())
        .unwrap_err();
    assert_eq!(err.code(), ErrorCode::UnknownTarget);
}

/// The returned handle can be used directly without going back through the
/// registry.
#[test]
fn test_schema_handle_binds_directly() {
    let registry = SchemaRegistry::new();
    let schema = registry.register("handle", [("name", text())]);

    let binder = with_validation(&schema, [("name", json!("x"))]).unwrap();
    assert_eq!(binder.target(), "handle");
    assert_eq!(binder.get_str("name").unwrap(), Some("x"));
}

/// Separate registries do not share state.
#[test]
fn test_registries_are_independent() {
    let a = SchemaRegistry::new();
    let b = SchemaRegistry::new();
    a.register("shared_name", [("x", text())]);

    assert!(a.has_schema("shared_name"));
    assert!(!b.has_schema("shared_name"));
}

/// The global registry keeps first-write-wins across call sites.
#[test]
fn test_global_registry() {
    let target = "registry_invariants::global";
    SchemaRegistry::global().register(target, [("a", text())]);
    SchemaRegistry::global().register(target, [("b", text())]);

    let schema = SchemaRegistry::global().get_schema(target).unwrap();
    assert!(schema.contains("a"));
    assert!(!schema.contains("b"));
}

//! Unit tests for ModuleRegistry

use async_runtime::{HostError, ModuleRegistry};

#[test]
fn new_registry_is_empty() {
    let registry: ModuleRegistry<()> = ModuleRegistry::new();
    assert!(registry.is_empty());
    assert!(registry.names().is_empty());
}

#[test]
fn resolve_registered_module() {
    let mut registry = ModuleRegistry::new();
    registry.register("path", "path-capability");
    assert!(registry.contains("path"));
    assert_eq!(registry.resolve("path"), Some(&"path-capability"));
}

#[test]
fn resolve_is_case_sensitive() {
    let mut registry = ModuleRegistry::new();
    registry.register("path", ());
    assert_eq!(registry.resolve("Path"), None);
}

#[test]
fn reregistration_is_last_write_wins() {
    let mut registry = ModuleRegistry::new();
    assert_eq!(registry.register("os", 1), None);
    assert_eq!(registry.register("os", 2), Some(1));
    assert_eq!(registry.require(Some("os")), Ok(&2));
    assert_eq!(registry.len(), 1);
}

#[test]
fn require_unregistered_name_reports_name() {
    let registry: ModuleRegistry<()> = ModuleRegistry::new();
    match registry.require(Some("unregistered-name")) {
        Err(HostError::ModuleNotFound { name }) => assert_eq!(name, "unregistered-name"),
        other => panic!("expected ModuleNotFound, got {:?}", other),
    }
}

#[test]
fn require_without_arguments_is_invalid_argument() {
    let mut registry = ModuleRegistry::new();
    registry.register("", ());
    // rejected before lookup, even though "" is registered
    assert!(matches!(
        registry.require(None),
        Err(HostError::InvalidArgument { .. })
    ));
}

//! Contract tests for require and the shipped capabilities

use super::Harness;
use async_runtime::HostError;

#[test]
fn test_require_path_join() {
    let harness = Harness::new();
    assert_eq!(
        harness.eval_string("require('path').join('/srv', 'app', '../lib', 'x.js')"),
        "/srv/lib/x.js"
    );
}

#[test]
fn test_require_caches_exports() {
    let harness = Harness::new();
    assert!(harness.eval_bool("require('os') === require('os')"));
}

#[test]
fn test_require_os_platform() {
    let harness = Harness::new();
    let platform = harness.eval_string("require('os').platform()");
    assert!(!platform.is_empty());
}

#[test]
fn test_require_unknown_module() {
    let harness = Harness::new();
    let message = harness.eval_string(
        "let m; try { require('unregistered-name'); } catch (e) { m = e.code + ' ' + e.message; } m",
    );
    assert_eq!(message, "MODULE_NOT_FOUND Cannot find module 'unregistered-name'");
    assert_eq!(
        *harness.globals.last_host_error.borrow(),
        Some(HostError::ModuleNotFound {
            name: "unregistered-name".to_string()
        })
    );
}

#[test]
fn test_require_without_arguments() {
    let harness = Harness::new();
    assert!(harness.eval_bool(
        "let e; try { require(); } catch (err) { e = err; } e instanceof TypeError && e.code === 'ERR_INVALID_ARG_TYPE'"
    ));
    assert!(matches!(
        *harness.globals.last_host_error.borrow(),
        Some(HostError::InvalidArgument { .. })
    ));
}

#[test]
fn test_require_non_string_name() {
    let harness = Harness::new();
    assert!(harness.eval_bool(
        "let e; try { require(42); } catch (err) { e = err; } e instanceof TypeError"
    ));
}

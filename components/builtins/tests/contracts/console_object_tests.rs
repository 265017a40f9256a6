//! Contract tests for the console global

use super::Harness;

#[test]
fn test_console_log_joins_arguments() {
    let harness = Harness::new();
    harness.eval_bool("console.log('a', 1, true, null, undefined); true");
    assert_eq!(*harness.output.borrow(), vec!["a 1 true null undefined"]);
}

#[test]
fn test_console_all_levels_reach_writer() {
    let harness = Harness::new();
    harness.eval_bool(
        "console.info('i'); console.debug('d'); console.warn('w'); console.error('e'); true",
    );
    assert_eq!(*harness.output.borrow(), vec!["i", "d", "w", "e"]);
}

#[test]
fn test_console_log_returns_undefined() {
    let harness = Harness::new();
    assert!(harness.eval_bool("console.log('x') === undefined"));
}

#[test]
fn test_console_inspects_nested_values() {
    let harness = Harness::new();
    harness.eval_bool("console.log({ a: 1, b: 'two', c: [1, 2] }); true");
    assert_eq!(*harness.output.borrow(), vec!["{ a: 1, b: 'two', c: [ 1, 2 ] }"]);
}

#[test]
fn test_console_handles_circular_objects() {
    let harness = Harness::new();
    harness.eval_bool("const o = { name: 'loop' }; o.self = o; console.log(o); true");
    assert_eq!(*harness.output.borrow(), vec!["{ name: 'loop', self: [Circular] }"]);
}

#[test]
fn test_native_hooks_are_hidden() {
    let harness = Harness::new();
    assert!(harness.eval_bool(
        "typeof __host_console_write === 'undefined' && \
         typeof __host_timer_schedule === 'undefined' && \
         typeof __host_require === 'undefined'"
    ));
    assert!(harness.eval_bool("!Object.keys(globalThis).includes('__host_fire_timer')"));
}

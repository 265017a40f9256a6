//! Contract tests for the timer globals

use super::Harness;
use builtins::fire_timer;

#[test]
fn test_set_timeout_registers_with_event_loop() {
    let harness = Harness::new();
    assert!(harness.eval_bool("typeof setTimeout(() => {}, 10) === 'number'"));
    assert_eq!(harness.globals.event_loop.pending(), 1);
}

#[test]
fn test_timer_ids_increase() {
    let harness = Harness::new();
    assert!(harness.eval_bool(
        "const a = setTimeout(() => {}, 0); const b = setInterval(() => {}, 5); b > a"
    ));
}

#[test]
fn test_clear_timeout_cancels() {
    let harness = Harness::new();
    harness.eval_bool("const t = setTimeout(() => {}, 10); clearTimeout(t); true");
    assert_eq!(harness.globals.event_loop.pending(), 0);
}

#[test]
fn test_clear_with_unknown_ids_is_ignored() {
    let harness = Harness::new();
    assert!(harness.eval_bool("clearTimeout(999); clearInterval(undefined); clearTimeout('x'); true"));
}

#[test]
fn test_set_timeout_rejects_non_function() {
    let harness = Harness::new();
    assert!(harness.eval_bool(
        "let caught; try { setTimeout('code', 0); } catch (e) { caught = e; } caught instanceof TypeError"
    ));
    assert_eq!(harness.globals.event_loop.pending(), 0);
}

#[test]
fn test_fire_timer_runs_callback_with_arguments() {
    let harness = Harness::new();
    harness.eval_bool("setTimeout((a, b) => console.log(a + b), 0, 2, 3); true");
    harness
        .context
        .with(|ctx| fire_timer(&ctx, async_runtime::TimerId(1), false))
        .unwrap();
    assert_eq!(*harness.output.borrow(), vec!["5"]);

    // a one-shot callback is forgotten after firing
    harness
        .context
        .with(|ctx| fire_timer(&ctx, async_runtime::TimerId(1), false))
        .unwrap();
    assert_eq!(harness.output.borrow().len(), 1);
}

#[test]
fn test_fire_interval_keeps_callback() {
    let harness = Harness::new();
    harness.eval_bool("let n = 0; setInterval(() => console.log(++n), 5); true");
    for _ in 0..3 {
        harness
            .context
            .with(|ctx| fire_timer(&ctx, async_runtime::TimerId(1), true))
            .unwrap();
    }
    assert_eq!(*harness.output.borrow(), vec!["1", "2", "3"]);
}

#[test]
fn test_final_interval_fire_forgets_callback() {
    let harness = Harness::new();
    harness.eval_bool("setInterval(() => console.log('last'), 5); true");
    for _ in 0..2 {
        harness
            .context
            .with(|ctx| fire_timer(&ctx, async_runtime::TimerId(1), false))
            .unwrap();
    }
    assert_eq!(*harness.output.borrow(), vec!["last"]);
}

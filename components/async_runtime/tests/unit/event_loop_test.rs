//! Unit tests for EventLoop

use async_runtime::{EventLoop, SchedulerError, TimerId};
use core_types::JsError;
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::{Duration, Instant};

fn drain<C>(event_loop: &EventLoop<C>, mut on_fire: impl FnMut(TimerId, &C))
where
    C: Clone + Send + 'static,
{
    event_loop.request_stop();
    event_loop
        .wait(|id, callback| {
            on_fire(id, callback);
            Ok(())
        })
        .unwrap();
}

#[test]
fn wait_with_zero_timers_returns_immediately() {
    let event_loop: EventLoop<()> = EventLoop::new();
    event_loop.start().unwrap();
    event_loop.request_stop();

    let started = Instant::now();
    event_loop.wait(|_, _| Ok(())).unwrap();
    assert!(started.elapsed() < Duration::from_secs(1));
    assert!(!event_loop.is_running());
}

#[test]
fn one_shot_fires_exactly_once() {
    let event_loop = EventLoop::new();
    event_loop.start().unwrap();
    let id = event_loop.schedule_once(Duration::ZERO, "once");

    let mut fired = Vec::new();
    drain(&event_loop, |fired_id, label| fired.push((fired_id, *label)));

    assert_eq!(fired, vec![(id, "once")]);
    assert_eq!(event_loop.pending(), 0);
}

#[test]
fn cancel_after_fire_is_noop() {
    let event_loop = EventLoop::new();
    event_loop.start().unwrap();
    let id = event_loop.schedule_once(Duration::ZERO, ());
    drain(&event_loop, |_, _| {});

    assert!(!event_loop.cancel(id));
    assert!(!event_loop.cancel(TimerId(9_999)));
}

#[test]
fn cancelled_timer_never_fires() {
    let event_loop = EventLoop::new();
    event_loop.start().unwrap();
    let id = event_loop.schedule_once(Duration::from_millis(20), ());
    assert!(event_loop.cancel(id));

    let mut count = 0;
    drain(&event_loop, |_, _| count += 1);
    assert_eq!(count, 0);
}

#[test]
fn timers_fire_in_delay_order() {
    let event_loop = EventLoop::new();
    event_loop.start().unwrap();
    event_loop.schedule_once(Duration::from_millis(30), 3);
    event_loop.schedule_once(Duration::from_millis(10), 1);
    event_loop.schedule_once(Duration::from_millis(20), 2);

    let mut order = Vec::new();
    drain(&event_loop, |_, n| order.push(*n));
    assert_eq!(order, vec![1, 2, 3]);
}

#[test]
fn equal_delays_fire_in_insertion_order() {
    let event_loop = EventLoop::new();
    for n in 0..10 {
        event_loop.schedule_once(Duration::ZERO, n);
    }
    event_loop.start().unwrap();

    let mut order = Vec::new();
    drain(&event_loop, |_, n| order.push(*n));
    assert_eq!(order, (0..10).collect::<Vec<_>>());
}

#[test]
fn interval_repeats_until_cancelled() {
    let event_loop = EventLoop::new();
    event_loop.start().unwrap();
    let id = event_loop.schedule_repeating(Duration::from_millis(2), ());

    let handle = event_loop.clone();
    let mut fires = 0;
    // no stop requested yet, so the interval keeps re-arming
    event_loop
        .wait(|fired_id, _| {
            fires += 1;
            if fires == 3 {
                assert!(handle.cancel(fired_id));
            }
            Ok(())
        })
        .unwrap();

    assert_eq!(fires, 3);
    assert_eq!(event_loop.pending(), 0);
    assert!(!event_loop.cancel(id));

    drain(&event_loop, |_, _| {});
    assert!(!event_loop.is_running());
}

#[test]
fn request_stop_ends_uncancelled_interval() {
    let event_loop = EventLoop::new();
    event_loop.start().unwrap();
    let id = event_loop.schedule_repeating(Duration::from_millis(2), "tick");
    event_loop.request_stop();
    assert!(event_loop.is_stopping());

    let started = Instant::now();
    let mut fired = Vec::new();
    event_loop
        .wait(|fired_id, label| {
            fired.push((fired_id, *label));
            Ok(())
        })
        .unwrap();

    assert_eq!(fired, vec![(id, "tick")]);
    assert!(started.elapsed() < Duration::from_secs(1));
    assert_eq!(event_loop.pending(), 0);
    assert!(!event_loop.is_stopping());
    assert!(!event_loop.is_running());
}

#[test]
fn interval_started_by_callback_after_stop_fires_once() {
    let event_loop = EventLoop::new();
    event_loop.start().unwrap();
    event_loop.schedule_once(Duration::ZERO, "spawn");

    let handle = event_loop.clone();
    let mut fired = Vec::new();
    drain(&event_loop, |_, label| {
        fired.push(*label);
        if *label == "spawn" {
            handle.schedule_repeating(Duration::from_millis(1), "interval");
        }
    });

    assert_eq!(fired, vec!["spawn", "interval"]);
    assert_eq!(event_loop.pending(), 0);
}

#[test]
fn callbacks_can_schedule_more_work() {
    let event_loop = EventLoop::new();
    event_loop.start().unwrap();
    event_loop.schedule_once(Duration::ZERO, 3u32);

    let handle = event_loop.clone();
    let mut seen = Vec::new();
    drain(&event_loop, |_, remaining| {
        seen.push(*remaining);
        if *remaining > 0 {
            handle.schedule_once(Duration::ZERO, remaining - 1);
        }
    });

    assert_eq!(seen, vec![3, 2, 1, 0]);
}

#[test]
fn cancel_from_another_thread_releases_wait() {
    let event_loop: EventLoop<()> = EventLoop::new();
    event_loop.start().unwrap();
    let id = event_loop.schedule_once(Duration::from_secs(3600), ());
    event_loop.request_stop();

    let canceller = event_loop.clone();
    let worker = thread::spawn(move || {
        thread::sleep(Duration::from_millis(20));
        canceller.cancel(id)
    });

    event_loop.wait(|_, _| Ok(())).unwrap();
    assert!(worker.join().unwrap());
}

#[test]
fn schedule_from_another_thread_while_running() {
    let event_loop = EventLoop::new();
    event_loop.start().unwrap();

    let scheduler = event_loop.clone();
    thread::spawn(move || scheduler.schedule_once(Duration::ZERO, "remote"))
        .join()
        .unwrap();

    let mut fired = Vec::new();
    drain(&event_loop, |_, label| fired.push(*label));
    assert_eq!(fired, vec!["remote"]);
}

#[test]
fn callback_errors_do_not_halt_the_loop() {
    let event_loop = EventLoop::new();
    event_loop.start().unwrap();
    event_loop.schedule_once(Duration::ZERO, "first");
    event_loop.schedule_once(Duration::from_millis(1), "second");
    event_loop.request_stop();

    let seen = Arc::new(Mutex::new(Vec::new()));
    let log = Arc::clone(&seen);
    let result = event_loop.wait(move |_, label| {
        log.lock().unwrap().push(*label);
        Err(JsError::internal(format!("{} failed", label)))
    });

    assert_eq!(*seen.lock().unwrap(), vec!["first", "second"]);
    match result {
        Err(SchedulerError::Callback(error)) => assert_eq!(error.message, "first failed"),
        other => panic!("expected callback error, got {:?}", other),
    }
}

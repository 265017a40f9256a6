//! Contract tests for async_runtime component
//!
//! These tests pin down the public signatures the host runtime relies on.

use async_runtime::{
    delay_from_millis, EventLoop, HostError, ModuleRegistry, SchedulerError, TimerId, TimerQueue,
    MIN_INTERVAL,
};
use std::time::Duration;

mod event_loop_contract {
    use super::*;

    #[test]
    fn schedule_returns_timer_id() {
        let event_loop: EventLoop<()> = EventLoop::new();
        let first: TimerId = event_loop.schedule_once(Duration::ZERO, ());
        let second: TimerId = event_loop.schedule_repeating(Duration::ZERO, ());
        assert!(second > first);
        assert_eq!(event_loop.pending(), 2);
    }

    #[test]
    fn request_stop_is_idempotent() {
        let event_loop: EventLoop<()> = EventLoop::new();
        event_loop.start().unwrap();
        event_loop.request_stop();
        event_loop.request_stop();
        event_loop.wait(|_, _| Ok(())).unwrap();
        event_loop.request_stop();
        assert!(!event_loop.is_running());
    }

    #[test]
    fn handles_are_shared() {
        let event_loop: EventLoop<()> = EventLoop::new();
        let other = event_loop.clone();
        let id = other.schedule_once(Duration::from_secs(1), ());
        assert!(event_loop.cancel(id));
        assert_eq!(other.pending(), 0);
    }

    #[test]
    fn shutdown_leaves_timers_queued() {
        let event_loop: EventLoop<()> = EventLoop::new();
        event_loop.start().unwrap();
        event_loop.schedule_once(Duration::from_secs(3600), ());
        event_loop.shutdown();
        assert!(!event_loop.is_running());
        assert_eq!(event_loop.pending(), 1);
        assert!(matches!(
            event_loop.wait(|_, _| Ok(())),
            Err(SchedulerError::NotStarted { .. })
        ));
    }
}

mod timer_contract {
    use super::*;

    #[test]
    fn delays_are_clamped() {
        assert_eq!(delay_from_millis(0.0), Duration::ZERO);
        assert_eq!(delay_from_millis(f64::INFINITY), Duration::ZERO);
        assert_eq!(delay_from_millis(1.5), Duration::from_micros(1500));
    }

    #[test]
    fn minimum_interval_is_one_millisecond() {
        assert_eq!(MIN_INTERVAL, Duration::from_millis(1));
    }

    #[test]
    fn timer_queue_default_is_empty() {
        let queue: TimerQueue<()> = TimerQueue::default();
        assert!(queue.is_empty());
        assert_eq!(queue.next_deadline(), None);
    }
}

mod module_contract {
    use super::*;

    #[test]
    fn require_returns_reference_to_capability() {
        let mut registry = ModuleRegistry::new();
        registry.register(String::from("os"), vec![1, 2, 3]);
        let capability: &Vec<i32> = registry.require(Some("os")).unwrap();
        assert_eq!(capability.len(), 3);
    }

    #[test]
    fn host_errors_have_codes() {
        let missing = HostError::ModuleNotFound {
            name: "x".to_string(),
        };
        assert_eq!(missing.code(), "MODULE_NOT_FOUND");
    }
}

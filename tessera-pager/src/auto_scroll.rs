//! Timer driven auto-scrolling.
//!
//! The pager does not own a clock. The host provides a [`ScrollTimer`] that
//! is started and stopped by the [`AutoScroller`], and routes every timer
//! tick to [`Pager::auto_scroll_tick`](crate::pager::Pager::auto_scroll_tick).
//!
//! ```text
//! Disabled --enable--> Enabled/Stopped --start--> Enabled/Running
//!     ^                      ^                          |
//!     |                      +----------stop------------+
//!     +------------------disable (any state)-------------+
//! ```
use std::time::Duration;

use tracing::debug;

use crate::{
    event::{EventBus, PagerEvent},
    settings::DEFAULT_AUTO_SCROLL_INTERVAL,
};

/// A periodic tick source provided by the host.
pub trait ScrollTimer: Send {
    /// Starts ticking every `interval`, replacing any previous schedule.
    fn start(&mut self, interval: Duration);
    /// Stops ticking.
    fn stop(&mut self);
}

/// Auto-scroll state machine.
pub struct AutoScroller {
    interval: Duration,
    is_enabled: bool,
    is_running: bool,
    should_disable_after_stop: bool,
    was_stopped_by_user: bool,
    timer: Option<Box<dyn ScrollTimer>>,
    events: EventBus,
}

impl AutoScroller {
    /// Creates a disabled scroller publishing its state changes on `events`.
    pub fn new(interval: Duration, events: EventBus) -> Self {
        Self {
            interval,
            is_enabled: false,
            is_running: false,
            should_disable_after_stop: false,
            was_stopped_by_user: false,
            timer: None,
            events,
        }
    }

    /// Delay between two ticks.
    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Whether auto-scroll may run.
    pub fn is_enabled(&self) -> bool {
        self.is_enabled
    }

    /// Whether the timer is ticking.
    pub fn is_running(&self) -> bool {
        self.is_running
    }

    /// Whether the next [`stop`](Self::stop) also disables auto-scroll.
    pub fn should_disable_after_stop(&self) -> bool {
        self.should_disable_after_stop
    }

    /// Whether a user interaction interrupted a running auto-scroll.
    pub fn was_stopped_by_user(&self) -> bool {
        self.was_stopped_by_user
    }

    /// Sets whether the next [`stop`](Self::stop) also disables auto-scroll.
    pub fn set_should_disable_after_stop(&mut self, value: bool) {
        self.should_disable_after_stop = value;
    }

    /// Installs the host timer. A running scroller moves over to it.
    pub fn set_timer(&mut self, timer: Box<dyn ScrollTimer>) {
        if let Some(previous) = self.timer.as_mut() {
            previous.stop();
        }
        let timer = self.timer.insert(timer);
        if self.is_running {
            timer.start(self.interval);
        }
    }

    /// Changes the tick interval; a running timer is rescheduled.
    pub fn set_interval(&mut self, interval: Duration) {
        if self.interval == interval {
            return;
        }
        self.interval = interval;
        if self.is_running
            && let Some(timer) = self.timer.as_mut()
        {
            timer.start(interval);
        }
    }

    /// Enables auto-scroll. The timer is not started.
    pub fn enable(&mut self) {
        self.set_enabled(true);
    }

    /// Enables or disables auto-scroll. Disabling always stops the timer.
    pub fn set_enabled(&mut self, enabled: bool) {
        if self.is_enabled == enabled {
            return;
        }
        self.is_enabled = enabled;
        debug!(enabled, "auto-scroll availability changed");
        self.events.emit(PagerEvent::AutoScrollEnabledChanged(enabled));
        if !enabled {
            self.stop();
        }
    }

    /// Starts the timer. No-op unless enabled and not already running.
    pub fn start(&mut self) {
        if !self.is_enabled || self.is_running {
            return;
        }
        self.set_running(true);
        if let Some(timer) = self.timer.as_mut() {
            timer.start(self.interval);
        }
    }

    /// Stops the timer, and disables auto-scroll when
    /// [`should_disable_after_stop`](Self::should_disable_after_stop) is set.
    pub fn stop(&mut self) {
        if !self.is_running {
            return;
        }
        if let Some(timer) = self.timer.as_mut() {
            timer.stop();
        }
        self.set_running(false);
        if self.should_disable_after_stop {
            self.set_enabled(false);
        }
    }

    /// Stops and disables auto-scroll on behalf of the user.
    pub fn disable_manually(&mut self) {
        if self.is_running {
            self.was_stopped_by_user = true;
        }
        self.stop();
        self.set_enabled(false);
    }

    /// Whether a timer tick should advance the pager.
    pub fn accepts_tick(&self) -> bool {
        self.is_enabled && self.is_running
    }

    fn set_running(&mut self, running: bool) {
        self.is_running = running;
        debug!(running, interval = ?self.interval, "auto-scroll timer changed");
        self.events.emit(PagerEvent::AutoScrollRunningChanged(running));
    }
}

impl Default for AutoScroller {
    fn default() -> Self {
        Self::new(DEFAULT_AUTO_SCROLL_INTERVAL, EventBus::new())
    }
}

impl std::fmt::Debug for AutoScroller {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AutoScroller")
            .field("interval", &self.interval)
            .field("is_enabled", &self.is_enabled)
            .field("is_running", &self.is_running)
            .field("should_disable_after_stop", &self.should_disable_after_stop)
            .field("was_stopped_by_user", &self.was_stopped_by_user)
            .field("has_timer", &self.timer.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use parking_lot::Mutex;

    use super::*;

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    enum TimerCall {
        Start(Duration),
        Stop,
    }

    #[derive(Clone, Default)]
    struct RecordingTimer {
        calls: Arc<Mutex<Vec<TimerCall>>>,
    }

    impl ScrollTimer for RecordingTimer {
        fn start(&mut self, interval: Duration) {
            self.calls.lock().push(TimerCall::Start(interval));
        }

        fn stop(&mut self) {
            self.calls.lock().push(TimerCall::Stop);
        }
    }

    fn scroller() -> (AutoScroller, RecordingTimer, Arc<Mutex<Vec<PagerEvent>>>) {
        let events = EventBus::new();
        let received = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&received);
        events.subscribe(move |event| sink.lock().push(*event));

        let timer = RecordingTimer::default();
        let mut scroller = AutoScroller::new(Duration::from_secs(2), events);
        scroller.set_timer(Box::new(timer.clone()));
        (scroller, timer, received)
    }

    #[test]
    fn test_start_requires_enabled() {
        let (mut scroller, timer, _) = scroller();
        scroller.start();
        assert!(!scroller.is_running());
        assert!(timer.calls.lock().is_empty());

        scroller.enable();
        scroller.start();
        assert!(scroller.is_running());
        assert!(scroller.accepts_tick());
        assert_eq!(
            *timer.calls.lock(),
            vec![TimerCall::Start(Duration::from_secs(2))]
        );

        scroller.start();
        assert_eq!(timer.calls.lock().len(), 1);
    }

    #[test]
    fn test_disabling_stops_the_timer() {
        let (mut scroller, timer, events) = scroller();
        scroller.enable();
        scroller.start();
        scroller.set_enabled(false);

        assert!(!scroller.is_running());
        assert!(!scroller.is_enabled());
        assert_eq!(timer.calls.lock().last(), Some(&TimerCall::Stop));
        assert_eq!(
            *events.lock(),
            vec![
                PagerEvent::AutoScrollEnabledChanged(true),
                PagerEvent::AutoScrollRunningChanged(true),
                PagerEvent::AutoScrollEnabledChanged(false),
                PagerEvent::AutoScrollRunningChanged(false),
            ]
        );
    }

    #[test]
    fn test_stop_keeps_enabled_unless_requested() {
        let (mut scroller, _, _) = scroller();
        scroller.enable();
        scroller.start();
        scroller.stop();
        assert!(scroller.is_enabled());
        assert!(!scroller.is_running());

        scroller.set_should_disable_after_stop(true);
        scroller.start();
        scroller.stop();
        assert!(!scroller.is_enabled());
    }

    #[test]
    fn test_disable_manually_records_user_interruption() {
        let (mut scroller, _, _) = scroller();
        scroller.enable();
        scroller.disable_manually();
        assert!(!scroller.was_stopped_by_user());
        assert!(!scroller.is_enabled());

        scroller.enable();
        scroller.start();
        scroller.disable_manually();
        assert!(scroller.was_stopped_by_user());
        assert!(!scroller.is_running());
    }

    #[test]
    fn test_interval_change_reschedules_running_timer() {
        let (mut scroller, timer, _) = scroller();
        scroller.set_interval(Duration::from_secs(1));
        assert!(timer.calls.lock().is_empty());

        scroller.enable();
        scroller.start();
        scroller.set_interval(Duration::from_millis(500));
        assert_eq!(
            *timer.calls.lock(),
            vec![
                TimerCall::Start(Duration::from_secs(1)),
                TimerCall::Start(Duration::from_millis(500)),
            ]
        );
    }

    #[test]
    fn test_replacing_timer_while_running() {
        let (mut scroller, first, _) = scroller();
        scroller.enable();
        scroller.start();

        let second = RecordingTimer::default();
        scroller.set_timer(Box::new(second.clone()));
        assert_eq!(first.calls.lock().last(), Some(&TimerCall::Stop));
        assert_eq!(
            *second.calls.lock(),
            vec![TimerCall::Start(Duration::from_secs(2))]
        );
    }
}

//! Tick scheduler — "start/stop producing tick events".
//!
//! The rotation timer is modelled as a value, not a platform timer
//! handle: callers feed it a monotonic millisecond clock and poll for
//! due ticks. Hiding the page disarms it; showing the page re-arms it
//! with a FULL interval measured from the resume instant, so there is
//! never a catch-up burst after a long background stay.
//!
//! Instance-scoped on purpose: several rotators can coexist, each with
//! its own scheduler.

use rotator_engine::domain::{Phase, RotatorState};

/// Deterministic rotation timer driven by an external clock.
#[derive(Debug, Clone)]
pub struct TickScheduler {
    interval_ms: u64,
    armed: bool,
    /// Clock value at which the next tick is due. Meaningless while
    /// disarmed.
    next_due_ms: u64,
}

impl TickScheduler {
    /// Create a scheduler. When `armed`, the first tick is due a full
    /// interval after `now_ms`.
    pub fn new(interval_ms: u64, armed: bool, now_ms: u64) -> Self {
        Self {
            interval_ms,
            armed,
            next_due_ms: now_ms.saturating_add(interval_ms),
        }
    }

    /// Derive a scheduler from a configured rotator state: armed only
    /// while the state is rotating with an active timer.
    pub fn from_state(state: &RotatorState, now_ms: u64) -> Self {
        let armed = state.phase == Phase::Rotating && state.timer_active;
        Self::new(state.interval_ms, armed, now_ms)
    }

    pub fn interval_ms(&self) -> u64 {
        self.interval_ms
    }

    pub fn is_armed(&self) -> bool {
        self.armed
    }

    /// Stop producing ticks. Pending due time is discarded.
    pub fn on_page_hidden(&mut self) {
        self.armed = false;
    }

    /// Resume producing ticks from `now_ms`. The next tick is due a
    /// full interval later — no catch-up for time spent hidden.
    pub fn on_page_visible(&mut self, now_ms: u64) {
        self.armed = true;
        self.next_due_ms = now_ms.saturating_add(self.interval_ms);
    }

    /// Number of ticks due at `now_ms`. Advances the due time past
    /// `now_ms`; disarmed schedulers never report ticks.
    pub fn poll(&mut self, now_ms: u64) -> u32 {
        if !self.armed {
            return 0;
        }
        let mut due = 0u32;
        while self.next_due_ms <= now_ms {
            self.next_due_ms += self.interval_ms;
            due += 1;
        }
        due
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rotator_engine::engine::RotatorEngine;
    use rotator_engine::events::EventEnvelope;

    #[test]
    fn test_one_tick_per_elapsed_interval() {
        let mut sched = TickScheduler::new(3000, true, 0);
        assert_eq!(sched.poll(2999), 0);
        assert_eq!(sched.poll(3000), 1);
        assert_eq!(sched.poll(5000), 0);
        assert_eq!(sched.poll(6000), 1);
    }

    #[test]
    fn test_disarmed_scheduler_never_fires() {
        let mut sched = TickScheduler::new(3000, false, 0);
        assert_eq!(sched.poll(1_000_000), 0);
    }

    #[test]
    fn test_hidden_stops_ticks_and_resume_waits_full_interval() {
        let mut sched = TickScheduler::new(3000, true, 0);
        assert_eq!(sched.poll(3000), 1);

        sched.on_page_hidden();
        // A long stay in the background produces nothing
        assert_eq!(sched.poll(60_000), 0);

        sched.on_page_visible(60_000);
        // No catch-up: the next tick is a full interval after resume
        assert_eq!(sched.poll(62_999), 0);
        assert_eq!(sched.poll(63_000), 1);
    }

    #[test]
    fn test_from_state_static_is_disarmed() {
        let mut engine = RotatorEngine::new();
        engine.initialize_state();
        engine.apply_event(&EventEnvelope::configure(1, 0, "", None, false));
        let mut sched = TickScheduler::from_state(engine.state(), 0);
        assert!(!sched.is_armed());
        assert_eq!(sched.poll(1_000_000), 0);
    }

    #[test]
    fn test_from_state_rotating_uses_parsed_interval() {
        let mut engine = RotatorEngine::new();
        engine.initialize_state();
        engine.apply_event(&EventEnvelope::configure(
            1, 0, "a.jpg,b.jpg", Some("3000"), false,
        ));
        let mut sched = TickScheduler::from_state(engine.state(), 1000);
        assert!(sched.is_armed());
        assert_eq!(sched.interval_ms(), 3000);
        assert_eq!(sched.poll(3999), 0);
        assert_eq!(sched.poll(4000), 1);
    }
}

//! Coalescing delayed-callback bookkeeping.
//!
//! The state machine never owns real timers. It arms a `TimerToken` here, asks
//! the host to deliver it back after `TimerKind::delay`, and only acts on a
//! delivered token while it is still the current one for its kind. Re-arming
//! supersedes the previous token, so bursts collapse into one effect.

use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TimerKind {
    /// Debounced visual activation of the toolbar.
    DisplayActivation,
    /// Deferred switch into image mode after a pointer-down on an image.
    ImageActivation,
    /// Debounced scroll sampling in sticky mode.
    StickyScroll,
}

impl TimerKind {
    pub fn delay(self) -> Duration {
        match self {
            TimerKind::DisplayActivation => Duration::from_millis(300),
            TimerKind::ImageActivation => Duration::from_millis(100),
            TimerKind::StickyScroll => Duration::from_millis(50),
        }
    }

    fn index(self) -> usize {
        match self {
            TimerKind::DisplayActivation => 0,
            TimerKind::ImageActivation => 1,
            TimerKind::StickyScroll => 2,
        }
    }
}

/// Identifies one scheduling of a timer kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimerToken {
    pub kind: TimerKind,
    pub generation: u64,
}

/// One pending slot per timer kind.
#[derive(Debug, Clone, Default)]
pub struct CoalescingTimers {
    generation: u64,
    armed: [Option<u64>; 3],
}

impl CoalescingTimers {
    pub fn new() -> Self {
        Self::default()
    }

    /// Arm `kind`, superseding any token already pending for it.
    pub fn arm(&mut self, kind: TimerKind) -> TimerToken {
        self.generation += 1;
        self.armed[kind.index()] = Some(self.generation);
        TimerToken {
            kind,
            generation: self.generation,
        }
    }

    pub fn cancel(&mut self, kind: TimerKind) {
        self.armed[kind.index()] = None;
    }

    /// Consume a delivered token. True only if it is still current.
    pub fn fire(&mut self, token: TimerToken) -> bool {
        let slot = &mut self.armed[token.kind.index()];
        if *slot == Some(token.generation) {
            *slot = None;
            true
        } else {
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rearm_supersedes_previous_token() {
        let mut timers = CoalescingTimers::new();
        let first = timers.arm(TimerKind::DisplayActivation);
        let second = timers.arm(TimerKind::DisplayActivation);
        assert!(!timers.fire(first));
        assert!(timers.fire(second));
        assert!(!timers.fire(second), "a token fires at most once");
    }

    #[test]
    fn test_kinds_are_independent() {
        let mut timers = CoalescingTimers::new();
        let display = timers.arm(TimerKind::DisplayActivation);
        let scroll = timers.arm(TimerKind::StickyScroll);
        timers.cancel(TimerKind::StickyScroll);
        assert!(!timers.fire(scroll));
        assert!(timers.fire(display));
    }

    #[test]
    fn test_delays() {
        assert_eq!(TimerKind::ImageActivation.delay(), Duration::from_millis(100));
        assert_eq!(TimerKind::StickyScroll.delay(), Duration::from_millis(50));
    }
}

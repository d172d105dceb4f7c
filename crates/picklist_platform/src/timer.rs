//! One-shot delay timer driven by the host frame clock
//!
//! Time is injected: the host passes its current time in milliseconds to
//! [`OneShotTimer::poll`] once per frame (or whenever it handles events).
//! A timer fires at most once and can be disarmed before it does.

/// Timer lifecycle
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum TimerState {
    /// Not armed yet
    #[default]
    Idle,
    /// Waiting for the deadline
    Armed {
        /// Time at which the timer fires
        deadline_ms: u64,
    },
    /// Deadline reached, fired once
    Fired,
    /// Disarmed before firing
    Disarmed,
}

/// A timer that fires exactly once after a fixed delay
#[derive(Clone, Debug)]
pub struct OneShotTimer {
    delay_ms: u64,
    state: TimerState,
}

impl OneShotTimer {
    /// Create an idle timer with the given delay
    pub fn new(delay_ms: u64) -> Self {
        Self {
            delay_ms,
            state: TimerState::Idle,
        }
    }

    /// Start the delay at `now_ms`
    ///
    /// Only an idle timer can be armed.
    pub fn arm(&mut self, now_ms: u64) -> bool {
        if self.state != TimerState::Idle {
            return false;
        }
        self.state = TimerState::Armed {
            deadline_ms: now_ms.saturating_add(self.delay_ms),
        };
        true
    }

    /// Returns `true` exactly once, on the first poll at or after the deadline
    pub fn poll(&mut self, now_ms: u64) -> bool {
        match self.state {
            TimerState::Armed { deadline_ms } if now_ms >= deadline_ms => {
                self.state = TimerState::Fired;
                true
            }
            _ => false,
        }
    }

    /// Prevent a pending timer from firing
    pub fn disarm(&mut self) {
        if matches!(self.state, TimerState::Idle | TimerState::Armed { .. }) {
            self.state = TimerState::Disarmed;
        }
    }

    /// Current lifecycle state
    pub fn state(&self) -> TimerState {
        self.state
    }

    /// Whether the timer is waiting for its deadline
    pub fn is_armed(&self) -> bool {
        matches!(self.state, TimerState::Armed { .. })
    }

    /// Deadline of an armed timer
    pub fn deadline_ms(&self) -> Option<u64> {
        match self.state {
            TimerState::Armed { deadline_ms } => Some(deadline_ms),
            _ => None,
        }
    }

    /// Configured delay
    pub fn delay_ms(&self) -> u64 {
        self.delay_ms
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fires_once_at_deadline() {
        let mut timer = OneShotTimer::new(2000);
        assert!(timer.arm(100));
        assert_eq!(timer.deadline_ms(), Some(2100));

        assert!(!timer.poll(100));
        assert!(!timer.poll(2099));
        assert!(timer.poll(2100));
        assert!(!timer.poll(5000));
        assert_eq!(timer.state(), TimerState::Fired);
    }

    #[test]
    fn test_disarmed_never_fires() {
        let mut timer = OneShotTimer::new(2000);
        timer.arm(0);
        timer.disarm();
        assert!(!timer.poll(10_000));
        assert_eq!(timer.state(), TimerState::Disarmed);
    }

    #[test]
    fn test_idle_never_fires() {
        let mut timer = OneShotTimer::new(10);
        assert!(!timer.poll(1_000));
        assert!(!timer.is_armed());
    }

    #[test]
    fn test_cannot_rearm() {
        let mut timer = OneShotTimer::new(10);
        assert!(timer.arm(0));
        assert!(!timer.arm(5));
        assert!(timer.poll(10));
        assert!(!timer.arm(20));
    }
}

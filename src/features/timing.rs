//! Deadline bookkeeping shared by the debounced search and the rotator guard.
//!
//! The plugin host only delivers periodic timer ticks, so every delay in the crate
//! is expressed as a deadline on a logical millisecond clock and resolved when a
//! tick reaches it. [`TimerPhase`] makes the three states explicit:
//!
//! ```text
//!            schedule(now + d)              due(now >= deadline)
//!   Idle ──────────────────────▶ Pending ─────────────────────────▶ Idle
//!     │                                                          (fires once)
//!     │      cool_down(now + d)            due(now >= until)
//!     └────────────────────────▶ CoolingDown ─────────────────────▶ Idle
//! ```
//!
//! `cancel` returns any phase to `Idle` without firing, which is what teardown
//! relies on.

/// Logical milliseconds since the plugin was loaded.
pub type Millis = u64;

/// State of a single cancellable deadline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TimerPhase {
    /// Nothing scheduled.
    #[default]
    Idle,
    /// An action is waiting to run at `deadline`.
    Pending { deadline: Millis },
    /// An action has just run; new work is refused until `until`.
    CoolingDown { until: Millis },
}

impl TimerPhase {
    /// Schedules (or re-schedules) a pending action. Re-scheduling replaces the
    /// previous deadline, which is what makes a debounce.
    pub fn schedule(&mut self, deadline: Millis) {
        *self = Self::Pending { deadline };
    }

    /// Enters the cooling-down phase until `until`.
    pub fn cool_down(&mut self, until: Millis) {
        *self = Self::CoolingDown { until };
    }

    /// Drops whatever is scheduled without firing it.
    pub fn cancel(&mut self) {
        *self = Self::Idle;
    }

    /// Returns `true` exactly once when a pending deadline has been reached,
    /// moving back to `Idle`. Expired cool-downs are cleared silently.
    pub fn fire_if_due(&mut self, now: Millis) -> bool {
        match *self {
            Self::Pending { deadline } if now >= deadline => {
                *self = Self::Idle;
                true
            }
            Self::CoolingDown { until } if now >= until => {
                *self = Self::Idle;
                false
            }
            _ => false,
        }
    }

    /// Whether new work is currently refused.
    #[must_use]
    pub fn is_cooling_down(&self, now: Millis) -> bool {
        matches!(*self, Self::CoolingDown { until } if now < until)
    }

    /// Whether a deadline is waiting to fire.
    #[must_use]
    pub const fn is_pending(&self) -> bool {
        matches!(self, Self::Pending { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pending_fires_once_at_deadline() {
        let mut phase = TimerPhase::Idle;
        phase.schedule(300);
        assert!(!phase.fire_if_due(299));
        assert!(phase.fire_if_due(300));
        assert!(!phase.fire_if_due(301));
        assert_eq!(phase, TimerPhase::Idle);
    }

    #[test]
    fn rescheduling_pushes_the_deadline_back() {
        let mut phase = TimerPhase::Idle;
        phase.schedule(300);
        phase.schedule(450);
        assert!(!phase.fire_if_due(400));
        assert!(phase.fire_if_due(450));
    }

    #[test]
    fn cooldown_refuses_until_expired() {
        let mut phase = TimerPhase::Idle;
        phase.cool_down(2_000);
        assert!(phase.is_cooling_down(1_999));
        assert!(!phase.is_cooling_down(2_000));
        assert!(!phase.fire_if_due(2_000));
        assert_eq!(phase, TimerPhase::Idle);
    }

    #[test]
    fn cancel_never_fires() {
        let mut phase = TimerPhase::Idle;
        phase.schedule(10);
        phase.cancel();
        assert!(!phase.fire_if_due(1_000));
    }
}

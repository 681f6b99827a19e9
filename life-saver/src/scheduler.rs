use std::time::Duration;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SchedulerState {
    /// Less than one interval banked.
    Idle,
    /// At least one whole interval banked; the next call will step.
    Stepping,
}

/// Turns irregular frame callbacks into generation ticks at a fixed interval.
///
/// Elapsed time accumulates across calls and each tick consumes exactly one interval, so
/// the remainder carries forward instead of drifting. A call never fires more than one
/// tick; any backlog (after a suspend, say) is worked off one tick per later call.
#[derive(Clone, Debug)]
pub struct TickScheduler {
    interval: Duration,
    elapsed: Duration,
    last_timestamp: Option<Duration>,
    ticks: u64,
}

impl TickScheduler {
    pub fn new(interval: Duration) -> Self {
        assert!(!interval.is_zero(), "tick interval must be non-zero");
        Self {
            interval,
            elapsed: Duration::ZERO,
            last_timestamp: None,
            ticks: 0,
        }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    pub fn state(&self) -> SchedulerState {
        if self.elapsed >= self.interval {
            SchedulerState::Stepping
        } else {
            SchedulerState::Idle
        }
    }

    pub fn pending_ticks(&self) -> u64 {
        (self.elapsed.as_nanos() / self.interval.as_nanos()) as u64
    }

    /// How far into the current interval we are, in `[0, 1]`.
    pub fn phase(&self) -> f32 {
        (self.elapsed.as_secs_f64() / self.interval.as_secs_f64()).min(1.0) as f32
    }

    pub fn advance(&mut self, delta: Duration) -> bool {
        self.elapsed = self.elapsed.saturating_add(delta);
        if self.elapsed >= self.interval {
            self.elapsed -= self.interval;
            self.ticks += 1;
            true
        } else {
            false
        }
    }

    /// Like `advance`, for hosts that report absolute timestamps. The first timestamp only
    /// starts the clock.
    pub fn advance_to(&mut self, timestamp: Duration) -> bool {
        match self.last_timestamp.replace(timestamp) {
            Some(previous) => self.advance(timestamp.saturating_sub(previous)),
            None => false,
        }
    }
}

use charades_types::{ClockReadout, TurnLimit};

/// Remaining seconds at or below which a timed turn is shown as urgent.
pub const URGENT_REMAINING_SEC: u32 = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClockState {
    Stopped,
    Running,
    Paused,
}

/// Result of applying one tick to the clock.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// Clock not running or tick scheduled under an older epoch
    Ignored,
    Advanced(u32),
    /// Time limit reached; the counter is clamped to the duration
    Expired(u32),
}

/// Whole-second turn clock.
///
/// The clock never schedules anything itself: an external ticker delivers one
/// tick per second tagged with the epoch it was started under. Every state
/// change bumps the epoch, so ticks queued before a pause or stop are dropped.
#[derive(Debug, Clone)]
pub struct TurnClock {
    state: ClockState,
    elapsed_sec: u32,
    epoch: u64,
}

impl TurnClock {
    pub fn new() -> Self {
        Self {
            state: ClockState::Stopped,
            elapsed_sec: 0,
            epoch: 0,
        }
    }

    pub fn state(&self) -> ClockState {
        self.state
    }

    pub fn elapsed_sec(&self) -> u32 {
        self.elapsed_sec
    }

    pub fn epoch(&self) -> u64 {
        self.epoch
    }

    pub fn is_running(&self) -> bool {
        self.state == ClockState::Running
    }

    /// STOPPED -> RUNNING with the counter zeroed.
    pub fn arm(&mut self) -> bool {
        if self.state != ClockState::Stopped {
            return false;
        }
        self.elapsed_sec = 0;
        self.transition(ClockState::Running);
        true
    }

    /// RUNNING -> PAUSED, counter retained.
    pub fn pause(&mut self) -> bool {
        if self.state != ClockState::Running {
            return false;
        }
        self.transition(ClockState::Paused);
        true
    }

    /// PAUSED -> RUNNING.
    pub fn resume(&mut self) -> bool {
        if self.state != ClockState::Paused {
            return false;
        }
        self.transition(ClockState::Running);
        true
    }

    /// Any state -> STOPPED. The counter keeps its final value until the next arm.
    pub fn stop(&mut self) {
        if self.state != ClockState::Stopped {
            self.transition(ClockState::Stopped);
        }
    }

    /// Zero the counter and stop.
    pub fn reset(&mut self) {
        self.stop();
        self.elapsed_sec = 0;
    }

    pub fn tick(&mut self, epoch: u64, limit: &TurnLimit) -> TickOutcome {
        if self.state != ClockState::Running || epoch != self.epoch {
            return TickOutcome::Ignored;
        }

        let next = self.elapsed_sec.saturating_add(1);
        if should_expire(next, limit) {
            self.elapsed_sec = limit.duration_sec().map_or(next, |d| next.min(d));
            return TickOutcome::Expired(self.elapsed_sec);
        }

        self.elapsed_sec = next;
        TickOutcome::Advanced(next)
    }

    fn transition(&mut self, state: ClockState) {
        self.state = state;
        self.epoch += 1;
    }
}

impl Default for TurnClock {
    fn default() -> Self {
        Self::new()
    }
}

/// Auto-expiry predicate. Only timed turns expire; goal-based turns end on
/// their target count instead.
pub fn should_expire(elapsed_sec: u32, limit: &TurnLimit) -> bool {
    match limit {
        TurnLimit::Limited { duration_sec } => elapsed_sec >= *duration_sec,
        TurnLimit::UntilClear { .. } => false,
    }
}

/// Timer display value: remaining time for timed turns, elapsed otherwise.
pub fn readout(elapsed_sec: u32, limit: &TurnLimit) -> ClockReadout {
    match limit {
        TurnLimit::Limited { duration_sec } => {
            let remaining = duration_sec.saturating_sub(elapsed_sec);
            ClockReadout {
                seconds: remaining,
                display: format_mm_ss(remaining),
                counts_down: true,
                is_urgent: remaining <= URGENT_REMAINING_SEC,
            }
        }
        TurnLimit::UntilClear { .. } => ClockReadout {
            seconds: elapsed_sec,
            display: format_mm_ss(elapsed_sec),
            counts_down: false,
            is_urgent: false,
        },
    }
}

pub fn format_mm_ss(seconds: u32) -> String {
    format!("{:02}:{:02}", seconds / 60, seconds % 60)
}

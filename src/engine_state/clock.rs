//! Monotonic time sources.
//!
//! Cooldowns and removal transitions read time through [`Clock`] so that
//! tests and scripted sessions can drive time by hand.

use std::cell::Cell;

use web_time::{Duration, Instant};

/// A monotonic time source.
pub trait Clock {
    /// Time elapsed since the clock started.
    fn now(&self) -> Duration;
}

/// Wall-clock time, usable in the browser as well as natively.
#[derive(Debug, Clone, Copy)]
pub struct SystemClock {
    start: Instant,
}

impl SystemClock {
    /// Starts a clock at zero.
    pub fn new() -> Self {
        SystemClock { start: Instant::now() }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for SystemClock {
    fn now(&self) -> Duration {
        self.start.elapsed()
    }
}

/// A clock that only moves when told to.
#[derive(Debug, Default)]
pub struct ManualClock {
    now: Cell<Duration>,
}

impl ManualClock {
    /// Creates a clock at zero.
    pub fn new() -> Self {
        Self::default()
    }

    /// Moves the clock forward.
    pub fn advance(&self, by: Duration) {
        self.now.set(self.now.get() + by);
    }

    /// Sets the clock. Callers keep it monotonic.
    pub fn set(&self, now: Duration) {
        self.now.set(now);
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Duration {
        self.now.get()
    }
}

/// Gate that admits one trigger per cooldown window.
///
/// A trigger passes when no trigger has passed before, or when strictly more
/// than the cooldown has elapsed since the last one that passed. Rejected
/// triggers are dropped, not queued, and do not restart the window.
#[derive(Debug, Clone, Copy)]
pub struct AttackCooldown {
    cooldown: Duration,
    last_trigger: Option<Duration>,
}

impl AttackCooldown {
    /// Creates a gate with the given cooldown.
    pub fn new(cooldown: Duration) -> Self {
        AttackCooldown {
            cooldown,
            last_trigger: None,
        }
    }

    /// Whether a trigger at `now` would pass.
    pub fn is_ready(&self, now: Duration) -> bool {
        match self.last_trigger {
            None => true,
            Some(last) => now.saturating_sub(last) > self.cooldown,
        }
    }

    /// Attempts a trigger at `now`, recording it if it passes.
    pub fn try_trigger(&mut self, now: Duration) -> bool {
        if self.is_ready(now) {
            self.last_trigger = Some(now);
            true
        } else {
            false
        }
    }

    /// The configured cooldown.
    pub fn cooldown(&self) -> Duration {
        self.cooldown
    }
}

use crate::config::TIMEOUT_THRESHOLD_MAX;

const MINUTE_MS: u64 = 60_000;

/// Counts idle minutes against a user adjustable threshold.
///
/// Time is passed in as milliseconds since boot.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct IdleTimeout {
    threshold: u16,
    minutes: u16,
    last_tick: u64,
}

impl IdleTimeout {
    pub const fn new(threshold: u16) -> Self {
        let threshold = if threshold > TIMEOUT_THRESHOLD_MAX {
            TIMEOUT_THRESHOLD_MAX
        } else {
            threshold
        };
        Self {
            threshold,
            minutes: 0,
            last_tick: 0,
        }
    }

    /// Current threshold in minutes, 0 when disabled.
    pub fn threshold(&self) -> u16 {
        self.threshold
    }

    pub fn set_threshold(&mut self, threshold: u16) {
        self.threshold = threshold.min(TIMEOUT_THRESHOLD_MAX);
    }

    /// Idle minutes counted since the last reset.
    pub fn minutes(&self) -> u16 {
        self.minutes
    }

    pub fn reset(&mut self, now: u64) {
        self.last_tick = now;
        self.minutes = 0;
    }

    pub fn update_threshold(&mut self, increase: bool) {
        if increase && self.threshold < TIMEOUT_THRESHOLD_MAX {
            self.threshold += 1;
        }
        if !increase && self.threshold > 0 {
            self.threshold -= 1;
        }
    }

    /// Advances the minute counter and reports whether the timeout is reached.
    ///
    /// Keeps reporting `true` on every call until [`reset`](Self::reset).
    pub fn tick(&mut self, now: u64) -> bool {
        if self.threshold == 0 {
            return false;
        }
        if now.saturating_sub(self.last_tick) >= MINUTE_MS {
            self.minutes = self.minutes.saturating_add(1);
            self.last_tick = now;
        }
        self.minutes >= self.threshold
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn expires_after_threshold_minutes() {
        let mut idle = IdleTimeout::new(2);
        idle.reset(1_000);
        assert!(!idle.tick(30_000));
        assert!(!idle.tick(61_000));
        assert_eq!(idle.minutes(), 1);
        assert!(!idle.tick(100_000));
        assert!(idle.tick(121_000));
        assert!(idle.tick(125_000));
    }

    #[test]
    fn minute_restarts_from_each_tick() {
        let mut idle = IdleTimeout::new(3);
        idle.reset(0);
        // A late tick does not carry over the surplus into the next minute.
        idle.tick(90_000);
        idle.tick(149_999);
        assert_eq!(idle.minutes(), 1);
        idle.tick(150_000);
        assert_eq!(idle.minutes(), 2);
    }

    #[test]
    fn reset_clears_the_count() {
        let mut idle = IdleTimeout::new(1);
        idle.reset(0);
        assert!(idle.tick(60_000));
        idle.reset(60_500);
        assert_eq!(idle.minutes(), 0);
        assert!(!idle.tick(100_000));
    }

    #[test]
    fn zero_threshold_never_expires() {
        let mut idle = IdleTimeout::new(0);
        idle.reset(0);
        for minute in 1..10 {
            assert!(!idle.tick(minute * MINUTE_MS));
        }
        assert_eq!(idle.minutes(), 0);
    }

    #[test]
    fn threshold_is_clamped() {
        let mut idle = IdleTimeout::new(500);
        assert_eq!(idle.threshold(), TIMEOUT_THRESHOLD_MAX);
        idle.update_threshold(true);
        assert_eq!(idle.threshold(), TIMEOUT_THRESHOLD_MAX);

        idle.set_threshold(1);
        idle.update_threshold(false);
        idle.update_threshold(false);
        assert_eq!(idle.threshold(), 0);
    }
}

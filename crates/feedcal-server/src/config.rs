//! Scheduler configuration.

use std::time::Duration;

/// Poll scheduler configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchedulerConfig {
    /// Fixed period between poll cycles.
    pub poll_interval: Duration,
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            poll_interval: Duration::from_secs(Self::DEFAULT_POLL_INTERVAL_SECS),
        }
    }
}

impl SchedulerConfig {
    /// Default poll period: 5 minutes.
    pub const DEFAULT_POLL_INTERVAL_SECS: u64 = 300;

    /// Shortest accepted poll period.
    pub const MIN_POLL_INTERVAL: Duration = Duration::from_secs(1);

    /// Creates a new scheduler config with the given poll interval.
    pub fn new(poll_interval: Duration) -> Self {
        Self::default().with_poll_interval(poll_interval)
    }

    /// Builder: set the poll interval, raised to [`Self::MIN_POLL_INTERVAL`] if shorter.
    pub fn with_poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval = interval.max(Self::MIN_POLL_INTERVAL);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_five_minutes() {
        assert_eq!(
            SchedulerConfig::default().poll_interval,
            Duration::from_secs(300)
        );
    }

    #[test]
    fn custom_interval() {
        let config = SchedulerConfig::new(Duration::from_secs(60));
        assert_eq!(config.poll_interval, Duration::from_secs(60));
    }

    #[test]
    fn zero_interval_is_clamped() {
        let config = SchedulerConfig::new(Duration::ZERO);
        assert_eq!(config.poll_interval, SchedulerConfig::MIN_POLL_INTERVAL);
    }
}

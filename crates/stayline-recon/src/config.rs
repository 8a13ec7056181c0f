//! # Reconciliation Configuration
//!
//! Interval and timeout settings for the status reconciliation loop.

use std::time::Duration;

/// Configuration for the status reconciler.
///
/// ## Example
/// ```rust
/// use std::time::Duration;
/// use stayline_recon::ReconConfig;
///
/// let config = ReconConfig::default().interval(Duration::from_secs(30));
/// assert_eq!(config.interval_duration(), Duration::from_secs(30));
/// ```
#[derive(Debug, Clone)]
pub struct ReconConfig {
    /// How often a reconciliation cycle fires.
    /// Default: 60 seconds.
    interval: Duration,

    /// Upper bound on one cycle's database work. A slow query cannot block
    /// the next scheduled tick past this.
    /// Default: 30 seconds.
    cycle_timeout: Duration,
}

impl ReconConfig {
    /// Sets the cycle interval.
    pub fn interval(mut self, interval: Duration) -> Self {
        self.interval = interval;
        self
    }

    /// Sets the per-cycle timeout.
    pub fn cycle_timeout(mut self, timeout: Duration) -> Self {
        self.cycle_timeout = timeout;
        self
    }

    /// The cycle interval.
    pub fn interval_duration(&self) -> Duration {
        self.interval
    }

    /// The per-cycle timeout.
    pub fn cycle_timeout_duration(&self) -> Duration {
        self.cycle_timeout
    }
}

impl Default for ReconConfig {
    fn default() -> Self {
        ReconConfig {
            interval: Duration::from_secs(60),
            cycle_timeout: Duration::from_secs(30),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ReconConfig::default();
        assert_eq!(config.interval_duration(), Duration::from_secs(60));
        assert_eq!(config.cycle_timeout_duration(), Duration::from_secs(30));
    }

    #[test]
    fn test_builder() {
        let config = ReconConfig::default()
            .interval(Duration::from_secs(5))
            .cycle_timeout(Duration::from_secs(2));
        assert_eq!(config.interval_duration(), Duration::from_secs(5));
        assert_eq!(config.cycle_timeout_duration(), Duration::from_secs(2));
    }
}

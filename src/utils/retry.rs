//! Retry utilities: backoff builders.
//!
//! Uses `backon` for exponential backoff with jitter. Only startup work is
//! retried; request-path calls fail fast.

use std::time::Duration;

use backon::ExponentialBuilder;

/// Backoff for resolving backend endpoints at startup.
///
/// - Min delay: 100ms
/// - Max delay: 2s
/// - Max attempts: 5
/// - Jitter enabled
pub fn discovery_backoff() -> ExponentialBuilder {
    ExponentialBuilder::default()
        .with_min_delay(Duration::from_millis(100))
        .with_max_delay(Duration::from_secs(2))
        .with_max_times(5)
        .with_jitter()
}

#[cfg(test)]
mod tests {
    use super::*;
    use backon::BackoffBuilder;

    #[test]
    fn test_discovery_backoff_is_bounded() {
        let delays: Vec<Duration> = discovery_backoff().build().collect();
        assert_eq!(delays.len(), 5);
        assert!(delays.iter().all(|d| *d <= Duration::from_secs(4)));
    }
}

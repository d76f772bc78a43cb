//! Exponential backoff with jitter for transport retries.

use rand::Rng;
use std::time::Duration;

const INITIAL_INTERVAL_SECS: f64 = 0.5;
const BACKOFF_FACTOR: f64 = 2.0;
const MAX_INTERVAL_SECS: f64 = 8.0;

/// Delay before transport retry number `attempt` (0-indexed).
///
/// `0.5s * 2^attempt`, capped at 8s, scaled by a random factor in `0.5..=1.5`.
pub(crate) fn delay(attempt: u32) -> Duration {
    let base = INITIAL_INTERVAL_SECS * BACKOFF_FACTOR.powi(attempt as i32);
    let capped = base.min(MAX_INTERVAL_SECS);
    let jitter = rand::thread_rng().gen_range(0.5..=1.5);
    Duration::from_secs_f64(capped * jitter)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_delay_bounds() {
        for attempt in 0..10 {
            let expected = (INITIAL_INTERVAL_SECS * BACKOFF_FACTOR.powi(attempt as i32)).min(MAX_INTERVAL_SECS);
            let actual = delay(attempt).as_secs_f64();
            assert!(actual >= expected * 0.5 - 1e-9, "attempt {}: {}", attempt, actual);
            assert!(actual <= expected * 1.5 + 1e-9, "attempt {}: {}", attempt, actual);
        }
    }
}

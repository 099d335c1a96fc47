//! Retry with exponential backoff and a circuit breaker.

use super::error::{ApiError, ApiResult};
use std::time::{Duration, Instant};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    pub max_attempts: u32,
    pub base_delay: Duration,
    pub max_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            base_delay: Duration::from_millis(250),
            max_delay: Duration::from_secs(4),
        }
    }
}

impl RetryPolicy {
    /// Delay before retry number `attempt` (1-based): base * 2^(attempt-1), capped.
    pub fn delay_for(&self, attempt: u32) -> Duration {
        let factor = 2u32.saturating_pow(attempt.saturating_sub(1));
        self.base_delay.saturating_mul(factor).min(self.max_delay)
    }
}

/// Runs `op` until it succeeds, fails with a non-retryable error, or the
/// attempts run out.
pub fn with_retry<T>(policy: &RetryPolicy, op: impl FnMut() -> ApiResult<T>) -> ApiResult<T> {
    with_retry_using(policy, std::thread::sleep, op)
}

pub fn with_retry_using<T>(
    policy: &RetryPolicy,
    mut sleep: impl FnMut(Duration),
    mut op: impl FnMut() -> ApiResult<T>,
) -> ApiResult<T> {
    let mut attempt = 1;
    loop {
        match op() {
            Ok(value) => return Ok(value),
            Err(e) if e.is_retryable() && attempt < policy.max_attempts => {
                let delay = policy.delay_for(attempt);
                log::warn!("request failed ({}), retry {} in {:?}", e, attempt, delay);
                sleep(delay);
                attempt += 1;
            }
            Err(e) => return Err(e),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CircuitState {
    Closed,
    Open,
    /// One trial request is let through.
    HalfOpen,
}

#[derive(Debug, Clone)]
pub struct CircuitBreaker {
    threshold: u32,
    reset_timeout: Duration,
    failures: u32,
    state: CircuitState,
    opened_at: Option<Instant>,
}

impl Default for CircuitBreaker {
    fn default() -> Self {
        Self::new(5, Duration::from_secs(30))
    }
}

impl CircuitBreaker {
    pub fn new(threshold: u32, reset_timeout: Duration) -> Self {
        Self {
            threshold: threshold.max(1),
            reset_timeout,
            failures: 0,
            state: CircuitState::Closed,
            opened_at: None,
        }
    }

    pub fn state(&self) -> CircuitState {
        self.state
    }

    pub fn failures(&self) -> u32 {
        self.failures
    }

    pub fn call<T>(&mut self, op: impl FnOnce() -> ApiResult<T>) -> ApiResult<T> {
        self.call_at(Instant::now(), op)
    }

    /// Like `call` with an explicit clock reading.
    pub fn call_at<T>(&mut self, now: Instant, op: impl FnOnce() -> ApiResult<T>) -> ApiResult<T> {
        if self.state == CircuitState::Open {
            let elapsed = self
                .opened_at
                .map_or(Duration::MAX, |at| now.saturating_duration_since(at));
            if elapsed < self.reset_timeout {
                return Err(ApiError::CircuitOpen);
            }
            log::info!("circuit half-open, trying backend again");
            self.state = CircuitState::HalfOpen;
        }

        match op() {
            Ok(value) => {
                self.on_success();
                Ok(value)
            }
            Err(e) => {
                // A 404 means the backend is alive
                if matches!(e, ApiError::NotFound(_)) {
                    self.on_success();
                } else {
                    self.on_failure(now);
                }
                Err(e)
            }
        }
    }

    fn on_success(&mut self) {
        if self.state != CircuitState::Closed {
            log::info!("circuit closed");
        }
        self.failures = 0;
        self.state = CircuitState::Closed;
        self.opened_at = None;
    }

    fn on_failure(&mut self, now: Instant) {
        self.failures += 1;
        if self.state == CircuitState::HalfOpen || self.failures >= self.threshold {
            if self.state != CircuitState::Open {
                log::warn!("circuit open after {} failures", self.failures);
            }
            self.state = CircuitState::Open;
            self.opened_at = Some(now);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn transport() -> ApiError {
        ApiError::Transport("connection refused".into())
    }

    // =========================================================================
    // Retry
    // =========================================================================

    #[test]
    fn test_delay_doubles_and_caps() {
        let policy = RetryPolicy {
            max_attempts: 10,
            base_delay: Duration::from_millis(100),
            max_delay: Duration::from_millis(500),
        };
        assert_eq!(policy.delay_for(1), Duration::from_millis(100));
        assert_eq!(policy.delay_for(2), Duration::from_millis(200));
        assert_eq!(policy.delay_for(3), Duration::from_millis(400));
        assert_eq!(policy.delay_for(4), Duration::from_millis(500));
        assert_eq!(policy.delay_for(40), Duration::from_millis(500));
    }

    #[test]
    fn test_retry_until_success() {
        let mut calls = 0;
        let mut slept = Vec::new();
        let result = with_retry_using(
            &RetryPolicy::default(),
            |d| slept.push(d),
            || {
                calls += 1;
                if calls < 3 {
                    Err(transport())
                } else {
                    Ok(calls)
                }
            },
        );
        assert_eq!(result, Ok(3));
        assert_eq!(
            slept,
            vec![Duration::from_millis(250), Duration::from_millis(500)]
        );
    }

    #[test]
    fn test_retry_gives_up() {
        let mut calls = 0;
        let result: ApiResult<()> = with_retry_using(
            &RetryPolicy::default(),
            |_| {},
            || {
                calls += 1;
                Err(transport())
            },
        );
        assert_eq!(result, Err(transport()));
        assert_eq!(calls, 3);
    }

    #[test]
    fn test_no_retry_on_client_error() {
        let mut calls = 0;
        let result: ApiResult<()> = with_retry_using(
            &RetryPolicy::default(),
            |_| {},
            || {
                calls += 1;
                Err(ApiError::NotFound("User".into()))
            },
        );
        assert!(result.is_err());
        assert_eq!(calls, 1);
    }

    // =========================================================================
    // Circuit breaker
    // =========================================================================

    #[test]
    fn test_opens_after_threshold() {
        let mut breaker = CircuitBreaker::new(2, Duration::from_secs(10));
        let now = Instant::now();
        let _ = breaker.call_at(now, || -> ApiResult<()> { Err(transport()) });
        assert_eq!(breaker.state(), CircuitState::Closed);
        let _ = breaker.call_at(now, || -> ApiResult<()> { Err(transport()) });
        assert_eq!(breaker.state(), CircuitState::Open);

        let mut ran = false;
        let result = breaker.call_at(now + Duration::from_secs(1), || {
            ran = true;
            Ok(())
        });
        assert_eq!(result, Err(ApiError::CircuitOpen));
        assert!(!ran);
    }

    #[test]
    fn test_half_open_success_closes() {
        let mut breaker = CircuitBreaker::new(1, Duration::from_secs(10));
        let now = Instant::now();
        let _ = breaker.call_at(now, || -> ApiResult<()> { Err(transport()) });
        assert_eq!(breaker.state(), CircuitState::Open);

        let result = breaker.call_at(now + Duration::from_secs(11), || Ok(7));
        assert_eq!(result, Ok(7));
        assert_eq!(breaker.state(), CircuitState::Closed);
        assert_eq!(breaker.failures(), 0);
    }

    #[test]
    fn test_half_open_failure_reopens() {
        let mut breaker = CircuitBreaker::new(3, Duration::from_secs(10));
        let now = Instant::now();
        for _ in 0..3 {
            let _ = breaker.call_at(now, || -> ApiResult<()> { Err(transport()) });
        }
        let later = now + Duration::from_secs(11);
        let _ = breaker.call_at(later, || -> ApiResult<()> { Err(transport()) });
        assert_eq!(breaker.state(), CircuitState::Open);
        assert_eq!(
            breaker.call_at(later + Duration::from_secs(1), || Ok(())),
            Err(ApiError::CircuitOpen)
        );
    }

    #[test]
    fn test_not_found_does_not_trip() {
        let mut breaker = CircuitBreaker::new(1, Duration::from_secs(10));
        let _ = breaker.call(|| -> ApiResult<()> { Err(ApiError::NotFound("User".into())) });
        assert_eq!(breaker.state(), CircuitState::Closed);
    }
}

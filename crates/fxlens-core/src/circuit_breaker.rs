use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use tokio::time::Instant;
use tracing::{debug, warn};

/// Whether calls to the remote rate source are currently let through.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CircuitState {
    Closed,
    Open,
    HalfOpen,
}

/// Circuit breaker thresholds and timers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CircuitBreakerConfig {
    pub failure_threshold: u32,
    pub open_timeout: Duration,
}

impl Default for CircuitBreakerConfig {
    fn default() -> Self {
        Self {
            failure_threshold: 3,
            open_timeout: Duration::from_secs(30),
        }
    }
}

impl CircuitBreakerConfig {
    /// A breaker that never opens.
    pub const fn disabled() -> Self {
        Self {
            failure_threshold: u32::MAX,
            open_timeout: Duration::ZERO,
        }
    }
}

#[derive(Debug)]
struct Tracker {
    state: CircuitState,
    consecutive_failures: u32,
    opened_at: Option<Instant>,
}

/// Short-circuits remote calls after repeated failures so that resolution
/// drops to local tiers without waiting on a dead transport.
#[derive(Debug)]
pub struct CircuitBreaker {
    config: CircuitBreakerConfig,
    tracker: Mutex<Tracker>,
}

impl Default for CircuitBreaker {
    fn default() -> Self {
        Self::new(CircuitBreakerConfig::default())
    }
}

impl CircuitBreaker {
    pub fn new(config: CircuitBreakerConfig) -> Self {
        Self {
            config,
            tracker: Mutex::new(Tracker {
                state: CircuitState::Closed,
                consecutive_failures: 0,
                opened_at: None,
            }),
        }
    }

    fn tracker(&self) -> MutexGuard<'_, Tracker> {
        self.tracker.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Returns `false` while open; moves to half-open once the timeout elapsed.
    pub fn allow_request(&self) -> bool {
        let mut tracker = self.tracker();
        if tracker.state != CircuitState::Open {
            return true;
        }

        let elapsed = tracker
            .opened_at
            .is_some_and(|opened_at| opened_at.elapsed() >= self.config.open_timeout);
        if elapsed {
            debug!("rate source circuit half-open, probing");
            tracker.state = CircuitState::HalfOpen;
            tracker.opened_at = None;
        }
        elapsed
    }

    pub fn record_success(&self) {
        let mut tracker = self.tracker();
        if tracker.state != CircuitState::Closed {
            debug!("rate source circuit closed");
        }
        tracker.state = CircuitState::Closed;
        tracker.consecutive_failures = 0;
        tracker.opened_at = None;
    }

    pub fn record_failure(&self) {
        let mut tracker = self.tracker();
        tracker.consecutive_failures = tracker.consecutive_failures.saturating_add(1);

        let trips = tracker.state == CircuitState::HalfOpen
            || tracker.consecutive_failures >= self.config.failure_threshold;
        if trips && tracker.state != CircuitState::Open {
            warn!(
                failures = tracker.consecutive_failures,
                "rate source circuit opened"
            );
        }
        if trips {
            tracker.state = CircuitState::Open;
            tracker.opened_at = Some(Instant::now());
        }
    }

    pub fn state(&self) -> CircuitState {
        self.tracker().state
    }

    pub fn consecutive_failures(&self) -> u32 {
        self.tracker().consecutive_failures
    }
}

//! Circuit breaker for identity-authority protection.
//!
//! # States
//! - Closed: normal operation, requests pass through
//! - Open: authority assumed down, requests fail fast
//! - Half-Open: testing if the authority recovered
//!
//! # State Transitions
//! ```text
//! Closed → Open: consecutive failures reach threshold
//! Open → Half-Open: after recovery timeout
//! Half-Open → Closed: probe request succeeds
//! Half-Open → Open: probe request fails
//! ```
//!
//! # Design Decisions
//! - Fail fast in Open state (no waiting for timeout)
//! - Single probe in Half-Open (prevents hammering a recovering authority)
//! - A probe outstanding longer than the recovery timeout is considered lost
//!   (its future was dropped by a deadline) and a new probe is admitted

use std::sync::{Mutex, PoisonError};
use std::time::{Duration, Instant};

use crate::observability::metrics;

/// Circuit state as seen by callers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CircuitState {
    Closed,
    Open,
    HalfOpen,
}

impl CircuitState {
    pub fn as_str(self) -> &'static str {
        match self {
            CircuitState::Closed => "closed",
            CircuitState::Open => "open",
            CircuitState::HalfOpen => "half_open",
        }
    }
}

#[derive(Debug)]
struct BreakerInner {
    state: CircuitState,
    consecutive_failures: u32,
    opened_at: Option<Instant>,
    probe_started: Option<Instant>,
}

/// Consecutive-failure circuit breaker.
///
/// Shared across concurrent calls by the owning transport; all state sits
/// behind one mutex, held only for the duration of a bookkeeping call.
#[derive(Debug)]
pub struct CircuitBreaker {
    failure_threshold: u32,
    recovery_timeout: Duration,
    inner: Mutex<BreakerInner>,
}

impl CircuitBreaker {
    pub fn new(failure_threshold: u32, recovery_timeout: Duration) -> Self {
        Self {
            failure_threshold,
            recovery_timeout,
            inner: Mutex::new(BreakerInner {
                state: CircuitState::Closed,
                consecutive_failures: 0,
                opened_at: None,
                probe_started: None,
            }),
        }
    }

    /// Ask permission to issue a call.
    ///
    /// Returns `false` while the circuit is open and the recovery timeout has
    /// not elapsed. In Half-Open only a single probe is admitted; further
    /// callers are rejected until the probe reports back or goes stale.
    pub fn try_acquire(&self) -> bool {
        let mut inner = self.lock();
        match inner.state {
            CircuitState::Closed => true,
            CircuitState::Open => {
                let waited = inner.opened_at.map(|t| t.elapsed()).unwrap_or_default();
                if waited >= self.recovery_timeout {
                    inner.state = CircuitState::HalfOpen;
                    inner.probe_started = Some(Instant::now());
                    metrics::record_circuit_transition(CircuitState::HalfOpen);
                    tracing::info!("circuit half-open, admitting probe");
                    true
                } else {
                    false
                }
            }
            CircuitState::HalfOpen => match inner.probe_started {
                Some(started) if started.elapsed() < self.recovery_timeout => false,
                _ => {
                    inner.probe_started = Some(Instant::now());
                    true
                }
            },
        }
    }

    /// Report a successful call.
    pub fn record_success(&self) {
        let mut inner = self.lock();
        inner.consecutive_failures = 0;
        if inner.state != CircuitState::Closed {
            tracing::info!(from = inner.state.as_str(), "circuit closed");
            metrics::record_circuit_transition(CircuitState::Closed);
        }
        inner.state = CircuitState::Closed;
        inner.opened_at = None;
        inner.probe_started = None;
    }

    /// Report a failed call.
    pub fn record_failure(&self) {
        let mut inner = self.lock();
        match inner.state {
            CircuitState::Closed => {
                inner.consecutive_failures += 1;
                if inner.consecutive_failures >= self.failure_threshold {
                    tracing::warn!(
                        failures = inner.consecutive_failures,
                        "failure threshold reached, circuit open"
                    );
                    Self::open(&mut inner);
                }
            }
            CircuitState::HalfOpen => {
                tracing::warn!("probe failed, circuit re-opened");
                Self::open(&mut inner);
            }
            CircuitState::Open => {}
        }
    }

    pub fn state(&self) -> CircuitState {
        self.lock().state
    }

    fn open(inner: &mut BreakerInner) {
        inner.state = CircuitState::Open;
        inner.opened_at = Some(Instant::now());
        inner.probe_started = None;
        metrics::record_circuit_transition(CircuitState::Open);
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, BreakerInner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

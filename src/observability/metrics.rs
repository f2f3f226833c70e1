//! Metrics collection.
//!
//! # Metrics
//! - `iam_resolutions_total` (counter): finished resolutions by action, outcome
//! - `iam_resolution_duration_seconds` (histogram): wall-clock per resolution
//! - `iam_circuit_transitions_total` (counter): breaker transitions by state

use crate::resilience::CircuitState;

/// Count one finished resolution call.
pub fn record_resolution(action: &'static str, outcome: &'static str) {
    metrics::counter!("iam_resolutions_total", "action" => action, "outcome" => outcome)
        .increment(1);
}

/// Record the wall-clock duration of one resolution call.
pub fn record_resolution_duration(action: &'static str, seconds: f64) {
    metrics::histogram!("iam_resolution_duration_seconds", "action" => action).record(seconds);
}

/// Count one circuit breaker transition.
pub fn record_circuit_transition(to: CircuitState) {
    metrics::counter!("iam_circuit_transitions_total", "to" => to.as_str()).increment(1);
}

//! Counters for identity operations.
//!
//! Tracks how many RUTs were checked and rejected, and how registrations
//! fared, so the server can report a summary at shutdown.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Instant;

/// Shared metrics tracker. Clones share the same counters.
#[derive(Debug, Clone)]
pub struct MetricsTracker {
    rut_validations_total: Arc<AtomicU64>,
    rut_rejections_total: Arc<AtomicU64>,
    registrations_total: Arc<AtomicU64>,
    registration_failures_total: Arc<AtomicU64>,
}

impl MetricsTracker {
    /// Create a new metrics tracker.
    pub fn new() -> Self {
        Self {
            rut_validations_total: Arc::new(AtomicU64::new(0)),
            rut_rejections_total: Arc::new(AtomicU64::new(0)),
            registrations_total: Arc::new(AtomicU64::new(0)),
            registration_failures_total: Arc::new(AtomicU64::new(0)),
        }
    }

    /// Track one RUT validation and its outcome.
    pub fn track_rut_validation(&self, valid: bool) {
        self.rut_validations_total.fetch_add(1, Ordering::Relaxed);
        if !valid {
            self.rut_rejections_total.fetch_add(1, Ordering::Relaxed);
        }

        tracing::trace!(valid = valid, "RUT validated");
    }

    /// Track one registration attempt.
    pub fn track_registration(&self, success: bool, duration_ms: u128) {
        self.registrations_total.fetch_add(1, Ordering::Relaxed);
        if !success {
            self.registration_failures_total
                .fetch_add(1, Ordering::Relaxed);
        }

        tracing::debug!(
            success = success,
            duration_ms = duration_ms,
            "Registration attempt completed"
        );
    }

    pub fn rut_validations_total(&self) -> u64 {
        self.rut_validations_total.load(Ordering::Relaxed)
    }

    pub fn rut_rejections_total(&self) -> u64 {
        self.rut_rejections_total.load(Ordering::Relaxed)
    }

    pub fn registrations_total(&self) -> u64 {
        self.registrations_total.load(Ordering::Relaxed)
    }

    pub fn registration_failures_total(&self) -> u64 {
        self.registration_failures_total.load(Ordering::Relaxed)
    }

    /// Share of validated RUTs that were rejected (0.0 to 1.0).
    pub fn rut_rejection_rate(&self) -> f64 {
        let total = self.rut_validations_total() as f64;

        if total == 0.0 {
            0.0
        } else {
            self.rut_rejections_total() as f64 / total
        }
    }

    /// Human-readable summary of all counters.
    pub fn summary(&self) -> String {
        format!(
            "Metrics Summary:\n\
             RUT Validations: {}\n\
             RUT Rejections: {} ({:.2}% rejection rate)\n\
             Registrations: {}\n\
             Registration Failures: {}",
            self.rut_validations_total(),
            self.rut_rejections_total(),
            self.rut_rejection_rate() * 100.0,
            self.registrations_total(),
            self.registration_failures_total(),
        )
    }
}

impl Default for MetricsTracker {
    fn default() -> Self {
        Self::new()
    }
}

/// A timer for tracking operation duration.
pub struct Timer {
    start: Instant,
    operation: &'static str,
}

impl Timer {
    /// Start a new timer for the given operation.
    pub fn new(operation: &'static str) -> Self {
        Self {
            start: Instant::now(),
            operation,
        }
    }

    /// Finish the timer, logging with the given status, and return the
    /// elapsed milliseconds.
    pub fn finish_with_status(self, success: bool) -> u128 {
        let duration_ms = self.start.elapsed().as_millis();

        if success {
            tracing::debug!(
                operation = self.operation,
                duration_ms = duration_ms,
                "Operation succeeded"
            );
        } else {
            tracing::warn!(
                operation = self.operation,
                duration_ms = duration_ms,
                "Operation failed"
            );
        }

        duration_ms
    }
}

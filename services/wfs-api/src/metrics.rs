//! Request and refresh metrics.
//!
//! Every event goes both to the `metrics` recorder (scraped from `/metrics`)
//! and to in-process atomics reported by the JSON snapshot.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Instant;

use metrics::{counter, gauge, histogram};
use serde::Serialize;
use wfs_common::{WfsError, WfsResult};
use wfs_protocol::{WfsOperation, WfsResponse};

#[derive(Debug)]
pub struct MetricsCollector {
    pub requests: AtomicU64,
    pub validation_failures: AtomicU64,
    pub processing_failures: AtomicU64,
    pub unsupported: AtomicU64,
    pub unavailable: AtomicU64,
    pub refreshes: AtomicU64,
    pub refresh_failures: AtomicU64,
    total_request_us: AtomicU64,
    start_time: Instant,
}

#[derive(Debug, Clone, Serialize)]
pub struct MetricsSnapshot {
    pub uptime_secs: u64,
    pub requests: u64,
    pub validation_failures: u64,
    pub processing_failures: u64,
    pub unsupported: u64,
    pub unavailable: u64,
    pub avg_request_ms: f64,
    pub refreshes: u64,
    pub refresh_failures: u64,
}

impl MetricsCollector {
    pub fn new() -> Self {
        Self {
            requests: AtomicU64::new(0),
            validation_failures: AtomicU64::new(0),
            processing_failures: AtomicU64::new(0),
            unsupported: AtomicU64::new(0),
            unavailable: AtomicU64::new(0),
            refreshes: AtomicU64::new(0),
            refresh_failures: AtomicU64::new(0),
            total_request_us: AtomicU64::new(0),
            start_time: Instant::now(),
        }
    }

    /// Record the outcome of one processed request.
    pub fn record_request(
        &self,
        operation: WfsOperation,
        result: &WfsResult<WfsResponse>,
        elapsed_ms: f64,
    ) {
        let op = operation.name();
        self.requests.fetch_add(1, Ordering::Relaxed);
        self.total_request_us
            .fetch_add((elapsed_ms * 1000.0) as u64, Ordering::Relaxed);

        let outcome = match result {
            Ok(_) => "ok",
            Err(e) if e.is_validation() => {
                self.validation_failures.fetch_add(1, Ordering::Relaxed);
                "invalid"
            }
            Err(WfsError::OperationNotSupported(_)) => {
                self.unsupported.fetch_add(1, Ordering::Relaxed);
                "unsupported"
            }
            Err(WfsError::CapabilitiesNotComputed) => {
                self.unavailable.fetch_add(1, Ordering::Relaxed);
                "unavailable"
            }
            Err(_) => {
                self.processing_failures.fetch_add(1, Ordering::Relaxed);
                "error"
            }
        };

        counter!("wfs_requests_total", "operation" => op, "outcome" => outcome).increment(1);
        histogram!("wfs_request_duration_ms", "operation" => op).record(elapsed_ms);
    }

    /// Record a capabilities refresh and the size of the known feature set.
    pub fn record_refresh(&self, success: bool, features: usize) {
        self.refreshes.fetch_add(1, Ordering::Relaxed);
        if success {
            counter!("wfs_capabilities_refresh_total").increment(1);
            gauge!("wfs_known_features").set(features as f64);
        } else {
            self.refresh_failures.fetch_add(1, Ordering::Relaxed);
            counter!("wfs_capabilities_refresh_failures_total").increment(1);
        }
    }

    pub fn snapshot(&self) -> MetricsSnapshot {
        let requests = self.requests.load(Ordering::Relaxed);
        let total_us = self.total_request_us.load(Ordering::Relaxed);
        MetricsSnapshot {
            uptime_secs: self.start_time.elapsed().as_secs(),
            requests,
            validation_failures: self.validation_failures.load(Ordering::Relaxed),
            processing_failures: self.processing_failures.load(Ordering::Relaxed),
            unsupported: self.unsupported.load(Ordering::Relaxed),
            unavailable: self.unavailable.load(Ordering::Relaxed),
            avg_request_ms: if requests == 0 {
                0.0
            } else {
                (total_us as f64 / requests as f64) / 1000.0
            },
            refreshes: self.refreshes.load(Ordering::Relaxed),
            refresh_failures: self.refresh_failures.load(Ordering::Relaxed),
        }
    }
}

impl Default for MetricsCollector {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wfs_protocol::ListStoredQueriesResponse;

    #[test]
    fn test_outcomes_are_classified() {
        let metrics = MetricsCollector::new();
        metrics.record_request(
            WfsOperation::ListStoredQueries,
            &Ok(ListStoredQueriesResponse::empty().into()),
            2.0,
        );
        metrics.record_request(WfsOperation::GetFeature, &Err(WfsError::MissingService), 1.0);
        metrics.record_request(
            WfsOperation::GetFeature,
            &Err(WfsError::Internal("boom".to_string())),
            3.0,
        );

        let snapshot = metrics.snapshot();
        assert_eq!(snapshot.requests, 3);
        assert_eq!(snapshot.validation_failures, 1);
        assert_eq!(snapshot.processing_failures, 1);
        assert!((snapshot.avg_request_ms - 2.0).abs() < 1e-6);
    }

    #[test]
    fn test_unsupported_and_unavailable_kept_apart() {
        let metrics = MetricsCollector::new();
        metrics.record_request(
            WfsOperation::GetPropertyValue,
            &Err(WfsError::OperationNotSupported("GetPropertyValue".to_string())),
            1.0,
        );
        metrics.record_request(
            WfsOperation::GetCapabilities,
            &Err(WfsError::CapabilitiesNotComputed),
            1.0,
        );
        metrics.record_request(
            WfsOperation::GetCapabilities,
            &Err(WfsError::CapabilitiesNotComputed),
            1.0,
        );

        let snapshot = metrics.snapshot();
        assert_eq!(snapshot.requests, 3);
        assert_eq!(snapshot.unsupported, 1);
        assert_eq!(snapshot.unavailable, 2);
        assert_eq!(snapshot.processing_failures, 0);
        assert_eq!(snapshot.validation_failures, 0);
    }

    #[test]
    fn test_refresh_counts() {
        let metrics = MetricsCollector::new();
        metrics.record_refresh(true, 4);
        metrics.record_refresh(false, 0);
        let snapshot = metrics.snapshot();
        assert_eq!(snapshot.refreshes, 2);
        assert_eq!(snapshot.refresh_failures, 1);
    }
}

//! Metrics collection and reporting

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// Metrics collector for prediction throughput and vocabulary coverage
#[derive(Clone)]
pub struct MetricsCollector {
    inner: Arc<MetricsInner>,
}

struct MetricsInner {
    predictions: AtomicU64,
    rejected: AtomicU64,
    recognized_tokens: AtomicU64,
    unknown_tokens: AtomicU64,
    total_latency_us: AtomicU64,
}

impl MetricsCollector {
    /// Create a new metrics collector
    pub fn new() -> Self {
        Self {
            inner: Arc::new(MetricsInner {
                predictions: AtomicU64::new(0),
                rejected: AtomicU64::new(0),
                recognized_tokens: AtomicU64::new(0),
                unknown_tokens: AtomicU64::new(0),
                total_latency_us: AtomicU64::new(0),
            }),
        }
    }

    /// Record a completed prediction
    pub fn record_prediction(&self, recognized: u64, unknown: u64, latency_us: u64) {
        self.inner.predictions.fetch_add(1, Ordering::Relaxed);
        self.inner
            .recognized_tokens
            .fetch_add(recognized, Ordering::Relaxed);
        self.inner
            .unknown_tokens
            .fetch_add(unknown, Ordering::Relaxed);
        self.inner
            .total_latency_us
            .fetch_add(latency_us, Ordering::Relaxed);
    }

    /// Record an input rejected before normalization
    pub fn record_rejected(&self) {
        self.inner.rejected.fetch_add(1, Ordering::Relaxed);
    }

    /// Get current metrics snapshot
    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            predictions: self.inner.predictions.load(Ordering::Relaxed),
            rejected: self.inner.rejected.load(Ordering::Relaxed),
            recognized_tokens: self.inner.recognized_tokens.load(Ordering::Relaxed),
            unknown_tokens: self.inner.unknown_tokens.load(Ordering::Relaxed),
            total_latency_us: self.inner.total_latency_us.load(Ordering::Relaxed),
        }
    }
}

impl Default for MetricsCollector {
    fn default() -> Self {
        Self::new()
    }
}

/// Snapshot of current metrics
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MetricsSnapshot {
    pub predictions: u64,
    pub rejected: u64,
    pub recognized_tokens: u64,
    pub unknown_tokens: u64,
    pub total_latency_us: u64,
}

impl MetricsSnapshot {
    /// Calculate average latency per prediction
    pub fn avg_latency_us(&self) -> u64 {
        if self.predictions == 0 {
            0
        } else {
            self.total_latency_us / self.predictions
        }
    }

    /// Fraction of tokens that were absent from the vocabulary
    pub fn unknown_token_rate(&self) -> f64 {
        let total = self.recognized_tokens + self.unknown_tokens;
        if total == 0 {
            0.0
        } else {
            self.unknown_tokens as f64 / total as f64
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_metrics_collection() {
        let metrics = MetricsCollector::new();

        metrics.record_prediction(3, 1, 400);
        metrics.record_prediction(5, 3, 600);
        metrics.record_rejected();

        let snapshot = metrics.snapshot();
        assert_eq!(snapshot.predictions, 2);
        assert_eq!(snapshot.rejected, 1);
        assert_eq!(snapshot.recognized_tokens, 8);
        assert_eq!(snapshot.unknown_tokens, 4);
        assert_eq!(snapshot.avg_latency_us(), 500);
        assert!((snapshot.unknown_token_rate() - 4.0 / 12.0).abs() < 1e-12);
    }

    #[test]
    fn test_empty_snapshot() {
        let snapshot = MetricsCollector::default().snapshot();
        assert_eq!(snapshot.avg_latency_us(), 0);
        assert_eq!(snapshot.unknown_token_rate(), 0.0);
    }

    #[test]
    fn test_clones_share_counters() {
        let metrics = MetricsCollector::new();
        let handle = metrics.clone();

        std::thread::spawn(move || handle.record_rejected())
            .join()
            .unwrap();

        assert_eq!(metrics.snapshot().rejected, 1);
    }
}

//! langsift Telemetry
//!
//! Observability for langsift.
//!
//! Provides:
//! - Lock-free prediction metrics (recognized and unknown token counts, latency)
//! - Tracing subscriber initialization from configuration

pub mod logging;
pub mod metrics;

pub use logging::{init_tracing, LogFormat, LoggingConfig};
pub use metrics::{MetricsCollector, MetricsSnapshot};

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::logging::{init_tracing, LoggingConfig};
    pub use crate::metrics::MetricsCollector;
}

//! Metrics recording implementation using Prometheus.

use prometheus::{
    register_counter_vec_with_registry, register_histogram_vec_with_registry, CounterVec,
    Encoder, HistogramVec, Opts, Registry, TextEncoder,
};
use std::sync::Arc;

/// Trait for recording application metrics.
pub trait MetricsRecorder: Clone + Send + Sync + 'static {
    /// Records how a navigation to `route` was resolved
    /// (`render`, `redirect`, `not_found` or `error`).
    fn record_navigation(&self, route: &str, outcome: &str);

    /// Records a call to the rentals backend with its outcome.
    fn record_backend_request(&self, endpoint: &str, result: &str);

    /// Records the duration of a backend call.
    fn record_backend_duration(&self, endpoint: &str, duration_secs: f64);
}

/// Prometheus metrics collector.
#[derive(Clone)]
pub struct Metrics {
    registry: Arc<Registry>,

    navigation_total: CounterVec,

    backend_requests_total: CounterVec,
    backend_request_duration_seconds: HistogramVec,
}

impl Metrics {
    /// Creates a new metrics instance with its own Prometheus registry.
    pub fn new() -> Self {
        let registry = Arc::new(Registry::new());

        let navigation_total = register_counter_vec_with_registry!(
            Opts::new("navigation_total", "Navigations by route and outcome"),
            &["route", "outcome"],
            registry.clone()
        )
        .expect("Failed to register navigation_total");

        let backend_requests_total = register_counter_vec_with_registry!(
            Opts::new(
                "backend_requests_total",
                "Total number of calls to the rentals backend"
            ),
            &["endpoint", "result"],
            registry.clone()
        )
        .expect("Failed to register backend_requests_total");

        let backend_request_duration_seconds = register_histogram_vec_with_registry!(
            "backend_request_duration_seconds",
            "Rentals backend call duration in seconds",
            &["endpoint"],
            vec![0.005, 0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0],
            registry.clone()
        )
        .expect("Failed to register backend_request_duration_seconds");

        Metrics {
            registry,
            navigation_total,
            backend_requests_total,
            backend_request_duration_seconds,
        }
    }

    /// Renders all metrics in Prometheus text format.
    pub fn render(&self) -> String {
        let encoder = TextEncoder::new();
        let metric_families = self.registry.gather();
        let mut buffer = Vec::new();
        if let Err(e) = encoder.encode(&metric_families, &mut buffer) {
            tracing::error!("Failed to encode metrics: {}", e);
            return String::new();
        }
        String::from_utf8_lossy(&buffer).into_owned()
    }
}

impl Default for Metrics {
    fn default() -> Self {
        Self::new()
    }
}

impl MetricsRecorder for Metrics {
    fn record_navigation(&self, route: &str, outcome: &str) {
        self.navigation_total
            .with_label_values(&[route, outcome])
            .inc();
    }

    fn record_backend_request(&self, endpoint: &str, result: &str) {
        self.backend_requests_total
            .with_label_values(&[endpoint, result])
            .inc();
    }

    fn record_backend_duration(&self, endpoint: &str, duration_secs: f64) {
        self.backend_request_duration_seconds
            .with_label_values(&[endpoint])
            .observe(duration_secs);
    }
}

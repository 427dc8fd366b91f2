//! Per-path HTTP request metrics in Prometheus exposition format.
//!
//! Metrics live on an owned [`Registry`] rather than the process-global
//! default, so tests and embedding callers each get an isolated set.

use std::time::Duration;

use prometheus::{
    Encoder, HistogramOpts, HistogramVec, IntCounterVec, Opts, Registry, TextEncoder,
};

/// Request counter and latency histogram, labeled by request path.
pub struct HttpMetrics {
    registry: Registry,
    requests_total: IntCounterVec,
    request_duration_seconds: HistogramVec,
}

impl HttpMetrics {
    /// Create the metrics and register them on a fresh registry.
    ///
    /// Fails only if registration fails, which for a fresh registry means
    /// a programming error in the metric definitions.
    pub fn new() -> Result<Self, prometheus::Error> {
        let registry = Registry::new();

        let requests_total = IntCounterVec::new(
            Opts::new("http_requests_total", "Total number of HTTP requests"),
            &["path"],
        )?;
        // Default buckets: 5ms .. 10s
        let request_duration_seconds = HistogramVec::new(
            HistogramOpts::new(
                "http_request_duration_seconds",
                "Duration of HTTP requests in seconds",
            ),
            &["path"],
        )?;

        registry.register(Box::new(requests_total.clone()))?;
        registry.register(Box::new(request_duration_seconds.clone()))?;

        Ok(Self {
            registry,
            requests_total,
            request_duration_seconds,
        })
    }

    /// Record one completed request for `path`.
    pub fn observe(&self, path: &str, elapsed: Duration) {
        self.requests_total.with_label_values(&[path]).inc();
        self.request_duration_seconds
            .with_label_values(&[path])
            .observe(elapsed.as_secs_f64());
    }

    /// Render all registered metrics in the text exposition format.
    pub fn render(&self) -> Result<String, prometheus::Error> {
        let mut buf = Vec::new();
        TextEncoder::new().encode(&self.registry.gather(), &mut buf)?;
        String::from_utf8(buf).map_err(|e| prometheus::Error::Msg(e.to_string()))
    }
}

//! Prometheus metrics served on `/metrics`.
use prometheus::{
    Encoder, Histogram, HistogramOpts, IntCounter, IntCounterVec, Opts, Registry, TextEncoder,
};

pub struct ApiMetrics {
    registry: Registry,
    /// Requests by matched route and status
    pub http_requests: IntCounterVec,
    /// Analysis requests by outcome (`succeeded` / `failed`)
    pub analyses: IntCounterVec,
    pub aggregations: IntCounter,
    /// |upstream totalScore - local category mean| per analyzed row
    pub score_drift: Histogram,
}

impl ApiMetrics {
    pub fn new() -> Result<Self, prometheus::Error> {
        let registry = Registry::new_custom(Some("codebench".to_string()), None)?;

        let http_requests = IntCounterVec::new(
            Opts::new("http_requests_total", "HTTP requests handled"),
            &["route", "status"],
        )?;
        let analyses = IntCounterVec::new(
            Opts::new("analyses_total", "Analysis requests sent upstream"),
            &["outcome"],
        )?;
        let aggregations = IntCounter::new("aggregations_total", "Comparison sets aggregated")?;
        let score_drift = Histogram::with_opts(
            HistogramOpts::new("score_drift", "Gap between upstream total and local mean")
                .buckets(vec![1.0, 2.5, 5.0, 10.0, 20.0, 40.0]),
        )?;

        registry.register(Box::new(http_requests.clone()))?;
        registry.register(Box::new(analyses.clone()))?;
        registry.register(Box::new(aggregations.clone()))?;
        registry.register(Box::new(score_drift.clone()))?;

        Ok(Self {
            registry,
            http_requests,
            analyses,
            aggregations,
            score_drift,
        })
    }

    pub fn record_analyses(&self, succeeded: usize, failed: usize) {
        self.analyses.with_label_values(&["succeeded"]).inc_by(succeeded as u64);
        self.analyses.with_label_values(&["failed"]).inc_by(failed as u64);
    }

    pub fn encode(&self) -> Result<String, prometheus::Error> {
        let encoder = TextEncoder::new();
        let mut buffer = Vec::new();
        encoder.encode(&self.registry.gather(), &mut buffer)?;
        Ok(String::from_utf8_lossy(&buffer).to_string())
    }
}

//! Prometheus metrics for recommendations and catalog lookups.

use lazy_static::lazy_static;
use prometheus::{CounterVec, Encoder, HistogramOpts, HistogramVec, Opts, Registry, TextEncoder};
use std::time::Duration;

/// Metric name prefix for all metrics of this crate
const PREFIX: &str = "lyric_recommender";

lazy_static! {
    pub static ref REGISTRY: Registry = Registry::new();

    pub static ref RECOMMENDATIONS_TOTAL: CounterVec = CounterVec::new(
        Opts::new(format!("{PREFIX}_recommendations_total"), "Recommendations served by result source"),
        &["source"]
    ).expect("Failed to create recommendations_total metric");

    pub static ref RECOMMENDATION_DURATION_SECONDS: HistogramVec = HistogramVec::new(
        HistogramOpts::new(
            format!("{PREFIX}_recommendation_duration_seconds"),
            "Time to produce a recommendation list in seconds"
        )
        .buckets(vec![0.01, 0.05, 0.1, 0.5, 1.0, 2.0, 5.0, 10.0, 30.0]),
        &["source"]
    ).expect("Failed to create recommendation_duration_seconds metric");

    pub static ref CATALOG_LOOKUPS_TOTAL: CounterVec = CounterVec::new(
        Opts::new(format!("{PREFIX}_catalog_lookups_total"), "External catalog searches by lookup kind and outcome"),
        &["kind", "outcome"]
    ).expect("Failed to create catalog_lookups_total metric");

    pub static ref LYRIC_FETCHES_TOTAL: CounterVec = CounterVec::new(
        Opts::new(format!("{PREFIX}_lyric_fetches_total"), "External lyric fetches by outcome"),
        &["outcome"]
    ).expect("Failed to create lyric_fetches_total metric");
}

/// Register all metrics with the registry
pub fn init_metrics() {
    // Ignore errors if already registered (for tests)
    let _ = REGISTRY.register(Box::new(RECOMMENDATIONS_TOTAL.clone()));
    let _ = REGISTRY.register(Box::new(RECOMMENDATION_DURATION_SECONDS.clone()));
    let _ = REGISTRY.register(Box::new(CATALOG_LOOKUPS_TOTAL.clone()));
    let _ = REGISTRY.register(Box::new(LYRIC_FETCHES_TOTAL.clone()));

    tracing::debug!("Metrics registered");
}

pub fn record_recommendation(source: &str, duration: Duration) {
    RECOMMENDATIONS_TOTAL.with_label_values(&[source]).inc();
    RECOMMENDATION_DURATION_SECONDS
        .with_label_values(&[source])
        .observe(duration.as_secs_f64());
}

pub fn record_catalog_lookup(kind: &str, outcome: &str) {
    CATALOG_LOOKUPS_TOTAL
        .with_label_values(&[kind, outcome])
        .inc();
}

pub fn record_lyric_fetch(outcome: &str) {
    LYRIC_FETCHES_TOTAL.with_label_values(&[outcome]).inc();
}

/// Text exposition of every registered metric.
pub fn render_metrics() -> String {
    let encoder = TextEncoder::new();
    let metric_families = REGISTRY.gather();

    let mut buffer = vec![];
    match encoder.encode(&metric_families, &mut buffer) {
        Ok(()) => String::from_utf8(buffer).unwrap_or_default(),
        Err(e) => {
            tracing::error!("Failed to encode metrics: {}", e);
            String::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_metrics_initialization() {
        init_metrics();
        let metric_families = REGISTRY.gather();
        assert!(!metric_families.is_empty(), "Metrics should be registered");
    }

    #[test]
    fn test_record_and_render() {
        init_metrics();
        record_recommendation("local", Duration::from_millis(20));
        record_catalog_lookup("keyword", "ok");
        record_lyric_fetch("missing");

        let rendered = render_metrics();
        assert!(rendered.contains("lyric_recommender_recommendations_total"));
        assert!(rendered.contains("lyric_recommender_catalog_lookups_total"));
        assert!(rendered.contains("lyric_recommender_lyric_fetches_total"));
    }
}

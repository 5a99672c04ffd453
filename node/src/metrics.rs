//! # Prometheus Metrics
//!
//! Exposes operational metrics for the ledger service. Scraped by
//! Prometheus at the `/metrics` HTTP endpoint on the configured metrics port.
//!
//! All metrics are registered in a dedicated [`prometheus::Registry`] so they
//! do not collide with any default global registry consumers.

use axum::http::StatusCode;
use axum::response::IntoResponse;
use prometheus::{Encoder, IntCounter, IntGauge, Registry, TextEncoder};
use std::sync::Arc;

/// Holds all Prometheus metric handles for the node.
///
/// Prometheus handles are internally reference-counted, so cloning is cheap.
#[derive(Clone)]
pub struct NodeMetrics {
    /// Prometheus registry that owns all metrics below.
    registry: Registry,
    /// Blocks produced by `POST /mine_block`.
    pub blocks_mined_total: IntCounter,
    /// External blocks accepted by `POST /add_block`.
    pub blocks_ingested_total: IntCounter,
    /// External blocks rejected by validation.
    pub blocks_rejected_total: IntCounter,
    /// Transactions accepted into the pending pool.
    pub transactions_queued_total: IntCounter,
    /// Current number of transactions waiting in the pending pool.
    pub pending_transactions: IntGauge,
    /// Current number of blocks in the chain.
    pub chain_height: IntGauge,
}

impl NodeMetrics {
    /// Creates and registers all metrics. Call once at startup.
    pub fn new() -> Self {
        let registry = Registry::new_custom(Some("chainlet".into()), None)
            .expect("failed to create prometheus registry");

        let blocks_mined_total =
            IntCounter::new("blocks_mined_total", "Total number of blocks mined locally")
                .expect("metric creation");
        registry
            .register(Box::new(blocks_mined_total.clone()))
            .expect("metric registration");

        let blocks_ingested_total = IntCounter::new(
            "blocks_ingested_total",
            "Total number of external blocks accepted into the chain",
        )
        .expect("metric creation");
        registry
            .register(Box::new(blocks_ingested_total.clone()))
            .expect("metric registration");

        let blocks_rejected_total = IntCounter::new(
            "blocks_rejected_total",
            "Total number of external blocks that failed validation",
        )
        .expect("metric creation");
        registry
            .register(Box::new(blocks_rejected_total.clone()))
            .expect("metric registration");

        let transactions_queued_total = IntCounter::new(
            "transactions_queued_total",
            "Total number of transactions added to the pending pool",
        )
        .expect("metric creation");
        registry
            .register(Box::new(transactions_queued_total.clone()))
            .expect("metric registration");

        let pending_transactions = IntGauge::new(
            "pending_transactions",
            "Current number of transactions in the pending pool",
        )
        .expect("metric creation");
        registry
            .register(Box::new(pending_transactions.clone()))
            .expect("metric registration");

        let chain_height = IntGauge::new("chain_height", "Number of blocks in the chain")
            .expect("metric creation");
        registry
            .register(Box::new(chain_height.clone()))
            .expect("metric registration");

        Self {
            registry,
            blocks_mined_total,
            blocks_ingested_total,
            blocks_rejected_total,
            transactions_queued_total,
            pending_transactions,
            chain_height,
        }
    }

    /// Sets both gauges from a ledger snapshot.
    pub fn observe_ledger(&self, height: usize, pending: usize) {
        self.chain_height.set(height as i64);
        self.pending_transactions.set(pending as i64);
    }

    /// Encodes all registered metrics into the Prometheus text exposition format.
    pub fn encode(&self) -> Result<String, prometheus::Error> {
        let encoder = TextEncoder::new();
        let metric_families = self.registry.gather();
        let mut buffer = Vec::new();
        encoder.encode(&metric_families, &mut buffer)?;
        String::from_utf8(buffer).map_err(|e| prometheus::Error::Msg(e.to_string()))
    }
}

/// Shared metrics state passed to axum handlers.
pub type SharedMetrics = Arc<NodeMetrics>;

/// Axum handler that renders `/metrics` in Prometheus text format.
///
/// Returns HTTP 500 if encoding fails.
pub async fn metrics_handler(
    axum::extract::State(metrics): axum::extract::State<SharedMetrics>,
) -> impl IntoResponse {
    match metrics.encode() {
        Ok(body) => (
            StatusCode::OK,
            [("content-type", "text/plain; version=0.0.4; charset=utf-8")],
            body,
        )
            .into_response(),
        Err(e) => {
            tracing::error!("failed to encode metrics: {}", e);
            (StatusCode::INTERNAL_SERVER_ERROR, "metrics encoding failed").into_response()
        }
    }
}

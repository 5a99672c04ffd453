//! # Structured Logging
//!
//! One global `tracing` subscriber for the node, writing to stderr so that
//! `version` output on stdout stays machine-readable.
//!
//! The filter comes from `RUST_LOG` when it is set, otherwise from
//! `--log-filter` / `CHAINLET_LOG_FILTER`. A directive that does not parse
//! aborts startup instead of silently logging nothing.

use anyhow::{Context, Result};
use clap::ValueEnum;
use tracing_subscriber::{
    fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer, Registry,
};

/// Filter used when neither `RUST_LOG` nor `--log-filter` says otherwise.
/// Ledger events at info, per-request HTTP spans at debug.
pub const DEFAULT_LOG_FILTER: &str = "chainlet_node=info,chainlet_protocol=info,tower_http=debug";

/// Log output format, selected with `--log-format`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    /// Human-readable lines with source locations.
    Pretty,
    /// One JSON object per event, for log shippers.
    Json,
}

/// Picks the active filter directive: a non-blank `RUST_LOG` wins over the
/// configured one.
fn build_filter(rust_log: Option<String>, configured: &str) -> Result<EnvFilter> {
    let directive = rust_log
        .filter(|value| !value.trim().is_empty())
        .unwrap_or_else(|| configured.to_string());
    EnvFilter::try_new(&directive)
        .with_context(|| format!("invalid log filter directive {directive:?}"))
}

/// Installs the global subscriber. Call once, before anything logs.
///
/// # Errors
///
/// Fails if the filter directive does not parse or a global subscriber is
/// already installed.
pub fn init_logging(configured_filter: &str, format: LogFormat) -> Result<()> {
    let filter = build_filter(std::env::var(EnvFilter::DEFAULT_ENV).ok(), configured_filter)?;
    let active_filter = filter.to_string();

    let output: Box<dyn Layer<Registry> + Send + Sync> = match format {
        LogFormat::Pretty => fmt::layer()
            .with_writer(std::io::stderr)
            .with_file(true)
            .with_line_number(true)
            .boxed(),
        LogFormat::Json => fmt::layer()
            .json()
            .with_writer(std::io::stderr)
            .with_current_span(false)
            .boxed(),
    };

    tracing_subscriber::registry()
        .with(output)
        .with(filter)
        .try_init()
        .context("global tracing subscriber already installed")?;

    tracing::info!(?format, filter = %active_filter, "logging initialized");
    Ok(())
}

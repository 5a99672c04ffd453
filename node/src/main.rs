// Copyright (c) 2026 ALAS Technology. MIT License.
// See LICENSE for details.

//! # chainlet Node
//!
//! Entry point for the `chainlet-node` binary. Parses CLI arguments,
//! initializes logging and metrics, creates the ledger with its genesis
//! block, and serves the HTTP API until shutdown.
//!
//! The binary supports two subcommands:
//!
//! - `run`: start the ledger service
//! - `version`: print build version information
//!
//! The ledger lives only in memory. Stopping the process discards it; the
//! next start begins again from a fresh genesis block.

mod api;
mod cli;
mod logging;
mod metrics;

use anyhow::{Context, Result};
use clap::Parser;
use std::sync::Arc;
use tokio::signal;

use cli::{ChainletCli, Commands};
use metrics::NodeMetrics;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = ChainletCli::parse();

    match cli.command {
        Commands::Run(args) => run_node(args).await,
        Commands::Version => {
            print_version();
            Ok(())
        }
    }
}

/// Starts the ledger service: API server and metrics endpoint.
async fn run_node(args: cli::RunArgs) -> Result<()> {
    logging::init_logging(&args.log_filter, args.log_format)?;

    let ledger_config = args.ledger_config();
    tracing::info!(
        host = %args.host,
        rpc_port = args.rpc_port,
        metrics_port = args.metrics_port,
        hash_binding = ?ledger_config.hash_binding,
        "starting chainlet-node"
    );

    // --- Metrics ---
    let node_metrics = Arc::new(NodeMetrics::new());

    // --- Application state (ledger + genesis) ---
    let app_state = api::AppState::new(
        format!(
            "{} (protocol {})",
            env!("CARGO_PKG_VERSION"),
            chainlet_protocol::config::PROTOCOL_VERSION,
        ),
        ledger_config,
        Arc::clone(&node_metrics),
    );

    // --- API server ---
    let api_router = api::create_router(app_state);
    let api_addr = format!("{}:{}", args.host, args.rpc_port);
    let api_listener = tokio::net::TcpListener::bind(&api_addr)
        .await
        .with_context(|| format!("failed to bind API listener on {}", api_addr))?;
    tracing::info!("API server listening on {}", api_addr);

    // --- Metrics server ---
    let metrics_router = axum::Router::new()
        .route("/metrics", axum::routing::get(metrics::metrics_handler))
        .with_state(Arc::clone(&node_metrics));
    let metrics_addr = format!("{}:{}", args.host, args.metrics_port);
    let metrics_listener = tokio::net::TcpListener::bind(&metrics_addr)
        .await
        .with_context(|| format!("failed to bind metrics listener on {}", metrics_addr))?;
    tracing::info!("Metrics server listening on {}", metrics_addr);

    // --- Serve ---
    tokio::select! {
        res = axum::serve(api_listener, api_router) => {
            if let Err(e) = res {
                tracing::error!("API server error: {}", e);
            }
        }
        res = axum::serve(metrics_listener, metrics_router) => {
            if let Err(e) = res {
                tracing::error!("Metrics server error: {}", e);
            }
        }
        _ = shutdown_signal() => {
            tracing::info!("shutdown signal received, dropping in-memory ledger");
        }
    }

    tracing::info!("chainlet-node stopped");
    Ok(())
}

/// Prints version information to stdout.
fn print_version() {
    print!("{}", version_text());
}

fn version_text() -> String {
    format!(
        "chainlet-node {}\nprotocol      {}\n",
        env!("CARGO_PKG_VERSION"),
        chainlet_protocol::config::PROTOCOL_VERSION,
    )
}

/// Waits for SIGINT (Ctrl+C) or SIGTERM, whichever comes first.
///
/// On non-Unix platforms, only Ctrl+C is supported.
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {}
        _ = terminate => {}
    }
}

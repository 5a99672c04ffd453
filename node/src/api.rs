//! # REST API
//!
//! Builds the axum router that exposes the ledger over HTTP. All endpoints
//! share application state through axum's `State` extractor.
//!
//! ## Endpoints
//!
//! | Method | Path               | Description                              |
//! |--------|--------------------|------------------------------------------|
//! | GET    | `/`                | Welcome message                          |
//! | GET    | `/health`          | Liveness probe                           |
//! | GET    | `/chain`           | Every block, genesis first               |
//! | GET    | `/block/:index`    | Block by 1-based index                   |
//! | GET    | `/pending`         | Transactions waiting for the next block  |
//! | GET    | `/validate`        | Re-check linkage and hashes of the chain |
//! | POST   | `/new_transaction` | Queue a transaction                      |
//! | POST   | `/mine_block`      | Mine pending transactions into a block   |
//! | POST   | `/add_block`       | Offer an externally built block          |
//!
//! Lookup misses and rejected blocks are ordinary `200 OK` responses with a
//! `message` field. Only bodies that do not parse into the expected shape
//! get an error status (`422`).

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::{Method, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use chainlet_protocol::ledger::{Block, ChainFault, Ledger, LedgerConfig, Transaction};

use crate::metrics::SharedMetrics;

pub const WELCOME_MESSAGE: &str = "Welcome to the chainlet ledger";
pub const BLOCK_NOT_FOUND: &str = "Block not found";
pub const TRANSACTION_ADDED: &str = "Transaction added";
pub const BLOCK_MINED: &str = "mined!";
pub const BLOCK_ADDED: &str = "Block added to the chain";
pub const BLOCK_INVALID: &str = "Invalid block";
pub const MALFORMED_INPUT: &str = "Malformed input";

// ---------------------------------------------------------------------------
// Application State
// ---------------------------------------------------------------------------

/// Shared application state available to all request handlers.
///
/// Cheap to clone. Everything lives behind an `Arc`.
#[derive(Clone)]
pub struct AppState {
    /// The node's reported version string.
    pub version: String,
    /// The ledger. Mutating handlers hold the write lock for the whole
    /// operation; readers share the read lock.
    pub ledger: Arc<RwLock<Ledger>>,
    /// Reference to Prometheus metrics for in-handler recording.
    pub metrics: SharedMetrics,
}

impl AppState {
    /// Builds state around a freshly initialized ledger.
    pub fn new(version: String, config: LedgerConfig, metrics: SharedMetrics) -> Self {
        let ledger = Ledger::new(config);
        if let Some(genesis) = ledger.get_last_block() {
            tracing::info!(
                index = genesis.index,
                timestamp = %genesis.timestamp,
                "genesis block created"
            );
        }
        metrics.observe_ledger(ledger.height(), ledger.pending_transactions().len());

        AppState {
            version,
            ledger: Arc::new(RwLock::new(ledger)),
            metrics,
        }
    }
}

// ---------------------------------------------------------------------------
// Router Construction
// ---------------------------------------------------------------------------

/// Builds the full axum [`Router`] with all API routes, CORS, and tracing.
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers(Any);

    Router::new()
        .route("/", get(root_handler))
        .route("/health", get(health_handler))
        .route("/chain", get(chain_handler))
        .route("/block/:index", get(block_by_index_handler))
        .route("/pending", get(pending_handler))
        .route("/validate", get(validate_handler))
        .route("/new_transaction", post(new_transaction_handler))
        .route("/mine_block", post(mine_block_handler))
        .route("/add_block", post(add_block_handler))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

// ---------------------------------------------------------------------------
// Response Types
// ---------------------------------------------------------------------------

/// Body carrying only a human-readable message.
#[derive(Debug, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

/// Response payload for `GET /health`.
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    /// RFC 3339 time of the response.
    pub timestamp: String,
}

/// Response payload for `GET /chain`.
#[derive(Debug, Serialize, Deserialize)]
pub struct ChainResponse {
    pub chain: Vec<Block>,
}

/// Response payload for `GET /block/:index`: the block, or a miss message.
#[derive(Debug, Serialize, Deserialize)]
#[serde(untagged)]
pub enum BlockLookupResponse {
    Found { block: Block },
    NotFound { message: String },
}

/// Response payload for `GET /pending`.
#[derive(Debug, Serialize, Deserialize)]
pub struct PendingResponse {
    pub pending_transactions: Vec<Transaction>,
}

/// Response payload for `GET /validate`.
#[derive(Debug, Serialize)]
pub struct ValidateResponse {
    pub ok: bool,
    pub faults: Vec<ChainFault>,
}

/// Response payload for `POST /new_transaction`.
#[derive(Debug, Serialize, Deserialize)]
pub struct TransactionAddedResponse {
    pub message: String,
    pub transaction: Transaction,
}

/// Response payload for `POST /mine_block` and `POST /add_block`.
#[derive(Debug, Serialize, Deserialize)]
pub struct BlockResponse {
    pub message: String,
    pub block: Block,
    /// Why the block was rejected. Absent on success.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

/// Error body for requests whose payload could not be parsed.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub message: String,
    pub error: String,
}

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Failures that surface as HTTP error statuses.
#[derive(Debug)]
pub enum ApiError {
    /// The request body is not JSON, or lacks / adds / mistypes fields.
    InputMalformed(String),
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::InputMalformed(rejection.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::InputMalformed(error) => {
                tracing::debug!(%error, "malformed request body");
                (
                    StatusCode::UNPROCESSABLE_ENTITY,
                    Json(ErrorResponse {
                        message: MALFORMED_INPUT.into(),
                        error,
                    }),
                )
                    .into_response()
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// `GET /`: greeting.
async fn root_handler() -> Json<MessageResponse> {
    Json(MessageResponse {
        message: WELCOME_MESSAGE.into(),
    })
}

/// `GET /health`: returns 200 while the process is serving requests.
async fn health_handler(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".into(),
        version: state.version.clone(),
        timestamp: chrono::Utc::now().to_rfc3339(),
    })
}

/// `GET /chain`: the whole chain, genesis first.
async fn chain_handler(State(state): State<AppState>) -> Json<ChainResponse> {
    let chain = state.ledger.read().chain().to_vec();
    Json(ChainResponse { chain })
}

/// `GET /block/:index`: one block by 1-based index.
///
/// Zero, negative and past-the-tip indices all get the not-found message.
async fn block_by_index_handler(
    Path(index): Path<i64>,
    State(state): State<AppState>,
) -> Json<BlockLookupResponse> {
    let block = state.ledger.read().get_block_by_index(index).cloned();
    Json(match block {
        Some(block) => BlockLookupResponse::Found { block },
        None => BlockLookupResponse::NotFound {
            message: BLOCK_NOT_FOUND.into(),
        },
    })
}

/// `GET /pending`: transactions queued for the next block.
async fn pending_handler(State(state): State<AppState>) -> Json<PendingResponse> {
    let pending_transactions = state.ledger.read().pending_transactions().to_vec();
    Json(PendingResponse {
        pending_transactions,
    })
}

/// `GET /validate`: re-runs block validation over the stored chain.
async fn validate_handler(State(state): State<AppState>) -> Json<ValidateResponse> {
    let faults = state.ledger.read().verify_chain();
    Json(ValidateResponse {
        ok: faults.is_empty(),
        faults,
    })
}

/// `POST /new_transaction`: append a transaction to the pending pool.
async fn new_transaction_handler(
    State(state): State<AppState>,
    payload: Result<Json<Transaction>, JsonRejection>,
) -> Result<Json<TransactionAddedResponse>, ApiError> {
    let Json(transaction) = payload?;

    let stored = {
        let mut ledger = state.ledger.write();
        let stored = ledger.add_pending_transaction(transaction).clone();
        state
            .metrics
            .observe_ledger(ledger.height(), ledger.pending_transactions().len());
        stored
    };
    state.metrics.transactions_queued_total.inc();

    Ok(Json(TransactionAddedResponse {
        message: TRANSACTION_ADDED.into(),
        transaction: stored,
    }))
}

/// `POST /mine_block`: seal all pending transactions into a new block.
async fn mine_block_handler(State(state): State<AppState>) -> Json<BlockResponse> {
    let block = {
        let mut ledger = state.ledger.write();
        let block = ledger.mine_block().clone();
        state
            .metrics
            .observe_ledger(ledger.height(), ledger.pending_transactions().len());
        block
    };
    state.metrics.blocks_mined_total.inc();

    Json(BlockResponse {
        message: BLOCK_MINED.into(),
        block,
        reason: None,
    })
}

/// `POST /add_block`: validate an external block against the tip and
/// append it on success.
///
/// Rejection is reported in the body, with the submitted block echoed back.
async fn add_block_handler(
    State(state): State<AppState>,
    payload: Result<Json<Block>, JsonRejection>,
) -> Result<Json<BlockResponse>, ApiError> {
    let Json(candidate) = payload?;

    let outcome = {
        let mut ledger = state.ledger.write();
        let outcome = ledger.ingest_external_block(candidate).map(Block::clone);
        state
            .metrics
            .observe_ledger(ledger.height(), ledger.pending_transactions().len());
        outcome
    };

    let response = match outcome {
        Ok(block) => {
            state.metrics.blocks_ingested_total.inc();
            BlockResponse {
                message: BLOCK_ADDED.into(),
                block,
                reason: None,
            }
        }
        Err(rejected) => {
            state.metrics.blocks_rejected_total.inc();
            BlockResponse {
                message: BLOCK_INVALID.into(),
                reason: Some(rejected.reason.to_string()),
                block: *rejected.block,
            }
        }
    };
    Ok(Json(response))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

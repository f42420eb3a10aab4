//! FAQ chatbot HTTP server.
//!
//! Serves the fuzzy FAQ matcher as a small JSON API. The index is built once
//! by the caller and shared read-only with every handler.
//!
//! # Endpoints
//!
//! | Method | Path | Description |
//! |--------|------|-------------|
//! | `POST` | `/chatbot` | Answer `{"question": "..."}` with `{"answer": "..."}` |
//! | `GET`  | `/faq` | List the knowledge base questions and categories |
//! | `GET`  | `/health` | Health check (returns version and entry count) |
//!
//! An unmatched question is not an error: `/chatbot` answers `200` with the
//! configured fallback message.
//!
//! # Error Contract
//!
//! Malformed requests are rejected before they reach the matcher:
//!
//! ```json
//! { "error": { "code": "bad_request", "message": "missing field `question`" } }
//! ```
//!
//! Error codes: `bad_request` (400).
//!
//! # CORS
//!
//! All origins, methods, and headers are permitted so the portal frontend
//! can call the chatbot from its own origin.

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use intern_faq_core::matcher::FaqIndex;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{debug, info};

use crate::config::Config;
use crate::knowledge;

/// Shared application state passed to all route handlers via Axum's `State` extractor.
#[derive(Clone)]
pub struct AppState {
    /// Immutable FAQ index, built once at startup.
    pub index: Arc<FaqIndex>,
}

impl AppState {
    pub fn new(index: Arc<FaqIndex>) -> Self {
        Self { index }
    }
}

/// Starts the FAQ chatbot server.
///
/// Loads the knowledge base, builds the index, binds to `[server].bind`, and
/// serves until Ctrl-C or SIGTERM.
pub async fn run_server(config: &Config) -> anyhow::Result<()> {
    let index = Arc::new(knowledge::build_index(config)?);

    let listener = TcpListener::bind(&config.server.bind).await?;
    info!(
        "FAQ server listening on http://{} ({} entries)",
        listener.local_addr()?,
        index.len()
    );

    serve(listener, AppState::new(index)).await
}

/// Serve the router on an already-bound listener.
pub async fn serve(listener: TcpListener, state: AppState) -> anyhow::Result<()> {
    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server shut down");
    Ok(())
}

/// Build the application router.
pub fn router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/chatbot", post(handle_chatbot))
        .route("/faq", get(handle_list_faq))
        .route("/health", get(handle_health))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::warn!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
        info!("Received Ctrl+C, shutting down");
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{signal, SignalKind};
        match signal(SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
                info!("Received terminate signal, shutting down");
            }
            Err(e) => {
                tracing::warn!("Failed to install signal handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}

// ============ Error response ============

/// JSON error response body.
#[derive(Serialize)]
struct ErrorBody {
    error: ErrorDetail,
}

/// Inner error detail with a machine-readable code and human-readable message.
#[derive(Serialize)]
struct ErrorDetail {
    code: String,
    message: String,
}

/// Internal error type that converts into an Axum HTTP response.
struct AppError {
    status: StatusCode,
    code: String,
    message: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let body = ErrorBody {
            error: ErrorDetail {
                code: self.code,
                message: self.message,
            },
        };
        (self.status, Json(body)).into_response()
    }
}

/// Constructs a 400 Bad Request error.
fn bad_request(message: impl Into<String>) -> AppError {
    AppError {
        status: StatusCode::BAD_REQUEST,
        code: "bad_request".to_string(),
        message: message.into(),
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        bad_request(rejection.body_text())
    }
}

// ============ POST /chatbot ============

#[derive(Deserialize)]
struct ChatRequest {
    question: String,
}

#[derive(Serialize)]
struct ChatResponse {
    answer: String,
}

/// Handler for `POST /chatbot`.
///
/// Always `200` for a well-formed body, whether or not a match was found.
async fn handle_chatbot(
    State(state): State<AppState>,
    payload: Result<Json<ChatRequest>, JsonRejection>,
) -> Result<Json<ChatResponse>, AppError> {
    let Json(req) = payload?;

    let result = state.index.best_match(&req.question);
    debug!(
        matched = result.is_match(),
        score = result.score,
        position = result.best.map(|c| c.position),
        "Answered chatbot question"
    );

    Ok(Json(ChatResponse {
        answer: result.reply(&state.index.options().fallback),
    }))
}

// ============ GET /faq ============

#[derive(Serialize)]
struct FaqListItem {
    question: String,
    category: String,
}

#[derive(Serialize)]
struct FaqListResponse {
    entries: Vec<FaqListItem>,
}

/// Handler for `GET /faq`. Entries are listed in knowledge base order.
async fn handle_list_faq(State(state): State<AppState>) -> Json<FaqListResponse> {
    let entries = state
        .index
        .entries()
        .map(|e| FaqListItem {
            question: e.question.clone(),
            category: e.category.clone(),
        })
        .collect();

    Json(FaqListResponse { entries })
}

// ============ GET /health ============

/// JSON response body for `GET /health`.
#[derive(Serialize)]
struct HealthResponse {
    /// Always `"ok"` when the server is running.
    status: String,
    /// The crate version from `Cargo.toml`.
    version: String,
    /// Number of indexed knowledge base entries.
    entries: usize,
}

async fn handle_health(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        entries: state.index.len(),
    })
}

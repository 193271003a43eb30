//! HTTP API for the quote engine.
//!
//! This module exposes a minimal REST surface around the engine using
//! the [`axum`](https://crates.io/crates/axum) framework: one endpoint
//! to price a job and a pair to read and update the persisted rate
//! config.  Each calculation request takes its own config snapshot, so
//! an admin saving new rates mid-request can never produce a breakdown
//! priced against two different tables.

use crate::engine::calculate;
use crate::error::EngineError;
use crate::models::JobSpec;
use crate::rates::RateConfig;
use crate::store::ConfigStore;
use anyhow::Result;
use axum::{
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::RwLock;

/// Application state shared across requests.
pub struct AppState {
    pub store: RwLock<ConfigStore>,
}

/// Build the API router around a config store rooted at the given
/// path.  Reading the config once up front seeds the file with
/// defaults on a fresh install and surfaces a corrupt file at startup
/// rather than on the first quote.
pub fn build_router(config_path: PathBuf) -> Result<(Router, Arc<AppState>)> {
    let store = ConfigStore::new(config_path);
    store.get()?;
    let state = Arc::new(AppState {
        store: RwLock::new(store),
    });
    let router = Router::new()
        .route("/api/calculate", post(calculate_handler))
        .route("/api/config", get(get_config_handler).put(put_config_handler))
        .with_state(state.clone());
    Ok((router, state))
}

/// Handler for POST /api/calculate
async fn calculate_handler(
    State(state): State<Arc<AppState>>,
    Json(job): Json<JobSpec>,
) -> impl IntoResponse {
    // Take one consistent config snapshot for the whole calculation.
    let rates = match state.store.read().await.get() {
        Ok(rates) => rates,
        Err(err) => {
            tracing::error!(error = %err, "failed to load rate config");
            return (StatusCode::INTERNAL_SERVER_ERROR, error_body(&err)).into_response();
        }
    };
    tracing::debug!(size = ?job.paper_size(), quantity = job.quantity(), "pricing job");
    match calculate(&job, &rates) {
        Ok(breakdown) => (StatusCode::OK, Json(breakdown)).into_response(),
        Err(err @ EngineError::InvalidInput(_)) => {
            (StatusCode::BAD_REQUEST, error_body(&err)).into_response()
        }
        Err(err @ EngineError::InvalidCalculation(_)) => {
            tracing::error!(error = %err, "calculation invariant violated");
            (StatusCode::INTERNAL_SERVER_ERROR, error_body(&err)).into_response()
        }
    }
}

/// Handler for GET /api/config
async fn get_config_handler(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    match state.store.read().await.get() {
        Ok(config) => (StatusCode::OK, Json(config)).into_response(),
        Err(err) => {
            tracing::error!(error = %err, "failed to load rate config");
            (StatusCode::INTERNAL_SERVER_ERROR, error_body(&err)).into_response()
        }
    }
}

/// Handler for PUT /api/config
async fn put_config_handler(
    State(state): State<Arc<AppState>>,
    Json(body): Json<serde_json::Value>,
) -> impl IntoResponse {
    // An empty update would silently reset every rate to its default.
    let empty = body.as_object().map(|map| map.is_empty()).unwrap_or(true);
    if empty {
        return (
            StatusCode::BAD_REQUEST,
            Json(serde_json::json!({"error": "request body must be a non-empty config object"})),
        )
            .into_response();
    }
    let config: RateConfig = match serde_json::from_value(body) {
        Ok(config) => config,
        Err(err) => {
            return (
                StatusCode::BAD_REQUEST,
                Json(serde_json::json!({"error": err.to_string()})),
            )
                .into_response()
        }
    };
    if let Err(err) = config.validate() {
        return (StatusCode::BAD_REQUEST, error_body(&err)).into_response();
    }
    match state.store.write().await.put(config) {
        Ok(stored) => {
            tracing::info!("rate config updated");
            (StatusCode::OK, Json(stored)).into_response()
        }
        Err(err) => {
            tracing::error!(error = %err, "failed to persist rate config");
            (StatusCode::INTERNAL_SERVER_ERROR, error_body(&err)).into_response()
        }
    }
}

fn error_body(err: &impl std::fmt::Display) -> Json<serde_json::Value> {
    Json(serde_json::json!({"error": err.to_string()}))
}

/// Launch the API server.  Builds the router around the given config
/// path, binds the supplied address and blocks until the server
/// terminates.
pub async fn serve(addr: &str, config_path: PathBuf) -> Result<()> {
    let (router, _state) = build_router(config_path)?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!(%addr, "quote engine listening");
    axum::serve(listener, router).await.map_err(|e| e.into())
}

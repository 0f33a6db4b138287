//! HTTP leaderboard API.
//!
//! Endpoints:
//! - `GET  /api/leaderboard` - the stored name to score object
//! - `POST /api/leaderboard` - merge a name to score object into the store
//!
//! Every other path is served from the static web directory, when one is
//! configured.

use axum::{
    Json, Router,
    body::Bytes,
    extract::State,
    handler::HandlerWithoutStateExt,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
};
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::path::Path;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::sync::Mutex;
use tower_http::services::ServeDir;
use tracing::{debug, info, instrument, warn};

use crate::config::AppConfig;
use crate::leaderboard::{LeaderboardStore, PersistenceError, PlayerName, Scores};

/// Shared server state.
#[derive(Debug)]
pub struct AppState {
    store: LeaderboardStore,
    /// Held across each load, merge and store so concurrent submissions
    /// are applied one after another instead of overwriting each other.
    write_lock: Mutex<()>,
}

impl AppState {
    /// Wraps a store for use by the handlers.
    pub fn new(store: LeaderboardStore) -> Self {
        Self {
            store,
            write_lock: Mutex::new(()),
        }
    }

    /// Returns the store.
    pub fn store(&self) -> &LeaderboardStore {
        &self.store
    }
}

/// Body of a successful submission.
#[derive(Debug, Serialize, Deserialize)]
pub struct OkResponse {
    /// Always `true`.
    pub ok: bool,
}

/// Body of a rejected request.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Short reason.
    pub error: String,
}

/// Rejections from the leaderboard API.
#[derive(Debug, derive_more::Display, derive_more::Error)]
pub enum ApiError {
    /// Body is not JSON.
    #[display("invalid json")]
    InvalidJson,
    /// Body is JSON but not an object of name to integer score.
    #[display("invalid payload")]
    InvalidPayload,
    /// The store could not be written.
    #[display("write failed")]
    WriteFailed(PersistenceError),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match self {
            ApiError::InvalidJson | ApiError::InvalidPayload => StatusCode::BAD_REQUEST,
            ApiError::WriteFailed(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        let body = ErrorResponse {
            error: self.to_string(),
        };
        (status, Json(body)).into_response()
    }
}

/// Builds the router. Without a web directory, unknown paths answer 404.
pub fn create_app(state: Arc<AppState>, web_dir: Option<&Path>) -> Router {
    let router = Router::new()
        .route("/api/leaderboard", get(get_leaderboard).post(submit_scores))
        .with_state(state);

    match web_dir {
        Some(dir) => router.fallback_service(
            ServeDir::new(dir)
                .call_fallback_on_method_not_allowed(true)
                .not_found_service(not_found.into_service()),
        ),
        None => router.fallback(not_found),
    }
}

async fn not_found() -> StatusCode {
    StatusCode::NOT_FOUND
}

/// Returns the stored leaderboard, `{}` when there is none.
#[instrument(skip_all)]
pub async fn get_leaderboard(State(state): State<Arc<AppState>>) -> Json<Scores> {
    let scores = state.store.load();
    debug!(count = scores.len(), "Serving leaderboard");
    Json(scores)
}

/// Merges the submitted object into the store.
#[instrument(skip_all, fields(bytes = body.len()))]
pub async fn submit_scores(
    State(state): State<Arc<AppState>>,
    body: Bytes,
) -> Result<Json<OkResponse>, ApiError> {
    let incoming = parse_submission(&body)?;

    let _guard = state.write_lock.lock().await;
    state.store.merge_all(incoming).map_err(|e| {
        warn!(error = %e, "Leaderboard write failed");
        ApiError::WriteFailed(e)
    })?;

    Ok(Json(OkResponse { ok: true }))
}

/// Decodes a submission body. An empty body is an empty object.
#[instrument(skip(body))]
pub fn parse_submission(body: &[u8]) -> Result<Scores, ApiError> {
    if body.is_empty() {
        return Ok(Scores::new());
    }

    let value: serde_json::Value = serde_json::from_slice(body).map_err(|e| {
        debug!(error = %e, "Submission is not JSON");
        ApiError::InvalidJson
    })?;

    let serde_json::Value::Object(entries) = value else {
        debug!("Submission is not an object");
        return Err(ApiError::InvalidPayload);
    };

    entries
        .into_iter()
        .map(|(name, score)| {
            // Blank names are refused; others are stored exactly as sent.
            PlayerName::new(&name).ok_or(ApiError::InvalidPayload)?;
            let score = score.as_i64().ok_or(ApiError::InvalidPayload)?;
            Ok::<_, ApiError>((name, score))
        })
        .collect()
}

/// Binds the configured address, or the fallback port if that fails.
#[instrument(skip(config))]
async fn bind(config: &AppConfig) -> anyhow::Result<TcpListener> {
    let primary = format!("{}:{}", config.host(), config.port());
    match TcpListener::bind(&primary).await {
        Ok(listener) => Ok(listener),
        Err(e) => {
            warn!(addr = %primary, error = %e, "Bind failed, trying fallback port");
            let fallback = format!("{}:{}", config.host(), config.fallback_port());
            Ok(TcpListener::bind(&fallback).await?)
        }
    }
}

/// Creates a future that completes when Ctrl-C is received.
async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => info!("Shutdown signal received, stopping server..."),
        Err(e) => warn!(error = %e, "Failed to listen for Ctrl-C"),
    }
}

/// Runs the leaderboard server until Ctrl-C.
#[instrument(skip(config))]
pub async fn run(config: &AppConfig) -> anyhow::Result<()> {
    let store = LeaderboardStore::new(config.leaderboard_path());
    let state = Arc::new(AppState::new(store));

    let web_dir = config.web_dir();
    let web_dir = if web_dir.is_dir() {
        Some(web_dir.as_path())
    } else {
        warn!(dir = %web_dir.display(), "Web directory not found, serving API only");
        None
    };

    let app = create_app(state, web_dir);
    let listener = bind(config).await?;
    let addr: SocketAddr = listener.local_addr()?;
    info!(%addr, "Serving on http://localhost:{}/", addr.port());

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server shut down gracefully");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_object() {
        let scores = parse_submission(br#"{"Ann": 1, "Bob": -1}"#).unwrap();
        assert_eq!(scores.get("Ann"), Some(&1));
        assert_eq!(scores.get("Bob"), Some(&-1));
    }

    #[test]
    fn test_parse_empty_body() {
        assert!(parse_submission(b"").unwrap().is_empty());
    }

    #[test]
    fn test_parse_rejections() {
        assert!(matches!(parse_submission(b"not json"), Err(ApiError::InvalidJson)));
        assert!(matches!(parse_submission(b"[1, 2]"), Err(ApiError::InvalidPayload)));
        assert!(matches!(parse_submission(b"42"), Err(ApiError::InvalidPayload)));
        assert!(matches!(
            parse_submission(br#"{"Ann": "high"}"#),
            Err(ApiError::InvalidPayload)
        ));
        assert!(matches!(
            parse_submission(br#"{"": 1}"#),
            Err(ApiError::InvalidPayload)
        ));
        assert!(matches!(
            parse_submission(br#"{"   ": 1}"#),
            Err(ApiError::InvalidPayload)
        ));
    }

    #[test]
    fn test_parse_keeps_names_verbatim() {
        let scores = parse_submission(br#"{" Ann": 5, "Ann": 1}"#).unwrap();
        assert_eq!(scores.get(" Ann"), Some(&5));
        assert_eq!(scores.get("Ann"), Some(&1));
    }
}

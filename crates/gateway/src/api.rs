//! JSON API.
//!
//! Endpoints:
//!
//! - `GET    /api/park-info`                        today's park info
//! - `GET    /api/pages/{slug}`                     content descriptor for a section
//! - `GET    /api/assistant/status`                 availability and credential lookup
//! - `POST   /api/assistant/sessions`               start a chat session
//! - `GET    /api/assistant/sessions/{id}`          session history
//! - `DELETE /api/assistant/sessions/{id}`          end a session
//! - `POST   /api/assistant/sessions/{id}/messages` ask a question

use axum::{
    Router,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
    routing::get,
    routing::post,
};
use parkguide_assistant::normalize_question;
use parkguide_catalog::{ContentDescriptor, PageKey, resolve};
use parkguide_config::{CredentialSource, SecretStoreStatus};
use parkguide_core::error::AssistantError;
use parkguide_core::{ChatHistory, ParkInfo, SessionId};
use serde::{Deserialize, Serialize};
use tracing::{error, info};

use crate::SharedState;

// ── Errors ────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

/// An error response with its status code.
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    message: String,
}

impl ApiError {
    pub fn not_found(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::NOT_FOUND,
            message: message.into(),
        }
    }

    fn internal(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            message: message.into(),
        }
    }
}

impl From<AssistantError> for ApiError {
    fn from(e: AssistantError) -> Self {
        let status = match &e {
            AssistantError::EmptyQuestion => StatusCode::BAD_REQUEST,
            AssistantError::Busy => StatusCode::CONFLICT,
            AssistantError::Unavailable => StatusCode::SERVICE_UNAVAILABLE,
            AssistantError::SessionNotFound(_) => StatusCode::NOT_FOUND,
        };
        Self {
            status,
            message: e.to_string(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (
            self.status,
            Json(ErrorResponse {
                error: self.message,
            }),
        )
            .into_response()
    }
}

// ── DTOs ──────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize, Deserialize)]
pub struct ParkInfoResponse {
    #[serde(flatten)]
    pub info: ParkInfo,
    /// Park-local date, `YYYY-MM-DD`
    pub date: String,
    /// Banner form of the date, e.g. `Oct 18, 2026`
    pub display_date: String,
}

#[derive(Debug, Serialize)]
pub struct AssistantStatus {
    pub available: bool,
    pub model: Option<String>,
    pub credential_source: Option<CredentialSource>,
    pub env_set: bool,
    pub secret_store: SecretStoreStatus,
    pub active_sessions: usize,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SessionResponse {
    pub id: String,
    pub busy: bool,
    pub history: ChatHistory,
}

#[derive(Debug, Deserialize)]
pub struct AskRequest {
    pub question: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct AskResponse {
    pub history: ChatHistory,
    /// Raw failure text when the reply is the apology
    pub error: Option<String>,
}

// ── Router ────────────────────────────────────────────────────────────────

pub fn api_router(state: SharedState) -> Router {
    Router::new()
        .route("/park-info", get(park_info_handler))
        .route("/pages/{slug}", get(page_handler))
        .route("/assistant/status", get(status_handler))
        .route("/assistant/sessions", post(create_session_handler))
        .route(
            "/assistant/sessions/{id}",
            get(get_session_handler).delete(delete_session_handler),
        )
        .route("/assistant/sessions/{id}/messages", post(ask_handler))
        .with_state(state)
}

// ── Handlers ──────────────────────────────────────────────────────────────

async fn park_info_handler(State(state): State<SharedState>) -> Json<ParkInfoResponse> {
    let info = state.fetcher.get().await;
    let today = state.fetcher.today();
    Json(ParkInfoResponse {
        info,
        date: today.format("%Y-%m-%d").to_string(),
        display_date: today.format("%b %d, %Y").to_string(),
    })
}

async fn page_handler(Path(slug): Path<String>) -> Result<Json<ContentDescriptor>, ApiError> {
    let key = PageKey::from_slug(&slug)
        .ok_or_else(|| ApiError::not_found(format!("Unknown page: {slug}")))?;
    Ok(Json(resolve(key)))
}

async fn status_handler(State(state): State<SharedState>) -> Json<AssistantStatus> {
    let report = &state.credentials;
    Json(AssistantStatus {
        available: state.sessions.is_available(),
        model: state.sessions.assistant().map(|a| a.model().to_string()),
        credential_source: report.source(),
        env_set: report.env_set,
        secret_store: report.secret_store.clone(),
        active_sessions: state.sessions.len(),
    })
}

async fn create_session_handler(
    State(state): State<SharedState>,
) -> Result<(StatusCode, Json<SessionResponse>), ApiError> {
    let session = state.sessions.create()?;
    info!(session = %session.id(), "Assistant session started");
    Ok((
        StatusCode::CREATED,
        Json(SessionResponse {
            id: session.id().to_string(),
            busy: false,
            history: session.snapshot(),
        }),
    ))
}

async fn get_session_handler(
    State(state): State<SharedState>,
    Path(id): Path<String>,
) -> Result<Json<SessionResponse>, ApiError> {
    let session = state.sessions.get(&SessionId(id))?;
    Ok(Json(SessionResponse {
        id: session.id().to_string(),
        busy: session.is_busy(),
        history: session.snapshot(),
    }))
}

async fn delete_session_handler(
    State(state): State<SharedState>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    state.sessions.remove(&SessionId(id))?;
    Ok(StatusCode::NO_CONTENT)
}

async fn ask_handler(
    State(state): State<SharedState>,
    Path(id): Path<String>,
    Json(req): Json<AskRequest>,
) -> Result<Json<AskResponse>, ApiError> {
    let session = state.sessions.get(&SessionId(id))?;
    let question = normalize_question(&req.question)?.to_string();
    let info = state.fetcher.get().await;

    // The turn runs on its own task so it completes and is recorded even if
    // the client goes away.
    let outcome = tokio::spawn(async move { session.try_ask(&question, &info).await })
        .await
        .map_err(|e| {
            error!(error = %e, "Assistant turn task failed");
            ApiError::internal("Assistant turn failed")
        })??;

    Ok(Json(AskResponse {
        history: outcome.history,
        error: outcome.diagnostic,
    }))
}

//! HTTP gateway for Park Guide.
//!
//! Serves the guide's HTML pages, the JSON API under `/api`, the embedded
//! assets and a health check.
//!
//! Built on Axum.

pub mod api;
pub mod frontend;
pub mod pages;
pub mod render;

use axum::extract::DefaultBodyLimit;
use axum::{Router, response::Json, routing::get};
use serde::Serialize;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info};

use parkguide_assistant::{Assistant, SessionStore};
use parkguide_config::{AppConfig, CredentialReport};
use parkguide_liveinfo::LiveInfoFetcher;

/// How often idle assistant sessions are swept.
const PURGE_INTERVAL: Duration = Duration::from_secs(60);

/// Request bodies are small JSON questions.
const MAX_BODY_BYTES: usize = 64 * 1024;

/// Shared application state for the gateway.
pub struct GatewayState {
    pub config: AppConfig,
    pub fetcher: Arc<LiveInfoFetcher>,
    pub sessions: Arc<SessionStore>,
    /// Outcome of the credential lookup, shown on the assistant page
    pub credentials: CredentialReport,
}

pub type SharedState = Arc<GatewayState>;

impl GatewayState {
    /// Wire up the fetcher, provider and session store from `config`.
    ///
    /// A missing credential is not an error: the store is built without an
    /// assistant and every assistant operation reports it as unavailable.
    pub fn from_config(config: AppConfig) -> Result<Self, parkguide_core::Error> {
        let fetcher = Arc::new(LiveInfoFetcher::from_config(&config.live_info)?);

        let credentials = config.resolve_credential();
        let assistant = parkguide_providers::build_from_config(&config, &credentials)
            .map(|provider| Arc::new(Assistant::from_config(provider, &config.assistant)));

        let sessions = Arc::new(SessionStore::new(
            assistant,
            config.gateway.max_sessions,
            Duration::from_secs(config.gateway.session_idle_minutes * 60),
        ));

        Ok(Self {
            config,
            fetcher,
            sessions,
            credentials,
        })
    }
}

/// Build the Axum router with all gateway routes.
pub fn build_router(state: SharedState) -> Router {
    Router::new()
        .route("/health", get(health_handler))
        .merge(pages::pages_router(state.clone()))
        .nest("/api", api::api_router(state))
        .merge(frontend::frontend_router())
        .layer(DefaultBodyLimit::max(MAX_BODY_BYTES))
        .layer(tower_http::trace::TraceLayer::new_for_http())
}

/// Warm the live-info cache and start sweeping idle sessions.
pub fn spawn_background_tasks(state: &SharedState) {
    let fetcher = state.fetcher.clone();
    tokio::spawn(async move {
        let info = fetcher.get().await;
        debug!(hours = %info.hours, fallback = info.is_fallback(), "Live info warmed up");
    });

    let sessions = state.sessions.clone();
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(PURGE_INTERVAL);
        loop {
            ticker.tick().await;
            sessions.purge_idle();
        }
    });
}

/// Start the gateway HTTP server.
pub async fn start(config: AppConfig) -> Result<(), Box<dyn std::error::Error>> {
    let addr = format!("{}:{}", config.gateway.host, config.gateway.port);

    let state = Arc::new(GatewayState::from_config(config)?);
    info!(
        assistant = state.sessions.is_available(),
        live_info = state.fetcher.is_enabled(),
        "Gateway state ready"
    );
    spawn_background_tasks(&state);

    let app = build_router(state);

    info!(addr = %addr, "Gateway starting");
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

// --- Handlers ---

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    version: &'static str,
}

async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{AskResponse, ErrorResponse, ParkInfoResponse, SessionResponse};
    use async_trait::async_trait;
    use axum::body::{Body, Bytes};
    use axum::http::{Request, StatusCode};
    use chrono::NaiveDate;
    use http_body_util::BodyExt;
    use parkguide_assistant::APOLOGY_MESSAGE;
    use parkguide_config::SecretStoreStatus;
    use parkguide_core::error::{FetchError, ProviderError};
    use parkguide_core::{Message, Provider, ProviderRequest, ProviderResponse, Role};
    use parkguide_liveinfo::HoursSource;
    use std::path::PathBuf;
    use tower::ServiceExt;

    const PAGE: &str = r#"<li data-date="2026-10-18"><span class="hours">9:00 AM &ndash; 9:00 PM</span><p>Fireworks 8:30 PM</p></li>"#;

    struct StaticSource(Result<String, FetchError>);

    #[async_trait]
    impl HoursSource for StaticSource {
        fn name(&self) -> &str {
            "static"
        }
        async fn fetch(&self) -> Result<String, FetchError> {
            self.0.clone()
        }
    }

    struct FixedProvider(Result<String, ProviderError>);

    #[async_trait]
    impl Provider for FixedProvider {
        fn name(&self) -> &str {
            "fixed"
        }
        async fn complete(&self, request: ProviderRequest) -> Result<ProviderResponse, ProviderError> {
            Ok(ProviderResponse {
                message: Message::assistant(self.0.clone()?),
                usage: None,
                model: request.model,
            })
        }
    }

    /// Replies after a delay, to hold a turn open.
    struct SlowProvider;

    #[async_trait]
    impl Provider for SlowProvider {
        fn name(&self) -> &str {
            "slow"
        }
        async fn complete(&self, request: ProviderRequest) -> Result<ProviderResponse, ProviderError> {
            tokio::time::sleep(Duration::from_secs(2)).await;
            Ok(ProviderResponse {
                message: Message::assistant("Done."),
                usage: None,
                model: request.model,
            })
        }
    }

    fn report(available: bool) -> CredentialReport {
        CredentialReport {
            env_set: available,
            secret_store: SecretStoreStatus::Missing {
                path: PathBuf::from("/tmp/secrets.toml"),
            },
            credential: available.then(|| parkguide_config::Credential {
                key: "test-key".into(),
                source: parkguide_config::CredentialSource::Environment,
            }),
        }
    }

    fn state_with(
        source: Result<String, FetchError>,
        provider: Option<Result<String, ProviderError>>,
    ) -> SharedState {
        let fetcher = LiveInfoFetcher::new(
            Arc::new(StaticSource(source)),
            Duration::from_secs(3600),
            Duration::from_secs(5),
        )
        .with_pinned_date(NaiveDate::from_ymd_opt(2026, 10, 18).unwrap());

        let credentials = report(provider.is_some());
        let assistant = provider.map(|reply| {
            Arc::new(Assistant::new(Arc::new(FixedProvider(reply)), "test-model"))
        });

        Arc::new(GatewayState {
            config: AppConfig::default(),
            fetcher: Arc::new(fetcher),
            sessions: Arc::new(SessionStore::new(assistant, 10, Duration::from_secs(3600))),
            credentials,
        })
    }

    fn test_state() -> SharedState {
        state_with(Ok(PAGE.into()), Some(Ok("It closes at 9 PM.".into())))
    }

    async fn send(app: Router, req: Request<Body>) -> (StatusCode, Bytes) {
        let response = app.oneshot(req).await.unwrap();
        let status = response.status();
        let body = response.into_body().collect().await.unwrap().to_bytes();
        (status, body)
    }

    fn get(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    fn post_json(uri: &str, json: serde_json::Value) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(json.to_string()))
            .unwrap()
    }

    async fn create_session(state: &SharedState) -> String {
        let req = Request::builder()
            .method("POST")
            .uri("/api/assistant/sessions")
            .body(Body::empty())
            .unwrap();
        let (status, body) = send(build_router(state.clone()), req).await;
        assert_eq!(status, StatusCode::CREATED);
        let session: SessionResponse = serde_json::from_slice(&body).unwrap();
        assert!(session.history.is_empty());
        session.id
    }

    #[tokio::test]
    async fn health_endpoint() {
        let (status, body) = send(build_router(test_state()), get("/health")).await;
        assert_eq!(status, StatusCode::OK);
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["status"], "ok");
    }

    #[tokio::test]
    async fn index_renders_overview_with_banner() {
        let (status, body) = send(build_router(test_state()), get("/")).await;
        assert_eq!(status, StatusCode::OK);

        let html = String::from_utf8_lossy(&body);
        assert!(html.contains("Today (Oct 18, 2026): 9:00 AM – 9:00 PM | Fireworks: Fireworks 8:30 PM"));
        assert!(html.contains("No special notices today"));
        assert!(html.contains("Unique castle, TRON"));
    }

    #[tokio::test]
    async fn every_section_renders() {
        let state = test_state();
        for key in parkguide_catalog::PageKey::ALL {
            let uri = format!("/pages/{}", key.slug());
            let (status, _) = send(build_router(state.clone()), get(&uri)).await;
            assert_eq!(status, StatusCode::OK, "{uri}");
        }
    }

    #[tokio::test]
    async fn unknown_section_is_404() {
        let (status, body) = send(build_router(test_state()), get("/pages/fast%3Cpass")).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        let html = String::from_utf8_lossy(&body);
        assert!(html.contains("fast&lt;pass"));
        assert!(!html.contains("fast<pass"));

        let (status, body) = send(build_router(test_state()), get("/api/pages/fastpass")).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        let err: ErrorResponse = serde_json::from_slice(&body).unwrap();
        assert!(err.error.contains("fastpass"));
    }

    #[tokio::test]
    async fn page_descriptor_json() {
        let (status, body) = send(build_router(test_state()), get("/api/pages/attractions")).await;
        assert_eq!(status, StatusCode::OK);
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["kind"], "static");
        assert_eq!(json["page"]["blocks"][0]["tabs"][5]["land"], "zootopia");
    }

    #[tokio::test]
    async fn park_info_endpoint_falls_back_on_source_failure() {
        let state = state_with(Err(FetchError::Status(502)), None);
        let (status, body) = send(build_router(state), get("/api/park-info")).await;
        assert_eq!(status, StatusCode::OK);

        let info: ParkInfoResponse = serde_json::from_slice(&body).unwrap();
        assert_eq!(info.info.hours, "9:00 AM – 9:00 PM (typical)");
        assert_eq!(info.info.fireworks, "Check official app");
        assert_eq!(info.info.notes, "Could not fetch live data");
        assert!(info.info.is_fallback());
        assert_eq!(info.date, "2026-10-18");
        assert_eq!(info.display_date, "Oct 18, 2026");
    }

    #[tokio::test]
    async fn assistant_unavailable_without_credential() {
        let state = state_with(Ok(PAGE.into()), None);

        let (status, body) = send(build_router(state.clone()), get("/api/assistant/status")).await;
        assert_eq!(status, StatusCode::OK);
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["available"], false);
        assert_eq!(json["secret_store"]["status"], "missing");

        let req = Request::builder()
            .method("POST")
            .uri("/api/assistant/sessions")
            .body(Body::empty())
            .unwrap();
        let (status, _) = send(build_router(state.clone()), req).await;
        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);

        for method in ["GET", "DELETE"] {
            let req = Request::builder()
                .method(method)
                .uri("/api/assistant/sessions/anything")
                .body(Body::empty())
                .unwrap();
            let (status, _) = send(build_router(state.clone()), req).await;
            assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE, "{method}");
        }

        let (status, body) = send(build_router(state), get("/pages/ai-assistant")).await;
        assert_eq!(status, StatusCode::OK);
        let html = String::from_utf8_lossy(&body);
        assert!(html.contains("currently unavailable"));
        assert!(html.contains("<h2>🤖 Smart Disney Assistant</h2>"));
    }

    #[tokio::test]
    async fn ask_round_trip() {
        let state = test_state();
        let id = create_session(&state).await;

        let uri = format!("/api/assistant/sessions/{id}/messages");
        let (status, body) = send(
            build_router(state.clone()),
            post_json(&uri, serde_json::json!({"question": "What time does the park close today?"})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);

        let reply: AskResponse = serde_json::from_slice(&body).unwrap();
        assert_eq!(reply.history.len(), 2);
        assert_eq!(reply.history.messages[0].role, Role::User);
        assert_eq!(reply.history.last().unwrap().content, "It closes at 9 PM.");
        assert!(reply.error.is_none());

        let (status, body) = send(build_router(state), get(&format!("/api/assistant/sessions/{id}"))).await;
        assert_eq!(status, StatusCode::OK);
        let session: SessionResponse = serde_json::from_slice(&body).unwrap();
        assert_eq!(session.history.len(), 2);
    }

    #[tokio::test]
    async fn provider_failure_returns_apology_and_diagnostic() {
        let state = state_with(
            Ok(PAGE.into()),
            Some(Err(ProviderError::AuthenticationFailed("bad key".into()))),
        );
        let id = create_session(&state).await;

        let (status, body) = send(
            build_router(state),
            post_json(
                &format!("/api/assistant/sessions/{id}/messages"),
                serde_json::json!({"question": "Hi"}),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::OK);

        let reply: AskResponse = serde_json::from_slice(&body).unwrap();
        assert_eq!(reply.history.last().unwrap().content, APOLOGY_MESSAGE);
        assert!(reply.error.unwrap().contains("bad key"));
    }

    #[tokio::test]
    async fn empty_question_is_400() {
        let state = test_state();
        let id = create_session(&state).await;
        let (status, _) = send(
            build_router(state),
            post_json(
                &format!("/api/assistant/sessions/{id}/messages"),
                serde_json::json!({"question": "   "}),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test(start_paused = true)]
    async fn question_during_in_flight_turn_is_409() {
        let state = state_with(Ok(PAGE.into()), None);
        let assistant = Arc::new(Assistant::new(Arc::new(SlowProvider), "test-model"));
        let state = Arc::new(GatewayState {
            config: AppConfig::default(),
            fetcher: state.fetcher.clone(),
            sessions: Arc::new(SessionStore::new(Some(assistant), 10, Duration::from_secs(3600))),
            credentials: report(true),
        });
        let id = create_session(&state).await;
        let uri = format!("/api/assistant/sessions/{id}/messages");

        let first = {
            let app = build_router(state.clone());
            let req = post_json(&uri, serde_json::json!({"question": "First?"}));
            tokio::spawn(async move { send(app, req).await })
        };
        tokio::time::sleep(Duration::from_millis(100)).await;

        let (status, body) = send(
            build_router(state.clone()),
            post_json(&uri, serde_json::json!({"question": "Second?"})),
        )
        .await;
        assert_eq!(status, StatusCode::CONFLICT);
        let err: ErrorResponse = serde_json::from_slice(&body).unwrap();
        assert!(err.error.contains("already being generated"));

        let (status, _) = first.await.unwrap();
        assert_eq!(status, StatusCode::OK);
        let session = state.sessions.get(&parkguide_core::SessionId(id)).unwrap();
        assert_eq!(session.snapshot().len(), 2);
    }

    #[tokio::test]
    async fn unknown_session_is_404() {
        let (status, _) = send(
            build_router(test_state()),
            post_json(
                "/api/assistant/sessions/nope/messages",
                serde_json::json!({"question": "Hi"}),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn delete_ends_session() {
        let state = test_state();
        let id = create_session(&state).await;
        let uri = format!("/api/assistant/sessions/{id}");

        let delete = || {
            Request::builder()
                .method("DELETE")
                .uri(&uri)
                .body(Body::empty())
                .unwrap()
        };

        let (status, _) = send(build_router(state.clone()), delete()).await;
        assert_eq!(status, StatusCode::NO_CONTENT);
        let (status, _) = send(build_router(state.clone()), delete()).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert!(state.sessions.is_empty());
    }
}

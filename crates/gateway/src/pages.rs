//! HTML page handlers.

use axum::{
    Router,
    extract::{Path, State},
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    routing::get,
};
use parkguide_catalog::{ContentDescriptor, PageKey, resolve};

use crate::SharedState;
use crate::render::{self, PageContext, escape};

pub fn pages_router(state: SharedState) -> Router {
    Router::new()
        .route("/", get(index_handler))
        .route("/pages/{slug}", get(page_handler))
        .with_state(state)
}

async fn index_handler(State(state): State<SharedState>) -> Html<String> {
    Html(render_section(&state, PageKey::Overview).await)
}

async fn page_handler(State(state): State<SharedState>, Path(slug): Path<String>) -> Response {
    match PageKey::from_slug(&slug) {
        Some(key) => Html(render_section(&state, key).await).into_response(),
        None => (
            StatusCode::NOT_FOUND,
            Html(format!(
                r#"<!DOCTYPE html><html><body><h1>Page not found</h1><p>No section named “{}”. <a href="/">Back to the guide</a></p></body></html>"#,
                escape(&slug)
            )),
        )
            .into_response(),
    }
}

/// Render a full page for `key` with today's banner.
pub async fn render_section(state: &SharedState, key: PageKey) -> String {
    let info = state.fetcher.get_or_revalidate().await;
    let descriptor = resolve(key);
    let body = match descriptor {
        ContentDescriptor::Static { page } => render::static_page(page, &info),
        ContentDescriptor::Assistant { .. } => {
            render::assistant_page(descriptor.title(), &state.credentials)
        }
    };
    render::layout(
        &PageContext {
            active: key,
            info: &info,
            date: state.fetcher.today(),
        },
        &body,
    )
}

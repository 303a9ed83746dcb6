//! Embedded static assets.
//!
//! The CSS and JS files from `frontend/` are compiled into the binary
//! using `include_str!`, enabling single-binary deployment.

use axum::{
    Router,
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::get,
};

const STYLE_CSS: &str = include_str!("../../../frontend/style.css");
const APP_JS: &str = include_str!("../../../frontend/app.js");

/// Build a router that serves the embedded assets.
pub fn frontend_router() -> Router {
    Router::new()
        .route("/static/style.css", get(css_handler))
        .route("/static/app.js", get(js_handler))
}

async fn css_handler() -> Response {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/css; charset=utf-8")],
        STYLE_CSS,
    )
        .into_response()
}

async fn js_handler() -> Response {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "application/javascript; charset=utf-8")],
        APP_JS,
    )
        .into_response()
}

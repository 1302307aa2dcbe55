//! Embedded front-end assets.
//!
//! Compiled into the binary so the server is self-contained; each route pins
//! its content type explicitly.

use axum::http::header;
use axum::response::{Html, IntoResponse, Response};

const INDEX_HTML: &str = include_str!("../assets/index.html");
const STYLE_CSS: &str = include_str!("../assets/style.css");
const RENDERER_JS: &str = include_str!("../assets/renderer.js");

pub async fn index() -> Html<&'static str> {
    Html(INDEX_HTML)
}

pub async fn stylesheet() -> Response {
    ([(header::CONTENT_TYPE, "text/css")], STYLE_CSS).into_response()
}

pub async fn renderer() -> Response {
    (
        [(header::CONTENT_TYPE, "application/javascript")],
        RENDERER_JS,
    )
        .into_response()
}

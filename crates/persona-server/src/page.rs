//! The single chat page. Talks to the JSON API and redraws only the transcript.

use axum::response::Html;

const INDEX_HTML: &str = include_str!("../assets/index.html");

/// GET / - chat page
pub async fn index() -> Html<&'static str> {
    Html(INDEX_HTML)
}

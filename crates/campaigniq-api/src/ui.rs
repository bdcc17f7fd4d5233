use axum::response::Html;

/// The single-page chat UI, embedded at build time so the binary is
/// self-contained.
pub async fn index() -> Html<&'static str> {
    Html(include_str!("../assets/index.html"))
}

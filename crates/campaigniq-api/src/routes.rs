use crate::{handlers, ui, AppState};
use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

pub fn create_router(state: AppState) -> Router {
    Router::new()
        // Chat UI
        .route("/", get(ui::index))

        // Health check
        .route("/health", get(handlers::health))

        // Streaming recommendation endpoint
        .route("/api/chat", post(handlers::chat))

        // Add state
        .with_state(state)

        // Add middleware
        .layer(
            CorsLayer::new()
                .allow_origin(tower_http::cors::Any)
                .allow_methods(tower_http::cors::Any)
                .allow_headers(tower_http::cors::Any),
        )
        .layer(TraceLayer::new_for_http())
}

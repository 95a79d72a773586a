use axum::Router;
use axum::routing::get;
use tower_http::trace::TraceLayer;

use crate::handlers::{health, root};
use crate::state::AppState;

pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(root))
        .route("/health", get(health))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

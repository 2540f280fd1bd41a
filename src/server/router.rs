use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use super::state::AppState;
use crate::api;

/// Build the complete axum Router: the MCP endpoint at the configured path
/// and a JSON 404 for everything else.
pub fn build(state: AppState) -> Router {
    let path = state.config.path.clone();
    Router::new()
        .merge(api::routes(&path))
        .fallback(api::mcp::not_found)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

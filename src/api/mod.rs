pub mod dispatch;
pub mod mcp;
pub mod sse;

use axum::routing::post;
use axum::Router;

use crate::server::state::AppState;

/// Build the MCP routes mounted at `path`. The twin with or without a
/// trailing slash is served too.
pub fn routes(path: &str) -> Router<AppState> {
    let endpoint = || {
        post(mcp::post_handler)
            .get(mcp::get_handler)
            .delete(mcp::delete_handler)
    };

    let mut router = Router::new().route(path, endpoint());
    if let Some(twin) = trailing_slash_twin(path) {
        router = router.route(&twin, endpoint());
    }
    router
}

fn trailing_slash_twin(path: &str) -> Option<String> {
    if path == "/" {
        None
    } else if let Some(stripped) = path.strip_suffix('/') {
        Some(stripped.to_string())
    } else {
        Some(format!("{path}/"))
    }
}

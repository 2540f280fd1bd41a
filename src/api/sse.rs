use std::convert::Infallible;

use axum::response::sse::{Event, Sse};
use futures::Stream;

/// SSE event name MCP clients read JSON-RPC replies from.
pub const MESSAGE_EVENT: &str = "message";

/// Wrap one serialized JSON-RPC message as a single-frame SSE response.
///
/// The stream ends after the frame, which closes the HTTP response.
pub fn single_message(data: String) -> Sse<impl Stream<Item = Result<Event, Infallible>>> {
    let event = Event::default().event(MESSAGE_EVENT).data(data);
    Sse::new(tokio_stream::once(Ok::<_, Infallible>(event)))
}

/// Serialize a value for an SSE data line.
pub fn format_sse_data<T: serde::Serialize>(value: &T) -> Option<String> {
    serde_json::to_string(value).ok()
}

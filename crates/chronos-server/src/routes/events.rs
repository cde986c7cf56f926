use axum::extract::State;
use axum::response::sse::{Event, KeepAlive, Sse};
use std::convert::Infallible;
use tokio_stream::wrappers::BroadcastStream;
use tokio_stream::StreamExt as _;

use crate::state::{AppState, ServerEvent};

/// GET /api/events: SSE stream of `tick` (current moment) and `update`
/// (data changed) events. Ends when the server shuts down.
pub async fn sse_events(State(app): State<AppState>) -> impl axum::response::IntoResponse {
    let rx = app.event_tx.subscribe();
    let stream = BroadcastStream::new(rx)
        .filter_map(|msg| msg.ok())
        .take_while(|ev| *ev != ServerEvent::Shutdown)
        .filter_map(|ev| to_sse(&ev).map(Ok::<Event, Infallible>));
    Sse::new(stream).keep_alive(KeepAlive::default())
}

fn to_sse(ev: &ServerEvent) -> Option<Event> {
    match ev {
        ServerEvent::Tick(now) => Event::default().event("tick").json_data(now).ok(),
        ServerEvent::Update => Some(Event::default().event("update").data("update")),
        ServerEvent::Shutdown => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chronos_core::types::{DayOfWeek, Moment};

    #[test]
    fn shutdown_has_no_wire_form() {
        assert!(to_sse(&ServerEvent::Shutdown).is_none());
        assert!(to_sse(&ServerEvent::Update).is_some());
        let now = Moment::new(DayOfWeek::SUNDAY, "00:00".parse().unwrap());
        assert!(to_sse(&ServerEvent::Tick(now)).is_some());
    }
}

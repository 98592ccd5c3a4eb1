//! ICS feed endpoint

use axum::{
    Router,
    extract::State,
    http::header,
    response::IntoResponse,
    routing::get,
};
use chrono::Utc;

use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/certificate-calendar.ics", get(feed))
        .route("/calendar.ics", get(feed))
}

/// GET /certificate-calendar.ics - Current events as iCalendar
///
/// Caching is disabled so subscribed clients always see the latest list.
async fn feed(State(state): State<AppState>) -> impl IntoResponse {
    let ics = state.feed(Utc::now());

    (
        [
            (header::CONTENT_TYPE, "text/calendar; charset=utf-8"),
            (
                header::CONTENT_DISPOSITION,
                "inline; filename=certificate-calendar.ics",
            ),
            (header::CACHE_CONTROL, "no-cache, no-store, must-revalidate"),
            (header::PRAGMA, "no-cache"),
            (header::EXPIRES, "0"),
        ],
        ics,
    )
}

//! GET /api/getSessionData - one-shot poll for the completed session.

use axum::{extract::Extension, Json};

use crate::kernel::SessionData;
use crate::server::app::AppState;

/// Drain the current-session slot.
///
/// Returns the completed session exactly once; before one lands (and after
/// it is taken) the response is an empty object. A successful drain also
/// clears the whole session store.
pub async fn session_data_handler(Extension(state): Extension<AppState>) -> Json<SessionData> {
    let data = state
        .current
        .take_and_reset(&state.sessions)
        .await
        .unwrap_or_default();
    Json(data)
}

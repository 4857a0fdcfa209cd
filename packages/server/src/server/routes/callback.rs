//! GET /callback - the carrier redirect target.

use axum::{
    extract::{Extension, Query},
    response::{IntoResponse, Redirect, Response},
};
use serde::Deserialize;

use crate::kernel::SessionData;
use crate::server::app::AppState;
use crate::server::static_files::serve_index;

#[derive(Deserialize)]
pub struct CallbackQuery {
    #[serde(default)]
    code: String,
    #[serde(default)]
    state: String,
    #[serde(default)]
    error: String,
    #[serde(default)]
    error_description: String,
}

/// Resolve a redirected authorization against the session store.
///
/// - Missing `state`: malformed redirect, bounce to the landing page without
///   touching any state.
/// - Unknown `state`: write a marker record under the token so the event is
///   visible in the store, then the same bounce. The marker is never
///   published to the polling client.
/// - Known `state`: record the outcome, publish the session for the polling
///   client, and serve the landing page directly.
pub async fn callback_handler(
    Extension(state): Extension<AppState>,
    Query(query): Query<CallbackQuery>,
) -> Response {
    if query.state.is_empty() {
        tracing::warn!("Callback arrived without a state parameter");
        return Redirect::to("/").into_response();
    }

    // The carrier signals failure via `error` + `error_description`; an empty
    // description is treated as absent so it stays off the wire later.
    let error_description = (!query.error.is_empty())
        .then(|| query.error_description.clone())
        .filter(|description| !description.is_empty());

    match state
        .sessions
        .set_outcome(&query.state, &query.code, error_description)
        .await
    {
        Some(updated) => {
            state.current.publish(updated).await;
            serve_index().await
        }
        None => {
            tracing::warn!(token = %query.state, "No session data found for state");
            let _ = state
                .sessions
                .insert(
                    &query.state,
                    SessionData {
                        error: Some("No session data found for state".to_string()),
                        ..Default::default()
                    },
                )
                .await;
            Redirect::to("/").into_response()
        }
    }
}

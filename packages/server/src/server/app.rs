//! Application setup and server configuration.

use std::sync::Arc;

use axum::{
    extract::{DefaultBodyLimit, Extension},
    routing::{get, post},
    Router,
};
use tower_http::trace::TraceLayer;

use crate::kernel::{BaseNumberVerify, CurrentSession, SessionStore};
use crate::server::routes::{
    auth_url_handler, callback_handler, session_data_handler, verify_number_handler,
};
use crate::server::static_files::{serve_asset, serve_index};

/// Request body cap (the JSON bodies here are tiny)
const MAX_BODY_BYTES: usize = 2 * 1024 * 1024;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub verify: Arc<dyn BaseNumberVerify>,
    pub sessions: SessionStore,
    pub current: CurrentSession,
}

/// Build the Axum application router
///
/// Session state is created fresh here: one store and one current-session
/// slot per app instance, shared by all requests.
pub fn build_app(verify: Arc<dyn BaseNumberVerify>) -> Router {
    let app_state = AppState {
        verify,
        sessions: SessionStore::new(),
        current: CurrentSession::new(),
    };

    Router::new()
        .route("/", get(serve_index))
        .route("/api/getAuthUrl", get(auth_url_handler))
        .route("/api/getSessionData", get(session_data_handler))
        .route("/api/verifyNumber", post(verify_number_handler))
        .route("/callback", get(callback_handler))
        // Remaining paths are embedded static assets
        .fallback(get(serve_asset))
        // Middleware layers (applied in reverse order - last added runs first)
        .layer(DefaultBodyLimit::max(MAX_BODY_BYTES))
        .layer(Extension(app_state))
        .layer(TraceLayer::new_for_http())
}

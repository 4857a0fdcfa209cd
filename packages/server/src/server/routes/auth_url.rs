//! GET /api/getAuthUrl - start an authorization flow.

use axum::{
    extract::{Extension, Query},
    Json,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::kernel::SessionData;
use crate::server::app::AppState;
use crate::server::routes::error::ApiError;

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthUrlQuery {
    #[serde(default)]
    phone_number: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthUrlResponse {
    auth_url: String,
}

/// Generate a fresh state token, ask the provider for an authorization URL,
/// and store the pending session under the token.
///
/// Nothing is stored when the provider call fails; the flow never starts.
pub async fn auth_url_handler(
    Extension(state): Extension<AppState>,
    Query(query): Query<AuthUrlQuery>,
) -> Result<Json<AuthUrlResponse>, ApiError> {
    if query.phone_number.is_empty() {
        return Err(ApiError::InvalidInput("phoneNumber is required".to_string()));
    }

    let token = Uuid::new_v4().to_string();
    let auth_url = state
        .verify
        .get_auth_url(&token, &query.phone_number)
        .await
        .map_err(|e| {
            tracing::error!(error = %e, "Failed to get auth URL");
            ApiError::Upstream(e.to_string())
        })?;

    let stored = state
        .sessions
        .insert(&token, SessionData::new(query.phone_number, auth_url.clone()))
        .await;
    if !stored {
        // Freshly generated UUIDv4 already present: a token-generation
        // fault, not a client error. The existing record wins.
        tracing::error!(token = %token, "State token already present in session store");
    }

    tracing::debug!(token = %token, "Stored pending verification session");
    Ok(Json(AuthUrlResponse { auth_url }))
}

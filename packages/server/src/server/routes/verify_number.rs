//! POST /api/verifyNumber - exchange the callback code and verify the number.

use axum::{extract::Extension, Json};
use glide::NumberVerifyResult;
use serde::{Deserialize, Serialize};

use crate::server::app::AppState;
use crate::server::routes::error::ApiError;

/// Correlation label forwarded to the provider on verification calls.
const VERIFY_SESSION_LABEL: &str = "session77";

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VerifyNumberRequest {
    #[serde(default)]
    code: String,
    #[serde(default)]
    phone_number: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VerifyNumberResponse {
    operator: String,
    verify_res: NumberVerifyResult,
}

/// Exchange the authorization code for a user client, look up the operator,
/// and verify the number.
///
/// Stateless: reads nothing from the session store, so it works even after
/// the store has been reset by a drain.
pub async fn verify_number_handler(
    Extension(state): Extension<AppState>,
    body: Option<Json<VerifyNumberRequest>>,
) -> Result<Json<VerifyNumberResponse>, ApiError> {
    let Some(Json(body)) = body else {
        return Err(ApiError::InvalidInput("Invalid request".to_string()));
    };
    if body.code.is_empty() || body.phone_number.is_empty() {
        return Err(ApiError::InvalidInput(
            "code and phoneNumber are required".to_string(),
        ));
    }

    let user_client = state
        .verify
        .client_for_code(&body.code, &body.phone_number)
        .await
        .map_err(|e| {
            tracing::error!(error = %e, "Failed to create number-verify user client");
            ApiError::Upstream(e.to_string())
        })?;

    let operator = user_client.get_operator().await.map_err(|e| {
        tracing::error!(error = %e, "Failed to get operator");
        ApiError::Upstream(e.to_string())
    })?;

    let verify_res = user_client
        .verify_number(VERIFY_SESSION_LABEL)
        .await
        .map_err(|e| {
            tracing::error!(error = %e, "Failed to verify number");
            ApiError::Upstream(e.to_string())
        })?;

    Ok(Json(VerifyNumberResponse {
        operator,
        verify_res,
    }))
}

//! Glide API settings, options, and wire types.

use serde::{Deserialize, Serialize};

/// Client settings.
#[derive(Debug, Clone, Default)]
pub struct GlideSettings {
    /// OAuth client id issued by Glide.
    pub client_id: String,

    /// OAuth client secret issued by Glide.
    pub client_secret: String,

    /// Redirect URI registered for the client (the `/callback` route).
    pub redirect_uri: String,

    /// Gateway endpoints. Leave fields empty to use the production gateway.
    pub internal: InternalSettings,
}

/// Gateway base URLs.
#[derive(Debug, Clone, Default)]
pub struct InternalSettings {
    pub auth_base_url: String,
    pub api_base_url: String,
}

impl InternalSettings {
    /// Production gateway endpoints.
    pub fn production() -> Self {
        Self {
            auth_base_url: "https://oidc.gateway-x.io".to_string(),
            api_base_url: "https://api.gateway-x.io".to_string(),
        }
    }
}

/// Options for building a number-verification authorization URL.
#[derive(Debug, Clone, Default)]
pub struct NumberVerifyAuthUrlOptions {
    /// Opaque state echoed back on the redirect callback.
    pub state: Option<String>,

    /// Phone number forwarded as the OIDC `login_hint` (`tel:` form; the
    /// prefix is added if missing).
    pub login_hint: Option<String>,
}

/// Parameters for exchanging a callback code for a user client.
#[derive(Debug, Clone, Default)]
pub struct NumberVerifyClientForParams {
    /// Authorization code returned on the callback.
    pub code: String,

    /// Phone number the authorization was initiated for. Used as the default
    /// number on [`verify_number`](crate::NumberVerifyUserClient::verify_number).
    pub phone_number: Option<String>,
}

/// Per-call API options.
#[derive(Debug, Clone, Default)]
pub struct ApiConfig {
    /// Correlation identifier forwarded to the gateway.
    pub session_identifier: Option<String>,
}

/// OAuth token endpoint response.
#[derive(Debug, Clone, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,

    #[serde(default)]
    pub token_type: Option<String>,

    #[serde(default)]
    pub expires_in: Option<u64>,

    #[serde(default)]
    pub scope: Option<String>,
}

/// Operator lookup response.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct OperatorResponse {
    pub operator: String,
}

/// Result of a number-verification check.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NumberVerifyResult {
    /// Whether the device that completed the flow holds the phone number.
    pub device_phone_number_verified: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_verify_result_wire_shape() {
        let result: NumberVerifyResult =
            serde_json::from_str(r#"{"devicePhoneNumberVerified":true}"#).unwrap();
        assert!(result.device_phone_number_verified);

        let json = serde_json::to_string(&result).unwrap();
        assert_eq!(json, r#"{"devicePhoneNumberVerified":true}"#);
    }

    #[test]
    fn test_token_response_tolerates_missing_optional_fields() {
        let token: TokenResponse = serde_json::from_str(r#"{"access_token":"tok"}"#).unwrap();
        assert_eq!(token.access_token, "tok");
        assert!(token.expires_in.is_none());
    }
}

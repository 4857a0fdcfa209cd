//! Glide network identity API client.
//!
//! A minimal client for Glide's number-verification flow: building the
//! carrier authorization URL, exchanging the redirect callback code for a
//! verification-scoped token, and calling the operator lookup and number
//! verification endpoints with it.
//!
//! # Example
//!
//! ```rust,ignore
//! use glide::{
//!     ApiConfig, GlideClient, GlideSettings, NumberVerifyAuthUrlOptions,
//!     NumberVerifyClientForParams,
//! };
//!
//! let client = GlideClient::new(GlideSettings {
//!     client_id: "client-id".into(),
//!     client_secret: "client-secret".into(),
//!     redirect_uri: "https://demo.example.com/callback".into(),
//!     ..Default::default()
//! })?;
//!
//! // Authorization URL for the browser to visit
//! let auth_url = client.number_verify.auth_url(NumberVerifyAuthUrlOptions {
//!     state: Some("opaque-state".into()),
//!     login_hint: Some("+15551234567".into()),
//! })?;
//!
//! // After the redirect: exchange the code and verify
//! let user_client = client.number_verify.for_code(NumberVerifyClientForParams {
//!     code: "auth-code".into(),
//!     phone_number: Some("+15551234567".into()),
//! }).await?;
//!
//! let operator = user_client.get_operator().await?;
//! let result = user_client.verify_number(None, ApiConfig::default()).await?;
//! ```

pub mod error;
pub mod types;

pub use error::{GlideError, Result};
pub use types::*;

use reqwest::Client;
use std::sync::Arc;
use tracing::{debug, warn};
use url::Url;

/// Shared client internals (settings + HTTP connection pool).
struct Core {
    settings: GlideSettings,
    http: Client,
}

/// Glide API client.
#[derive(Clone)]
pub struct GlideClient {
    /// Number-verification API surface.
    pub number_verify: NumberVerifyClient,
}

impl GlideClient {
    /// Create a new client from settings.
    ///
    /// Fails with [`GlideError::Config`] when the client id or secret is
    /// missing. Empty gateway base URLs fall back to the production gateway.
    pub fn new(mut settings: GlideSettings) -> Result<Self> {
        if settings.client_id.is_empty() {
            return Err(GlideError::Config("client_id is required".into()));
        }
        if settings.client_secret.is_empty() {
            return Err(GlideError::Config("client_secret is required".into()));
        }

        let production = InternalSettings::production();
        if settings.internal.auth_base_url.is_empty() {
            settings.internal.auth_base_url = production.auth_base_url;
        }
        if settings.internal.api_base_url.is_empty() {
            settings.internal.api_base_url = production.api_base_url;
        }

        let core = Arc::new(Core {
            settings,
            http: Client::new(),
        });

        Ok(Self {
            number_verify: NumberVerifyClient { core },
        })
    }
}

/// Number-verification API client, reached via [`GlideClient::number_verify`].
#[derive(Clone)]
pub struct NumberVerifyClient {
    core: Arc<Core>,
}

impl NumberVerifyClient {
    /// Build the carrier authorization URL the browser must visit.
    ///
    /// Purely local, no network call. The `state` option is echoed back on
    /// the redirect; the `login_hint` carries the phone number in `tel:` form.
    pub fn auth_url(&self, options: NumberVerifyAuthUrlOptions) -> Result<String> {
        let settings = &self.core.settings;
        if settings.redirect_uri.is_empty() {
            return Err(GlideError::Config(
                "redirect_uri is required to build an auth URL".into(),
            ));
        }

        let mut url = Url::parse(&settings.internal.auth_base_url)
            .map_err(|e| GlideError::Config(format!("Invalid auth base URL: {}", e)))?;
        url.set_path("/oauth2/auth");

        {
            let mut query = url.query_pairs_mut();
            query.append_pair("client_id", &settings.client_id);
            query.append_pair("response_type", "code");
            query.append_pair("redirect_uri", &settings.redirect_uri);
            query.append_pair("scope", "openid");
            if let Some(state) = &options.state {
                query.append_pair("state", state);
            }
            if let Some(hint) = &options.login_hint {
                let hint = if hint.starts_with("tel:") {
                    hint.clone()
                } else {
                    format!("tel:{}", hint)
                };
                query.append_pair("login_hint", &hint);
            }
        }

        debug!(url = %url, "Built number-verify auth URL");
        Ok(url.to_string())
    }

    /// Exchange a redirect callback code for a verification-scoped user client.
    pub async fn for_code(
        &self,
        params: NumberVerifyClientForParams,
    ) -> Result<NumberVerifyUserClient> {
        if params.code.is_empty() {
            return Err(GlideError::Config("code is required".into()));
        }

        let settings = &self.core.settings;
        let token_url = format!("{}/oauth2/token", settings.internal.auth_base_url);
        let form = [
            ("grant_type", "authorization_code"),
            ("code", params.code.as_str()),
            ("redirect_uri", settings.redirect_uri.as_str()),
        ];

        let response = self
            .core
            .http
            .post(&token_url)
            .basic_auth(&settings.client_id, Some(&settings.client_secret))
            .form(&form)
            .send()
            .await
            .map_err(|e| {
                warn!(error = %e, "Glide token request failed");
                GlideError::Network(e.to_string())
            })?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            warn!(status = %status, error = %error_text, "Glide token endpoint error");
            return Err(GlideError::Api(format!("Glide token error: {}", error_text)));
        }

        let token: TokenResponse = response
            .json()
            .await
            .map_err(|e| GlideError::Parse(e.to_string()))?;

        debug!("Exchanged authorization code for number-verify token");

        Ok(NumberVerifyUserClient {
            core: self.core.clone(),
            access_token: token.access_token,
            phone_number: params.phone_number,
        })
    }
}

/// Client bound to one completed authorization; carries the user token.
#[derive(Clone)]
pub struct NumberVerifyUserClient {
    core: Arc<Core>,
    access_token: String,
    phone_number: Option<String>,
}

impl NumberVerifyUserClient {
    /// Look up the operator serving the authorized subscription.
    pub async fn get_operator(&self) -> Result<String> {
        let url = format!("{}/operator", self.core.settings.internal.api_base_url);

        let response = self
            .core
            .http
            .get(&url)
            .bearer_auth(&self.access_token)
            .send()
            .await
            .map_err(|e| {
                warn!(error = %e, "Glide operator request failed");
                GlideError::Network(e.to_string())
            })?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            warn!(status = %status, error = %error_text, "Glide operator endpoint error");
            return Err(GlideError::Api(format!(
                "Glide operator error: {}",
                error_text
            )));
        }

        let operator: OperatorResponse = response
            .json()
            .await
            .map_err(|e| GlideError::Parse(e.to_string()))?;

        Ok(operator.operator)
    }

    /// Verify the phone number against the carrier.
    ///
    /// `phone_number` overrides the number bound at exchange time; `None`
    /// uses the bound number.
    pub async fn verify_number(
        &self,
        phone_number: Option<&str>,
        config: ApiConfig,
    ) -> Result<NumberVerifyResult> {
        let number = phone_number
            .map(str::to_owned)
            .or_else(|| self.phone_number.clone())
            .ok_or_else(|| GlideError::Config("no phone number to verify".into()))?;

        let url = format!(
            "{}/number-verification/verify",
            self.core.settings.internal.api_base_url
        );

        let mut request = self
            .core
            .http
            .post(&url)
            .bearer_auth(&self.access_token)
            .json(&serde_json::json!({ "phoneNumber": number }));
        if let Some(session) = &config.session_identifier {
            request = request.header("x-session-identifier", session);
        }

        let response = request.send().await.map_err(|e| {
            warn!(error = %e, "Glide verify request failed");
            GlideError::Network(e.to_string())
        })?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            warn!(status = %status, error = %error_text, "Glide verify endpoint error");
            return Err(GlideError::Api(format!(
                "Glide verify error: {}",
                error_text
            )));
        }

        response
            .json::<NumberVerifyResult>()
            .await
            .map_err(|e| GlideError::Parse(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn test_settings() -> GlideSettings {
        GlideSettings {
            client_id: "test-client".into(),
            client_secret: "test-secret".into(),
            redirect_uri: "https://demo.example.com/callback".into(),
            ..Default::default()
        }
    }

    fn query_map(url: &str) -> HashMap<String, String> {
        Url::parse(url)
            .unwrap()
            .query_pairs()
            .map(|(k, v)| (k.into_owned(), v.into_owned()))
            .collect()
    }

    #[test]
    fn test_new_requires_credentials() {
        let missing_id = GlideClient::new(GlideSettings {
            client_secret: "secret".into(),
            ..Default::default()
        });
        assert!(matches!(missing_id, Err(GlideError::Config(_))));

        let missing_secret = GlideClient::new(GlideSettings {
            client_id: "id".into(),
            ..Default::default()
        });
        assert!(matches!(missing_secret, Err(GlideError::Config(_))));
    }

    #[test]
    fn test_new_defaults_gateway_urls() {
        let client = GlideClient::new(test_settings()).unwrap();
        let settings = &client.number_verify.core.settings;
        assert_eq!(settings.internal.auth_base_url, "https://oidc.gateway-x.io");
        assert_eq!(settings.internal.api_base_url, "https://api.gateway-x.io");
    }

    #[test]
    fn test_new_keeps_explicit_gateway_urls() {
        let client = GlideClient::new(GlideSettings {
            internal: InternalSettings {
                auth_base_url: "https://oidc.sandbox.example.com".into(),
                api_base_url: "https://api.sandbox.example.com".into(),
            },
            ..test_settings()
        })
        .unwrap();
        let settings = &client.number_verify.core.settings;
        assert_eq!(
            settings.internal.auth_base_url,
            "https://oidc.sandbox.example.com"
        );
    }

    #[test]
    fn test_auth_url_contains_expected_params() {
        let client = GlideClient::new(test_settings()).unwrap();
        let url = client
            .number_verify
            .auth_url(NumberVerifyAuthUrlOptions {
                state: Some("state-token".into()),
                login_hint: Some("+15551234567".into()),
            })
            .unwrap();

        assert!(url.starts_with("https://oidc.gateway-x.io/oauth2/auth?"));
        let params = query_map(&url);
        assert_eq!(params["client_id"], "test-client");
        assert_eq!(params["response_type"], "code");
        assert_eq!(params["redirect_uri"], "https://demo.example.com/callback");
        assert_eq!(params["scope"], "openid");
        assert_eq!(params["state"], "state-token");
        assert_eq!(params["login_hint"], "tel:+15551234567");
    }

    #[test]
    fn test_auth_url_keeps_existing_tel_prefix() {
        let client = GlideClient::new(test_settings()).unwrap();
        let url = client
            .number_verify
            .auth_url(NumberVerifyAuthUrlOptions {
                state: None,
                login_hint: Some("tel:+15551234567".into()),
            })
            .unwrap();

        let params = query_map(&url);
        assert_eq!(params["login_hint"], "tel:+15551234567");
        assert!(!params.contains_key("state"));
    }

    #[test]
    fn test_auth_url_requires_redirect_uri() {
        let client = GlideClient::new(GlideSettings {
            client_id: "id".into(),
            client_secret: "secret".into(),
            ..Default::default()
        })
        .unwrap();

        let result = client
            .number_verify
            .auth_url(NumberVerifyAuthUrlOptions::default());
        assert!(matches!(result, Err(GlideError::Config(_))));
    }
}

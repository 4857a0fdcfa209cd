use anyhow::{Context, Result};
use dotenvy::dotenv;
use glide::{GlideSettings, InternalSettings};
use std::env;

/// Application configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub glide_client_id: String,
    pub glide_client_secret: String,
    pub glide_redirect_uri: String,
    pub glide_auth_base_url: String,
    pub glide_api_base_url: String,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        // Load .env file if present (development)
        let _ = dotenv();

        Ok(Self {
            port: env::var("PORT")
                .unwrap_or_else(|_| "4568".to_string())
                .parse()
                .context("PORT must be a valid number")?,
            glide_client_id: env::var("GLIDE_CLIENT_ID")
                .context("GLIDE_CLIENT_ID must be set")?,
            glide_client_secret: env::var("GLIDE_CLIENT_SECRET")
                .context("GLIDE_CLIENT_SECRET must be set")?,
            glide_redirect_uri: optional_var("GLIDE_REDIRECT_URI"),
            glide_auth_base_url: optional_var("GLIDE_AUTH_BASE_URL"),
            glide_api_base_url: optional_var("GLIDE_API_BASE_URL"),
        })
    }

    /// Glide client settings from this configuration.
    ///
    /// Empty base URLs are left empty here; the client falls back to the
    /// production gateway for those.
    pub fn glide_settings(&self) -> GlideSettings {
        GlideSettings {
            client_id: self.glide_client_id.clone(),
            client_secret: self.glide_client_secret.clone(),
            redirect_uri: self.glide_redirect_uri.clone(),
            internal: InternalSettings {
                auth_base_url: self.glide_auth_base_url.clone(),
                api_base_url: self.glide_api_base_url.clone(),
            },
        }
    }
}

/// Read an optional variable, warning when it is unset.
///
/// The server still starts without these; provider calls that need them fail
/// with a configuration message at call time instead.
fn optional_var(name: &str) -> String {
    match env::var(name) {
        Ok(value) => value,
        Err(_) => {
            tracing::warn!("{} environment variable is not set", name);
            String::new()
        }
    }
}

//! Provider adapters implementing the kernel traits.
//!
//! The Glide client lives in its own package; these wrappers bridge it to the
//! Base* traits the route handlers are written against.

use anyhow::Result;
use async_trait::async_trait;
use glide::{
    ApiConfig, GlideClient, NumberVerifyAuthUrlOptions, NumberVerifyClientForParams,
    NumberVerifyResult, NumberVerifyUserClient,
};
use std::sync::Arc;

use crate::kernel::{BaseNumberVerify, BaseNumberVerifyUser};

// =============================================================================
// GlideClient Adapter (implements BaseNumberVerify trait)
// =============================================================================

/// Wrapper around GlideClient that implements the BaseNumberVerify trait
pub struct GlideAdapter(pub Arc<GlideClient>);

impl GlideAdapter {
    pub fn new(client: Arc<GlideClient>) -> Self {
        Self(client)
    }
}

#[async_trait]
impl BaseNumberVerify for GlideAdapter {
    async fn get_auth_url(&self, state: &str, phone_number: &str) -> Result<String> {
        self.0
            .number_verify
            .auth_url(NumberVerifyAuthUrlOptions {
                state: Some(state.to_string()),
                login_hint: Some(phone_number.to_string()),
            })
            .map_err(|e| anyhow::anyhow!("{}", e))
    }

    async fn client_for_code(
        &self,
        code: &str,
        phone_number: &str,
    ) -> Result<Box<dyn BaseNumberVerifyUser>> {
        let user_client = self
            .0
            .number_verify
            .for_code(NumberVerifyClientForParams {
                code: code.to_string(),
                phone_number: Some(phone_number.to_string()),
            })
            .await
            .map_err(|e| anyhow::anyhow!("{}", e))?;

        Ok(Box::new(GlideUserAdapter(user_client)))
    }
}

/// Wrapper around a token-bound NumberVerifyUserClient
pub struct GlideUserAdapter(pub NumberVerifyUserClient);

#[async_trait]
impl BaseNumberVerifyUser for GlideUserAdapter {
    async fn get_operator(&self) -> Result<String> {
        self.0
            .get_operator()
            .await
            .map_err(|e| anyhow::anyhow!("{}", e))
    }

    async fn verify_number(&self, session_identifier: &str) -> Result<NumberVerifyResult> {
        self.0
            .verify_number(
                None,
                ApiConfig {
                    session_identifier: Some(session_identifier.to_string()),
                },
            )
            .await
            .map_err(|e| anyhow::anyhow!("{}", e))
    }
}

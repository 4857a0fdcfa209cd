// Mock provider implementations for testing
//
// Provides a mock number-verify provider that can be injected into the
// router for tests. Calls are recorded so tests can assert on what the
// handlers passed through.

use anyhow::Result;
use async_trait::async_trait;
use glide::NumberVerifyResult;
use std::sync::{Arc, Mutex};

use super::{BaseNumberVerify, BaseNumberVerifyUser};

// =============================================================================
// Mock Number Verify Provider
// =============================================================================

/// Arguments captured from a client_for_code call
#[derive(Debug, Clone)]
pub struct ExchangeCallArgs {
    pub code: String,
    pub phone_number: String,
}

pub struct MockNumberVerify {
    auth_url_calls: Arc<Mutex<Vec<(String, String)>>>,
    exchange_calls: Arc<Mutex<Vec<ExchangeCallArgs>>>,
    verify_session_ids: Arc<Mutex<Vec<String>>>,
    auth_url_failure: Option<String>,
    exchange_failure: Option<String>,
    operator_failure: Option<String>,
    verify_failure: Option<String>,
    operator: String,
    verified: bool,
}

impl MockNumberVerify {
    pub fn new() -> Self {
        Self {
            auth_url_calls: Arc::new(Mutex::new(Vec::new())),
            exchange_calls: Arc::new(Mutex::new(Vec::new())),
            verify_session_ids: Arc::new(Mutex::new(Vec::new())),
            auth_url_failure: None,
            exchange_failure: None,
            operator_failure: None,
            verify_failure: None,
            operator: "T-Mobile US".to_string(),
            verified: true,
        }
    }

    /// Fail get_auth_url with the given message
    pub fn with_auth_url_failure(mut self, message: &str) -> Self {
        self.auth_url_failure = Some(message.to_string());
        self
    }

    /// Fail client_for_code with the given message
    pub fn with_exchange_failure(mut self, message: &str) -> Self {
        self.exchange_failure = Some(message.to_string());
        self
    }

    /// Fail get_operator with the given message
    pub fn with_operator_failure(mut self, message: &str) -> Self {
        self.operator_failure = Some(message.to_string());
        self
    }

    /// Fail verify_number with the given message
    pub fn with_verify_failure(mut self, message: &str) -> Self {
        self.verify_failure = Some(message.to_string());
        self
    }

    pub fn with_operator(mut self, operator: &str) -> Self {
        self.operator = operator.to_string();
        self
    }

    pub fn with_verified(mut self, verified: bool) -> Self {
        self.verified = verified;
        self
    }

    /// All (state, phone_number) pairs passed to get_auth_url
    pub fn auth_url_calls(&self) -> Vec<(String, String)> {
        self.auth_url_calls.lock().unwrap().clone()
    }

    /// All code exchanges that were attempted
    pub fn exchange_calls(&self) -> Vec<ExchangeCallArgs> {
        self.exchange_calls.lock().unwrap().clone()
    }

    /// Session identifiers passed to verify_number
    pub fn verify_session_ids(&self) -> Vec<String> {
        self.verify_session_ids.lock().unwrap().clone()
    }
}

impl Default for MockNumberVerify {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl BaseNumberVerify for MockNumberVerify {
    async fn get_auth_url(&self, state: &str, phone_number: &str) -> Result<String> {
        self.auth_url_calls
            .lock()
            .unwrap()
            .push((state.to_string(), phone_number.to_string()));

        if let Some(message) = &self.auth_url_failure {
            anyhow::bail!("{}", message);
        }
        Ok(format!(
            "https://oidc.glide.test/oauth2/auth?state={}&login_hint=tel:{}",
            state, phone_number
        ))
    }

    async fn client_for_code(
        &self,
        code: &str,
        phone_number: &str,
    ) -> Result<Box<dyn BaseNumberVerifyUser>> {
        self.exchange_calls.lock().unwrap().push(ExchangeCallArgs {
            code: code.to_string(),
            phone_number: phone_number.to_string(),
        });

        if let Some(message) = &self.exchange_failure {
            anyhow::bail!("{}", message);
        }
        Ok(Box::new(MockNumberVerifyUser {
            verify_session_ids: self.verify_session_ids.clone(),
            operator_failure: self.operator_failure.clone(),
            verify_failure: self.verify_failure.clone(),
            operator: self.operator.clone(),
            verified: self.verified,
        }))
    }
}

pub struct MockNumberVerifyUser {
    verify_session_ids: Arc<Mutex<Vec<String>>>,
    operator_failure: Option<String>,
    verify_failure: Option<String>,
    operator: String,
    verified: bool,
}

#[async_trait]
impl BaseNumberVerifyUser for MockNumberVerifyUser {
    async fn get_operator(&self) -> Result<String> {
        if let Some(message) = &self.operator_failure {
            anyhow::bail!("{}", message);
        }
        Ok(self.operator.clone())
    }

    async fn verify_number(&self, session_identifier: &str) -> Result<NumberVerifyResult> {
        self.verify_session_ids
            .lock()
            .unwrap()
            .push(session_identifier.to_string());

        if let Some(message) = &self.verify_failure {
            anyhow::bail!("{}", message);
        }
        Ok(NumberVerifyResult {
            device_phone_number_verified: self.verified,
        })
    }
}

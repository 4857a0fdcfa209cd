// Trait definitions for dependency injection
//
// These are INFRASTRUCTURE traits only - no business logic.
// Route handlers depend on these instead of the concrete Glide client so the
// whole HTTP surface is testable without network access.
//
// Naming convention: Base* for trait names (e.g., BaseNumberVerify)

use anyhow::Result;
use async_trait::async_trait;
use glide::NumberVerifyResult;

// =============================================================================
// Number Verify Trait (Infrastructure - carrier verification provider)
// =============================================================================

#[async_trait]
pub trait BaseNumberVerify: Send + Sync {
    /// Build the carrier authorization URL for a phone number, with the
    /// state token round-tripped through the redirect callback
    async fn get_auth_url(&self, state: &str, phone_number: &str) -> Result<String>;

    /// Exchange a callback authorization code for a user client scoped to
    /// that authorization
    async fn client_for_code(
        &self,
        code: &str,
        phone_number: &str,
    ) -> Result<Box<dyn BaseNumberVerifyUser>>;
}

#[async_trait]
pub trait BaseNumberVerifyUser: Send + Sync {
    /// Operator serving the authorized subscription
    async fn get_operator(&self) -> Result<String>;

    /// Verify the phone number, tagging the call with a correlation
    /// session identifier
    async fn verify_number(&self, session_identifier: &str) -> Result<NumberVerifyResult>;
}

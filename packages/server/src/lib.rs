// Number Verification Demo - server core
//
// Backend brokering the Glide number-verification flow: hands the browser a
// carrier authorization URL, tracks the in-flight authorization session,
// receives the OAuth-style redirect callback, and verifies the number.
//
// Session state lives in kernel/session.rs; the provider is reached through
// the Base* traits in kernel/traits.rs.

pub mod config;
pub mod kernel;
pub mod server;

pub use config::*;

//! Kernel module - server infrastructure and dependencies.

pub mod deps;
pub mod session;
pub mod test_dependencies;
pub mod traits;

pub use deps::{GlideAdapter, GlideUserAdapter};
pub use session::{CurrentSession, SessionData, SessionStore};
pub use test_dependencies::{MockNumberVerify, MockNumberVerifyUser};
pub use traits::*;

// HTTP routes
pub mod auth_url;
pub mod callback;
pub mod error;
pub mod session_data;
pub mod verify_number;

pub use auth_url::*;
pub use callback::*;
pub use error::*;
pub use session_data::*;
pub use verify_number::*;

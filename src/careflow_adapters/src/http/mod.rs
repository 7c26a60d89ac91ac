pub mod error;
pub mod session_transport;

pub use error::{AuthApiError, ErrorResponse};
pub use session_transport::DualChannelTransport;

// Re-export HTTP traits from careflow_core for convenience
pub use careflow_core::{
    AuthRequest, AuthResponseBuilder, AuthResponseHelpers, HttpSessionTransport,
};

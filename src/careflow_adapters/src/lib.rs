//! Concrete adapters for the CareFlow identity core.
//!
//! Everything that touches the outside world lives here: token signing,
//! password hashing, the Postgres and in-memory credential stores, outbound
//! email, the Google identity provider, configuration and the
//! framework-agnostic HTTP handlers.

pub mod auth_validation;
pub mod authentication;
pub mod config;
pub mod email;
pub mod handlers;
pub mod http;
pub mod oauth;
pub mod persistence;

pub use auth_validation::{RoleGate, RoleGateError};
pub use authentication::{AuthFlow, JwtConfig, JwtTokenService};
pub use self::http::{AuthApiError, DualChannelTransport, ErrorResponse};

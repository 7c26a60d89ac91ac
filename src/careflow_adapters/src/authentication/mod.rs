pub mod argon2_password_hasher;
pub mod auth_flow;
pub mod jwt_token_service;

pub use argon2_password_hasher::Argon2PasswordHasher;
pub use auth_flow::AuthFlow;
pub use jwt_token_service::{Claims, JwtConfig, JwtTokenService};

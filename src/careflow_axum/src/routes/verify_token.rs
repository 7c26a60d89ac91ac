//! Axum-specific token verification route.

use axum::Extension;
use axum::response::Response;
use careflow_adapters::handlers;
use careflow_core::SessionClaims;

use crate::adapters::response_builder;

/// Runs behind the Role Gate, which has already verified the access token
/// and attached its claims.
#[tracing::instrument(name = "Verify Token", skip_all, fields(user_id = claims.user_id))]
pub async fn verify_token(Extension(claims): Extension<SessionClaims>) -> Response {
    handlers::handle_verify_token(&claims, response_builder())
}

//! Role Gate middleware for protected route families.

use axum::extract::{Request, State};
use axum::middleware::Next;
use axum::response::Response;
use careflow_adapters::auth_validation::RoleGate;
use careflow_adapters::http::{AuthApiError, DualChannelTransport};
use careflow_core::{AuthValidator, CredentialStore, TokenService};

use crate::adapters::render_error;

/// Validate the caller with the route family's [`RoleGate`] and attach the
/// verified `SessionClaims` to the request extensions.
///
/// Install with `axum::middleware::from_fn_with_state((gate, transport), require_role)`.
/// Rejections other than a missing or malformed header also expire the
/// session cookie, whatever the client shape.
pub async fn require_role<S, T>(
    State((gate, transport)): State<(RoleGate<S, T>, DualChannelTransport)>,
    req: Request,
    next: Next,
) -> Response
where
    S: CredentialStore + 'static,
    T: TokenService + 'static,
{
    let (parts, body) = req.into_parts();

    match gate.validate(&parts).await {
        Ok(claims) => {
            let mut req = Request::from_parts(parts, body);
            req.extensions_mut().insert(claims);
            next.run(req).await
        }
        Err(e) => {
            tracing::warn!(error = %e, path = %parts.uri.path(), "role gate rejected request");
            render_error(AuthApiError::from(e), &transport)
        }
    }
}

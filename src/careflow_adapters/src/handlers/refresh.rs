use careflow_core::{
    AuthRequest, AuthResponseBuilder, CredentialStore, EmailClient, HttpSessionTransport,
    OAuthProvider,
};

use crate::authentication::AuthFlow;
use crate::http::AuthApiError;

/// Rotate a session: verify the presented refresh token, re-check the
/// user's current role and issue a brand-new pair.
///
/// The token comes from the session cookie for web clients and from the
/// `refreshToken` body field for mobile clients. Role drift clears the
/// cookie of web clients.
pub async fn handle_refresh<S, E, O, R, B>(
    flow: &AuthFlow<S, E, O>,
    req: &R,
    body: &[u8],
    builder: B,
) -> Result<B::Response, AuthApiError>
where
    S: CredentialStore + 'static,
    E: EmailClient + 'static,
    O: OAuthProvider + 'static,
    R: AuthRequest,
    B: AuthResponseBuilder,
{
    let transport = flow.transport();
    let shape = transport.client_shape(req);

    let refresh_token = transport
        .extract_refresh_token(req, shape, body)
        .ok_or_else(|| AuthApiError::Unauthorized("Refresh token not found".to_owned()))?;

    let session = flow
        .refresh(&refresh_token)
        .await
        .map_err(|e| AuthApiError::from(e).for_client(shape))?;

    Ok(transport.create_session_response(builder, shape, session, "Token refreshed successfully"))
}

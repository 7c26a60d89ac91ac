//! Framework-agnostic login handler.

use careflow_core::{
    AuthRequest, AuthResponseBuilder, CredentialStore, Email, EmailClient, HttpSessionTransport,
    OAuthProvider,
};
use secrecy::Secret;
use serde::Deserialize;

use crate::authentication::AuthFlow;
use crate::http::AuthApiError;

#[derive(Debug, Deserialize)]
pub struct LoginBody {
    pub email: Secret<String>,
    pub password: Secret<String>,
}

/// Handle login request - framework agnostic.
///
/// Unknown emails and wrong passwords produce the same `404 Invalid credentials`.
/// On success the session is delivered according to the request's client shape.
pub async fn handle_login<S, E, O, R, B>(
    flow: &AuthFlow<S, E, O>,
    req: &R,
    body: LoginBody,
    builder: B,
) -> Result<B::Response, AuthApiError>
where
    S: CredentialStore + 'static,
    E: EmailClient + 'static,
    O: OAuthProvider + 'static,
    R: AuthRequest,
    B: AuthResponseBuilder,
{
    let shape = flow.transport().client_shape(req);
    let email = Email::try_from(body.email).map_err(|e| AuthApiError::Validation(e.to_string()))?;

    let session = flow.login(email, body.password).await?;

    Ok(flow
        .transport()
        .create_session_response(builder, shape, session, "Login successful"))
}

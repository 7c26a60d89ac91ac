//! Framework-agnostic email verification handler.

use careflow_core::{
    AuthRequest, AuthResponseBuilder, CredentialStore, Email, EmailClient, HttpSessionTransport,
    OAuthProvider, VerificationCode,
};
use secrecy::Secret;
use serde::Deserialize;

use crate::authentication::AuthFlow;
use crate::http::AuthApiError;

#[derive(Debug, Deserialize)]
pub struct VerifyEmailBody {
    pub email: Secret<String>,
    pub code: String,
}

/// Check the emailed code and, on success, log the user straight in.
pub async fn handle_verify_email<S, E, O, R, B>(
    flow: &AuthFlow<S, E, O>,
    req: &R,
    body: VerifyEmailBody,
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
    let code = VerificationCode::parse(body.code)?;

    let session = flow.verify_email(email, code).await?;

    Ok(flow
        .transport()
        .create_session_response(builder, shape, session, "Email verified successfully"))
}

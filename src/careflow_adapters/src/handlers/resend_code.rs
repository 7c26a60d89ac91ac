use careflow_core::{
    AuthResponseBuilder, AuthResponseHelpers, CredentialStore, Email, EmailClient, OAuthProvider,
};
use secrecy::Secret;
use serde::Deserialize;

use crate::authentication::AuthFlow;
use crate::http::AuthApiError;

#[derive(Debug, Deserialize)]
pub struct ResendCodeBody {
    pub email: Secret<String>,
}

/// Replace the pending verification code with a fresh one and mail it again.
pub async fn handle_resend_code<S, E, O, B>(
    flow: &AuthFlow<S, E, O>,
    body: ResendCodeBody,
    builder: B,
) -> Result<B::Response, AuthApiError>
where
    S: CredentialStore + 'static,
    E: EmailClient + 'static,
    O: OAuthProvider + 'static,
    B: AuthResponseBuilder,
{
    let email = Email::try_from(body.email).map_err(|e| AuthApiError::Validation(e.to_string()))?;

    flow.resend_code(email).await?;

    Ok(builder.success(200, "Verification code sent", None))
}

use careflow_core::{
    AuthRequest, AuthResponseBuilder, CredentialStore, EmailClient, HttpSessionTransport,
    OAuthProvider,
};
use secrecy::{ExposeSecret, Secret};
use serde::Deserialize;

use crate::authentication::AuthFlow;
use crate::http::AuthApiError;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OAuthLoginBody {
    pub access_token: Secret<String>,
}

/// Exchange a provider access token for a CareFlow session, provisioning a
/// verified patient account on first sight of the email.
pub async fn handle_oauth_login<S, E, O, R, B>(
    flow: &AuthFlow<S, E, O>,
    req: &R,
    body: OAuthLoginBody,
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
    if body.access_token.expose_secret().trim().is_empty() {
        return Err(AuthApiError::Validation("accessToken is required".to_owned()));
    }

    let session = flow.oauth_login(body.access_token).await?;

    Ok(flow
        .transport()
        .create_session_response(builder, shape, session, "Login successful"))
}

//! Framework-agnostic registration handler.

use careflow_core::{
    AuthResponseBuilder, AuthResponseHelpers, CredentialStore, EmailClient, OAuthProvider,
    Registration, Role,
};
use secrecy::Secret;
use serde::Deserialize;

use crate::authentication::AuthFlow;
use crate::http::AuthApiError;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterBody {
    pub first_name: String,
    pub last_name: String,
    pub email: Secret<String>,
    pub password: Secret<String>,
    #[serde(default)]
    pub role: Option<Role>,
    #[serde(default)]
    pub specialty_id: Option<i64>,
    #[serde(default)]
    pub license_number: Option<String>,
}

/// Create an unverified account with its role-profile and mail out the code.
///
/// Answers 201 with no session; the client continues with email verification.
pub async fn handle_register<S, E, O, B>(
    flow: &AuthFlow<S, E, O>,
    body: RegisterBody,
    builder: B,
) -> Result<B::Response, AuthApiError>
where
    S: CredentialStore + 'static,
    E: EmailClient + 'static,
    O: OAuthProvider + 'static,
    B: AuthResponseBuilder,
{
    let registration = Registration::parse(
        body.first_name,
        body.last_name,
        body.email,
        body.password,
        body.role,
        body.specialty_id,
        body.license_number,
    )?;

    flow.register(registration).await?;

    Ok(builder.success(201, "Please validate your email", None))
}

//! Handlers for the caller's own account and role-profile.
//!
//! Every handler here runs behind the Role Gate and receives the
//! [`SessionClaims`] it attached to the request.

use careflow_core::{
    AuthResponseBuilder, AuthResponseHelpers, CredentialStore, CredentialStoreError, EmailClient,
    OAuthProvider, ProfileUpdate, SessionClaims,
};
use serde::{Deserialize, Serialize};

use crate::authentication::AuthFlow;
use crate::http::AuthApiError;

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProfileBody {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub image: Option<String>,
    pub bio: Option<String>,
    pub consultation_fee: Option<f64>,
    pub is_available: Option<bool>,
}

fn to_data<T: Serialize>(value: &T) -> Result<serde_json::Value, AuthApiError> {
    serde_json::to_value(value).map_err(|e| AuthApiError::Internal(e.to_string()))
}

/// Return the caller's profile as currently stored.
pub async fn handle_get_me<S, E, O, B>(
    flow: &AuthFlow<S, E, O>,
    claims: &SessionClaims,
    builder: B,
) -> Result<B::Response, AuthApiError>
where
    S: CredentialStore + 'static,
    E: EmailClient + 'static,
    O: OAuthProvider + 'static,
    B: AuthResponseBuilder,
{
    let profile = match flow.current_user(claims.user_id).await {
        Ok(profile) => profile,
        // The account vanished after the token was issued.
        Err(CredentialStoreError::UserNotFound) => {
            return Err(AuthApiError::SessionRejected("User not found".to_owned()));
        }
        Err(e) => return Err(e.into()),
    };

    Ok(builder.success(200, "Profile retrieved successfully", Some(to_data(&profile)?)))
}

/// Apply a partial update to the caller's account; doctor fields also
/// update the doctor role-profile in the same transaction.
pub async fn handle_update_me<S, E, O, B>(
    flow: &AuthFlow<S, E, O>,
    claims: &SessionClaims,
    body: UpdateProfileBody,
    builder: B,
) -> Result<B::Response, AuthApiError>
where
    S: CredentialStore + 'static,
    E: EmailClient + 'static,
    O: OAuthProvider + 'static,
    B: AuthResponseBuilder,
{
    let update = ProfileUpdate::parse(
        body.first_name,
        body.last_name,
        body.image,
        body.bio,
        body.consultation_fee,
        body.is_available,
    )?;

    let profile = flow.update_profile(claims.user_id, update).await?;

    Ok(builder.success(200, "Profile updated successfully", Some(to_data(&profile)?)))
}

pub async fn handle_patient_profile<S, E, O, B>(
    flow: &AuthFlow<S, E, O>,
    claims: &SessionClaims,
    builder: B,
) -> Result<B::Response, AuthApiError>
where
    S: CredentialStore + 'static,
    E: EmailClient + 'static,
    O: OAuthProvider + 'static,
    B: AuthResponseBuilder,
{
    let profile = flow.patient_profile(claims.user_id).await?;
    Ok(builder.success(200, "Patient profile retrieved successfully", Some(to_data(&profile)?)))
}

pub async fn handle_doctor_profile<S, E, O, B>(
    flow: &AuthFlow<S, E, O>,
    claims: &SessionClaims,
    builder: B,
) -> Result<B::Response, AuthApiError>
where
    S: CredentialStore + 'static,
    E: EmailClient + 'static,
    O: OAuthProvider + 'static,
    B: AuthResponseBuilder,
{
    let profile = flow.doctor_profile(claims.user_id).await?;
    Ok(builder.success(200, "Doctor profile retrieved successfully", Some(to_data(&profile)?)))
}

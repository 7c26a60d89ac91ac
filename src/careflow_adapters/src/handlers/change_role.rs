use careflow_core::{
    AuthResponseBuilder, AuthResponseHelpers, CredentialStore, EmailClient, OAuthProvider, Role,
    UserId,
};
use serde::Deserialize;

use crate::authentication::AuthFlow;
use crate::http::AuthApiError;

#[derive(Debug, Deserialize)]
pub struct ChangeRoleBody {
    pub role: Role,
}

/// Admin-only role reassignment.
///
/// Tokens already issued to the user keep their old role and are refused
/// by the Role Gate and by refresh from now on.
pub async fn handle_change_role<S, E, O, B>(
    flow: &AuthFlow<S, E, O>,
    user_id: UserId,
    body: ChangeRoleBody,
    builder: B,
) -> Result<B::Response, AuthApiError>
where
    S: CredentialStore + 'static,
    E: EmailClient + 'static,
    O: OAuthProvider + 'static,
    B: AuthResponseBuilder,
{
    let profile = flow.change_role(user_id, body.role).await?;
    let data = serde_json::to_value(&profile).map_err(|e| AuthApiError::Internal(e.to_string()))?;

    Ok(builder.success(200, "Role updated successfully", Some(data)))
}

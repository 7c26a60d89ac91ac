use careflow_core::{
    AuthSession, CredentialStore, CredentialStoreError, TokenClass, TokenError, TokenService,
};
use secrecy::{ExposeSecret, Secret};

use super::session::issue_session;

/// Error types specific to the refresh use case
#[derive(Debug, thiserror::Error)]
pub enum RefreshError {
    #[error("Invalid or expired refresh token")]
    InvalidToken(#[source] TokenError),
    #[error("User not found")]
    UserNotFound,
    /// The role embedded in the refresh token no longer matches the account.
    #[error("User role has changed. Please log in again.")]
    RoleChanged,
    #[error("Credential store error: {0}")]
    CredentialStoreError(CredentialStoreError),
    #[error("Failed to issue tokens: {0}")]
    TokenError(TokenError),
}

impl From<CredentialStoreError> for RefreshError {
    fn from(error: CredentialStoreError) -> Self {
        match error {
            CredentialStoreError::UserNotFound => RefreshError::UserNotFound,
            other => RefreshError::CredentialStoreError(other),
        }
    }
}

/// Refresh use case - rotates a refresh token into a brand-new pair
///
/// The old refresh token is not recorded anywhere; it stays cryptographically
/// valid until it expires. The only revocation is the role-drift check.
pub struct RefreshUseCase<'a, S, T>
where
    S: CredentialStore,
    T: TokenService,
{
    credential_store: &'a S,
    token_service: &'a T,
}

impl<'a, S, T> RefreshUseCase<'a, S, T>
where
    S: CredentialStore,
    T: TokenService,
{
    pub fn new(credential_store: &'a S, token_service: &'a T) -> Self {
        Self {
            credential_store,
            token_service,
        }
    }

    #[tracing::instrument(name = "RefreshUseCase::execute", skip_all)]
    pub async fn execute(&self, refresh_token: &Secret<String>) -> Result<AuthSession, RefreshError> {
        let claims = self
            .token_service
            .verify(refresh_token.expose_secret(), TokenClass::Refresh)
            .map_err(RefreshError::InvalidToken)?;

        let user = self.credential_store.find_by_id(claims.user_id).await?;

        if user.role != claims.role {
            tracing::info!(
                user_id = user.id,
                token_role = %claims.role,
                current_role = %user.role,
                "refresh refused after role change"
            );
            return Err(RefreshError::RoleChanged);
        }

        issue_session(self.token_service, &user).map_err(RefreshError::TokenError)
    }
}

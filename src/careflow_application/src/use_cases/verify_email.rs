use careflow_core::{
    AuthSession, CredentialStore, CredentialStoreError, Email, TokenError, TokenService,
    VerificationCode,
};
use chrono::Utc;

use super::session::issue_session;

/// Error types specific to the verify email use case
#[derive(Debug, thiserror::Error)]
pub enum VerifyEmailError {
    #[error("User not found")]
    UserNotFound,
    #[error("Email already verified")]
    AlreadyVerified,
    #[error("Verification code has expired")]
    CodeExpired,
    #[error("Invalid verification code")]
    InvalidCode,
    #[error("Credential store error: {0}")]
    CredentialStoreError(CredentialStoreError),
    #[error("Failed to issue tokens: {0}")]
    TokenError(#[from] TokenError),
}

impl From<CredentialStoreError> for VerifyEmailError {
    fn from(error: CredentialStoreError) -> Self {
        match error {
            CredentialStoreError::UserNotFound => VerifyEmailError::UserNotFound,
            other => VerifyEmailError::CredentialStoreError(other),
        }
    }
}

/// Verify email use case - consumes the outstanding code and logs the user in
pub struct VerifyEmailUseCase<'a, S, T>
where
    S: CredentialStore,
    T: TokenService,
{
    credential_store: &'a S,
    token_service: &'a T,
}

impl<'a, S, T> VerifyEmailUseCase<'a, S, T>
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

    /// Execute the verify email use case
    ///
    /// Expiry is checked before the code itself, so a stale code reports
    /// `CodeExpired` even when it matches.
    #[tracing::instrument(name = "VerifyEmailUseCase::execute", skip(self, code))]
    pub async fn execute(
        &self,
        email: Email,
        code: VerificationCode,
    ) -> Result<AuthSession, VerifyEmailError> {
        let user = self.credential_store.find_by_email(&email).await?;

        if user.verified {
            return Err(VerifyEmailError::AlreadyVerified);
        }

        let Some(pending) = user.verification else {
            return Err(VerifyEmailError::CodeExpired);
        };
        if pending.is_expired_at(Utc::now()) {
            return Err(VerifyEmailError::CodeExpired);
        }
        if pending.code != code {
            return Err(VerifyEmailError::InvalidCode);
        }

        let user = self.credential_store.mark_verified(&email).await?;
        tracing::info!(user_id = user.id, "email verified");

        Ok(issue_session(self.token_service, &user)?)
    }
}

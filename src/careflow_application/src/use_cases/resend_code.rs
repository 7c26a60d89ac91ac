use careflow_core::{
    CredentialStore, CredentialStoreError, Email, EmailClient, EmailClientError,
    PendingVerification, VerificationCodeError,
};
use chrono::Utc;

/// Error types specific to the resend code use case
#[derive(Debug, thiserror::Error)]
pub enum ResendCodeError {
    #[error("User not found")]
    UserNotFound,
    #[error("Email already verified")]
    AlreadyVerified,
    #[error("Credential store error: {0}")]
    CredentialStoreError(CredentialStoreError),
    #[error("Failed to generate verification code: {0}")]
    VerificationCodeError(#[from] VerificationCodeError),
    #[error("Failed to send verification email: {0}")]
    EmailError(#[from] EmailClientError),
}

impl From<CredentialStoreError> for ResendCodeError {
    fn from(error: CredentialStoreError) -> Self {
        match error {
            CredentialStoreError::UserNotFound => ResendCodeError::UserNotFound,
            other => ResendCodeError::CredentialStoreError(other),
        }
    }
}

/// Resend code use case - replaces the outstanding code with a fresh one
///
/// The previous code stops being accepted as soon as the new one is stored.
pub struct ResendCodeUseCase<'a, S, E>
where
    S: CredentialStore,
    E: EmailClient,
{
    credential_store: &'a S,
    email_client: &'a E,
}

impl<'a, S, E> ResendCodeUseCase<'a, S, E>
where
    S: CredentialStore,
    E: EmailClient,
{
    pub fn new(credential_store: &'a S, email_client: &'a E) -> Self {
        Self {
            credential_store,
            email_client,
        }
    }

    #[tracing::instrument(name = "ResendCodeUseCase::execute", skip(self))]
    pub async fn execute(&self, email: Email) -> Result<(), ResendCodeError> {
        let user = self.credential_store.find_by_email(&email).await?;

        if user.verified {
            return Err(ResendCodeError::AlreadyVerified);
        }

        let pending = PendingVerification::issue(Utc::now())?;
        self.credential_store
            .replace_verification(&email, pending.clone())
            .await?;

        self.email_client
            .send_verification_code(&email, &pending.code)
            .await?;

        Ok(())
    }
}

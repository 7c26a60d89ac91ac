use careflow_core::{
    CredentialStore, CredentialStoreError, EmailClient, EmailClientError, NewUser,
    PasswordHashError, PasswordHasher, PendingVerification, Registration, UserProfile,
    VerificationCodeError,
};
use chrono::Utc;

/// Error types specific to the register use case
#[derive(Debug, thiserror::Error)]
pub enum RegisterError {
    #[error("Credential store error: {0}")]
    CredentialStoreError(#[from] CredentialStoreError),
    #[error("Failed to hash password: {0}")]
    PasswordHashError(#[from] PasswordHashError),
    #[error("Failed to generate verification code: {0}")]
    VerificationCodeError(#[from] VerificationCodeError),
    /// The account was committed but the code never reached the user.
    #[error("Failed to send verification email: {0}")]
    EmailError(#[from] EmailClientError),
}

/// Register use case - creates an unverified account and mails its code
pub struct RegisterUseCase<'a, S, H, E>
where
    S: CredentialStore,
    H: PasswordHasher,
    E: EmailClient,
{
    credential_store: &'a S,
    password_hasher: &'a H,
    email_client: &'a E,
}

impl<'a, S, H, E> RegisterUseCase<'a, S, H, E>
where
    S: CredentialStore,
    H: PasswordHasher,
    E: EmailClient,
{
    pub fn new(credential_store: &'a S, password_hasher: &'a H, email_client: &'a E) -> Self {
        Self {
            credential_store,
            password_hasher,
            email_client,
        }
    }

    /// Execute the register use case
    ///
    /// The user row and its role-profile are written in one transaction
    /// before any email is attempted. A delivery failure is reported as an
    /// error but leaves the committed account in place.
    #[tracing::instrument(name = "RegisterUseCase::execute", skip_all, fields(role = %registration.role()))]
    pub async fn execute(&self, registration: Registration) -> Result<UserProfile, RegisterError> {
        match self
            .credential_store
            .find_by_email(&registration.email)
            .await
        {
            Ok(_) => return Err(CredentialStoreError::UserAlreadyExists.into()),
            Err(CredentialStoreError::UserNotFound) => {}
            Err(e) => return Err(e.into()),
        }

        let password_hash = self.password_hasher.hash(registration.password).await?;
        let pending = PendingVerification::issue(Utc::now())?;

        let user = self
            .credential_store
            .create_with_profile(NewUser {
                first_name: registration.first_name.into_inner(),
                last_name: registration.last_name.into_inner(),
                email: registration.email,
                image: None,
                password_hash: Some(password_hash),
                verified: false,
                verification: Some(pending.clone()),
                profile: registration.profile,
            })
            .await?;

        self.email_client
            .send_verification_code(&user.email, &pending.code)
            .await?;

        tracing::info!(user_id = user.id, "registered new account");
        Ok(user.profile())
    }
}

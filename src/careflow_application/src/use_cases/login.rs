use careflow_core::{
    AuthSession, CredentialStore, CredentialStoreError, Email, PasswordHashError, PasswordHasher,
    TokenError, TokenService,
};
use secrecy::Secret;

use super::session::issue_session;

/// Error types specific to login use case
#[derive(Debug, thiserror::Error)]
pub enum LoginError {
    /// Unknown email and wrong password are reported identically.
    #[error("Invalid credentials")]
    InvalidCredentials,
    #[error("Please verify your email before logging in")]
    EmailNotVerified,
    #[error("Credential store error: {0}")]
    CredentialStoreError(CredentialStoreError),
    #[error("Password verification failed: {0}")]
    PasswordHashError(#[from] PasswordHashError),
    #[error("Failed to issue tokens: {0}")]
    TokenError(#[from] TokenError),
}

impl From<CredentialStoreError> for LoginError {
    fn from(error: CredentialStoreError) -> Self {
        match error {
            CredentialStoreError::UserNotFound => LoginError::InvalidCredentials,
            other => LoginError::CredentialStoreError(other),
        }
    }
}

/// Login use case - password authentication followed by token issuance
pub struct LoginUseCase<'a, S, H, T>
where
    S: CredentialStore,
    H: PasswordHasher,
    T: TokenService,
{
    credential_store: &'a S,
    password_hasher: &'a H,
    token_service: &'a T,
}

impl<'a, S, H, T> LoginUseCase<'a, S, H, T>
where
    S: CredentialStore,
    H: PasswordHasher,
    T: TokenService,
{
    pub fn new(credential_store: &'a S, password_hasher: &'a H, token_service: &'a T) -> Self {
        Self {
            credential_store,
            password_hasher,
            token_service,
        }
    }

    /// Execute the login use case
    ///
    /// An unverified account is refused before the password is looked at,
    /// so its length or content never changes the outcome.
    #[tracing::instrument(name = "LoginUseCase::execute", skip(self, password))]
    pub async fn execute(
        &self,
        email: Email,
        password: Secret<String>,
    ) -> Result<AuthSession, LoginError> {
        let user = self.credential_store.find_by_email(&email).await?;

        if !user.verified {
            return Err(LoginError::EmailNotVerified);
        }

        // OAuth-only accounts have no password to match against.
        let Some(password_hash) = user.password_hash.clone() else {
            return Err(LoginError::InvalidCredentials);
        };

        if !self.password_hasher.verify(password_hash, password).await? {
            return Err(LoginError::InvalidCredentials);
        }

        Ok(issue_session(self.token_service, &user)?)
    }
}

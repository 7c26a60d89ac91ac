use careflow_core::{
    AuthSession, CredentialStore, CredentialStoreError, Email, NewUser, OAuthError,
    OAuthProvider, RoleProfileDraft, TokenError, TokenService, UserRecord,
};
use secrecy::Secret;

use super::session::issue_session;

/// Error types specific to the third-party login use case
#[derive(Debug, thiserror::Error)]
pub enum OAuthLoginError {
    #[error("Identity provider rejected the token: {0}")]
    ExchangeFailed(#[from] OAuthError),
    #[error("Identity provider returned no usable email")]
    MissingEmail,
    #[error("Email is not verified with the identity provider")]
    EmailNotVerified,
    #[error("Credential store error: {0}")]
    CredentialStoreError(#[from] CredentialStoreError),
    #[error("Failed to issue tokens: {0}")]
    TokenError(#[from] TokenError),
}

/// OAuth login use case - exchanges a provider token and signs the user in,
/// provisioning a verified patient account on first sight.
pub struct OAuthLoginUseCase<'a, S, O, T>
where
    S: CredentialStore,
    O: OAuthProvider,
    T: TokenService,
{
    credential_store: &'a S,
    oauth_provider: &'a O,
    token_service: &'a T,
}

impl<'a, S, O, T> OAuthLoginUseCase<'a, S, O, T>
where
    S: CredentialStore,
    O: OAuthProvider,
    T: TokenService,
{
    pub fn new(credential_store: &'a S, oauth_provider: &'a O, token_service: &'a T) -> Self {
        Self {
            credential_store,
            oauth_provider,
            token_service,
        }
    }

    #[tracing::instrument(name = "OAuthLoginUseCase::execute", skip_all)]
    pub async fn execute(
        &self,
        provider_token: Secret<String>,
    ) -> Result<AuthSession, OAuthLoginError> {
        let external = self.oauth_provider.exchange(&provider_token).await?;

        if external.email.is_empty() {
            return Err(OAuthLoginError::MissingEmail);
        }
        if !external.email_verified {
            return Err(OAuthLoginError::EmailNotVerified);
        }
        let email = Email::try_from(Secret::from(external.email))
            .map_err(|_| OAuthLoginError::MissingEmail)?;

        let user = match self.credential_store.find_by_email(&email).await {
            Ok(existing) => self.refresh_avatar(existing, external.picture).await?,
            Err(CredentialStoreError::UserNotFound) => {
                let new_user = NewUser {
                    first_name: external.given_name,
                    last_name: external.family_name,
                    email: email.clone(),
                    image: external.picture,
                    password_hash: None,
                    verified: true,
                    verification: None,
                    profile: RoleProfileDraft::Patient,
                };
                match self.credential_store.create_with_profile(new_user).await {
                    Ok(created) => {
                        tracing::info!(user_id = created.id, "provisioned account from identity provider");
                        created
                    }
                    // A concurrent first login created the account first.
                    Err(CredentialStoreError::UserAlreadyExists) => {
                        self.credential_store.find_by_email(&email).await?
                    }
                    Err(e) => return Err(e.into()),
                }
            }
            Err(e) => return Err(e.into()),
        };

        Ok(issue_session(self.token_service, &user)?)
    }

    async fn refresh_avatar(
        &self,
        user: UserRecord,
        picture: Option<String>,
    ) -> Result<UserRecord, CredentialStoreError> {
        match picture {
            Some(picture) if !picture.is_empty() && picture != user.image => {
                self.credential_store.update_image(user.id, &picture).await
            }
            _ => Ok(user),
        }
    }
}

use std::sync::Arc;

use careflow_application::{
    ChangeRoleUseCase, DoctorProfileUseCase, GetProfileUseCase, LoginError, LoginUseCase,
    OAuthLoginError, OAuthLoginUseCase, PatientProfileUseCase, RefreshError, RefreshUseCase,
    RegisterError, RegisterUseCase, ResendCodeError, ResendCodeUseCase, UpdateProfileUseCase,
    VerifyEmailError, VerifyEmailUseCase,
};
use careflow_core::{
    AuthSession, CredentialStore, CredentialStoreError, DoctorProfile, Email, EmailClient,
    OAuthProvider, PatientProfile, ProfileUpdate, Registration, Role, RoleRequirement,
    UserId, UserProfile, VerificationCode,
};
use secrecy::Secret;

use super::{Argon2PasswordHasher, JwtConfig, JwtTokenService};
use crate::auth_validation::RoleGate;
use crate::http::DualChannelTransport;

/// The Auth Flow controller: wires the adapters into the use cases and owns
/// the session transport used to deliver their results.
///
/// Cloning is cheap; every collaborator sits behind an `Arc`.
pub struct AuthFlow<S, E, O> {
    credential_store: Arc<S>,
    email_client: Arc<E>,
    oauth_provider: Arc<O>,
    token_service: Arc<JwtTokenService>,
    password_hasher: Argon2PasswordHasher,
    transport: DualChannelTransport,
}

impl<S, E, O> Clone for AuthFlow<S, E, O> {
    fn clone(&self) -> Self {
        Self {
            credential_store: Arc::clone(&self.credential_store),
            email_client: Arc::clone(&self.email_client),
            oauth_provider: Arc::clone(&self.oauth_provider),
            token_service: Arc::clone(&self.token_service),
            password_hasher: self.password_hasher.clone(),
            transport: self.transport.clone(),
        }
    }
}

impl<S, E, O> AuthFlow<S, E, O>
where
    S: CredentialStore + 'static,
    E: EmailClient + 'static,
    O: OAuthProvider + 'static,
{
    pub fn new(
        credential_store: S,
        email_client: E,
        oauth_provider: O,
        jwt_config: JwtConfig,
        transport: DualChannelTransport,
    ) -> Self {
        Self {
            credential_store: Arc::new(credential_store),
            email_client: Arc::new(email_client),
            oauth_provider: Arc::new(oauth_provider),
            token_service: Arc::new(JwtTokenService::new(jwt_config)),
            password_hasher: Argon2PasswordHasher::new(),
            transport,
        }
    }

    pub fn credential_store(&self) -> &S {
        &self.credential_store
    }

    pub fn email_client(&self) -> &E {
        &self.email_client
    }

    pub fn token_service(&self) -> &JwtTokenService {
        &self.token_service
    }

    pub fn transport(&self) -> &DualChannelTransport {
        &self.transport
    }

    /// A validator for routes that demand `requirement`.
    pub fn role_gate(&self, requirement: RoleRequirement) -> RoleGate<S, JwtTokenService> {
        RoleGate::new(
            Arc::clone(&self.credential_store),
            Arc::clone(&self.token_service),
            requirement,
        )
    }

    pub async fn register(&self, registration: Registration) -> Result<UserProfile, RegisterError> {
        RegisterUseCase::new(
            self.credential_store.as_ref(),
            &self.password_hasher,
            self.email_client.as_ref(),
        )
        .execute(registration)
        .await
    }

    pub async fn login(
        &self,
        email: Email,
        password: Secret<String>,
    ) -> Result<AuthSession, LoginError> {
        LoginUseCase::new(
            self.credential_store.as_ref(),
            &self.password_hasher,
            self.token_service.as_ref(),
        )
        .execute(email, password)
        .await
    }

    pub async fn oauth_login(
        &self,
        provider_token: Secret<String>,
    ) -> Result<AuthSession, OAuthLoginError> {
        OAuthLoginUseCase::new(
            self.credential_store.as_ref(),
            self.oauth_provider.as_ref(),
            self.token_service.as_ref(),
        )
        .execute(provider_token)
        .await
    }

    pub async fn verify_email(
        &self,
        email: Email,
        code: VerificationCode,
    ) -> Result<AuthSession, VerifyEmailError> {
        VerifyEmailUseCase::new(self.credential_store.as_ref(), self.token_service.as_ref())
            .execute(email, code)
            .await
    }

    pub async fn resend_code(&self, email: Email) -> Result<(), ResendCodeError> {
        ResendCodeUseCase::new(self.credential_store.as_ref(), self.email_client.as_ref())
            .execute(email)
            .await
    }

    pub async fn refresh(&self, refresh_token: &Secret<String>) -> Result<AuthSession, RefreshError> {
        RefreshUseCase::new(self.credential_store.as_ref(), self.token_service.as_ref())
            .execute(refresh_token)
            .await
    }

    pub async fn current_user(&self, user_id: UserId) -> Result<UserProfile, CredentialStoreError> {
        GetProfileUseCase::new(self.credential_store.as_ref())
            .execute(user_id)
            .await
    }

    pub async fn update_profile(
        &self,
        user_id: UserId,
        update: ProfileUpdate,
    ) -> Result<UserProfile, CredentialStoreError> {
        UpdateProfileUseCase::new(self.credential_store.as_ref())
            .execute(user_id, update)
            .await
    }

    pub async fn patient_profile(
        &self,
        user_id: UserId,
    ) -> Result<PatientProfile, CredentialStoreError> {
        PatientProfileUseCase::new(self.credential_store.as_ref())
            .execute(user_id)
            .await
    }

    pub async fn doctor_profile(
        &self,
        user_id: UserId,
    ) -> Result<DoctorProfile, CredentialStoreError> {
        DoctorProfileUseCase::new(self.credential_store.as_ref())
            .execute(user_id)
            .await
    }

    pub async fn change_role(
        &self,
        user_id: UserId,
        role: Role,
    ) -> Result<UserProfile, CredentialStoreError> {
        ChangeRoleUseCase::new(self.credential_store.as_ref())
            .execute(user_id, role)
            .await
    }
}

use async_trait::async_trait;
use secrecy::Secret;
use serde::Deserialize;
use thiserror::Error;

use crate::domain::{
    email::Email,
    password::Password,
    role::Role,
    session::{SessionClaims, SessionTokens, TokenClass},
    user::UserId,
    verification_code::VerificationCode,
};

// EmailClient port trait and errors
#[derive(Debug, Error)]
pub enum EmailClientError {
    #[error("Failed to render email: {0}")]
    Template(String),
    #[error("Failed to deliver email: {0}")]
    Delivery(String),
}

#[async_trait]
pub trait EmailClient: Send + Sync {
    async fn send_verification_code(
        &self,
        recipient: &Email,
        code: &VerificationCode,
    ) -> Result<(), EmailClientError>;
}

// OAuthProvider port trait and errors
#[derive(Debug, Error)]
pub enum OAuthError {
    #[error("Token exchange with the identity provider failed: {0}")]
    ExchangeFailed(String),
    #[error("Identity provider rejected the access token")]
    InvalidToken,
    #[error("Unexpected identity provider response: {0}")]
    InvalidResponse(String),
}

/// Profile returned by a third-party identity provider.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ExternalProfile {
    #[serde(default)]
    pub email: String,
    #[serde(default, rename = "verified_email")]
    pub email_verified: bool,
    #[serde(default)]
    pub given_name: String,
    #[serde(default)]
    pub family_name: String,
    #[serde(default)]
    pub picture: Option<String>,
}

#[async_trait]
pub trait OAuthProvider: Send + Sync {
    async fn exchange(&self, access_token: &Secret<String>) -> Result<ExternalProfile, OAuthError>;
}

// PasswordHasher port trait and errors
#[derive(Debug, Error)]
pub enum PasswordHashError {
    #[error("Password hashing failed: {0}")]
    Hashing(String),
    #[error("Stored password hash is malformed: {0}")]
    MalformedHash(String),
}

#[async_trait]
pub trait PasswordHasher: Send + Sync {
    async fn hash(&self, password: Password) -> Result<Secret<String>, PasswordHashError>;

    /// Returns `Ok(false)` when the candidate does not match the hash.
    ///
    /// The candidate is whatever the caller typed and is not held to the
    /// registration password rules.
    async fn verify(
        &self,
        expected_hash: Secret<String>,
        candidate: Secret<String>,
    ) -> Result<bool, PasswordHashError>;
}

// TokenService port trait and errors
#[derive(Debug, Error)]
pub enum TokenError {
    #[error("Invalid token: {0}")]
    InvalidToken(String),
    #[error("Unexpected token error: {0}")]
    Unexpected(String),
}

/// Stateless issuing and verification of signed session tokens.
///
/// There is no token registry: a token is valid while its signature checks
/// out, it has not expired, and its class is the expected one.
pub trait TokenService: Send + Sync {
    fn issue(
        &self,
        user_id: UserId,
        role: Role,
        class: TokenClass,
    ) -> Result<Secret<String>, TokenError>;

    fn verify(&self, token: &str, expected: TokenClass) -> Result<SessionClaims, TokenError>;

    fn issue_pair(&self, user_id: UserId, role: Role) -> Result<SessionTokens, TokenError> {
        Ok(SessionTokens {
            access_token: self.issue(user_id, role, TokenClass::Access)?,
            refresh_token: self.issue(user_id, role, TokenClass::Refresh)?,
        })
    }
}

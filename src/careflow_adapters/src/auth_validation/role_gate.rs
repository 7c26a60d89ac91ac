use std::sync::Arc;

use async_trait::async_trait;
use careflow_core::{
    AuthValidator, CredentialStore, CredentialStoreError, RoleRequirement, SessionClaims,
    TokenClass, TokenService,
};
use thiserror::Error;

pub const BEARER_PREFIX: &str = "Bearer";

/// Bearer-token validator for a protected resource family.
///
/// A request passes when its access token verifies, the role embedded in the
/// token satisfies the route's requirement, and the account still exists with
/// that same role. The last check is what makes an admin role change revoke
/// previously issued tokens.
pub struct RoleGate<S, T> {
    credential_store: Arc<S>,
    token_service: Arc<T>,
    requirement: RoleRequirement,
}

impl<S, T> RoleGate<S, T> {
    pub fn new(
        credential_store: Arc<S>,
        token_service: Arc<T>,
        requirement: RoleRequirement,
    ) -> Self {
        Self {
            credential_store,
            token_service,
            requirement,
        }
    }

    pub fn requirement(&self) -> RoleRequirement {
        self.requirement
    }
}

impl<S, T> Clone for RoleGate<S, T> {
    fn clone(&self) -> Self {
        Self {
            credential_store: Arc::clone(&self.credential_store),
            token_service: Arc::clone(&self.token_service),
            requirement: self.requirement,
        }
    }
}

#[derive(Debug, Error)]
pub enum RoleGateError {
    #[error("Missing Authorization header")]
    MissingHeader,
    #[error("Authorization header must be in 'Bearer <token>' format")]
    MalformedHeader,
    #[error("Invalid or expired token")]
    InvalidToken,
    #[error("Insufficient permissions")]
    InsufficientPermissions,
    #[error("User not found")]
    UserNotFound,
    #[error("User role has changed. Please log in again.")]
    RoleChanged,
    #[error("Credential store error: {0}")]
    CredentialStoreError(CredentialStoreError),
}

/// Split `Bearer <token>` into its token; anything but exactly two
/// space-separated parts with the `Bearer` scheme is malformed.
pub fn extract_bearer_token(header: Option<&str>) -> Result<&str, RoleGateError> {
    let header = header.ok_or(RoleGateError::MissingHeader)?;
    let parts: Vec<&str> = header.split(' ').collect();

    match parts.as_slice() {
        [scheme, token] if *scheme == BEARER_PREFIX && !token.is_empty() => Ok(token),
        _ => Err(RoleGateError::MalformedHeader),
    }
}

#[async_trait]
impl<S, T> AuthValidator for RoleGate<S, T>
where
    S: CredentialStore + 'static,
    T: TokenService + 'static,
{
    type Claims = SessionClaims;
    type RequestParts = http::request::Parts;
    type Error = RoleGateError;

    #[tracing::instrument(name = "RoleGate::validate", skip_all, fields(requirement = ?self.requirement))]
    async fn validate(&self, parts: &Self::RequestParts) -> Result<Self::Claims, Self::Error> {
        let header = parts
            .headers
            .get(http::header::AUTHORIZATION)
            .map(|value| value.to_str().map_err(|_| RoleGateError::MalformedHeader))
            .transpose()?;
        let token = extract_bearer_token(header)?;

        let claims = self
            .token_service
            .verify(token, TokenClass::Access)
            .map_err(|e| {
                tracing::debug!(error = %e, "access token rejected");
                RoleGateError::InvalidToken
            })?;

        if !self.requirement.permits(claims.role) {
            return Err(RoleGateError::InsufficientPermissions);
        }

        let user = match self.credential_store.find_by_id(claims.user_id).await {
            Ok(user) => user,
            Err(CredentialStoreError::UserNotFound) => return Err(RoleGateError::UserNotFound),
            Err(e) => return Err(RoleGateError::CredentialStoreError(e)),
        };

        if user.role != claims.role {
            tracing::info!(
                user_id = user.id,
                token_role = %claims.role,
                current_role = %user.role,
                "rejecting token issued for a previous role"
            );
            return Err(RoleGateError::RoleChanged);
        }

        Ok(claims)
    }
}

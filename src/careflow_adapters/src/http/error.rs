use careflow_application::{
    LoginError, OAuthLoginError, RefreshError, RegisterError, ResendCodeError, VerifyEmailError,
};
use careflow_core::{
    AuthResponseBuilder, AuthResponseHelpers, ClientShape, CredentialStoreError,
    HttpSessionTransport, ProfileError, RegistrationError, VerificationCodeError,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::auth_validation::RoleGateError;

const INTERNAL_ERROR_MESSAGE: &str = "Internal server error";

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

/// Every failure that can leave the HTTP boundary, grouped by the status it
/// is reported with.
#[derive(Debug, Error)]
pub enum AuthApiError {
    #[error("{0}")]
    Validation(String),

    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    Conflict(String),

    #[error("{0}")]
    Forbidden(String),

    #[error("{0}")]
    Gone(String),

    #[error("{0}")]
    Unauthorized(String),

    /// Unauthorized, and any session cookie the browser holds is expired in
    /// the same response.
    #[error("{0}")]
    SessionRejected(String),

    #[error("Unexpected error: {0}")]
    Internal(String),
}

impl AuthApiError {
    pub fn status_code(&self) -> u16 {
        match self {
            AuthApiError::Validation(_) => 400,
            AuthApiError::NotFound(_) => 404,
            AuthApiError::Conflict(_) => 409,
            AuthApiError::Forbidden(_) => 403,
            AuthApiError::Gone(_) => 410,
            AuthApiError::Unauthorized(_) | AuthApiError::SessionRejected(_) => 401,
            AuthApiError::Internal(_) => 500,
        }
    }

    pub fn clears_session(&self) -> bool {
        matches!(self, AuthApiError::SessionRejected(_))
    }

    /// Refresh reports role drift to native clients as a plain
    /// `Unauthorized`; they hold no cookie to expire. Protected routes do not
    /// apply this and always send the removal cookie.
    pub fn for_client(self, shape: ClientShape) -> Self {
        match (self, shape) {
            (AuthApiError::SessionRejected(message), ClientShape::Mobile) => {
                AuthApiError::Unauthorized(message)
            }
            (error, _) => error,
        }
    }

    /// Render as `{"error": "..."}`, clearing the session cookie when required.
    pub fn into_auth_response<B, T>(self, builder: B, transport: &T) -> B::Response
    where
        B: AuthResponseBuilder,
        T: HttpSessionTransport,
    {
        let status = self.status_code();
        let message = match &self {
            AuthApiError::Internal(details) => {
                tracing::error!(error = %details, "request failed with an internal error");
                INTERNAL_ERROR_MESSAGE.to_owned()
            }
            other => other.to_string(),
        };

        let builder = if self.clears_session() {
            builder.cookie(&transport.clear_session_cookie())
        } else {
            builder
        };

        builder.error(status, &message)
    }
}

impl From<RegistrationError> for AuthApiError {
    fn from(error: RegistrationError) -> Self {
        AuthApiError::Validation(error.to_string())
    }
}

impl From<ProfileError> for AuthApiError {
    fn from(error: ProfileError) -> Self {
        AuthApiError::Validation(error.to_string())
    }
}

impl From<VerificationCodeError> for AuthApiError {
    fn from(error: VerificationCodeError) -> Self {
        match error {
            VerificationCodeError::Malformed => AuthApiError::Validation(error.to_string()),
            VerificationCodeError::RandomSource(e) => AuthApiError::Internal(e),
        }
    }
}

impl From<CredentialStoreError> for AuthApiError {
    fn from(error: CredentialStoreError) -> Self {
        match error {
            CredentialStoreError::UserAlreadyExists => AuthApiError::Conflict(error.to_string()),
            CredentialStoreError::UserNotFound => AuthApiError::NotFound(error.to_string()),
            CredentialStoreError::UnknownSpecialty => AuthApiError::Validation(error.to_string()),
            CredentialStoreError::ProfileMissing => AuthApiError::NotFound(error.to_string()),
            CredentialStoreError::UnexpectedError(e) => AuthApiError::Internal(e),
        }
    }
}

impl From<RegisterError> for AuthApiError {
    fn from(error: RegisterError) -> Self {
        match error {
            RegisterError::CredentialStoreError(e) => e.into(),
            RegisterError::VerificationCodeError(e) => e.into(),
            RegisterError::PasswordHashError(_) | RegisterError::EmailError(_) => {
                AuthApiError::Internal(error.to_string())
            }
        }
    }
}

impl From<LoginError> for AuthApiError {
    fn from(error: LoginError) -> Self {
        match error {
            LoginError::InvalidCredentials => AuthApiError::NotFound(error.to_string()),
            LoginError::EmailNotVerified => AuthApiError::Forbidden(error.to_string()),
            LoginError::CredentialStoreError(e) => e.into(),
            LoginError::PasswordHashError(_) | LoginError::TokenError(_) => {
                AuthApiError::Internal(error.to_string())
            }
        }
    }
}

impl From<OAuthLoginError> for AuthApiError {
    fn from(error: OAuthLoginError) -> Self {
        match error {
            OAuthLoginError::ExchangeFailed(_) | OAuthLoginError::MissingEmail => {
                AuthApiError::Unauthorized(error.to_string())
            }
            OAuthLoginError::EmailNotVerified => AuthApiError::Forbidden(error.to_string()),
            OAuthLoginError::CredentialStoreError(e) => e.into(),
            OAuthLoginError::TokenError(_) => AuthApiError::Internal(error.to_string()),
        }
    }
}

impl From<VerifyEmailError> for AuthApiError {
    fn from(error: VerifyEmailError) -> Self {
        match error {
            VerifyEmailError::UserNotFound => AuthApiError::NotFound(error.to_string()),
            VerifyEmailError::AlreadyVerified => AuthApiError::Conflict(error.to_string()),
            VerifyEmailError::CodeExpired => AuthApiError::Gone(error.to_string()),
            VerifyEmailError::InvalidCode => AuthApiError::Unauthorized(error.to_string()),
            VerifyEmailError::CredentialStoreError(e) => e.into(),
            VerifyEmailError::TokenError(_) => AuthApiError::Internal(error.to_string()),
        }
    }
}

impl From<ResendCodeError> for AuthApiError {
    fn from(error: ResendCodeError) -> Self {
        match error {
            ResendCodeError::UserNotFound => AuthApiError::NotFound(error.to_string()),
            ResendCodeError::AlreadyVerified => AuthApiError::Conflict(error.to_string()),
            ResendCodeError::CredentialStoreError(e) => e.into(),
            ResendCodeError::VerificationCodeError(e) => e.into(),
            ResendCodeError::EmailError(_) => AuthApiError::Internal(error.to_string()),
        }
    }
}

impl From<RefreshError> for AuthApiError {
    fn from(error: RefreshError) -> Self {
        match error {
            RefreshError::InvalidToken(_) | RefreshError::UserNotFound => {
                AuthApiError::Unauthorized(error.to_string())
            }
            RefreshError::RoleChanged => AuthApiError::SessionRejected(error.to_string()),
            RefreshError::CredentialStoreError(e) => e.into(),
            RefreshError::TokenError(_) => AuthApiError::Internal(error.to_string()),
        }
    }
}

impl From<RoleGateError> for AuthApiError {
    fn from(error: RoleGateError) -> Self {
        match error {
            RoleGateError::MissingHeader | RoleGateError::MalformedHeader => {
                AuthApiError::Unauthorized(error.to_string())
            }
            RoleGateError::InvalidToken
            | RoleGateError::InsufficientPermissions
            | RoleGateError::UserNotFound
            | RoleGateError::RoleChanged => AuthApiError::SessionRejected(error.to_string()),
            RoleGateError::CredentialStoreError(e) => AuthApiError::Internal(e.to_string()),
        }
    }
}

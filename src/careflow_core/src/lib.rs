pub mod domain;
pub mod http_abstraction;
pub mod http_session_transport;
pub mod ports;
pub mod strategies;

// Re-export commonly used types for convenience
pub use domain::{
    client_shape::ClientShape,
    email::{Email, EmailError},
    password::{Password, PasswordError},
    profile::{DoctorProfile, ImageUrl, PatientProfile, ProfileError, ProfileUpdate},
    registration::{NewUser, PersonName, Registration, RegistrationError, RoleProfileDraft},
    role::{Role, RoleError, RoleRequirement},
    session::{AuthSession, SessionClaims, SessionTokens, TokenClass},
    user::{DEFAULT_AVATAR_URL, UserId, UserProfile, UserRecord},
    verification_code::{
        CODE_TTL_MINUTES, PendingVerification, VerificationCode, VerificationCodeError,
    },
};

pub use ports::{
    repositories::{CredentialStore, CredentialStoreError},
    services::{
        EmailClient, EmailClientError, ExternalProfile, OAuthError, OAuthProvider,
        PasswordHashError, PasswordHasher, TokenError, TokenService,
    },
};

pub use strategies::auth_validator::AuthValidator;

pub use http_abstraction::{AuthRequest, AuthResponseBuilder, AuthResponseHelpers};
pub use http_session_transport::HttpSessionTransport;

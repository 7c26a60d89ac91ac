//! # CareFlow - Identity and Session Library
//!
//! Facade crate re-exporting the public APIs of the CareFlow identity
//! components: registration with email verification, password and Google
//! login, dual-channel session tokens and role-gated resources.
//!
//! ## Structure
//!
//! - **Core domain types**: `Email`, `Password`, `Role`, `UserProfile`, etc.
//! - **Ports**: `CredentialStore`, `EmailClient`, `OAuthProvider`, `TokenService`
//! - **Use cases**: `RegisterUseCase`, `LoginUseCase`, `RefreshUseCase`, etc.
//! - **Adapters**: `PostgresCredentialStore`, `PostmarkEmailClient`, `RoleGate`, etc.
//! - **Service**: `CareflowService`, the router assembly used by the binary

// ============================================================================
// Core Domain Types
// ============================================================================

/// Core domain types and value objects
pub mod core {
    pub use careflow_core::*;
}

pub use careflow_core::{
    AuthSession, ClientShape, DoctorProfile, Email, PatientProfile, Password, ProfileUpdate,
    Registration, Role, RoleRequirement, SessionClaims, SessionTokens, TokenClass, UserId,
    UserProfile, UserRecord, VerificationCode,
};

// ============================================================================
// Ports
// ============================================================================

/// Repository and service trait definitions
pub mod ports {
    pub use careflow_core::{
        CredentialStore, CredentialStoreError, EmailClient, EmailClientError, OAuthError,
        OAuthProvider, PasswordHashError, PasswordHasher, TokenError, TokenService,
    };
}

pub use careflow_core::{CredentialStore, EmailClient, OAuthProvider, TokenService};

// ============================================================================
// Use Cases (Application Layer)
// ============================================================================

/// Application use cases
pub mod use_cases {
    pub use careflow_application::*;
}

pub use careflow_application::{
    ChangeRoleUseCase, LoginUseCase, OAuthLoginUseCase, RefreshUseCase, RegisterUseCase,
    ResendCodeUseCase, VerifyEmailUseCase,
};

// ============================================================================
// Adapters (Infrastructure)
// ============================================================================

/// Infrastructure adapters
pub mod adapters {
    /// Framework-neutral request handlers
    pub mod handlers {
        pub use careflow_adapters::handlers::*;
    }

    /// Error envelope and session transport
    pub mod http {
        pub use careflow_adapters::http::*;
    }

    /// Persistence implementations
    pub mod persistence {
        pub use careflow_adapters::persistence::*;
    }

    /// Email client implementations
    pub mod email {
        pub use careflow_adapters::email::*;
    }

    /// Bearer token validation
    pub mod auth {
        pub use careflow_adapters::auth_validation::*;
    }

    /// Configuration
    pub mod config {
        pub use careflow_adapters::config::*;
    }
}

pub use careflow_adapters::{
    AuthApiError, AuthFlow, DualChannelTransport, JwtConfig, JwtTokenService, RoleGate,
    email::{MockEmailClient, PostmarkEmailClient},
    oauth::GoogleOAuthProvider,
    persistence::{HashMapCredentialStore, PostgresCredentialStore},
};

/// Axum glue: request adapter and role middleware
pub use careflow_axum::{AxumRequest, AxumResponseBuilder, require_role};

// ============================================================================
// Service (Main Entry Point)
// ============================================================================

pub use careflow_service::{
    CareflowService,
    helpers::{configure_google_oauth_provider, configure_postgresql, configure_postmark_email_client},
};

// ============================================================================
// Re-export common external dependencies
// ============================================================================

/// Re-export async-trait for implementing the ports
pub use async_trait::async_trait;

/// Re-export secrecy for working with secrets
pub use secrecy::{ExposeSecret, Secret};

pub use http;

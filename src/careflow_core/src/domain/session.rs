use secrecy::Secret;
use serde::{Deserialize, Serialize};

use super::{
    role::Role,
    user::{UserId, UserProfile},
};

/// The two classes of session token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenClass {
    Access,
    Refresh,
}

/// The identity a verified token asserts: who, and with which role at issuance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionClaims {
    pub user_id: UserId,
    pub role: Role,
}

/// A freshly issued access and refresh token pair.
#[derive(Debug, Clone)]
pub struct SessionTokens {
    pub access_token: Secret<String>,
    pub refresh_token: Secret<String>,
}

/// Outcome of every successful login-like transition.
#[derive(Debug, Clone)]
pub struct AuthSession {
    pub tokens: SessionTokens,
    pub user: UserProfile,
}

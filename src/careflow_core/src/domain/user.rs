use chrono::{DateTime, Utc};
use secrecy::{ExposeSecret, Secret};
use serde::Serialize;

use super::{email::Email, role::Role, verification_code::PendingVerification};

pub type UserId = i64;

pub const DEFAULT_AVATAR_URL: &str = "https://avatar.iran.liara.run/public";

/// A persisted user identity record.
///
/// `password_hash` is `None` for accounts provisioned through OAuth.
/// `verification` holds the outstanding code while `verified` is false and is
/// cleared once the account is verified.
#[derive(Debug, Clone)]
pub struct UserRecord {
    pub id: UserId,
    pub first_name: String,
    pub last_name: String,
    pub email: Email,
    pub image: String,
    pub password_hash: Option<Secret<String>>,
    pub role: Role,
    pub verified: bool,
    pub verification: Option<PendingVerification>,
    pub created_at: DateTime<Utc>,
}

impl UserRecord {
    pub fn profile(&self) -> UserProfile {
        UserProfile {
            id: self.id,
            first_name: self.first_name.clone(),
            last_name: self.last_name.clone(),
            email: self.email.as_ref().expose_secret().clone(),
            image: self.image.clone(),
            role: self.role,
            verified: self.verified,
            created_at: self.created_at,
        }
    }
}

/// The client-facing view of a user, without credentials or codes.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub id: UserId,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub image: String,
    pub role: Role,
    pub verified: bool,
    pub created_at: DateTime<Utc>,
}

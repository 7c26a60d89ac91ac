use async_trait::async_trait;
use thiserror::Error;

use crate::domain::{
    email::Email,
    profile::{DoctorProfile, PatientProfile, ProfileUpdate},
    registration::NewUser,
    role::Role,
    user::{UserId, UserRecord},
    verification_code::PendingVerification,
};

// CredentialStore port trait and errors
#[derive(Debug, Error)]
pub enum CredentialStoreError {
    #[error("User already exists")]
    UserAlreadyExists,
    #[error("User not found")]
    UserNotFound,
    #[error("Unknown specialty")]
    UnknownSpecialty,
    #[error("Role profile is missing for this user")]
    ProfileMissing,
    #[error("Unexpected error {0}")]
    UnexpectedError(String),
}

impl PartialEq for CredentialStoreError {
    fn eq(&self, other: &Self) -> bool {
        matches!(
            (self, other),
            (Self::UserAlreadyExists, Self::UserAlreadyExists)
                | (Self::UserNotFound, Self::UserNotFound)
                | (Self::UnknownSpecialty, Self::UnknownSpecialty)
                | (Self::ProfileMissing, Self::ProfileMissing)
                | (Self::UnexpectedError(_), Self::UnexpectedError(_))
        )
    }
}

/// Persistence of user identity records and their role-profiles.
///
/// Every method that writes more than one row (`create_with_profile`,
/// `update_profile`) must be all-or-nothing: on error no partial write is
/// observable.
#[async_trait]
pub trait CredentialStore: Send + Sync {
    async fn find_by_email(&self, email: &Email) -> Result<UserRecord, CredentialStoreError>;

    async fn find_by_id(&self, id: UserId) -> Result<UserRecord, CredentialStoreError>;

    /// Insert the user and its role-profile row in one transaction.
    ///
    /// Fails with `UserAlreadyExists` on a duplicate email and with
    /// `UnknownSpecialty` when a doctor references a missing specialty.
    async fn create_with_profile(&self, user: NewUser) -> Result<UserRecord, CredentialStoreError>;

    /// Flip `verified` to true and clear the outstanding code.
    async fn mark_verified(&self, email: &Email) -> Result<UserRecord, CredentialStoreError>;

    /// Store a new code and expiry, replacing any previous one.
    async fn replace_verification(
        &self,
        email: &Email,
        pending: PendingVerification,
    ) -> Result<(), CredentialStoreError>;

    async fn update_image(&self, id: UserId, image: &str)
    -> Result<UserRecord, CredentialStoreError>;

    /// Update the user row and, for doctors, the doctor row in one transaction.
    async fn update_profile(
        &self,
        id: UserId,
        update: ProfileUpdate,
    ) -> Result<UserRecord, CredentialStoreError>;

    async fn set_role(&self, id: UserId, role: Role) -> Result<UserRecord, CredentialStoreError>;

    async fn patient_profile(&self, id: UserId) -> Result<PatientProfile, CredentialStoreError>;

    async fn doctor_profile(&self, id: UserId) -> Result<DoctorProfile, CredentialStoreError>;
}

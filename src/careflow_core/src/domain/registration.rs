use secrecy::Secret;
use thiserror::Error;

use super::{
    email::{Email, EmailError},
    password::{Password, PasswordError},
    role::Role,
    verification_code::PendingVerification,
};

/// A first or last name between 3 and 30 characters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersonName(String);

impl PersonName {
    pub fn parse(value: String) -> Result<Self, RegistrationError> {
        let length = value.trim().chars().count();
        if !(3..=30).contains(&length) {
            return Err(RegistrationError::InvalidName);
        }
        Ok(Self(value.trim().to_owned()))
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl AsRef<str> for PersonName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Role-specific data that must be persisted together with a new user.
#[derive(Debug, Clone, PartialEq)]
pub enum RoleProfileDraft {
    Patient,
    Doctor {
        specialty_id: i64,
        license_number: String,
    },
    /// Admin accounts have no role-profile row.
    None,
}

impl RoleProfileDraft {
    pub fn role(&self) -> Role {
        match self {
            RoleProfileDraft::Patient => Role::Patient,
            RoleProfileDraft::Doctor { .. } => Role::Doctor,
            RoleProfileDraft::None => Role::Admin,
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum RegistrationError {
    #[error("First and last name must be between 3 and 30 characters")]
    InvalidName,
    #[error(transparent)]
    Email(#[from] EmailError),
    #[error(transparent)]
    Password(#[from] PasswordError),
    #[error("Role must be either patient or doctor")]
    RoleNotSelfAssignable,
    #[error("Doctors must provide a specialtyId and licenseNumber")]
    DoctorDetailsMissing,
}

/// A validated self-service registration.
#[derive(Debug, Clone)]
pub struct Registration {
    pub first_name: PersonName,
    pub last_name: PersonName,
    pub email: Email,
    pub password: Password,
    pub profile: RoleProfileDraft,
}

impl Registration {
    /// Validate raw registration fields.
    ///
    /// `role` defaults to patient when absent. Admins cannot self-register,
    /// and doctors must bring a specialty and a license number.
    pub fn parse(
        first_name: String,
        last_name: String,
        email: Secret<String>,
        password: Secret<String>,
        role: Option<Role>,
        specialty_id: Option<i64>,
        license_number: Option<String>,
    ) -> Result<Self, RegistrationError> {
        let first_name = PersonName::parse(first_name)?;
        let last_name = PersonName::parse(last_name)?;
        let email = Email::try_from(email)?;
        let password = Password::try_from(password)?;

        let profile = match role.unwrap_or(Role::Patient) {
            Role::Patient => RoleProfileDraft::Patient,
            Role::Doctor => match (specialty_id, license_number) {
                (Some(specialty_id), Some(license_number))
                    if !license_number.trim().is_empty() =>
                {
                    RoleProfileDraft::Doctor {
                        specialty_id,
                        license_number: license_number.trim().to_owned(),
                    }
                }
                _ => return Err(RegistrationError::DoctorDetailsMissing),
            },
            Role::Admin => return Err(RegistrationError::RoleNotSelfAssignable),
        };

        Ok(Self {
            first_name,
            last_name,
            email,
            password,
            profile,
        })
    }

    pub fn role(&self) -> Role {
        self.profile.role()
    }
}

/// Everything the credential store needs to create a user and its
/// role-profile in one transaction.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub first_name: String,
    pub last_name: String,
    pub email: Email,
    /// `None` keeps the store's default avatar.
    pub image: Option<String>,
    pub password_hash: Option<Secret<String>>,
    pub verified: bool,
    pub verification: Option<PendingVerification>,
    pub profile: RoleProfileDraft,
}

impl NewUser {
    pub fn role(&self) -> Role {
        self.profile.role()
    }
}

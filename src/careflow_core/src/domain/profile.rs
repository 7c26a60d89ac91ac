use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;
use thiserror::Error;

use super::{registration::PersonName, user::UserId};

static IMAGE_URL_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^https?://[^\s/$.?#][^\s]*$").expect("image url pattern is a valid regex")
});

const MAX_BIO_LENGTH: usize = 500;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ProfileError {
    #[error("First and last name must be between 3 and 30 characters")]
    InvalidName,
    #[error("Image must be an http(s) URL")]
    InvalidImage,
    #[error("Bio must be at most {MAX_BIO_LENGTH} characters")]
    BioTooLong,
    #[error("Consultation fee must be a non-negative number")]
    InvalidConsultationFee,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageUrl(String);

impl ImageUrl {
    pub fn parse(value: String) -> Result<Self, ProfileError> {
        if IMAGE_URL_PATTERN.is_match(&value) {
            Ok(Self(value))
        } else {
            Err(ProfileError::InvalidImage)
        }
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl AsRef<str> for ImageUrl {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// A partial update of a user and, for doctors, their doctor profile.
///
/// Doctor fields are ignored for other roles.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProfileUpdate {
    pub first_name: Option<PersonName>,
    pub last_name: Option<PersonName>,
    pub image: Option<ImageUrl>,
    pub bio: Option<String>,
    pub consultation_fee: Option<f64>,
    pub is_available: Option<bool>,
}

impl ProfileUpdate {
    pub fn parse(
        first_name: Option<String>,
        last_name: Option<String>,
        image: Option<String>,
        bio: Option<String>,
        consultation_fee: Option<f64>,
        is_available: Option<bool>,
    ) -> Result<Self, ProfileError> {
        let first_name = first_name
            .map(PersonName::parse)
            .transpose()
            .map_err(|_| ProfileError::InvalidName)?;
        let last_name = last_name
            .map(PersonName::parse)
            .transpose()
            .map_err(|_| ProfileError::InvalidName)?;
        let image = image.map(ImageUrl::parse).transpose()?;

        if bio
            .as_ref()
            .is_some_and(|bio| bio.chars().count() > MAX_BIO_LENGTH)
        {
            return Err(ProfileError::BioTooLong);
        }
        if consultation_fee.is_some_and(|fee| !fee.is_finite() || fee < 0.0) {
            return Err(ProfileError::InvalidConsultationFee);
        }

        Ok(Self {
            first_name,
            last_name,
            image,
            bio,
            consultation_fee,
            is_available,
        })
    }

    pub fn touches_doctor_profile(&self) -> bool {
        self.bio.is_some() || self.consultation_fee.is_some() || self.is_available.is_some()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PatientProfile {
    pub user_id: UserId,
    pub height: Option<f64>,
    pub weight: Option<f64>,
    pub blood_type: Option<String>,
    pub chronic_conditions: Option<String>,
    pub allergies: Option<String>,
    pub medications: Option<String>,
}

impl PatientProfile {
    pub fn empty(user_id: UserId) -> Self {
        Self {
            user_id,
            height: None,
            weight: None,
            blood_type: None,
            chronic_conditions: None,
            allergies: None,
            medications: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DoctorProfile {
    pub user_id: UserId,
    pub specialty_id: i64,
    pub specialty_name: String,
    pub license_number: String,
    pub bio: String,
    pub consultation_fee: f64,
    pub is_available: bool,
}

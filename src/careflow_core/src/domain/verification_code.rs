use chrono::{DateTime, Duration, Utc};
use rand::TryRngCore;
use rand::rngs::OsRng;
use thiserror::Error;

/// Minutes a verification code stays valid after it is (re)generated.
pub const CODE_TTL_MINUTES: i64 = 15;

const CODE_MIN: u32 = 100_000;
const CODE_SPAN: u32 = 900_000;

/// A six digit numeric email verification code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerificationCode(String);

#[derive(Debug, Error, PartialEq, Eq)]
pub enum VerificationCodeError {
    #[error("Verification code must be exactly 6 digits")]
    Malformed,
    #[error("Secure random number generator failed: {0}")]
    RandomSource(String),
}

impl VerificationCode {
    /// Draw a fresh code uniformly from `100000..=999999` using the OS RNG.
    pub fn generate() -> Result<Self, VerificationCodeError> {
        // Largest multiple of CODE_SPAN representable in u32; draws at or above
        // it are rejected so that every code is equally likely.
        let zone = u32::MAX - (u32::MAX % CODE_SPAN);
        loop {
            let draw = OsRng
                .try_next_u32()
                .map_err(|e| VerificationCodeError::RandomSource(e.to_string()))?;
            if draw < zone {
                return Ok(Self(format!("{:06}", CODE_MIN + draw % CODE_SPAN)));
            }
        }
    }

    pub fn parse(value: String) -> Result<Self, VerificationCodeError> {
        if value.len() == 6 && value.bytes().all(|b| b.is_ascii_digit()) {
            Ok(Self(value))
        } else {
            Err(VerificationCodeError::Malformed)
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for VerificationCode {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// The outstanding code of an unverified account and when it stops being accepted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingVerification {
    pub code: VerificationCode,
    pub expires_at: DateTime<Utc>,
}

impl PendingVerification {
    /// Generate a new code valid for [`CODE_TTL_MINUTES`] from `now`.
    pub fn issue(now: DateTime<Utc>) -> Result<Self, VerificationCodeError> {
        Ok(Self {
            code: VerificationCode::generate()?,
            expires_at: now + Duration::minutes(CODE_TTL_MINUTES),
        })
    }

    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        now > self.expires_at
    }
}

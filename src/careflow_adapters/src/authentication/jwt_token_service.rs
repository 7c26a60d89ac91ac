use careflow_core::{Role, SessionClaims, TokenClass, TokenError, TokenService, UserId};
use chrono::Utc;
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use secrecy::{ExposeSecret, Secret};
use serde::{Deserialize, Serialize};

use crate::config::JwtSettings;

#[derive(Clone)]
pub struct JwtConfig {
    pub jwt_secret: Secret<String>,
    pub access_ttl_in_seconds: i64,
    pub refresh_ttl_in_seconds: i64,
}

impl JwtConfig {
    pub fn as_bytes(&self) -> &[u8] {
        self.jwt_secret.expose_secret().as_bytes()
    }

    fn ttl_for(&self, class: TokenClass) -> i64 {
        match class {
            TokenClass::Access => self.access_ttl_in_seconds,
            TokenClass::Refresh => self.refresh_ttl_in_seconds,
        }
    }
}

impl From<&JwtSettings> for JwtConfig {
    fn from(settings: &JwtSettings) -> Self {
        Self {
            jwt_secret: settings.secret.clone(),
            access_ttl_in_seconds: settings.access_ttl_in_seconds,
            refresh_ttl_in_seconds: settings.refresh_ttl_in_seconds,
        }
    }
}

/// HS256 session tokens carrying the user id, role and token class.
#[derive(Clone)]
pub struct JwtTokenService {
    config: JwtConfig,
}

impl JwtTokenService {
    pub fn new(config: JwtConfig) -> Self {
        Self { config }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    pub sub: String,
    pub role: Role,
    pub class: TokenClass,
    pub iat: usize,
    pub exp: usize,
}

impl TokenService for JwtTokenService {
    fn issue(
        &self,
        user_id: UserId,
        role: Role,
        class: TokenClass,
    ) -> Result<Secret<String>, TokenError> {
        let delta = chrono::Duration::try_seconds(self.config.ttl_for(class)).ok_or(
            TokenError::Unexpected("Failed to create token duration".to_string()),
        )?;

        let now = Utc::now();
        let exp = now
            .checked_add_signed(delta)
            .ok_or(TokenError::Unexpected("Duration out of range".to_string()))?
            .timestamp();

        let claims = Claims {
            sub: user_id.to_string(),
            role,
            class,
            iat: to_usize(now.timestamp())?,
            exp: to_usize(exp)?,
        };

        encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(self.config.as_bytes()),
        )
        .map(Secret::from)
        .map_err(|e| TokenError::Unexpected(e.to_string()))
    }

    fn verify(&self, token: &str, expected: TokenClass) -> Result<SessionClaims, TokenError> {
        let mut validation = Validation::default();
        validation.leeway = 0;

        let claims = decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.config.as_bytes()),
            &validation,
        )
        .map(|data| data.claims)
        .map_err(|e| TokenError::InvalidToken(e.to_string()))?;

        if claims.class != expected {
            return Err(TokenError::InvalidToken("Wrong token class".to_string()));
        }

        let user_id = claims
            .sub
            .parse::<UserId>()
            .map_err(|_| TokenError::InvalidToken("Malformed subject".to_string()))?;

        Ok(SessionClaims {
            user_id,
            role: claims.role,
        })
    }
}

fn to_usize(timestamp: i64) -> Result<usize, TokenError> {
    timestamp
        .try_into()
        .map_err(|_| TokenError::Unexpected("Failed to cast i64 to usize".to_string()))
}

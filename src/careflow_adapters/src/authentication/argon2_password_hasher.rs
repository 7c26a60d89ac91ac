use argon2::{
    Algorithm, Argon2, Params, PasswordHash, PasswordVerifier, Version,
    password_hash::{self, PasswordHasher as _, SaltString, rand_core},
};
use async_trait::async_trait;
use careflow_core::{Password, PasswordHashError, PasswordHasher};
use secrecy::{ExposeSecret, Secret};

/// Argon2id hashing on the blocking thread pool.
#[derive(Debug, Clone, Default)]
pub struct Argon2PasswordHasher;

impl Argon2PasswordHasher {
    pub fn new() -> Self {
        Self
    }
}

fn argon2() -> Result<Argon2<'static>, String> {
    Ok(Argon2::new(
        Algorithm::Argon2id,
        Version::V0x13,
        Params::new(15000, 2, 1, None).map_err(|e| e.to_string())?,
    ))
}

#[async_trait]
impl PasswordHasher for Argon2PasswordHasher {
    #[tracing::instrument(name = "Computing password hash", skip_all)]
    async fn hash(&self, password: Password) -> Result<Secret<String>, PasswordHashError> {
        let current_span: tracing::Span = tracing::Span::current();

        tokio::task::spawn_blocking(move || {
            current_span.in_scope(move || {
                let salt: SaltString = SaltString::generate(rand_core::OsRng);
                argon2()?
                    .hash_password(password.as_ref().expose_secret().as_bytes(), &salt)
                    .map(|h| Secret::from(h.to_string()))
                    .map_err(|e| e.to_string())
            })
        })
        .await
        .map_err(|e| PasswordHashError::Hashing(e.to_string()))?
        .map_err(PasswordHashError::Hashing)
    }

    #[tracing::instrument(name = "Verify password hash", skip_all)]
    async fn verify(
        &self,
        expected_hash: Secret<String>,
        candidate: Secret<String>,
    ) -> Result<bool, PasswordHashError> {
        let current_span: tracing::Span = tracing::Span::current();

        tokio::task::spawn_blocking(move || {
            current_span.in_scope(|| {
                let expected_hash = PasswordHash::new(expected_hash.expose_secret())
                    .map_err(|e| PasswordHashError::MalformedHash(e.to_string()))?;
                let hasher = argon2().map_err(PasswordHashError::Hashing)?;

                match hasher.verify_password(candidate.expose_secret().as_bytes(), &expected_hash) {
                    Ok(()) => Ok(true),
                    Err(password_hash::Error::Password) => Ok(false),
                    Err(e) => Err(PasswordHashError::Hashing(e.to_string())),
                }
            })
        })
        .await
        .map_err(|e| PasswordHashError::Hashing(e.to_string()))?
    }
}

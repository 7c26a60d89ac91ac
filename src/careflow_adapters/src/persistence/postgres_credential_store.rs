use async_trait::async_trait;
use careflow_core::{
    CredentialStore, CredentialStoreError, DEFAULT_AVATAR_URL, DoctorProfile, Email, NewUser,
    PatientProfile, PendingVerification, ProfileUpdate, Role, RoleProfileDraft, UserId,
    UserRecord, VerificationCode,
};
use chrono::{DateTime, Utc};
use secrecy::{ExposeSecret, Secret};
use sqlx::{FromRow, PgPool, Postgres, Transaction};

const USER_COLUMNS: &str = "id, first_name, last_name, email, image, password_hash, role, \
    verified, verification_code, code_expires_at, created_at";

/// Run the embedded schema migrations against `pool`.
pub async fn migrate(pool: &PgPool) -> Result<(), sqlx::migrate::MigrateError> {
    sqlx::migrate!("./migrations").run(pool).await
}

pub struct PostgresCredentialStore {
    pool: PgPool,
}

impl PostgresCredentialStore {
    pub fn new(pool: PgPool) -> Self {
        PostgresCredentialStore { pool }
    }
}

#[derive(FromRow)]
struct UserRow {
    id: i64,
    first_name: String,
    last_name: String,
    email: String,
    image: String,
    password_hash: Option<String>,
    role: String,
    verified: bool,
    verification_code: Option<String>,
    code_expires_at: Option<DateTime<Utc>>,
    created_at: DateTime<Utc>,
}

impl TryFrom<UserRow> for UserRecord {
    type Error = CredentialStoreError;

    fn try_from(row: UserRow) -> Result<Self, Self::Error> {
        let email = Email::try_from(Secret::from(row.email))
            .map_err(|e| CredentialStoreError::UnexpectedError(e.to_string()))?;
        let role = row
            .role
            .parse::<Role>()
            .map_err(|e| CredentialStoreError::UnexpectedError(e.to_string()))?;
        let verification = match (row.verification_code, row.code_expires_at) {
            (Some(code), Some(expires_at)) => Some(PendingVerification {
                code: VerificationCode::parse(code)
                    .map_err(|e| CredentialStoreError::UnexpectedError(e.to_string()))?,
                expires_at,
            }),
            _ => None,
        };

        Ok(UserRecord {
            id: row.id,
            first_name: row.first_name,
            last_name: row.last_name,
            email,
            image: row.image,
            password_hash: row.password_hash.map(Secret::from),
            role,
            verified: row.verified,
            verification,
            created_at: row.created_at,
        })
    }
}

#[derive(FromRow)]
struct PatientRow {
    user_id: i64,
    height: Option<f64>,
    weight: Option<f64>,
    blood_type: Option<String>,
    chronic_conditions: Option<String>,
    allergies: Option<String>,
    medications: Option<String>,
}

#[derive(FromRow)]
struct DoctorRow {
    user_id: i64,
    specialty_id: i64,
    specialty_name: String,
    license_number: String,
    bio: String,
    consultation_fee: f64,
    is_available: bool,
}

fn unexpected(error: sqlx::Error) -> CredentialStoreError {
    CredentialStoreError::UnexpectedError(error.to_string())
}

fn map_write_error(error: sqlx::Error) -> CredentialStoreError {
    if let Some(db_err) = error.as_database_error() {
        if db_err.is_unique_violation() {
            return CredentialStoreError::UserAlreadyExists;
        }
        if db_err.is_foreign_key_violation() {
            return CredentialStoreError::UnknownSpecialty;
        }
    }
    unexpected(error)
}

async fn insert_role_profile(
    tx: &mut Transaction<'_, Postgres>,
    user_id: UserId,
    profile: &RoleProfileDraft,
) -> Result<(), CredentialStoreError> {
    match profile {
        RoleProfileDraft::Patient => {
            sqlx::query("INSERT INTO patients (user_id) VALUES ($1)")
                .bind(user_id)
                .execute(&mut **tx)
                .await
                .map_err(map_write_error)?;
        }
        RoleProfileDraft::Doctor {
            specialty_id,
            license_number,
        } => {
            sqlx::query(
                "INSERT INTO doctors (user_id, specialty_id, license_number) VALUES ($1, $2, $3)",
            )
            .bind(user_id)
            .bind(specialty_id)
            .bind(license_number)
            .execute(&mut **tx)
            .await
            .map_err(map_write_error)?;
        }
        RoleProfileDraft::None => {}
    }
    Ok(())
}

#[async_trait]
impl CredentialStore for PostgresCredentialStore {
    #[tracing::instrument(name = "Retrieving user by email from PostgreSQL", skip_all)]
    async fn find_by_email(&self, email: &Email) -> Result<UserRecord, CredentialStoreError> {
        let sql = format!("SELECT {USER_COLUMNS} FROM users WHERE email = $1");
        sqlx::query_as::<_, UserRow>(&sql)
            .bind(email.as_ref().expose_secret())
            .fetch_optional(&self.pool)
            .await
            .map_err(unexpected)?
            .ok_or(CredentialStoreError::UserNotFound)?
            .try_into()
    }

    #[tracing::instrument(name = "Retrieving user by id from PostgreSQL", skip(self))]
    async fn find_by_id(&self, id: UserId) -> Result<UserRecord, CredentialStoreError> {
        let sql = format!("SELECT {USER_COLUMNS} FROM users WHERE id = $1");
        sqlx::query_as::<_, UserRow>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(unexpected)?
            .ok_or(CredentialStoreError::UserNotFound)?
            .try_into()
    }

    #[tracing::instrument(name = "Adding user and role profile to PostgreSQL", skip_all)]
    async fn create_with_profile(&self, user: NewUser) -> Result<UserRecord, CredentialStoreError> {
        let mut tx = self.pool.begin().await.map_err(unexpected)?;

        let (code, expires_at) = match &user.verification {
            Some(pending) => (Some(pending.code.as_str().to_owned()), Some(pending.expires_at)),
            None => (None, None),
        };

        let sql = format!(
            "INSERT INTO users \
                (first_name, last_name, email, image, password_hash, role, verified, \
                 verification_code, code_expires_at) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9) \
             RETURNING {USER_COLUMNS}"
        );
        let row = sqlx::query_as::<_, UserRow>(&sql)
            .bind(&user.first_name)
            .bind(&user.last_name)
            .bind(user.email.as_ref().expose_secret())
            .bind(user.image.as_deref().unwrap_or(DEFAULT_AVATAR_URL))
            .bind(user.password_hash.as_ref().map(|h| h.expose_secret().as_str()))
            .bind(user.role().as_str())
            .bind(user.verified)
            .bind(code)
            .bind(expires_at)
            .fetch_one(&mut *tx)
            .await
            .map_err(map_write_error)?;

        insert_role_profile(&mut tx, row.id, &user.profile).await?;

        tx.commit().await.map_err(unexpected)?;
        row.try_into()
    }

    #[tracing::instrument(name = "Marking user verified in PostgreSQL", skip_all)]
    async fn mark_verified(&self, email: &Email) -> Result<UserRecord, CredentialStoreError> {
        let sql = format!(
            "UPDATE users \
             SET verified = TRUE, verification_code = NULL, code_expires_at = NULL \
             WHERE email = $1 \
             RETURNING {USER_COLUMNS}"
        );
        sqlx::query_as::<_, UserRow>(&sql)
            .bind(email.as_ref().expose_secret())
            .fetch_optional(&self.pool)
            .await
            .map_err(unexpected)?
            .ok_or(CredentialStoreError::UserNotFound)?
            .try_into()
    }

    #[tracing::instrument(name = "Replacing verification code in PostgreSQL", skip_all)]
    async fn replace_verification(
        &self,
        email: &Email,
        pending: PendingVerification,
    ) -> Result<(), CredentialStoreError> {
        let result = sqlx::query(
            "UPDATE users SET verification_code = $1, code_expires_at = $2 WHERE email = $3",
        )
        .bind(pending.code.as_str())
        .bind(pending.expires_at)
        .bind(email.as_ref().expose_secret())
        .execute(&self.pool)
        .await
        .map_err(unexpected)?;

        if result.rows_affected() == 0 {
            return Err(CredentialStoreError::UserNotFound);
        }
        Ok(())
    }

    #[tracing::instrument(name = "Updating user image in PostgreSQL", skip(self, image))]
    async fn update_image(
        &self,
        id: UserId,
        image: &str,
    ) -> Result<UserRecord, CredentialStoreError> {
        let sql = format!("UPDATE users SET image = $1 WHERE id = $2 RETURNING {USER_COLUMNS}");
        sqlx::query_as::<_, UserRow>(&sql)
            .bind(image)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(unexpected)?
            .ok_or(CredentialStoreError::UserNotFound)?
            .try_into()
    }

    #[tracing::instrument(name = "Updating profile in PostgreSQL", skip(self, update))]
    async fn update_profile(
        &self,
        id: UserId,
        update: ProfileUpdate,
    ) -> Result<UserRecord, CredentialStoreError> {
        let mut tx = self.pool.begin().await.map_err(unexpected)?;

        let sql = format!(
            "UPDATE users \
             SET first_name = COALESCE($1, first_name), \
                 last_name = COALESCE($2, last_name), \
                 image = COALESCE($3, image) \
             WHERE id = $4 \
             RETURNING {USER_COLUMNS}"
        );
        let row = sqlx::query_as::<_, UserRow>(&sql)
            .bind(update.first_name.as_ref().map(|n| n.as_ref().to_owned()))
            .bind(update.last_name.as_ref().map(|n| n.as_ref().to_owned()))
            .bind(update.image.as_ref().map(|i| i.as_ref().to_owned()))
            .bind(id)
            .fetch_optional(&mut *tx)
            .await
            .map_err(unexpected)?
            .ok_or(CredentialStoreError::UserNotFound)?;

        if row.role == Role::Doctor.as_str() && update.touches_doctor_profile() {
            let result = sqlx::query(
                "UPDATE doctors \
                 SET bio = COALESCE($1, bio), \
                     consultation_fee = COALESCE($2, consultation_fee), \
                     is_available = COALESCE($3, is_available) \
                 WHERE user_id = $4",
            )
            .bind(update.bio)
            .bind(update.consultation_fee)
            .bind(update.is_available)
            .bind(id)
            .execute(&mut *tx)
            .await
            .map_err(unexpected)?;

            if result.rows_affected() == 0 {
                return Err(CredentialStoreError::ProfileMissing);
            }
        }

        tx.commit().await.map_err(unexpected)?;
        row.try_into()
    }

    #[tracing::instrument(name = "Setting user role in PostgreSQL", skip(self))]
    async fn set_role(&self, id: UserId, role: Role) -> Result<UserRecord, CredentialStoreError> {
        let sql = format!("UPDATE users SET role = $1 WHERE id = $2 RETURNING {USER_COLUMNS}");
        sqlx::query_as::<_, UserRow>(&sql)
            .bind(role.as_str())
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(unexpected)?
            .ok_or(CredentialStoreError::UserNotFound)?
            .try_into()
    }

    #[tracing::instrument(name = "Retrieving patient profile from PostgreSQL", skip(self))]
    async fn patient_profile(&self, id: UserId) -> Result<PatientProfile, CredentialStoreError> {
        let row = sqlx::query_as::<_, PatientRow>(
            "SELECT user_id, height, weight, blood_type, chronic_conditions, allergies, medications \
             FROM patients WHERE user_id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(unexpected)?
        .ok_or(CredentialStoreError::ProfileMissing)?;

        Ok(PatientProfile {
            user_id: row.user_id,
            height: row.height,
            weight: row.weight,
            blood_type: row.blood_type,
            chronic_conditions: row.chronic_conditions,
            allergies: row.allergies,
            medications: row.medications,
        })
    }

    #[tracing::instrument(name = "Retrieving doctor profile from PostgreSQL", skip(self))]
    async fn doctor_profile(&self, id: UserId) -> Result<DoctorProfile, CredentialStoreError> {
        let row = sqlx::query_as::<_, DoctorRow>(
            "SELECT d.user_id, d.specialty_id, s.name AS specialty_name, d.license_number, \
                    d.bio, d.consultation_fee, d.is_available \
             FROM doctors d JOIN specialties s ON s.id = d.specialty_id \
             WHERE d.user_id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(unexpected)?
        .ok_or(CredentialStoreError::ProfileMissing)?;

        Ok(DoctorProfile {
            user_id: row.user_id,
            specialty_id: row.specialty_id,
            specialty_name: row.specialty_name,
            license_number: row.license_number,
            bio: row.bio,
            consultation_fee: row.consultation_fee,
            is_available: row.is_available,
        })
    }
}

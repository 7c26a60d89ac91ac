use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use careflow_core::{
    CredentialStore, CredentialStoreError, DEFAULT_AVATAR_URL, DoctorProfile, Email, NewUser,
    PatientProfile, PendingVerification, ProfileUpdate, Role, RoleProfileDraft, UserId,
    UserRecord,
};
use chrono::Utc;
use tokio::sync::RwLock;

use super::SEEDED_SPECIALTIES;

#[derive(Default)]
struct Tables {
    users: HashMap<UserId, UserRecord>,
    ids_by_email: HashMap<Email, UserId>,
    patients: HashMap<UserId, PatientProfile>,
    doctors: HashMap<UserId, DoctorProfile>,
    last_id: UserId,
}

impl Tables {
    fn user_mut(&mut self, id: UserId) -> Result<&mut UserRecord, CredentialStoreError> {
        self.users
            .get_mut(&id)
            .ok_or(CredentialStoreError::UserNotFound)
    }

    fn id_of(&self, email: &Email) -> Result<UserId, CredentialStoreError> {
        self.ids_by_email
            .get(email)
            .copied()
            .ok_or(CredentialStoreError::UserNotFound)
    }
}

/// Credential store held in process memory.
///
/// All tables sit behind one lock, so multi-row writes are atomic with
/// respect to every reader.
#[derive(Default, Clone)]
pub struct HashMapCredentialStore {
    tables: Arc<RwLock<Tables>>,
}

impl HashMapCredentialStore {
    pub fn new() -> Self {
        Self {
            tables: Arc::new(RwLock::new(Tables::default())),
        }
    }

    pub async fn user_count(&self) -> usize {
        self.tables.read().await.users.len()
    }

    pub async fn role_profile_count(&self) -> usize {
        let tables = self.tables.read().await;
        tables.patients.len() + tables.doctors.len()
    }
}

fn specialty_name(id: i64) -> Option<&'static str> {
    SEEDED_SPECIALTIES
        .iter()
        .find(|(specialty_id, _)| *specialty_id == id)
        .map(|(_, name)| *name)
}

#[async_trait]
impl CredentialStore for HashMapCredentialStore {
    async fn find_by_email(&self, email: &Email) -> Result<UserRecord, CredentialStoreError> {
        let tables = self.tables.read().await;
        let id = tables.id_of(email)?;
        tables
            .users
            .get(&id)
            .cloned()
            .ok_or(CredentialStoreError::UserNotFound)
    }

    async fn find_by_id(&self, id: UserId) -> Result<UserRecord, CredentialStoreError> {
        let tables = self.tables.read().await;
        tables
            .users
            .get(&id)
            .cloned()
            .ok_or(CredentialStoreError::UserNotFound)
    }

    async fn create_with_profile(&self, user: NewUser) -> Result<UserRecord, CredentialStoreError> {
        let mut tables = self.tables.write().await;
        if tables.ids_by_email.contains_key(&user.email) {
            return Err(CredentialStoreError::UserAlreadyExists);
        }

        let role = user.role();
        let id = tables.last_id + 1;

        // Validate the role-profile before anything is written.
        let doctor = match user.profile {
            RoleProfileDraft::Doctor {
                specialty_id,
                license_number,
            } => {
                let name =
                    specialty_name(specialty_id).ok_or(CredentialStoreError::UnknownSpecialty)?;
                Some(DoctorProfile {
                    user_id: id,
                    specialty_id,
                    specialty_name: name.to_owned(),
                    license_number,
                    bio: String::new(),
                    consultation_fee: 0.0,
                    is_available: true,
                })
            }
            RoleProfileDraft::Patient | RoleProfileDraft::None => None,
        };

        let record = UserRecord {
            id,
            first_name: user.first_name,
            last_name: user.last_name,
            email: user.email,
            image: user
                .image
                .unwrap_or_else(|| DEFAULT_AVATAR_URL.to_owned()),
            password_hash: user.password_hash,
            role,
            verified: user.verified,
            verification: user.verification,
            created_at: Utc::now(),
        };

        tables.last_id = id;
        tables.ids_by_email.insert(record.email.clone(), id);
        tables.users.insert(id, record.clone());
        match (role, doctor) {
            (Role::Doctor, Some(doctor)) => {
                tables.doctors.insert(id, doctor);
            }
            (Role::Patient, _) => {
                tables.patients.insert(id, PatientProfile::empty(id));
            }
            _ => {}
        }

        Ok(record)
    }

    async fn mark_verified(&self, email: &Email) -> Result<UserRecord, CredentialStoreError> {
        let mut tables = self.tables.write().await;
        let id = tables.id_of(email)?;
        let user = tables.user_mut(id)?;
        user.verified = true;
        user.verification = None;
        Ok(user.clone())
    }

    async fn replace_verification(
        &self,
        email: &Email,
        pending: PendingVerification,
    ) -> Result<(), CredentialStoreError> {
        let mut tables = self.tables.write().await;
        let id = tables.id_of(email)?;
        tables.user_mut(id)?.verification = Some(pending);
        Ok(())
    }

    async fn update_image(
        &self,
        id: UserId,
        image: &str,
    ) -> Result<UserRecord, CredentialStoreError> {
        let mut tables = self.tables.write().await;
        let user = tables.user_mut(id)?;
        user.image = image.to_owned();
        Ok(user.clone())
    }

    async fn update_profile(
        &self,
        id: UserId,
        update: ProfileUpdate,
    ) -> Result<UserRecord, CredentialStoreError> {
        let mut tables = self.tables.write().await;
        let role = tables
            .users
            .get(&id)
            .map(|u| u.role)
            .ok_or(CredentialStoreError::UserNotFound)?;

        if role == Role::Doctor && update.touches_doctor_profile() {
            let doctor = tables
                .doctors
                .get_mut(&id)
                .ok_or(CredentialStoreError::ProfileMissing)?;
            if let Some(bio) = update.bio {
                doctor.bio = bio;
            }
            if let Some(fee) = update.consultation_fee {
                doctor.consultation_fee = fee;
            }
            if let Some(is_available) = update.is_available {
                doctor.is_available = is_available;
            }
        }

        let user = tables.user_mut(id)?;
        if let Some(first_name) = update.first_name {
            user.first_name = first_name.into_inner();
        }
        if let Some(last_name) = update.last_name {
            user.last_name = last_name.into_inner();
        }
        if let Some(image) = update.image {
            user.image = image.into_inner();
        }
        Ok(user.clone())
    }

    async fn set_role(&self, id: UserId, role: Role) -> Result<UserRecord, CredentialStoreError> {
        let mut tables = self.tables.write().await;
        let user = tables.user_mut(id)?;
        user.role = role;
        Ok(user.clone())
    }

    async fn patient_profile(&self, id: UserId) -> Result<PatientProfile, CredentialStoreError> {
        let tables = self.tables.read().await;
        tables
            .patients
            .get(&id)
            .cloned()
            .ok_or(CredentialStoreError::ProfileMissing)
    }

    async fn doctor_profile(&self, id: UserId) -> Result<DoctorProfile, CredentialStoreError> {
        let tables = self.tables.read().await;
        tables
            .doctors
            .get(&id)
            .cloned()
            .ok_or(CredentialStoreError::ProfileMissing)
    }
}

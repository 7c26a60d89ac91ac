use careflow_core::{
    CredentialStore, CredentialStoreError, DoctorProfile, PatientProfile, ProfileUpdate, UserId,
    UserProfile,
};

/// Get profile use case - re-reads the caller from the store
///
/// Token claims are a snapshot; the store is the source of truth.
pub struct GetProfileUseCase<'a, S>
where
    S: CredentialStore,
{
    credential_store: &'a S,
}

impl<'a, S> GetProfileUseCase<'a, S>
where
    S: CredentialStore,
{
    pub fn new(credential_store: &'a S) -> Self {
        Self { credential_store }
    }

    #[tracing::instrument(name = "GetProfileUseCase::execute", skip(self))]
    pub async fn execute(&self, user_id: UserId) -> Result<UserProfile, CredentialStoreError> {
        Ok(self.credential_store.find_by_id(user_id).await?.profile())
    }
}

/// Update profile use case - user fields and, for doctors, doctor fields in
/// one transaction
pub struct UpdateProfileUseCase<'a, S>
where
    S: CredentialStore,
{
    credential_store: &'a S,
}

impl<'a, S> UpdateProfileUseCase<'a, S>
where
    S: CredentialStore,
{
    pub fn new(credential_store: &'a S) -> Self {
        Self { credential_store }
    }

    #[tracing::instrument(name = "UpdateProfileUseCase::execute", skip(self, update))]
    pub async fn execute(
        &self,
        user_id: UserId,
        update: ProfileUpdate,
    ) -> Result<UserProfile, CredentialStoreError> {
        Ok(self
            .credential_store
            .update_profile(user_id, update)
            .await?
            .profile())
    }
}

pub struct PatientProfileUseCase<'a, S>
where
    S: CredentialStore,
{
    credential_store: &'a S,
}

impl<'a, S> PatientProfileUseCase<'a, S>
where
    S: CredentialStore,
{
    pub fn new(credential_store: &'a S) -> Self {
        Self { credential_store }
    }

    #[tracing::instrument(name = "PatientProfileUseCase::execute", skip(self))]
    pub async fn execute(&self, user_id: UserId) -> Result<PatientProfile, CredentialStoreError> {
        self.credential_store.patient_profile(user_id).await
    }
}

pub struct DoctorProfileUseCase<'a, S>
where
    S: CredentialStore,
{
    credential_store: &'a S,
}

impl<'a, S> DoctorProfileUseCase<'a, S>
where
    S: CredentialStore,
{
    pub fn new(credential_store: &'a S) -> Self {
        Self { credential_store }
    }

    #[tracing::instrument(name = "DoctorProfileUseCase::execute", skip(self))]
    pub async fn execute(&self, user_id: UserId) -> Result<DoctorProfile, CredentialStoreError> {
        self.credential_store.doctor_profile(user_id).await
    }
}

use careflow_core::{CredentialStore, CredentialStoreError, Role, UserId, UserProfile};

/// Change role use case - admin reassignment of a user's role
///
/// Tokens issued before the change keep the old role and are refused by the
/// role-drift checks from then on. Role-profile rows are left untouched.
pub struct ChangeRoleUseCase<'a, S>
where
    S: CredentialStore,
{
    credential_store: &'a S,
}

impl<'a, S> ChangeRoleUseCase<'a, S>
where
    S: CredentialStore,
{
    pub fn new(credential_store: &'a S) -> Self {
        Self { credential_store }
    }

    #[tracing::instrument(name = "ChangeRoleUseCase::execute", skip(self))]
    pub async fn execute(
        &self,
        user_id: UserId,
        role: Role,
    ) -> Result<UserProfile, CredentialStoreError> {
        let user = self.credential_store.set_role(user_id, role).await?;
        tracing::info!(user_id, role = %role, "user role changed");
        Ok(user.profile())
    }
}

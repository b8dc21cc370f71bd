use std::sync::Arc;

use thiserror::Error;
use uuid::Uuid;

use crate::auth::model::PublicUser;
use crate::auth::password::PasswordHasher;
use crate::auth::store::UserStore;

/// Failures the service can actually distinguish. Anything else from the
/// store passes through untouched for the HTTP layer to classify as 500.
/// Unknown-user and wrong-password are not errors; those paths return
/// `Ok(None)` so the two cases stay indistinguishable to callers.
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("user already exists")]
    DuplicateUser,
    #[error("password hashing failed: {0}")]
    Hash(#[source] anyhow::Error),
    #[error(transparent)]
    Store(#[from] anyhow::Error),
}

/// Registration input.
#[derive(Debug)]
pub struct NewUser<'a> {
    pub username: &'a str,
    pub password: &'a str,
    pub email: Option<&'a str>,
    pub name: Option<&'a str>,
}

/// Owns the credential lifecycle; the only reader and writer of the
/// password hash. Store and hasher are injected at construction.
pub struct AuthService {
    store: Arc<dyn UserStore>,
    hasher: Arc<dyn PasswordHasher>,
}

impl AuthService {
    pub fn new(store: Arc<dyn UserStore>, hasher: Arc<dyn PasswordHasher>) -> Self {
        Self { store, hasher }
    }

    /// Create a new account. The collision pre-check here is best-effort;
    /// a concurrent registration losing the race hits the store's UNIQUE
    /// constraint and surfaces as `AuthError::Store` instead.
    pub async fn register(&self, new: NewUser<'_>) -> Result<PublicUser, AuthError> {
        if self
            .store
            .find_by_username_or_email(new.username, new.email)
            .await?
            .is_some()
        {
            return Err(AuthError::DuplicateUser);
        }

        let hash = self.hasher.hash(new.password).map_err(AuthError::Hash)?;
        let user = self
            .store
            .insert(new.username, &hash, new.email, new.name)
            .await?;
        Ok(user.into())
    }

    /// Verify credentials. Returns `None` for unknown username and wrong
    /// password alike.
    pub async fn authenticate(
        &self,
        username: &str,
        password: &str,
    ) -> Result<Option<PublicUser>, AuthError> {
        let Some(user) = self.store.find_by_username(username).await? else {
            return Ok(None);
        };

        let ok = self
            .hasher
            .verify(password, &user.password_hash)
            .map_err(AuthError::Hash)?;
        if !ok {
            return Ok(None);
        }

        Ok(Some(user.into()))
    }

    pub async fn get_by_id(&self, id: Uuid) -> Result<Option<PublicUser>, AuthError> {
        let user = self.store.find_by_id(id).await?;
        Ok(user.map(Into::into))
    }

    /// Re-hash and overwrite. Does not re-validate the old password;
    /// callers must re-authenticate before invoking this. Returns whether
    /// a record was actually updated.
    pub async fn rotate_password(
        &self,
        id: Uuid,
        new_password: &str,
    ) -> Result<bool, AuthError> {
        let hash = self.hasher.hash(new_password).map_err(AuthError::Hash)?;
        let updated = self.store.update_password_hash(id, &hash).await?;
        Ok(updated)
    }
}

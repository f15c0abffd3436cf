//! Users use-cases over the [`UserRepository`] port.
//!
//! Each operation applies its checks in a fixed order (existence, then
//! validity, then the mutation) and stops at the first failing check, so a
//! rejected request never reaches a mutating repository call.

use std::sync::Arc;

use tracing::debug;

use super::ports::{UserPersistenceError, UserRepository};
use super::{User, UserDraft, UserId, UserValidationError};

/// Failures surfaced by [`UsersService`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum UsersError {
    /// Required request fields were missing.
    #[error(transparent)]
    Validation(#[from] UserValidationError),
    /// No record exists for the addressed identifier.
    #[error("user does not exist")]
    NotFound,
    /// The repository could not produce the user collection.
    #[error("user collection is unavailable")]
    Unavailable,
    /// The repository failed.
    #[error(transparent)]
    Persistence(#[from] UserPersistenceError),
}

/// Stateless users service; clones share the same repository.
#[derive(Clone)]
pub struct UsersService {
    repository: Arc<dyn UserRepository>,
}

impl UsersService {
    /// Build the service over a repository.
    pub fn new(repository: Arc<dyn UserRepository>) -> Self {
        Self { repository }
    }

    /// Validate and insert a new user.
    pub async fn create(&self, draft: UserDraft) -> Result<User, UsersError> {
        let new_user = draft.into_new_user()?;
        let user = self.repository.insert(new_user).await?;
        debug!(user_id = %user.id(), "user created");
        Ok(user)
    }

    /// Return every stored user.
    pub async fn list(&self) -> Result<Vec<User>, UsersError> {
        self.repository.find().await?.ok_or(UsersError::Unavailable)
    }

    /// Return the user addressed by `id`.
    pub async fn get(&self, id: UserId) -> Result<User, UsersError> {
        self.existing(id).await
    }

    /// Delete the user addressed by `id`, returning the removed record.
    pub async fn delete(&self, id: UserId) -> Result<User, UsersError> {
        self.existing(id).await?;
        let removed = self
            .repository
            .remove(id)
            .await?
            .ok_or(UsersError::NotFound)?;
        debug!(user_id = %id, "user removed");
        Ok(removed)
    }

    /// Replace the name and bio of the user addressed by `id`.
    pub async fn update(&self, id: UserId, draft: UserDraft) -> Result<User, UsersError> {
        self.existing(id).await?;
        let changes = draft.into_changes()?;
        let updated = self
            .repository
            .update(id, changes)
            .await?
            .ok_or(UsersError::NotFound)?;
        debug!(user_id = %id, "user updated");
        Ok(updated)
    }

    async fn existing(&self, id: UserId) -> Result<User, UsersError> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or(UsersError::NotFound)
    }
}

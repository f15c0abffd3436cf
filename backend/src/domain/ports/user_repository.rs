//! Port abstraction for user persistence adapters and their errors.
//!
//! The users service consumes this port; outbound adapters (in-memory and
//! PostgreSQL) implement it. Absence of a record is reported as `Ok(None)`,
//! never as an error.

use async_trait::async_trait;

use crate::domain::{NewUser, User, UserChanges, UserId};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by user repository adapters.
    pub enum UserPersistenceError {
        /// Repository connection could not be established.
        Connection { message: String } => "user repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "user repository query failed: {message}",
        /// A record with the requested identifier already exists.
        Conflict { message: String } => "user repository conflict: {message}",
    }
}

/// Storage collaborator for user records.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Persist a new record, assigning an identifier when none was supplied.
    async fn insert(&self, user: NewUser) -> Result<User, UserPersistenceError>;

    /// Fetch every record ordered by identifier.
    ///
    /// `None` signals that the collection itself could not be produced.
    async fn find(&self) -> Result<Option<Vec<User>>, UserPersistenceError>;

    /// Fetch a record by identifier.
    async fn find_by_id(&self, id: UserId) -> Result<Option<User>, UserPersistenceError>;

    /// Replace name and bio, returning the updated record if it still exists.
    async fn update(
        &self,
        id: UserId,
        changes: UserChanges,
    ) -> Result<Option<User>, UserPersistenceError>;

    /// Delete a record, returning it if it existed.
    async fn remove(&self, id: UserId) -> Result<Option<User>, UserPersistenceError>;
}

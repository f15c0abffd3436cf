//! Process-local `UserRepository` implementation.
//!
//! Used when no database is configured and as the storage collaborator in
//! HTTP tests. Records live in a `BTreeMap` keyed by identifier, so `find`
//! returns them in identifier order.

use std::collections::BTreeMap;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use async_trait::async_trait;

use crate::domain::ports::{UserPersistenceError, UserRepository};
use crate::domain::{NewUser, User, UserChanges, UserId};

#[derive(Debug)]
struct Store {
    users: BTreeMap<UserId, User>,
    next_id: i64,
}

impl Default for Store {
    fn default() -> Self {
        Self {
            users: BTreeMap::new(),
            next_id: 1,
        }
    }
}

impl Store {
    fn track(&mut self, id: UserId) {
        self.next_id = self.next_id.max(id.value().saturating_add(1));
    }

    fn allocate(&self) -> Result<UserId, UserPersistenceError> {
        let id = UserId::new(self.next_id)
            .map_err(|err| UserPersistenceError::query(err.to_string()))?;
        if self.users.contains_key(&id) {
            return Err(UserPersistenceError::conflict("identifier space exhausted"));
        }
        Ok(id)
    }
}

/// In-memory user store.
///
/// Assigned identifiers start at 1 and always exceed every identifier stored
/// so far, including caller-supplied ones.
///
/// # Examples
/// ```
/// use users_api::domain::ports::UserRepository;
/// use users_api::domain::{NewUser, UserChanges};
/// use users_api::outbound::persistence::InMemoryUserRepository;
///
/// # tokio::runtime::Runtime::new().unwrap().block_on(async {
/// let repository = InMemoryUserRepository::new();
/// let changes = UserChanges::new("Ana", "Engineer").expect("valid changes");
/// let user = repository
///     .insert(NewUser { id: None, changes })
///     .await
///     .expect("insert succeeds");
/// assert_eq!(user.id().value(), 1);
/// # });
/// ```
#[derive(Debug, Default)]
pub struct InMemoryUserRepository {
    store: RwLock<Store>,
}

impl InMemoryUserRepository {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store pre-populated with `users`.
    pub fn with_users(users: impl IntoIterator<Item = User>) -> Self {
        let mut store = Store::default();
        for user in users {
            store.track(user.id());
            store.users.insert(user.id(), user);
        }
        Self {
            store: RwLock::new(store),
        }
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, Store>, UserPersistenceError> {
        self.store
            .read()
            .map_err(|_| UserPersistenceError::connection("in-memory user store lock poisoned"))
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, Store>, UserPersistenceError> {
        self.store
            .write()
            .map_err(|_| UserPersistenceError::connection("in-memory user store lock poisoned"))
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn insert(&self, user: NewUser) -> Result<User, UserPersistenceError> {
        let mut store = self.write()?;
        let id = match user.id {
            Some(id) if store.users.contains_key(&id) => {
                return Err(UserPersistenceError::conflict(format!(
                    "user {id} already exists"
                )));
            }
            Some(id) => id,
            None => store.allocate()?,
        };
        let record = User::new(id, user.changes);
        store.track(id);
        store.users.insert(id, record.clone());
        Ok(record)
    }

    async fn find(&self) -> Result<Option<Vec<User>>, UserPersistenceError> {
        let store = self.read()?;
        Ok(Some(store.users.values().cloned().collect()))
    }

    async fn find_by_id(&self, id: UserId) -> Result<Option<User>, UserPersistenceError> {
        Ok(self.read()?.users.get(&id).cloned())
    }

    async fn update(
        &self,
        id: UserId,
        changes: UserChanges,
    ) -> Result<Option<User>, UserPersistenceError> {
        let mut store = self.write()?;
        Ok(store.users.get_mut(&id).map(|user| {
            *user = user.with_changes(changes);
            user.clone()
        }))
    }

    async fn remove(&self, id: UserId) -> Result<Option<User>, UserPersistenceError> {
        Ok(self.write()?.users.remove(&id))
    }
}

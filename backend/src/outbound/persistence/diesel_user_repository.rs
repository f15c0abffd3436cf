//! PostgreSQL-backed `UserRepository` implementation using Diesel ORM.
//!
//! Every mutation uses `RETURNING`, so the record handed back to the caller
//! is the one the database stored.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::scoped_futures::ScopedFutureExt;
use diesel_async::{AsyncConnection, RunQueryDsl};
use tracing::debug;

use crate::domain::ports::{UserPersistenceError, UserRepository};
use crate::domain::{NewUser, User, UserChanges, UserId};

use super::models::{NewUserRow, UserChangesRow, UserRow};
use super::pool::{DbPool, PoolError};
use super::schema::users;

/// Moves the id sequence past every stored id, so rows inserted with an
/// explicit id never collide with later sequence-assigned ones.
const SYNC_ID_SEQUENCE: &str = "SELECT setval(pg_get_serial_sequence('users', 'id'), \
     GREATEST((SELECT MAX(id) FROM users), 1))";

/// Diesel-backed implementation of the `UserRepository` port.
#[derive(Clone)]
pub struct DieselUserRepository {
    pool: DbPool,
}

impl DieselUserRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> UserPersistenceError {
    match error {
        PoolError::Checkout { message } | PoolError::Build { message } => {
            UserPersistenceError::connection(message)
        }
    }
}

fn map_diesel_error(error: diesel::result::Error) -> UserPersistenceError {
    use diesel::result::{DatabaseErrorKind, Error as DieselError};

    match &error {
        DieselError::DatabaseError(kind, info) => {
            debug!(?kind, message = info.message(), "diesel operation failed");
        }
        _ => debug!(
            error_type = %std::any::type_name_of_val(&error),
            "diesel operation failed"
        ),
    }

    match error {
        DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
            UserPersistenceError::conflict("user id already exists")
        }
        DieselError::DatabaseError(DatabaseErrorKind::ClosedConnection, _) => {
            UserPersistenceError::connection("database connection error")
        }
        DieselError::NotFound => UserPersistenceError::query("record not found"),
        DieselError::QueryBuilderError(_) => UserPersistenceError::query("database query error"),
        _ => UserPersistenceError::query("database error"),
    }
}

fn row_to_user(row: UserRow) -> Result<User, UserPersistenceError> {
    let UserRow { id, name, bio } = row;
    User::try_from_parts(id, name, bio).map_err(|err| {
        UserPersistenceError::query(format!("stored user {id} is invalid: {err}"))
    })
}

fn optional_row(row: Option<UserRow>) -> Result<Option<User>, UserPersistenceError> {
    row.map(row_to_user).transpose()
}

#[async_trait]
impl UserRepository for DieselUserRepository {
    async fn insert(&self, user: NewUser) -> Result<User, UserPersistenceError> {
        let row = NewUserRow {
            id: user.id.map(UserId::value),
            name: user.changes.name(),
            bio: user.changes.bio(),
        };
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let insert = diesel::insert_into(users::table)
            .values(&row)
            .returning(UserRow::as_returning());

        let stored: UserRow = if row.id.is_some() {
            conn.transaction::<_, diesel::result::Error, _>(|conn| {
                async move {
                    let stored: UserRow = insert.get_result(conn).await?;
                    diesel::sql_query(SYNC_ID_SEQUENCE).execute(conn).await?;
                    Ok(stored)
                }
                .scope_boxed()
            })
            .await
        } else {
            insert.get_result(&mut conn).await
        }
        .map_err(map_diesel_error)?;
        row_to_user(stored)
    }

    async fn find(&self) -> Result<Option<Vec<User>>, UserPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let rows: Vec<UserRow> = users::table
            .order(users::id.asc())
            .select(UserRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        rows.into_iter()
            .map(row_to_user)
            .collect::<Result<Vec<_>, _>>()
            .map(Some)
    }

    async fn find_by_id(&self, id: UserId) -> Result<Option<User>, UserPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row: Option<UserRow> = users::table
            .find(id.value())
            .select(UserRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;
        optional_row(row)
    }

    async fn update(
        &self,
        id: UserId,
        changes: UserChanges,
    ) -> Result<Option<User>, UserPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let changeset = UserChangesRow {
            name: changes.name(),
            bio: changes.bio(),
        };
        let row: Option<UserRow> = diesel::update(users::table.find(id.value()))
            .set(&changeset)
            .returning(UserRow::as_returning())
            .get_result(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;
        optional_row(row)
    }

    async fn remove(&self, id: UserId) -> Result<Option<User>, UserPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row: Option<UserRow> = diesel::delete(users::table.find(id.value()))
            .returning(UserRow::as_returning())
            .get_result(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;
        optional_row(row)
    }
}

//! User persistence adapters.
//!
//! - [`InMemoryUserRepository`]: process-local store, used when no database
//!   is configured and in tests.
//! - [`DieselUserRepository`]: PostgreSQL via Diesel, `diesel-async`, and a
//!   `bb8` pool.
//!
//! Adapters only translate between rows and domain types; the branch logic
//! lives in [`crate::domain::UsersService`].
//!
//! # Example
//!
//! ```no_run
//! use users_api::outbound::persistence::{
//!     DbPool, DieselUserRepository, PoolConfig, run_pending_migrations,
//! };
//!
//! # async fn connect() -> Result<(), Box<dyn std::error::Error>> {
//! let url = "postgres://localhost/users";
//! run_pending_migrations(url).await?;
//! let pool = DbPool::new(PoolConfig::new(url)).await?;
//! let repository = DieselUserRepository::new(pool);
//! # let _ = repository;
//! # Ok(())
//! # }
//! ```

mod diesel_user_repository;
mod in_memory_user_repository;
mod migrations;
mod models;
mod pool;
mod schema;

pub use diesel_user_repository::DieselUserRepository;
pub use in_memory_user_repository::InMemoryUserRepository;
pub use migrations::{MigrationError, run_pending_migrations};
pub use pool::{DbPool, PoolConfig, PoolError};

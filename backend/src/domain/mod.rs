//! Domain primitives, ports, and use-cases.
//!
//! Purpose: keep the user model and the per-route branch logic free of
//! transport and storage details. Inbound adapters map [`UsersError`] onto
//! protocol responses; outbound adapters implement [`ports::UserRepository`].
//!
//! Public surface:
//! - `Error`/`ErrorCode`: client-facing error payload.
//! - `User`, `UserId`, `UserChanges`, `NewUser`, `UserDraft`: the user model.
//! - `UsersService`/`UsersError`: create, list, get, update, delete.
//! - `TraceId`: request-scoped correlation identifier.

pub mod error;
pub mod ports;
pub mod trace_id;
pub mod user;
pub mod users_service;

pub use self::error::{Error, ErrorCode, ErrorValidationError};
pub use self::trace_id::{TRACE_ID_HEADER, TraceId};
pub use self::user::{NewUser, User, UserChanges, UserDraft, UserId, UserValidationError};
pub use self::users_service::{UsersError, UsersService};

//! User data model.
//!
//! A persisted [`User`] always carries a positive identifier and a non-empty
//! name and bio. Unvalidated request input arrives as a [`UserDraft`]; the
//! users service turns it into [`UserChanges`] only once the route's
//! existence check has passed.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Validation errors raised while building user values.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum UserValidationError {
    /// Identifiers are positive integers.
    #[error("user id must be a positive integer")]
    InvalidId,
    /// The name was absent or empty.
    #[error("user name must be provided")]
    MissingName,
    /// The bio was absent or empty.
    #[error("user bio must be provided")]
    MissingBio,
}

/// Stable user identifier.
///
/// # Examples
/// ```
/// use users_api::domain::UserId;
///
/// let id = UserId::new(7).expect("positive id");
/// assert_eq!(id.value(), 7);
/// assert_eq!(UserId::from_path("7"), Some(id));
/// assert!(UserId::from_path("abc").is_none());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "i64")]
pub struct UserId(i64);

impl UserId {
    /// Validate and construct an identifier.
    pub fn new(value: i64) -> Result<Self, UserValidationError> {
        if value <= 0 {
            return Err(UserValidationError::InvalidId);
        }
        Ok(Self(value))
    }

    /// Parse a path segment. Anything that is not a positive integer cannot
    /// address a stored user and yields `None`.
    pub fn from_path(segment: &str) -> Option<Self> {
        segment
            .parse::<i64>()
            .ok()
            .and_then(|value| Self::new(value).ok())
    }

    /// Raw integer value.
    pub fn value(self) -> i64 {
        self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<UserId> for i64 {
    fn from(value: UserId) -> Self {
        value.0
    }
}

impl TryFrom<i64> for UserId {
    type Error = UserValidationError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Validated replacement values for a user's mutable fields.
///
/// # Examples
/// ```
/// use users_api::domain::{UserChanges, UserValidationError};
///
/// let changes = UserChanges::new("Ana", "Engineer").expect("valid changes");
/// assert_eq!(changes.name(), "Ana");
///
/// let err = UserChanges::new("", "Engineer").expect_err("empty name");
/// assert_eq!(err, UserValidationError::MissingName);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserChanges {
    name: String,
    bio: String,
}

impl UserChanges {
    /// Validate and construct replacement values.
    pub fn new(
        name: impl Into<String>,
        bio: impl Into<String>,
    ) -> Result<Self, UserValidationError> {
        Self::from_fields(Some(name.into()), Some(bio.into()))
    }

    /// Validate optional fields as they arrive from a request body.
    pub fn from_fields(
        name: Option<String>,
        bio: Option<String>,
    ) -> Result<Self, UserValidationError> {
        let name = name
            .filter(|value| !value.is_empty())
            .ok_or(UserValidationError::MissingName)?;
        let bio = bio
            .filter(|value| !value.is_empty())
            .ok_or(UserValidationError::MissingBio)?;
        Ok(Self { name, bio })
    }

    /// Replacement name.
    pub fn name(&self) -> &str {
        self.name.as_str()
    }

    /// Replacement bio.
    pub fn bio(&self) -> &str {
        self.bio.as_str()
    }
}

/// Record handed to the repository on create.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUser {
    /// Caller-supplied identifier; storage assigns one when absent.
    pub id: Option<UserId>,
    /// Validated name and bio.
    pub changes: UserChanges,
}

/// Unvalidated create or update input.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserDraft {
    /// Requested identifier (create only).
    pub id: Option<UserId>,
    /// Requested name.
    pub name: Option<String>,
    /// Requested bio.
    pub bio: Option<String>,
}

impl UserDraft {
    /// Validate the draft into a record ready for insertion.
    pub fn into_new_user(self) -> Result<NewUser, UserValidationError> {
        let changes = UserChanges::from_fields(self.name, self.bio)?;
        Ok(NewUser {
            id: self.id,
            changes,
        })
    }

    /// Validate the draft into replacement values; any `id` is ignored.
    pub fn into_changes(self) -> Result<UserChanges, UserValidationError> {
        UserChanges::from_fields(self.name, self.bio)
    }
}

/// Persisted user record.
///
/// ## Invariants
/// - `id` is a positive integer.
/// - `name` and `bio` are non-empty.
///
/// Serialises as `{"id": 1, "name": "...", "bio": "..."}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "UserDto", into = "UserDto")]
pub struct User {
    id: UserId,
    changes: UserChanges,
}

impl User {
    /// Build a user from validated components.
    pub fn new(id: UserId, changes: UserChanges) -> Self {
        Self { id, changes }
    }

    /// Fallible constructor from raw parts, as read back from storage.
    pub fn try_from_parts(
        id: i64,
        name: impl Into<String>,
        bio: impl Into<String>,
    ) -> Result<Self, UserValidationError> {
        Ok(Self::new(UserId::new(id)?, UserChanges::new(name, bio)?))
    }

    /// Stable identifier.
    pub fn id(&self) -> UserId {
        self.id
    }

    /// Display name.
    pub fn name(&self) -> &str {
        self.changes.name()
    }

    /// Free-form biography.
    pub fn bio(&self) -> &str {
        self.changes.bio()
    }

    /// Return a copy with `changes` applied.
    #[must_use]
    pub fn with_changes(&self, changes: UserChanges) -> Self {
        Self::new(self.id, changes)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
struct UserDto {
    id: i64,
    name: String,
    bio: String,
}

impl From<User> for UserDto {
    fn from(value: User) -> Self {
        let User { id, changes } = value;
        Self {
            id: id.value(),
            name: changes.name,
            bio: changes.bio,
        }
    }
}

impl TryFrom<UserDto> for User {
    type Error = UserValidationError;

    fn try_from(value: UserDto) -> Result<Self, Self::Error> {
        User::try_from_parts(value.id, value.name, value.bio)
    }
}

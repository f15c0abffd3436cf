//! OpenAPI schema definitions for domain types.
//!
//! Domain types do not derive `ToSchema`. These wrappers mirror their wire
//! shape so the documentation lives in the inbound adapter, next to the
//! framework.

use utoipa::ToSchema;

/// OpenAPI schema for [`crate::domain::Error`].
#[derive(ToSchema)]
#[schema(as = crate::domain::Error, rename_all = "camelCase")]
#[expect(dead_code, reason = "Used only for OpenAPI schema generation via utoipa")]
pub struct ErrorSchema {
    /// Human-readable message, or the underlying failure for internal errors.
    #[schema(example = "The user with the specified ID does not exist")]
    message: String,
    /// Route-specific explanation attached to persistence failures.
    #[schema(example = "The user information could not be retrieved")]
    custom_message: Option<String>,
}

/// OpenAPI schema for [`crate::domain::User`].
#[derive(ToSchema)]
#[schema(as = crate::domain::User)]
#[expect(dead_code, reason = "Used only for OpenAPI schema generation via utoipa")]
pub struct UserSchema {
    /// Positive integer identifier.
    #[schema(example = 1)]
    id: i64,
    /// Non-empty name.
    #[schema(example = "Ana")]
    name: String,
    /// Non-empty biography.
    #[schema(example = "Engineer")]
    bio: String,
}

/// OpenAPI schema for create and update request bodies.
#[derive(ToSchema)]
#[schema(as = crate::inbound::http::payload::UserPayload)]
#[expect(dead_code, reason = "Used only for OpenAPI schema generation via utoipa")]
pub struct UserPayloadSchema {
    /// Optional identifier; honoured on create only.
    #[schema(example = 1)]
    id: Option<i64>,
    /// Required, non-empty.
    #[schema(example = "Ana")]
    name: String,
    /// Required, non-empty.
    #[schema(example = "Engineer")]
    bio: String,
}

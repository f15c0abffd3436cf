//! Users API handlers.
//!
//! ```text
//! POST   /api/users      {"name":"Ana","bio":"Engineer"}
//! GET    /api/users
//! GET    /api/users/{id}
//! PUT    /api/users/{id} {"name":"Ana","bio":"Engineer"}
//! DELETE /api/users/{id}
//! ```
//!
//! Every failure body carries `message`; persistence failures on list, get,
//! delete and update add a route-specific `customMessage`.

use actix_web::{HttpResponse, Scope, delete, get, post, put, web};
use tracing::error;

use crate::domain::{Error, UserId, UsersError};
use crate::inbound::http::ApiResult;
use crate::inbound::http::payload::UserPayload;
use crate::inbound::http::schemas::{ErrorSchema, UserPayloadSchema, UserSchema};
use crate::inbound::http::state::HttpState;

const MISSING_FIELDS: &str = "Please provide name and bio for the user";
const USER_NOT_FOUND: &str = "The user with the specified ID does not exist";
const SAVE_FAILED: &str = "There was an error while saving the user to the database";
const USERS_UNAVAILABLE: &str = "The users information could not be retrieved";
const LIST_FAILED: &str = "uh-oh, something went wrong while trying to retrieve the users";
// Shared by get and delete.
const LOOKUP_FAILED: &str = "The user information could not be retrieved";
const MODIFY_FAILED: &str = "The user information could not be modified";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum UserRoute {
    Create,
    List,
    Get,
    Delete,
    Update,
}

impl UserRoute {
    fn map_error(self, err: UsersError) -> Error {
        match err {
            UsersError::Validation(_) => Error::invalid_request(MISSING_FIELDS),
            UsersError::NotFound => Error::not_found(USER_NOT_FOUND),
            UsersError::Unavailable => {
                error!(route = ?self, "user repository returned no collection");
                Error::internal(USERS_UNAVAILABLE)
            }
            UsersError::Persistence(source) => {
                error!(route = ?self, error = %source, "user persistence failed");
                match self {
                    Self::Create => Error::internal(SAVE_FAILED),
                    Self::List => Error::internal(source.to_string()).with_custom_message(LIST_FAILED),
                    Self::Get | Self::Delete => {
                        Error::internal(source.to_string()).with_custom_message(LOOKUP_FAILED)
                    }
                    Self::Update => {
                        Error::internal(source.to_string()).with_custom_message(MODIFY_FAILED)
                    }
                }
            }
        }
    }

    fn user_id(self, segment: &str) -> ApiResult<UserId> {
        UserId::from_path(segment).ok_or_else(|| self.map_error(UsersError::NotFound))
    }
}

/// Mount the users routes under `/api`.
///
/// # Examples
/// ```
/// use actix_web::App;
/// use users_api::inbound::http::users::users_scope;
///
/// let app = App::new().service(users_scope());
/// ```
pub fn users_scope() -> Scope {
    web::scope("/api")
        .service(create_user)
        .service(list_users)
        .service(get_user)
        .service(update_user)
        .service(delete_user)
}

/// Create a user from `id?`, `name` and `bio`.
#[utoipa::path(
    post,
    path = "/api/users",
    request_body = UserPayloadSchema,
    responses(
        (status = 201, description = "Created user", body = UserSchema),
        (status = 400, description = "Missing name or bio", body = ErrorSchema),
        (status = 500, description = "Insert failed", body = ErrorSchema)
    ),
    tags = ["users"],
    operation_id = "createUser"
)]
#[post("/users")]
pub async fn create_user(state: web::Data<HttpState>, body: web::Bytes) -> ApiResult<HttpResponse> {
    let draft = UserPayload::from_body(&body).into_draft();
    let user = state
        .users
        .create(draft)
        .await
        .map_err(|err| UserRoute::Create.map_error(err))?;
    Ok(HttpResponse::build(state.status_codes.created()).json(user))
}

/// List every user.
#[utoipa::path(
    get,
    path = "/api/users",
    responses(
        (status = 201, description = "Users", body = [UserSchema]),
        (status = 500, description = "Users could not be retrieved", body = ErrorSchema)
    ),
    tags = ["users"],
    operation_id = "listUsers"
)]
#[get("/users")]
pub async fn list_users(state: web::Data<HttpState>) -> ApiResult<HttpResponse> {
    let users = state
        .users
        .list()
        .await
        .map_err(|err| UserRoute::List.map_error(err))?;
    Ok(HttpResponse::build(state.status_codes.succeeded()).json(users))
}

/// Fetch one user.
#[utoipa::path(
    get,
    path = "/api/users/{id}",
    params(("id" = i64, Path, description = "User identifier")),
    responses(
        (status = 201, description = "User", body = UserSchema),
        (status = 404, description = "No such user", body = ErrorSchema),
        (status = 500, description = "Lookup failed", body = ErrorSchema)
    ),
    tags = ["users"],
    operation_id = "getUser"
)]
#[get("/users/{id}")]
pub async fn get_user(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let route = UserRoute::Get;
    let id = route.user_id(&path)?;
    let user = state
        .users
        .get(id)
        .await
        .map_err(|err| route.map_error(err))?;
    Ok(HttpResponse::build(state.status_codes.succeeded()).json(user))
}

/// Delete one user and return it.
#[utoipa::path(
    delete,
    path = "/api/users/{id}",
    params(("id" = i64, Path, description = "User identifier")),
    responses(
        (status = 201, description = "Deleted user", body = UserSchema),
        (status = 404, description = "No such user", body = ErrorSchema),
        (status = 500, description = "Delete failed", body = ErrorSchema)
    ),
    tags = ["users"],
    operation_id = "deleteUser"
)]
#[delete("/users/{id}")]
pub async fn delete_user(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let route = UserRoute::Delete;
    let id = route.user_id(&path)?;
    let user = state
        .users
        .delete(id)
        .await
        .map_err(|err| route.map_error(err))?;
    Ok(HttpResponse::build(state.status_codes.succeeded()).json(user))
}

/// Replace the name and bio of one user.
#[utoipa::path(
    put,
    path = "/api/users/{id}",
    params(("id" = i64, Path, description = "User identifier")),
    request_body = UserPayloadSchema,
    responses(
        (status = 201, description = "Updated user", body = UserSchema),
        (status = 400, description = "Missing name or bio", body = ErrorSchema),
        (status = 404, description = "No such user", body = ErrorSchema),
        (status = 500, description = "Update failed", body = ErrorSchema)
    ),
    tags = ["users"],
    operation_id = "updateUser"
)]
#[put("/users/{id}")]
pub async fn update_user(
    state: web::Data<HttpState>,
    path: web::Path<String>,
    body: web::Bytes,
) -> ApiResult<HttpResponse> {
    let route = UserRoute::Update;
    let id = route.user_id(&path)?;
    let draft = UserPayload::from_body(&body).into_draft();
    let user = state
        .users
        .update(id, draft)
        .await
        .map_err(|err| route.map_error(err))?;
    Ok(HttpResponse::build(state.status_codes.succeeded()).json(user))
}

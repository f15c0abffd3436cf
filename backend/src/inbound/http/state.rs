//! Shared HTTP adapter state.
//!
//! Handlers receive this state via `actix_web::web::Data`, so they depend on
//! the users service only and stay testable without I/O.

use std::sync::Arc;

use actix_web::http::StatusCode;

use crate::domain::UsersService;
use crate::domain::ports::UserRepository;

/// Success status policy for the users routes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum StatusCodeMode {
    /// Answer 201 for every successful operation, reads included.
    #[default]
    Compatible,
    /// Answer 201 for create and 200 for everything else.
    Conventional,
}

impl StatusCodeMode {
    /// Status for a successful create.
    pub fn created(self) -> StatusCode {
        StatusCode::CREATED
    }

    /// Status for a successful list, get, update or delete.
    pub fn succeeded(self) -> StatusCode {
        match self {
            Self::Compatible => StatusCode::CREATED,
            Self::Conventional => StatusCode::OK,
        }
    }
}

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    /// Users use-cases.
    pub users: UsersService,
    /// Success status policy.
    pub status_codes: StatusCodeMode,
}

impl HttpState {
    /// Build state over a repository with the compatible status policy.
    ///
    /// # Examples
    /// ```
    /// use std::sync::Arc;
    ///
    /// use users_api::inbound::http::state::{HttpState, StatusCodeMode};
    /// use users_api::outbound::persistence::InMemoryUserRepository;
    ///
    /// let state = HttpState::new(Arc::new(InMemoryUserRepository::new()))
    ///     .with_status_codes(StatusCodeMode::Conventional);
    /// assert_eq!(state.status_codes, StatusCodeMode::Conventional);
    /// ```
    pub fn new(repository: Arc<dyn UserRepository>) -> Self {
        Self {
            users: UsersService::new(repository),
            status_codes: StatusCodeMode::default(),
        }
    }

    /// Replace the success status policy.
    #[must_use]
    pub fn with_status_codes(mut self, status_codes: StatusCodeMode) -> Self {
        self.status_codes = status_codes;
        self
    }
}

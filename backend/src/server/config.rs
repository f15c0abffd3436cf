//! HTTP server configuration object and helpers.

use std::fmt;
use std::net::SocketAddr;
use std::sync::Arc;

use crate::domain::ports::UserRepository;
use crate::inbound::http::state::StatusCodeMode;
use crate::outbound::persistence::InMemoryUserRepository;

/// Builder-style configuration for creating the HTTP server.
pub struct ServerConfig {
    pub(crate) bind_addr: SocketAddr,
    pub(crate) repository: Arc<dyn UserRepository>,
    pub(crate) status_codes: StatusCodeMode,
}

impl fmt::Debug for ServerConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ServerConfig")
            .field("bind_addr", &self.bind_addr)
            .field("status_codes", &self.status_codes)
            .finish_non_exhaustive()
    }
}

impl ServerConfig {
    /// Bind to `bind_addr` over an empty in-memory store.
    #[must_use]
    pub fn new(bind_addr: SocketAddr) -> Self {
        Self {
            bind_addr,
            repository: Arc::new(InMemoryUserRepository::new()),
            status_codes: StatusCodeMode::default(),
        }
    }

    /// Replace the user repository.
    #[must_use]
    pub fn with_repository(mut self, repository: Arc<dyn UserRepository>) -> Self {
        self.repository = repository;
        self
    }

    /// Replace the success status policy.
    #[must_use]
    pub fn with_status_codes(mut self, status_codes: StatusCodeMode) -> Self {
        self.status_codes = status_codes;
        self
    }

    /// Return the socket address the server will bind to.
    #[must_use]
    pub fn bind_addr(&self) -> SocketAddr {
        self.bind_addr
    }
}

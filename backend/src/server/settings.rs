//! Server settings loaded via OrthoConfig.
//!
//! Values come from CLI flags, `USERS_API_*` environment variables, or a
//! configuration file, in OrthoConfig's usual precedence.

use std::net::{AddrParseError, SocketAddr};

use ortho_config::OrthoConfig;
use serde::Deserialize;

use crate::inbound::http::state::StatusCodeMode;

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";
const DEFAULT_POOL_MAX_SIZE: u32 = 10;

/// Settings controlling the listener, persistence, and status policy.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "USERS_API")]
pub struct ServerSettings {
    /// Socket address to bind; defaults to `0.0.0.0:8080`.
    pub bind_addr: Option<String>,
    /// PostgreSQL URL. Without one, users are kept in memory.
    pub database_url: Option<String>,
    /// Maximum pooled database connections.
    pub pool_max_size: Option<u32>,
    /// Answer 200 instead of 201 for successful reads, updates, and deletes.
    #[ortho_config(default = false)]
    pub conventional_status_codes: bool,
}

impl ServerSettings {
    /// Parse the configured bind address, falling back to the default.
    pub fn bind_addr(&self) -> Result<SocketAddr, AddrParseError> {
        self.bind_addr
            .as_deref()
            .unwrap_or(DEFAULT_BIND_ADDR)
            .parse()
    }

    /// Configured database URL, if any.
    pub fn database_url(&self) -> Option<&str> {
        self.database_url.as_deref()
    }

    /// Configured pool size, falling back to the default.
    pub fn pool_max_size(&self) -> u32 {
        self.pool_max_size.unwrap_or(DEFAULT_POOL_MAX_SIZE)
    }

    /// Success status policy selected by `conventional_status_codes`.
    pub fn status_code_mode(&self) -> StatusCodeMode {
        if self.conventional_status_codes {
            StatusCodeMode::Conventional
        } else {
            StatusCodeMode::Compatible
        }
    }
}

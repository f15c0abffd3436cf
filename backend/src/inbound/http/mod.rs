//! HTTP inbound adapter exposing the users REST endpoints and health probes.

pub mod error;
pub mod health;
pub mod payload;
pub mod schemas;
pub mod state;
pub mod users;

pub use error::ApiResult;

//! Outbound adapters implementing the user repository port.

pub mod persistence;

//! Application layer for the multi-tenant isolation core
//!
//! Defines the repository ports every adapter must satisfy and the tenancy
//! workflows (administrative switch, per-tenant system jobs) built on them.

pub mod error;
pub mod ports;
pub mod services;

pub use error::ApplicationError;

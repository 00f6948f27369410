//! Shared domain types, configuration, and errors for Rota.
//!
//! Rota is an HR service for hospital staffing: employees, departments,
//! attendance, leave, and recruitment. This crate holds the entities and
//! cross-cutting concerns every other crate builds on.

pub mod config;
pub mod error;
pub mod types;

pub use config::{AssistantConfig, GeneralConfig, RemoteConfig, RotaConfig, ServerConfig};
pub use error::{Result, RotaError};
pub use types::*;

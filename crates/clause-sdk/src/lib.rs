//! # Clause SDK
//!
//! Client SDK for the clause evaluation service.

pub mod api;
pub mod client;
pub mod error;

pub use api::ClauseApi;
pub use client::ClauseClient;

/// Prelude module for common imports.
pub mod prelude {
    pub use crate::api::ClauseApi;
    pub use crate::client::ClauseClient;
    pub use clause_core::prelude::*;
}

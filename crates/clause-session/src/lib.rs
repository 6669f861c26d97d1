//! # Clause Session
//!
//! Identity provider integration and the session state service.

pub mod firebase;
pub mod memory;
pub mod provider;
pub mod service;

pub use firebase::{FirebaseConfig, FirebaseIdentityProvider};
pub use memory::InMemoryIdentityProvider;
pub use provider::IdentityProvider;
pub use service::{
    SessionService, SessionSubscription, LOGIN_REQUIRED_MESSAGE, SESSION_EXPIRED_MESSAGE,
};

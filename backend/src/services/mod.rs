//! Business logic services.

pub mod auth;
pub mod protocol;
pub mod session;
pub mod stats;
pub mod user;

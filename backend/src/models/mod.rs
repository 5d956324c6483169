//! Database models and request DTOs.

pub mod pagination;
pub mod protocol;
pub mod session;
pub mod user;

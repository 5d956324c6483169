//! Request extractors: authentication, role guards and JSON-error wrappers.

pub mod auth;
pub mod extract;
pub mod rbac;

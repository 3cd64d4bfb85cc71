//! Data transfer objects exchanged over the webhook HTTP API.

pub mod announcement;
pub mod api;

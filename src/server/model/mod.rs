//! Server-side domain models and parameter types.
//!
//! This module contains domain models used throughout the service layer: data
//! fetched from VATSIM, the static role configuration, role sync results and
//! announcement parameters. DTOs from `crate::model` are converted into these at
//! the controller boundary.

pub mod announcement;
pub mod flight;
pub mod role;
pub mod role_sync;
pub mod vatsim;

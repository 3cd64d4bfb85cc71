//! Repository layer for the remote systems the bot reads and mutates.
//!
//! The bot keeps no database; its sources of truth are the VATSIM API and the
//! Discord guild itself. Repositories wrap those remote calls behind traits so the
//! service layer can be tested with mocks.

pub mod discord;
pub mod vatsim;

pub use vatsim::{VatsimApi, VatsimClient};

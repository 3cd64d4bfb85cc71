//! Service layer for business logic and orchestration.
//!
//! Services sit between the entry points (slash commands, webhook controllers and
//! the scheduler) and the repositories wrapping VATSIM and Discord. They work on
//! domain models and take their repositories as trait objects so they can be tested
//! against mocks.

pub mod announcement;
pub mod flight_status;
pub mod guild_sync;
pub mod role_resolver;
pub mod role_sync;

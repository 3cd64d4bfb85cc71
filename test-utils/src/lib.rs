//! Vatsync Test Utils
//!
//! Shared test data for the vatsync crate. Nothing here talks to Discord or VATSIM;
//! everything is built in memory from JSON shaped like the real API payloads.
//!
//! # Overview
//!
//! - **fixture**: JSON payloads of the VATSIM API and a complete role configuration
//! - **serenity**: Factories for Serenity API objects
//!
//! # Usage
//!
//! ```rust,ignore
//! use test_utils::{fixture, serenity::create_test_member};
//!
//! let member = create_test_member(555, 42, &[111], false);
//! let pilot: Pilot = serde_json::from_value(fixture::vatsim::pilot_json(1234567, "DAL123"))?;
//! ```

pub mod fixture;
pub mod serenity;

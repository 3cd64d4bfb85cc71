//! Test factories for creating Serenity API objects.
//!
//! These factories create valid Serenity objects by deserializing JSON, simulating
//! what Discord's API would return.
//!
//! # Usage
//!
//! ```rust,ignore
//! use test_utils::serenity::create_test_member;
//!
//! let member = create_test_member(555, 42, &[111, 222], false);
//! assert_eq!(member.roles.len(), 2);
//! ```
//!
//! # Available Factories
//!
//! - `member::create_test_member` - Create Serenity Member objects

pub mod member;

pub use member::create_test_member;

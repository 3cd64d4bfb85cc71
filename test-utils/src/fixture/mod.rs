//! Test fixtures providing reusable test data.
//!
//! Fixtures return raw payloads (JSON values or YAML text) rather than domain types,
//! so tests exercise the same deserialization path as production code.
//!
//! # Example
//!
//! ```rust,ignore
//! use test_utils::fixture;
//!
//! let member: MemberData = serde_json::from_value(fixture::vatsim::member_json(1234567, 5, 1))?;
//! let config = RoleConfig::from_yaml_str(fixture::role_config::FULL_YAML)?;
//! ```

pub mod role_config;
pub mod vatsim;

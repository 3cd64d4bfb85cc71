//! Bot, webhook server and role sync backend.
//!
//! # Architecture
//!
//! The server follows a layered architecture with clear separation of concerns:
//!
//! - **Bot** (`bot/`) - Gateway event handlers and slash commands
//! - **Controller Layer** (`controller/`) - Webhook HTTP handlers and API documentation
//! - **Service Layer** (`service/`) - Role resolution, role sync, flight status and announcements
//! - **Data Layer** (`data/`) - VATSIM and Discord API repositories behind mockable traits
//! - **Model Layer** (`model/`) - Domain models and operation-specific parameter types
//! - **Error Layer** (`error/`) - Application error types and HTTP response mapping
//! - **Middleware** (`middleware/`) - Webhook secret guard
//!
//! # Infrastructure
//!
//! - **Configuration** (`config`) - Environment-based application configuration
//! - **State** (`state`) - Shared state of the server, the bot and the scheduler
//! - **Startup** (`startup`) - Tracing, HTTP client and role configuration loading
//! - **Router** (`router`) - Axum route configuration
//! - **Scheduler** (`scheduler/`) - Periodic guild role sync
//!
//! # Role Sync Flow
//!
//! 1. **Entry point** (`/sync`, member join or scheduler tick) collects the member's roles
//! 2. **Data** resolves the linked CID and fetches member data and pilot stats
//! 3. **Service** resolves the role delta from the role configuration
//! 4. **Data** applies each role change, recording failures without stopping
//! 5. **Entry point** reports the outcome (embed reply or log)

pub mod bot;
pub mod config;
pub mod controller;
pub mod data;
pub mod error;
pub mod middleware;
pub mod model;
pub mod router;
pub mod scheduler;
pub mod service;
pub mod startup;
pub mod state;
pub mod util;

//! Discord bot integration: slash commands and member events.
//!
//! The bot is built during startup and runs in a separate tokio task so it never
//! blocks the webhook server. Its HTTP client is shared with the webhook
//! controllers and the role sync scheduler.
//!
//! # Gateway Intents
//!
//! The bot requires the following gateway intents:
//! - `GUILDS` - Receive guild availability and interaction events
//! - `GUILD_MEMBERS` - Receive member joins and list guild members (privileged intent)
//!
//! Note: `GUILD_MEMBERS` is a privileged intent and must be explicitly enabled
//! in the Discord Developer Portal for the bot application.

pub mod command;
pub mod handler;
pub mod start;

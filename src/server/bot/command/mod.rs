//! Slash commands of the bot.
//!
//! Commands are registered per guild on `ready`, so changes show up immediately
//! instead of waiting on Discord's global command cache.

pub mod sync;
pub mod whereis;

use serenity::all::CreateCommand;

pub const WHEREIS: &str = "whereis";
pub const SYNC: &str = "sync";
pub const SYNCALL: &str = "syncall";

/// Builds every slash command for registration.
pub fn create_commands() -> Vec<CreateCommand> {
    vec![
        whereis::register(),
        sync::register_sync(),
        sync::register_syncall(),
    ]
}

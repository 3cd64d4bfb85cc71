pub mod channel;
pub mod guild_member;

pub use channel::{ChannelMessenger, DiscordChannelRepository};
pub use guild_member::{DiscordGuildMemberRepository, GuildMemberLister, GuildRoleMutator};

//! Embed builders for slash command replies.
//!
//! Flight status, role sync outcomes and VATSIM failures are all rendered here so
//! the command handlers only decide which embed to send.

use chrono::{DateTime, Utc};
use serenity::all::{CreateEmbed, CreateEmbedFooter, Mentionable, RoleId, Timestamp};

use crate::server::{
    error::vatsim::VatsimError,
    model::{
        flight::{FlightReport, FlightStatus},
        role_sync::RoleSyncOutcome,
    },
    service::announcement::builder::MAX_FIELD_VALUE_CHARS,
    util::text::join_within,
};

pub const ONLINE_COLOR: u32 = 0x00d26a;
pub const NOT_ONLINE_COLOR: u32 = 0xff6b6b;
pub const ERROR_COLOR: u32 = 0xff0000;
const WARNING_COLOR: u32 = 0xffa500;

fn timestamp(now: DateTime<Utc>) -> Timestamp {
    Timestamp::from_unix_timestamp(now.timestamp()).unwrap_or_else(|_| Timestamp::now())
}

/// Builds the `/whereis` reply for a flight status.
pub fn flight_status_embed(status: &FlightStatus, now: DateTime<Utc>) -> CreateEmbed {
    match status {
        FlightStatus::Online(report) => online_embed(report, now),
        FlightStatus::Offline { cid } => CreateEmbed::new()
            .title("Not Online")
            .description(format!(
                "Pilot with CID **{}** is not currently flying on VATSIM.",
                cid
            ))
            .color(NOT_ONLINE_COLOR)
            .timestamp(timestamp(now)),
    }
}

fn online_embed(report: &FlightReport, now: DateTime<Utc>) -> CreateEmbed {
    let fields = report
        .fields
        .iter()
        .map(|f| (f.name.clone(), f.value.clone(), f.inline));

    CreateEmbed::new()
        .title(&report.callsign)
        .description(format!("Pilot CID: **{}** is currently online!", report.cid))
        .color(ONLINE_COLOR)
        .fields(fields)
        .footer(CreateEmbedFooter::new(&report.footer))
        .timestamp(timestamp(now))
}

/// Builds the reply for a failed VATSIM lookup.
///
/// Internal details are never shown; the error is logged by the caller.
pub fn vatsim_error_embed(err: &VatsimError, now: DateTime<Utc>) -> CreateEmbed {
    let (title, color) = match err {
        VatsimError::NotLinked(_) => ("Not Linked", NOT_ONLINE_COLOR),
        VatsimError::UpstreamUnavailable { .. } => ("Error", ERROR_COLOR),
    };

    CreateEmbed::new()
        .title(title)
        .description(err.user_message())
        .color(color)
        .timestamp(timestamp(now))
}

/// Builds a generic failure reply.
pub fn error_embed(description: &str, now: DateTime<Utc>) -> CreateEmbed {
    CreateEmbed::new()
        .title("Error")
        .description(description)
        .color(ERROR_COLOR)
        .timestamp(timestamp(now))
}

/// Builds a plain informational reply.
pub fn info_embed(title: &str, description: &str, now: DateTime<Utc>) -> CreateEmbed {
    CreateEmbed::new()
        .title(title)
        .description(description)
        .color(ONLINE_COLOR)
        .timestamp(timestamp(now))
}

/// Builds the `/sync` reply summarizing what changed.
///
/// Partial failures turn the embed orange and list each failed role change.
pub fn role_sync_embed(outcome: &RoleSyncOutcome, now: DateTime<Utc>) -> CreateEmbed {
    let failures = outcome.failures();
    let color = if failures.is_empty() {
        ONLINE_COLOR
    } else {
        WARNING_COLOR
    };

    let mut embed = CreateEmbed::new()
        .title("Roles Synced")
        .description(format!(
            "Synced roles for VATSIM CID **{}**.",
            outcome.cid
        ))
        .color(color)
        .field("ATC Rating", &outcome.derived.atc_label, true)
        .field("Pilot Rating", &outcome.derived.pilot_label, true)
        .field(
            "Pilot Hours",
            format!("{:.1}", outcome.derived.total_hours),
            true,
        )
        .field("Roles Added", mention_list(&outcome.added()), false)
        .field("Roles Removed", mention_list(&outcome.removed()), false);

    if !failures.is_empty() {
        let lines: Vec<String> = failures
            .iter()
            .map(|m| {
                format!(
                    "{} ({}): {}",
                    m.role_id.mention(),
                    m.action,
                    m.error.as_deref().unwrap_or("unknown error")
                )
            })
            .collect();
        embed = embed.field(
            "Failed",
            join_within(&lines, "\n", MAX_FIELD_VALUE_CHARS),
            false,
        );
    }

    embed.timestamp(timestamp(now))
}

fn mention_list(roles: &[RoleId]) -> String {
    if roles.is_empty() {
        return "None".to_string();
    }

    let mentions: Vec<String> = roles.iter().map(|role| role.mention().to_string()).collect();

    join_within(&mentions, " ", MAX_FIELD_VALUE_CHARS)
}

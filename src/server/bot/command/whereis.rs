use chrono::Utc;
use serenity::all::{
    CommandInteraction, CommandOptionType, Context, CreateCommand, CreateCommandOption,
    EditInteractionResponse,
};

use crate::server::{
    error::AppError,
    service::flight_status::{builder, FlightStatusService},
    state::SyncState,
};

use super::WHEREIS;

const CID_OPTION: &str = "cid";

pub fn register() -> CreateCommand {
    CreateCommand::new(WHEREIS)
        .description("Show where a pilot is currently flying on VATSIM")
        .add_option(
            CreateCommandOption::new(
                CommandOptionType::Integer,
                CID_OPTION,
                "VATSIM CID of the pilot (defaults to the tracked pilot)",
            )
            .required(false)
            .min_int_value(1),
        )
}

/// Resolves the CID to look up, falling back to the tracked pilot.
fn requested_cid(option: Option<i64>, default_cid: u64) -> u64 {
    option
        .and_then(|cid| u64::try_from(cid).ok())
        .filter(|cid| *cid > 0)
        .unwrap_or(default_cid)
}

/// Replies with the flight status of the requested pilot.
///
/// The data feed can be slow, so the reply is deferred first and filled in once the
/// lookup completes. Lookup failures are answered with an error embed.
pub async fn run(
    ctx: &Context,
    command: &CommandInteraction,
    sync: &SyncState,
    default_cid: u64,
) -> Result<(), AppError> {
    command.defer(&ctx.http).await?;

    let option = command
        .data
        .options
        .iter()
        .find(|opt| opt.name == CID_OPTION)
        .and_then(|opt| opt.value.as_i64());
    let cid = requested_cid(option, default_cid);

    let now = Utc::now();
    let embed = match FlightStatusService::new(sync.vatsim.as_ref())
        .status(cid, now)
        .await
    {
        Ok(status) => builder::flight_status_embed(&status, now),
        Err(e) => {
            tracing::error!("Failed to fetch flight status of CID {}: {}", cid, e);
            builder::vatsim_error_embed(&e, now)
        }
    };

    command
        .edit_response(&ctx.http, EditInteractionResponse::new().embed(embed))
        .await?;

    Ok(())
}

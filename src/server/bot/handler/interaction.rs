use serenity::all::{Context, Interaction};

use crate::server::bot::{
    command::{self, SYNC, SYNCALL, WHEREIS},
    handler::Handler,
};

/// Dispatches slash commands to their implementation.
pub async fn handle_interaction_create(handler: &Handler, ctx: Context, interaction: Interaction) {
    let Interaction::Command(command) = interaction else {
        return;
    };

    let name = command.data.name.as_str();
    tracing::debug!("Received /{} from user {}", name, command.user.id);

    let result = match name {
        WHEREIS => {
            command::whereis::run(&ctx, &command, &handler.sync, handler.default_cid).await
        }
        SYNC => command::sync::run_sync(&ctx, &command, &handler.sync).await,
        SYNCALL => command::sync::run_syncall(&ctx, &command, &handler.sync).await,
        other => {
            tracing::warn!("Received unknown command /{}", other);
            Ok(())
        }
    };

    if let Err(e) = result {
        tracing::error!("Failed to handle /{}: {}", name, e);
    }
}

// Gateway event bridge.
//
// poise hands every gateway event to `event_handler`. Every event is offered
// to passive listeners under its snake_case name, then messages go down the
// prefix path and interactions down the interaction path.

use super::platform::DiscordClient;
use super::{Data, Error};
use crate::core::commands::{Inbound, Routed};
use poise::serenity_prelude as serenity;
use std::sync::Arc;

pub async fn event_handler(
    ctx: &serenity::Context,
    event: &serenity::FullEvent,
    _framework: poise::FrameworkContext<'_, Data, Error>,
    data: &Data,
) -> Result<(), Error> {
    let client = DiscordClient {
        ctx: ctx.clone(),
        state: Arc::clone(&data.state),
    };

    let inbound = match event {
        serenity::FullEvent::Message { new_message } => Inbound::Message(new_message),
        serenity::FullEvent::InteractionCreate { interaction } => Inbound::Interaction(interaction),
        _ => Inbound::Other,
    };

    let event_name = event.snake_case_name();
    let routed = data
        .dispatcher
        .dispatch_gateway(&client, event_name, event, inbound)
        .await;
    trace_routed(event_name, &routed);

    Ok(())
}

fn trace_routed(source: &str, routed: &Routed) {
    match routed {
        Routed::Unmatched => tracing::trace!(source, "No handler matched"),
        Routed::Handled => tracing::debug!(source, "Handled"),
        Routed::Failed => tracing::debug!(source, "Handler failed"),
        Routed::Detached(handles) => {
            tracing::debug!(source, tasks = handles.len(), "Spawned handlers")
        }
    }
}

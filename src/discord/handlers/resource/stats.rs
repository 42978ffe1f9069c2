use crate::core::commands::{Command, CommandKind, HandlerModule};
use crate::discord::handlers::{embeds, options};
use crate::discord::{Discord, DiscordClient};
use anyhow::Context;
use poise::serenity_prelude as serenity;

/// User context menu: right click a member, Apps, Resource Stats.
pub fn handler(_client: &DiscordClient) -> anyhow::Result<HandlerModule<Discord>> {
    Ok(Command::<Discord>::context_menu("Resource Stats", CommandKind::User, stats).into())
}

async fn stats(client: DiscordClient, interaction: serenity::Interaction) -> anyhow::Result<()> {
    let command = options::command(&interaction)?;
    let target = command
        .data
        .target_id
        .map(|target| target.to_user_id())
        .context("context menu invoked without a target")?;
    let user = command
        .data
        .resolved
        .users
        .get(&target)
        .cloned()
        .context("target user missing from resolved data")?;

    let stats = client
        .state
        .resources
        .contributor_stats(&target.to_string())
        .await?;

    command
        .create_response(
            client.http(),
            serenity::CreateInteractionResponse::Message(
                serenity::CreateInteractionResponseMessage::new()
                    .embed(embeds::stats_embed(&user, &stats))
                    .ephemeral(true),
            ),
        )
        .await?;
    Ok(())
}

use super::{active_resource, autocomplete_resources, id_option, reply_ephemeral, PARENT};
use crate::core::commands::{CommandOption, HandlerModule, OptionKind, Subcommand};
use crate::discord::handlers::{embeds, options};
use crate::discord::{Discord, DiscordClient};
use poise::serenity_prelude as serenity;

pub fn handler(_client: &DiscordClient) -> anyhow::Result<HandlerModule<Discord>> {
    Ok(
        Subcommand::<Discord>::new(PARENT, "report", "Report a broken or inappropriate resource", report)
            .with_options(vec![
                id_option(),
                CommandOption::new(OptionKind::String, "reason", "What is wrong with it?")
                    .required(),
            ])
            .with_autocomplete(autocomplete_resources)
            .into(),
    )
}

async fn report(client: DiscordClient, interaction: serenity::Interaction) -> anyhow::Result<()> {
    let command = options::command(&interaction)?;
    let id = options::required_string(command, "id")?;
    let reason = options::required_string(command, "reason")?;

    let Some(channel_id) = client.state.config.review_channel_id else {
        return reply_ephemeral(&client, command, "❌ Reporting is not set up on this server.").await;
    };
    let Some(resource) = active_resource(&client, id).await? else {
        return reply_ephemeral(&client, command, format!("❌ Resource `{}` not found.", id)).await;
    };

    serenity::ChannelId::new(channel_id)
        .send_message(
            client.http(),
            serenity::CreateMessage::new()
                .embed(embeds::report_embed(&resource, command.user.id.get(), reason))
                .components(embeds::report_buttons(false)),
        )
        .await?;

    tracing::info!(resource = %resource.id, reporter = %command.user.id, "Resource reported");
    reply_ephemeral(&client, command, "✅ Thanks, staff will take a look.").await
}

use super::{active_resource, autocomplete_resources, id_option, reply_ephemeral, PARENT};
use crate::core::commands::{HandlerModule, Subcommand};
use crate::discord::handlers::{embeds, options};
use crate::discord::{Discord, DiscordClient};
use poise::serenity_prelude as serenity;

pub fn handler(_client: &DiscordClient) -> anyhow::Result<HandlerModule<Discord>> {
    Ok(Subcommand::<Discord>::new(PARENT, "view", "Show a resource", view)
        .with_options(vec![id_option()])
        .with_autocomplete(autocomplete_resources)
        .into())
}

async fn view(client: DiscordClient, interaction: serenity::Interaction) -> anyhow::Result<()> {
    let command = options::command(&interaction)?;
    let id = options::required_string(command, "id")?;

    let Some(resource) = active_resource(&client, id).await? else {
        return reply_ephemeral(&client, command, format!("❌ Resource `{}` not found.", id)).await;
    };
    let rating = client.state.resources.average_rating(&resource.id).await?;

    command
        .create_response(
            client.http(),
            serenity::CreateInteractionResponse::Message(
                serenity::CreateInteractionResponseMessage::new()
                    .embed(embeds::resource_embed(&resource, rating)),
            ),
        )
        .await?;
    Ok(())
}

use super::{active_resource, autocomplete_resources, id_option, reply_ephemeral, PARENT};
use crate::core::commands::{CommandOption, HandlerModule, OptionKind, Subcommand};
use crate::core::resources::ResourceError;
use crate::discord::handlers::options;
use crate::discord::{Discord, DiscordClient};
use anyhow::Context;
use poise::serenity_prelude as serenity;

pub fn handler(_client: &DiscordClient) -> anyhow::Result<HandlerModule<Discord>> {
    Ok(Subcommand::<Discord>::new(PARENT, "rate", "Rate a resource from 1 to 5", rate)
        .with_options(vec![
            id_option(),
            CommandOption::new(OptionKind::Integer, "rating", "1 (poor) to 5 (excellent)")
                .required(),
            CommandOption::new(OptionKind::String, "comment", "What did you think?"),
        ])
        .with_autocomplete(autocomplete_resources)
        .into())
}

async fn rate(client: DiscordClient, interaction: serenity::Interaction) -> anyhow::Result<()> {
    let command = options::command(&interaction)?;
    let id = options::required_string(command, "id")?;
    let rating = options::integer(command, "rating").context("missing option `rating`")?;
    let comment = options::string(command, "comment").unwrap_or_default();

    let Some(resource) = active_resource(&client, id).await? else {
        return reply_ephemeral(&client, command, format!("❌ Resource `{}` not found.", id)).await;
    };

    let reviewer = command.user.id.to_string();
    let reply = match client
        .state
        .resources
        .rate_resource(&resource.id, &reviewer, rating, comment)
        .await
    {
        Ok(stored) => format!("⭐ You rated **{}** {}/5. Thanks!", resource.title, stored),
        Err(ResourceError::AlreadyReviewed) => {
            "❌ You have already reviewed this resource.".to_string()
        }
        Err(ResourceError::NotFound(id)) => format!("❌ Resource `{}` not found.", id),
        Err(err) => return Err(err.into()),
    };

    reply_ephemeral(&client, command, reply).await
}

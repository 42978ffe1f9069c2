// `/resource` subcommands and the `Resource Stats` context menu.

pub mod rate;
pub mod report;
pub mod stats;
pub mod submit;
pub mod view;

use super::options;
use crate::core::commands::{CommandOption, OptionKind};
use crate::core::resources::{Resource, ResourceStatus, ALL_TAGS};
use crate::discord::DiscordClient;
use poise::serenity_prelude as serenity;

pub const PARENT: &str = "resource";

/// Tags offered on submission.
pub const TAGS: &[&str] = &["article", "book", "course", "tool", "video", "other"];

pub fn id_option() -> CommandOption {
    CommandOption::new(OptionKind::String, "id", "Resource ID or title")
        .required()
        .autocomplete()
}

/// Autocomplete over active resources, shared by every `id` option.
pub async fn autocomplete_resources(
    client: DiscordClient,
    interaction: serenity::Interaction,
) -> anyhow::Result<()> {
    let command = options::command(&interaction)?;
    let search = options::focused_value(command);

    let choices = client
        .state
        .resources
        .serve_resources(ALL_TAGS, search)
        .await?;

    let response = choices.iter().fold(
        serenity::CreateAutocompleteResponse::new(),
        |response, choice| {
            response.add_string_choice(options::choice_name(&choice.name), &choice.value)
        },
    );
    command
        .create_response(
            client.http(),
            serenity::CreateInteractionResponse::Autocomplete(response),
        )
        .await?;
    Ok(())
}

/// Fetch a resource that users are allowed to see.
pub async fn active_resource(client: &DiscordClient, id: &str) -> anyhow::Result<Option<Resource>> {
    let resource = client
        .state
        .resources
        .get_resource(&id.trim().to_uppercase())
        .await?;
    Ok(resource.filter(|r| r.status == ResourceStatus::Active))
}

pub async fn reply_ephemeral(
    client: &DiscordClient,
    command: &serenity::CommandInteraction,
    content: impl Into<String>,
) -> anyhow::Result<()> {
    command
        .create_response(
            client.http(),
            serenity::CreateInteractionResponse::Message(
                serenity::CreateInteractionResponseMessage::new()
                    .content(content)
                    .ephemeral(true),
            ),
        )
        .await?;
    Ok(())
}

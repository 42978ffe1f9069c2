use super::edit::{FIELD_INPUT, VALUE_INPUT};
use crate::core::commands::{Command, HandlerModule};
use crate::core::resources::ResourceEdit;
use crate::discord::handlers::embeds::{self, REPORT_EDIT_MODAL};
use crate::discord::handlers::options;
use crate::discord::{Discord, DiscordClient};
use anyhow::Context;
use poise::serenity_prelude as serenity;

pub fn handler(_client: &DiscordClient) -> anyhow::Result<HandlerModule<Discord>> {
    Ok(Command::<Discord>::modal(REPORT_EDIT_MODAL, submit_edit).into())
}

/// Turn the two modal inputs into a single-field edit.
pub fn parse_edit(field: &str, value: &str) -> Result<ResourceEdit, String> {
    let value = value.trim();
    if value.is_empty() {
        return Err("The new value cannot be empty".to_string());
    }

    let edit = match field.trim().to_lowercase().as_str() {
        "title" => ResourceEdit::Title(value.to_string()),
        "tag" => ResourceEdit::Tag(value.to_lowercase()),
        "description" => ResourceEdit::Description(Some(value.to_string())),
        "url" => {
            if !value.starts_with("http://") && !value.starts_with("https://") {
                return Err("The URL must start with http:// or https://".to_string());
            }
            ResourceEdit::Url(value.to_string())
        }
        "author" => {
            // Accept a raw ID or a mention
            let id = value.trim_start_matches("<@").trim_start_matches('!').trim_end_matches('>');
            if id.is_empty() || !id.chars().all(|c| c.is_ascii_digit()) {
                return Err("The author must be a user ID or mention".to_string());
            }
            ResourceEdit::Author(id.to_string())
        }
        other => return Err(format!("Unknown field `{}`", other)),
    };
    Ok(edit)
}

async fn submit_edit(client: DiscordClient, interaction: serenity::Interaction) -> anyhow::Result<()> {
    let modal = options::modal(&interaction)?;
    let card = modal
        .message
        .as_deref()
        .context("edit modal submitted without its report card")?;
    let id = embeds::footer_resource_id(card)?;

    let field = options::modal_value(modal, FIELD_INPUT).unwrap_or_default();
    let value = options::modal_value(modal, VALUE_INPUT).unwrap_or_default();

    let reply = match parse_edit(field, value) {
        Ok(edit) => {
            let column = edit.column();
            client
                .state
                .resources
                .edit_resource(&id, edit, &modal.user.id.to_string())
                .await?;
            format!("✏️ Updated `{}` of `{}`.", column, id)
        }
        Err(reason) => format!("❌ {}", reason),
    };

    modal
        .create_response(
            client.http(),
            serenity::CreateInteractionResponse::Message(
                serenity::CreateInteractionResponseMessage::new()
                    .content(reply)
                    .ephemeral(true),
            ),
        )
        .await?;
    Ok(())
}

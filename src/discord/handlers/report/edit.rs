use crate::core::commands::{Command, HandlerModule};
use crate::discord::handlers::embeds::{REPORT_EDIT_BUTTON, REPORT_EDIT_MODAL};
use crate::discord::handlers::options;
use crate::discord::{Discord, DiscordClient};
use poise::serenity_prelude as serenity;

pub const FIELD_INPUT: &str = "field";
pub const VALUE_INPUT: &str = "value";

/// Opens the edit modal. The modal keeps a reference to this card, which is
/// where the submit handler reads the resource ID from.
pub fn handler(_client: &DiscordClient) -> anyhow::Result<HandlerModule<Discord>> {
    Ok(Command::<Discord>::component(REPORT_EDIT_BUTTON, open_modal).into())
}

async fn open_modal(client: DiscordClient, interaction: serenity::Interaction) -> anyhow::Result<()> {
    let component = options::component(&interaction)?;

    let modal = serenity::CreateModal::new(REPORT_EDIT_MODAL, "Edit resource").components(vec![
        serenity::CreateActionRow::InputText(
            serenity::CreateInputText::new(serenity::InputTextStyle::Short, "Field", FIELD_INPUT)
                .placeholder("title, tag, description, url or author")
                .required(true),
        ),
        serenity::CreateActionRow::InputText(
            serenity::CreateInputText::new(serenity::InputTextStyle::Paragraph, "New value", VALUE_INPUT)
                .placeholder("Use \"none\" to clear the description")
                .required(true),
        ),
    ]);

    component
        .create_response(client.http(), serenity::CreateInteractionResponse::Modal(modal))
        .await?;
    Ok(())
}

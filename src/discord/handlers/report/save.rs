use crate::core::commands::{Command, HandlerModule};
use crate::discord::handlers::embeds::REPORT_SAVE_BUTTON;
use crate::discord::handlers::staff::{resolve_card, StaffAction};
use crate::discord::{Discord, DiscordClient};

/// Dismiss the report and keep the resource as it is.
pub fn handler(_client: &DiscordClient) -> anyhow::Result<HandlerModule<Discord>> {
    Ok(Command::<Discord>::component(REPORT_SAVE_BUTTON, |client, interaction| {
        resolve_card(client, interaction, StaffAction::Keep)
    })
    .into())
}

use crate::core::commands::{Command, HandlerModule};
use crate::discord::handlers::embeds::APPROVE_BUTTON;
use crate::discord::handlers::staff::{resolve_card, StaffAction};
use crate::discord::{Discord, DiscordClient};

pub fn handler(_client: &DiscordClient) -> anyhow::Result<HandlerModule<Discord>> {
    Ok(Command::<Discord>::component(APPROVE_BUTTON, |client, interaction| {
        resolve_card(client, interaction, StaffAction::Approve)
    })
    .into())
}

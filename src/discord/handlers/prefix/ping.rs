use crate::core::commands::{Command, HandlerModule};
use crate::discord::{Discord, DiscordClient};
use poise::serenity_prelude as serenity;

/// `!ping`, answered with how long the reply took to send.
pub fn handler(_client: &DiscordClient) -> anyhow::Result<HandlerModule<Discord>> {
    Ok(Command::<Discord>::prefix(
        "ping",
        |client: DiscordClient, message: serenity::Message, _args: Vec<String>| async move {
            let started = std::time::Instant::now();
            let mut reply = message.reply(client.http(), "🏓 Pong!").await?;

            let elapsed = started.elapsed().as_millis();
            reply
                .edit(
                    client.http(),
                    serenity::EditMessage::new().content(format!("🏓 Pong! `{}ms`", elapsed)),
                )
                .await?;
            Ok(())
        },
    )
    .into())
}

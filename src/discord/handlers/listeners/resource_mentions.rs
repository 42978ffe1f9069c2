// Passive `message` listener: answers `res:AB123` mentions with a link.

use crate::core::commands::{Command, HandlerModule};
use crate::core::resources::ResourceStatus;
use crate::discord::{Discord, DiscordClient};
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use poise::serenity_prelude as serenity;
use std::time::{Duration, Instant};

const MENTION_PREFIX: &str = "res:";
const MAX_MENTIONS: usize = 5;
pub const CHANNEL_COOLDOWN: Duration = Duration::from_secs(10);

pub fn handler(_client: &DiscordClient) -> anyhow::Result<HandlerModule<Discord>> {
    Ok(Command::<Discord>::listener("message", "resource_mentions", on_message).into())
}

async fn on_message(client: DiscordClient, event: serenity::FullEvent) -> anyhow::Result<()> {
    let serenity::FullEvent::Message { new_message } = event else {
        return Ok(());
    };
    if new_message.author.bot {
        return Ok(());
    }

    let ids = mentioned_ids(&new_message.content);
    if ids.is_empty() {
        return Ok(());
    }
    if !try_acquire(
        &client.state.mention_cooldowns,
        new_message.channel_id.get(),
        Instant::now(),
    ) {
        tracing::debug!(channel = %new_message.channel_id, "Resource mention on cooldown");
        return Ok(());
    }

    let mut lines = Vec::new();
    for id in &ids {
        match client.state.resources.get_resource(id).await? {
            Some(resource) if resource.status == ResourceStatus::Active => {
                lines.push(format!("`{}` **{}** <{}>", resource.id, resource.title, resource.url));
            }
            _ => lines.push(format!("`{}` not found", id)),
        }
    }

    new_message.reply(client.http(), lines.join("\n")).await?;
    Ok(())
}

/// Resource IDs written as `res:AB123`, uppercased, deduplicated, in order.
pub fn mentioned_ids(content: &str) -> Vec<String> {
    let mut ids: Vec<String> = Vec::new();
    for word in content.split_whitespace() {
        let Some(rest) = word
            .get(..MENTION_PREFIX.len())
            .filter(|head| head.eq_ignore_ascii_case(MENTION_PREFIX))
            .map(|_| &word[MENTION_PREFIX.len()..])
        else {
            continue;
        };

        let candidate: String = rest.chars().take(5).collect::<String>().to_uppercase();
        let valid = candidate.len() == 5
            && candidate.is_ascii()
            && candidate[..2].chars().all(|c| c.is_ascii_uppercase())
            && candidate[2..].chars().all(|c| c.is_ascii_digit());
        if valid && !ids.contains(&candidate) {
            ids.push(candidate);
        }
        if ids.len() == MAX_MENTIONS {
            break;
        }
    }
    ids
}

/// Claim the channel's reply slot unless it was used within the cooldown.
/// Expired slots of every channel are dropped on the way.
pub fn try_acquire(cooldowns: &DashMap<u64, Instant>, channel: u64, now: Instant) -> bool {
    cooldowns.retain(|_, last| now.saturating_duration_since(*last) < CHANNEL_COOLDOWN);

    match cooldowns.entry(channel) {
        Entry::Occupied(_) => false,
        Entry::Vacant(slot) => {
            slot.insert(now);
            true
        }
    }
}

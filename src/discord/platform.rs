// Discord implementation of the dispatch `Platform` port.
//
// Handlers receive a `DiscordClient`: the serenity context plus the shared
// application state. Raw serenity types are used for messages, interactions
// and events so handlers keep full access to the payload.

use crate::config::BotConfig;
use crate::core::commands::{InboundInteraction, InboundMessage, InteractionRoute, Platform};
use crate::core::resources::ResourceService;
use crate::infra::resources::SqliteResourceStore;
use async_trait::async_trait;
use dashmap::DashMap;
use poise::serenity_prelude as serenity;
use std::sync::Arc;
use std::time::Instant;

/// Red used for every failure embed.
pub const FAILURE_COLOR: u32 = 0xFF0000;

/// Services shared by every handler.
pub struct AppState {
    pub resources: ResourceService<SqliteResourceStore>,
    pub config: BotConfig,
    /// Last `res:` mention reply per channel, pruned once expired
    pub mention_cooldowns: DashMap<u64, Instant>,
}

impl AppState {
    pub fn new(resources: ResourceService<SqliteResourceStore>, config: BotConfig) -> Self {
        Self {
            resources,
            config,
            mention_cooldowns: DashMap::new(),
        }
    }
}

#[derive(Clone)]
pub struct DiscordClient {
    pub ctx: serenity::Context,
    pub state: Arc<AppState>,
}

impl DiscordClient {
    pub fn http(&self) -> &Arc<serenity::Http> {
        &self.ctx.http
    }
}

/// Respond ephemerally, or follow up when the interaction was already answered.
macro_rules! reply_or_follow_up {
    ($interaction:expr, $http:expr, $embed:expr) => {{
        let response = serenity::CreateInteractionResponse::Message(
            serenity::CreateInteractionResponseMessage::new()
                .embed($embed.clone())
                .ephemeral(true),
        );
        if $interaction.create_response($http, response).await.is_err() {
            $interaction
                .create_followup(
                    $http,
                    serenity::CreateInteractionResponseFollowup::new()
                        .embed($embed)
                        .ephemeral(true),
                )
                .await?;
        }
        Ok(())
    }};
}

pub struct Discord;

#[async_trait]
impl Platform for Discord {
    type Client = DiscordClient;
    type Message = serenity::Message;
    type Interaction = serenity::Interaction;
    type Event = serenity::FullEvent;

    fn current_user_id(client: &DiscordClient) -> u64 {
        client.ctx.cache.current_user().id.get()
    }

    async fn send_failure_notice(
        client: &DiscordClient,
        interaction: &serenity::Interaction,
        description: &str,
    ) -> anyhow::Result<()> {
        let embed = serenity::CreateEmbed::new()
            .description(description)
            .color(FAILURE_COLOR);

        match interaction {
            serenity::Interaction::Command(command) => {
                reply_or_follow_up!(command, client.http(), embed)
            }
            serenity::Interaction::Component(component) => {
                reply_or_follow_up!(component, client.http(), embed)
            }
            serenity::Interaction::Modal(modal) => {
                reply_or_follow_up!(modal, client.http(), embed)
            }
            _ => Ok(()),
        }
    }
}

impl InboundMessage for serenity::Message {
    fn author_id(&self) -> u64 {
        self.author.id.get()
    }

    fn content(&self) -> &str {
        &self.content
    }
}

impl InboundInteraction for serenity::Interaction {
    fn route(&self) -> InteractionRoute<'_> {
        match self {
            serenity::Interaction::Command(command) => InteractionRoute::Command {
                name: &command.data.name,
                subcommand: first_subcommand(&command.data.options),
            },
            serenity::Interaction::Autocomplete(command) => InteractionRoute::Autocomplete {
                name: &command.data.name,
                subcommand: first_subcommand(&command.data.options),
            },
            serenity::Interaction::Component(component) => InteractionRoute::Component {
                custom_id: &component.data.custom_id,
            },
            serenity::Interaction::Modal(modal) => InteractionRoute::Modal {
                custom_id: &modal.data.custom_id,
            },
            _ => InteractionRoute::Unsupported,
        }
    }
}

/// Name of the first option when it is a subcommand.
fn first_subcommand(options: &[serenity::CommandDataOption]) -> Option<&str> {
    options
        .first()
        .filter(|option| matches!(option.value, serenity::CommandDataOptionValue::SubCommand(_)))
        .map(|option| option.name.as_str())
}

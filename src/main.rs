// This is the entry point of the resource catalog bot.
//
// **Architecture Overview:**
// - `core/` = Business logic (platform-agnostic): command dispatch and the resource catalog
// - `infra/` = Implementations of core traits (SQLite store, Discord command registry)
// - `discord/` = Discord-specific adapters (platform glue, event bridge, handlers)
//
// This file's job is to:
// 1. Load configuration
// 2. Initialize services (dependency injection)
// 3. Set up the Discord framework
// 4. Load the handler manifest, publish slash commands and start dispatching

// These attrs point each module declaration at a more descriptive root file
// so we don't end up with half a dozen mod.rs files that all look the same.
#[path = "core/core_layer.rs"]
mod core;
#[path = "discord/discord_layer.rs"]
mod discord;
#[path = "infra/infra_layer.rs"]
mod infra;

mod config;

use crate::config::BotConfig;
use crate::core::commands::{load, sync_remote, Dispatcher, SyncOutcome};
use crate::core::resources::ResourceService;
use crate::discord::handlers::manifest;
use crate::discord::{AppState, Data, DiscordClient};
use crate::infra::discord::SerenityCommandRegistry;
use crate::infra::resources::SqliteResourceStore;
use anyhow::Context as _;
use poise::serenity_prelude as serenity;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file (if it exists)
    dotenv::dotenv().ok();

    // Initialize logging so we can see what's happening. RUST_LOG overrides the default.
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = BotConfig::from_env()?;

    // Keep runtime databases in a dedicated folder so the repo root stays tidy.
    std::fs::create_dir_all(&config.data_dir)
        .with_context(|| format!("Failed to create data directory {}", config.data_dir))?;

    // ========================================================================
    // DEPENDENCY INJECTION
    // ========================================================================
    // This is the "composition root" where we wire everything together.

    let resource_store = SqliteResourceStore::new(&config.resource_db_path)
        .await
        .context("Failed to initialize resource database")?;
    let state = Arc::new(AppState::new(ResourceService::new(resource_store), config.clone()));

    // ========================================================================
    // DISCORD FRAMEWORK SETUP
    // ========================================================================
    // poise only provides the gateway plumbing here; every command goes
    // through our own dispatcher from the event handler.

    let intents = serenity::GatewayIntents::GUILD_MESSAGES
        | serenity::GatewayIntents::MESSAGE_CONTENT // Required to read prefix commands
        | serenity::GatewayIntents::GUILDS
        | serenity::GatewayIntents::DIRECT_MESSAGES;

    let framework = poise::Framework::builder()
        .options(poise::FrameworkOptions {
            commands: vec![],
            event_handler: |ctx, event, framework, data| {
                Box::pin(discord::events::event_handler(ctx, event, framework, data))
            },
            on_error: |error| {
                Box::pin(async move {
                    match error {
                        // Interactions belong to our dispatcher, not to poise
                        poise::FrameworkError::UnknownInteraction { .. } => {}
                        other => {
                            if let Err(e) = poise::builtins::on_error(other).await {
                                tracing::error!("Error while handling framework error: {}", e);
                            }
                        }
                    }
                })
            },
            ..Default::default()
        })
        .setup(move |ctx, ready, _framework| {
            Box::pin(async move {
                tracing::info!(user = %ready.user.name, "🤖 Bot is starting up...");

                let client = DiscordClient {
                    ctx: ctx.clone(),
                    state: Arc::clone(&state),
                };

                let (builder, _report) = load(&manifest(), &client);
                let registry = builder.freeze();

                if state.config.sync_commands {
                    let api = SerenityCommandRegistry::new(Arc::clone(&ctx.http));
                    if let SyncOutcome::Published(count) = sync_remote(&registry, &api).await {
                        tracing::info!(count, "✅ Commands registered!");
                    }
                } else {
                    tracing::info!("Command sync disabled, keeping the published set as is");
                }

                let dispatcher = Dispatcher::new(registry, state.config.prefix.clone());
                tracing::info!("🚀 Bot is ready!");

                Ok(Data { state, dispatcher })
            })
        })
        .build();

    let mut client = serenity::ClientBuilder::new(&config.token, intents)
        .framework(framework)
        .await
        .context("Error creating client")?;

    client.start().await.context("Error running bot")?;
    Ok(())
}

// Discord layer - the serenity/poise adapter and the concrete handlers.

#[path = "platform.rs"]
pub mod platform;

#[path = "events.rs"]
pub mod events;

#[path = "handlers/handler_manifest.rs"]
pub mod handlers;

pub use platform::{AppState, Discord, DiscordClient};

use crate::core::commands::Dispatcher;
use std::sync::Arc;

pub type Error = Box<dyn std::error::Error + Send + Sync>;

/// poise user data, shared by every event callback.
pub struct Data {
    pub state: Arc<AppState>,
    pub dispatcher: Dispatcher<Discord>,
}

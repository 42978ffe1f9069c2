// Environment-driven configuration.
//
// `.env` is loaded by `main` before this runs, so values there and real
// environment variables are treated the same.

use anyhow::{bail, Context};

pub const DEFAULT_PREFIX: &str = "!";
pub const DEFAULT_DATA_DIR: &str = "data";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BotConfig {
    pub token: String,
    /// Prefix for text commands, e.g. `!ping`
    pub prefix: String,
    pub data_dir: String,
    pub resource_db_path: String,
    /// Publish slash commands on startup
    pub sync_commands: bool,
    /// Where submission and report cards are posted
    pub review_channel_id: Option<u64>,
}

impl BotConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let token = lookup("DISCORD_TOKEN")
            .filter(|t| !t.trim().is_empty())
            .context("Missing DISCORD_TOKEN environment variable! Create a .env file with your bot token.")?;

        let prefix = lookup("BOT_PREFIX").unwrap_or_else(|| DEFAULT_PREFIX.to_string());
        if prefix.is_empty() || prefix.chars().any(char::is_whitespace) {
            bail!("BOT_PREFIX must be non-empty and contain no whitespace");
        }

        let data_dir = lookup("DATA_DIR").unwrap_or_else(|| DEFAULT_DATA_DIR.to_string());
        let resource_db_path =
            lookup("RESOURCE_DB_PATH").unwrap_or_else(|| format!("{}/resources.db", data_dir));

        let sync_commands = match lookup("SYNC_COMMANDS") {
            Some(value) => value
                .trim()
                .parse::<bool>()
                .with_context(|| format!("SYNC_COMMANDS must be true or false, got {:?}", value))?,
            None => true,
        };

        let review_channel_id = lookup("REVIEW_CHANNEL_ID")
            .filter(|id| !id.trim().is_empty())
            .map(|id| {
                id.trim()
                    .parse::<u64>()
                    .with_context(|| format!("REVIEW_CHANNEL_ID must be a channel ID, got {:?}", id))
            })
            .transpose()?;

        Ok(Self {
            token,
            prefix,
            data_dir,
            resource_db_path,
            sync_commands,
            review_channel_id,
        })
    }
}

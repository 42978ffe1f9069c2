// Remote command sync.
//
// Publishes the interaction commands (and their subcommands) to the platform
// in one bulk replace. The platform treats the call as authoritative, so any
// previously published command that is not in the payload disappears.

use super::command_models::{CommandKind, CommandOption, OptionKind, Platform};
use super::registry::Registry;
use async_trait::async_trait;
use serde::Serialize;

/// One entry of the bulk replace payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CommandPayload {
    pub name: String,
    pub kind: CommandKind,
    /// Only chat-input commands carry a description.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub options: Vec<CommandOption>,
}

/// The platform's remote command registry.
#[async_trait]
pub trait CommandRegistryApi: Send + Sync {
    /// Replace every globally registered command with `commands`.
    async fn bulk_replace(&self, commands: &[CommandPayload]) -> anyhow::Result<()>;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SyncOutcome {
    /// Nothing to publish, no call was made.
    Skipped,
    Published(usize),
    Failed,
}

/// Build the declarative snapshot of every published command.
pub fn build_payload<P: Platform>(registry: &Registry<P>) -> Vec<CommandPayload> {
    registry
        .published_commands()
        .map(|(command, kind)| {
            let mut options = command.options.clone();
            options.extend(registry.subcommands(&command.name).iter().map(|sub| {
                let description = if sub.description.is_empty() {
                    format!("{} command", sub.subcommand)
                } else {
                    sub.description.clone()
                };
                CommandOption::new(OptionKind::SubCommand, sub.subcommand.clone(), description)
                    .sub_options(sub.options.clone())
            }));

            let description = match kind {
                CommandKind::ChatInput => Some(
                    command
                        .description
                        .clone()
                        .filter(|d| !d.is_empty())
                        .unwrap_or_else(|| "No description".to_string()),
                ),
                CommandKind::User | CommandKind::Message => None,
            };

            CommandPayload {
                name: command.name.clone(),
                kind,
                description,
                options,
            }
        })
        .collect()
}

/// Publish the registry's commands. Failures are logged and never retried.
pub async fn sync_remote<P: Platform>(
    registry: &Registry<P>,
    api: &dyn CommandRegistryApi,
) -> SyncOutcome {
    let payload = build_payload(registry);
    if payload.is_empty() {
        tracing::info!("No slash commands to register");
        return SyncOutcome::Skipped;
    }

    match api.bulk_replace(&payload).await {
        Ok(()) => {
            let names: Vec<&str> = payload.iter().map(|c| c.name.as_str()).collect();
            tracing::info!(commands = ?names, "Successfully registered global slash commands");
            SyncOutcome::Published(payload.len())
        }
        Err(err) => {
            tracing::error!(error = ?err, "Error registering slash commands");
            SyncOutcome::Failed
        }
    }
}

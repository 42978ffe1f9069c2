// Command registry: a mutable builder during loading, an immutable map afterwards.

use super::command_models::{Command, CommandKind, EventCategory, Platform, Subcommand};
use std::collections::BTreeMap;
use std::sync::Arc;

/// Reply sent by synthesized parent commands.
pub const USE_SUBCOMMAND_NOTICE: &str = "❌ Please use a subcommand.";

/// Load-time view of the registry.
pub struct RegistryBuilder<P: Platform> {
    commands: BTreeMap<EventCategory, BTreeMap<String, Command<P>>>,
    subcommands: BTreeMap<String, Vec<Subcommand<P>>>,
}

impl<P: Platform> Default for RegistryBuilder<P> {
    fn default() -> Self {
        Self::new()
    }
}

impl<P: Platform> RegistryBuilder<P> {
    pub fn new() -> Self {
        Self {
            commands: BTreeMap::new(),
            subcommands: BTreeMap::new(),
        }
    }

    /// Insert a command under its category. Returns the command it replaced, if any.
    pub fn insert_command(&mut self, command: Command<P>) -> Option<Command<P>> {
        self.commands
            .entry(command.category.clone())
            .or_default()
            .insert(command.name.clone(), command)
    }

    /// Append a subcommand to its parent's list (declaration order is kept).
    pub fn insert_subcommand(&mut self, subcommand: Subcommand<P>) {
        self.subcommands
            .entry(subcommand.parent.clone())
            .or_default()
            .push(subcommand);
    }

    /// Finish loading. Every subcommand parent without an explicit interaction
    /// command gets a stub chat-input parent so it can be published and routed.
    pub fn freeze(mut self) -> Arc<Registry<P>> {
        let orphaned: Vec<String> = self
            .subcommands
            .keys()
            .filter(|parent| {
                self.commands
                    .get(&EventCategory::Interaction)
                    .map_or(true, |map| !map.contains_key(parent.as_str()))
            })
            .cloned()
            .collect();

        for parent in orphaned {
            tracing::debug!(parent = %parent, "Synthesizing stub parent command");
            self.insert_command(parent_stub(&parent));
        }

        Arc::new(Registry {
            commands: self.commands,
            subcommands: self.subcommands,
        })
    }
}

fn parent_stub<P: Platform>(parent: &str) -> Command<P> {
    Command::slash(
        parent,
        format!("Manage {}", parent),
        |client: P::Client, interaction: P::Interaction| async move {
            P::send_failure_notice(&client, &interaction, USE_SUBCOMMAND_NOTICE).await
        },
    )
}

/// Frozen registry handed to the dispatcher and the remote sync.
pub struct Registry<P: Platform> {
    commands: BTreeMap<EventCategory, BTreeMap<String, Command<P>>>,
    subcommands: BTreeMap<String, Vec<Subcommand<P>>>,
}

impl<P: Platform> Registry<P> {
    pub fn categories(&self) -> impl Iterator<Item = &EventCategory> {
        self.commands.keys()
    }

    pub fn commands(&self, category: &EventCategory) -> Option<&BTreeMap<String, Command<P>>> {
        self.commands.get(category)
    }

    pub fn command(&self, category: &EventCategory, name: &str) -> Option<&Command<P>> {
        self.commands.get(category).and_then(|map| map.get(name))
    }

    pub fn subcommands(&self, parent: &str) -> &[Subcommand<P>] {
        self.subcommands
            .get(parent)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    pub fn find_subcommand(&self, parent: &str, name: &str) -> Option<&Subcommand<P>> {
        self.subcommands(parent)
            .iter()
            .find(|sub| sub.subcommand == name)
    }

    pub fn is_empty(&self) -> bool {
        self.commands.values().all(BTreeMap::is_empty) && self.subcommands.is_empty()
    }

    /// Interaction commands that are published to the platform, in name order.
    pub fn published_commands(&self) -> impl Iterator<Item = (&Command<P>, CommandKind)> {
        self.commands
            .get(&EventCategory::Interaction)
            .into_iter()
            .flat_map(|map| map.values())
            .filter(|command| !command.name.is_empty())
            .filter_map(|command| command.kind.map(|kind| (command, kind)))
    }
}

// Event dispatcher.
//
// Routes platform events to the commands in a frozen `Registry`:
// - prefix messages by their first word
// - slash/autocomplete interactions by command name, subcommand first
// - component interactions by custom ID
// - modal submissions to every anonymous or matching command (fan-out)
// - any other named event to every listener registered for it (fan-out)
//
// Handler errors and panics never escape: they are logged, and for slash
// commands and subcommands the user also gets a failure notice.

use super::command_models::{
    Command, EventCategory, HandlerFuture, InboundInteraction, InboundMessage, InteractionFn,
    InteractionRoute, Platform, Trigger,
};
use super::handler_loader::panic_message;
use super::registry::Registry;
use futures::FutureExt;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use tokio::task::JoinHandle;

/// Shown to the user when a slash command or subcommand fails.
pub const GENERIC_FAILURE_NOTICE: &str = "❌ An error occurred while processing the command.";

/// What happened to one inbound event.
#[derive(Debug)]
pub enum Routed {
    /// No handler matched, or the category has no listener bound.
    Unmatched,
    /// A single handler ran to completion.
    Handled,
    /// A single handler returned an error or panicked (already logged).
    Failed,
    /// Handlers were spawned as independent tasks. Dropping the handles detaches them.
    Detached(Vec<JoinHandle<()>>),
}

impl Routed {
    pub fn is_handled(&self) -> bool {
        matches!(self, Routed::Handled)
    }
}

/// The routable part of a gateway event, if any.
pub enum Inbound<'a, P: Platform> {
    Message(&'a P::Message),
    Interaction(&'a P::Interaction),
    Other,
}

pub struct Dispatcher<P: Platform> {
    registry: Arc<Registry<P>>,
    prefix: String,
}

impl<P: Platform> Dispatcher<P> {
    pub fn new(registry: Arc<Registry<P>>, prefix: impl Into<String>) -> Self {
        let dispatcher = Self {
            registry,
            prefix: prefix.into(),
        };

        let bound: Vec<String> = dispatcher
            .bound_categories()
            .map(ToString::to_string)
            .collect();
        tracing::info!(categories = ?bound, "Registering events for command handler");

        dispatcher
    }

    /// One listener per registered category.
    pub fn bound_categories(&self) -> impl Iterator<Item = &EventCategory> {
        self.registry.categories()
    }

    pub fn listens_to(&self, category: &EventCategory) -> bool {
        self.registry.commands(category).is_some()
    }

    /// Route one gateway event: listeners are spawned first, then the
    /// message or interaction (if any) is dispatched and awaited.
    pub async fn dispatch_gateway(
        &self,
        client: &P::Client,
        event_name: &str,
        event: &P::Event,
        inbound: Inbound<'_, P>,
    ) -> Routed {
        if self.listens_to(&EventCategory::Listener(event_name.to_string())) {
            // Dropping the handles detaches the listener tasks
            let _ = self.dispatch_event(client, event_name, event.clone());
        }

        match inbound {
            Inbound::Message(message) => self.dispatch_message(client, message).await,
            Inbound::Interaction(interaction) => {
                self.dispatch_interaction(client, interaction).await
            }
            Inbound::Other => Routed::Unmatched,
        }
    }

    // ------------------------------------------------------------------
    // Prefix commands
    // ------------------------------------------------------------------

    pub async fn dispatch_message(&self, client: &P::Client, message: &P::Message) -> Routed {
        let Some(commands) = self.registry.commands(&EventCategory::Prefix) else {
            return Routed::Unmatched;
        };

        if message.author_id() == P::current_user_id(client) {
            return Routed::Unmatched;
        }

        let Some((name, args)) = parse_prefixed(message.content(), &self.prefix) else {
            return Routed::Unmatched;
        };

        let Some(command) = commands.get(&name) else {
            return Routed::Unmatched;
        };

        let trigger = Trigger::Prefix {
            message: message.clone(),
            args,
        };
        match guarded(|| (command.execute)(client.clone(), trigger)).await {
            Ok(()) => Routed::Handled,
            Err(err) => {
                tracing::error!(
                    category = %EventCategory::Prefix,
                    command = %name,
                    error = ?err,
                    "Error executing prefix command"
                );
                Routed::Failed
            }
        }
    }

    // ------------------------------------------------------------------
    // Native interactions
    // ------------------------------------------------------------------

    pub async fn dispatch_interaction(
        &self,
        client: &P::Client,
        interaction: &P::Interaction,
    ) -> Routed {
        let Some(commands) = self.registry.commands(&EventCategory::Interaction) else {
            return Routed::Unmatched;
        };

        match interaction.route() {
            InteractionRoute::Command { name, subcommand } => {
                let Some(command) = commands.get(name) else {
                    return Routed::Unmatched;
                };
                self.run_command(client, interaction, command, subcommand)
                    .await
            }
            InteractionRoute::Autocomplete { name, subcommand } => {
                self.run_autocomplete(client, interaction, name, subcommand)
                    .await
            }
            InteractionRoute::Component { custom_id } => {
                let Some(command) = commands.get(custom_id) else {
                    return Routed::Unmatched;
                };
                let result = guarded(|| {
                    (command.execute)(client.clone(), Trigger::Interaction(interaction.clone()))
                })
                .await;
                match result {
                    Ok(()) => Routed::Handled,
                    Err(err) => {
                        tracing::error!(
                            category = %EventCategory::Interaction,
                            command = %custom_id,
                            error = ?err,
                            "Error executing component command"
                        );
                        Routed::Failed
                    }
                }
            }
            InteractionRoute::Modal { custom_id } => {
                let handles = commands
                    .values()
                    .filter(|command| command.name.is_empty() || command.name == custom_id)
                    .map(|command| {
                        spawn_detached(
                            command,
                            client.clone(),
                            Trigger::Interaction(interaction.clone()),
                            "Error executing modal command",
                        )
                    })
                    .collect::<Vec<_>>();
                if handles.is_empty() {
                    Routed::Unmatched
                } else {
                    Routed::Detached(handles)
                }
            }
            InteractionRoute::Unsupported => Routed::Unmatched,
        }
    }

    /// Slash invocation: a matching subcommand replaces the parent entirely.
    async fn run_command(
        &self,
        client: &P::Client,
        interaction: &P::Interaction,
        command: &Command<P>,
        subcommand: Option<&str>,
    ) -> Routed {
        if let Some(sub) =
            subcommand.and_then(|sub| self.registry.find_subcommand(&command.name, sub))
        {
            let label = format!("{}/{}", command.name, sub.subcommand);
            return match guarded(|| (sub.execute)(client.clone(), interaction.clone())).await {
                Ok(()) => Routed::Handled,
                Err(err) => {
                    tracing::error!(
                        category = %EventCategory::Interaction,
                        command = %label,
                        error = ?err,
                        "Error executing subcommand"
                    );
                    notify_failure::<P>(client, interaction, &label).await;
                    Routed::Failed
                }
            };
        }

        let result = guarded(|| {
            (command.execute)(client.clone(), Trigger::Interaction(interaction.clone()))
        })
        .await;
        match result {
            Ok(()) => Routed::Handled,
            Err(err) => {
                tracing::error!(
                    category = %EventCategory::Interaction,
                    command = %command.name,
                    error = ?err,
                    "Error executing slash command"
                );
                notify_failure::<P>(client, interaction, &command.name).await;
                Routed::Failed
            }
        }
    }

    /// Autocomplete: a matching subcommand is the target even when it has no
    /// autocomplete of its own; the parent is only consulted when no
    /// subcommand matched. A missing parent is fine.
    async fn run_autocomplete(
        &self,
        client: &P::Client,
        interaction: &P::Interaction,
        name: &str,
        subcommand: Option<&str>,
    ) -> Routed {
        let target: Option<(String, &InteractionFn<P>)> =
            match subcommand.and_then(|sub| self.registry.find_subcommand(name, sub)) {
                Some(sub) => sub
                    .autocomplete
                    .as_ref()
                    .map(|f| (format!("{}/{}", name, sub.subcommand), f)),
                None => self
                    .registry
                    .command(&EventCategory::Interaction, name)
                    .and_then(|command| command.autocomplete.as_ref())
                    .map(|f| (name.to_string(), f)),
            };

        let Some((label, autocomplete)) = target else {
            return Routed::Unmatched;
        };

        match guarded(|| autocomplete(client.clone(), interaction.clone())).await {
            Ok(()) => Routed::Handled,
            Err(err) => {
                tracing::error!(
                    category = %EventCategory::Interaction,
                    command = %label,
                    error = ?err,
                    "Error handling autocomplete"
                );
                Routed::Failed
            }
        }
    }

    // ------------------------------------------------------------------
    // Passive listeners
    // ------------------------------------------------------------------

    /// Fan an event out to every listener registered under `event_name`.
    pub fn dispatch_event(&self, client: &P::Client, event_name: &str, event: P::Event) -> Routed {
        let category = EventCategory::Listener(event_name.to_string());
        let Some(commands) = self.registry.commands(&category) else {
            return Routed::Unmatched;
        };

        let handles: Vec<_> = commands
            .values()
            .map(|command| {
                spawn_detached(
                    command,
                    client.clone(),
                    Trigger::Event(event.clone()),
                    "Error executing listener",
                )
            })
            .collect();

        if handles.is_empty() {
            Routed::Unmatched
        } else {
            Routed::Detached(handles)
        }
    }
}

/// Split `!name arg1 arg2` into a lowercased name and its positional args.
fn parse_prefixed(content: &str, prefix: &str) -> Option<(String, Vec<String>)> {
    let rest = content.strip_prefix(prefix)?;
    let mut words = rest.split_whitespace();
    let name = words.next()?.to_lowercase();
    let args = words.map(str::to_string).collect();
    Some((name, args))
}

fn spawn_detached<P: Platform>(
    command: &Command<P>,
    client: P::Client,
    trigger: Trigger<P>,
    failure: &'static str,
) -> JoinHandle<()> {
    let execute = Arc::clone(&command.execute);
    let category = command.category.clone();
    let name = command.name.clone();

    tokio::spawn(async move {
        if let Err(err) = guarded(move || execute(client, trigger)).await {
            tracing::error!(category = %category, command = %name, error = ?err, "{}", failure);
        }
    })
}

/// Start and await a handler, turning a panic at either step into an error.
async fn guarded<F>(start: F) -> anyhow::Result<()>
where
    F: FnOnce() -> HandlerFuture,
{
    match AssertUnwindSafe(async move { start().await })
        .catch_unwind()
        .await
    {
        Ok(result) => result,
        Err(payload) => Err(anyhow::anyhow!(
            "handler panicked: {}",
            panic_message(payload.as_ref())
        )),
    }
}

async fn notify_failure<P: Platform>(
    client: &P::Client,
    interaction: &P::Interaction,
    label: &str,
) {
    if let Err(err) = P::send_failure_notice(client, interaction, GENERIC_FAILURE_NOTICE).await {
        tracing::warn!(command = %label, error = ?err, "Failed to send failure notice");
    }
}

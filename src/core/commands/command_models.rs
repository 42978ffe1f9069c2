// Command dispatch domain models.
//
// Nothing in here knows about serenity. The `Platform` trait is the seam the
// Discord layer plugs into, and tests plug a mock platform into the same seam.

use async_trait::async_trait;
use futures::future::BoxFuture;
use futures::FutureExt;
use serde::Serialize;
use std::fmt;
use std::future::Future;
use std::sync::Arc;

// ============================================================================
// PLATFORM PORT
// ============================================================================

/// Everything the dispatcher needs from the chat platform.
#[async_trait]
pub trait Platform: Send + Sync + Sized + 'static {
    /// Handle passed to handler factories and to every handler invocation.
    type Client: Clone + Send + Sync + 'static;
    type Message: InboundMessage + Clone + Send + Sync + 'static;
    type Interaction: InboundInteraction + Clone + Send + Sync + 'static;
    /// Raw payload handed to passive listeners.
    type Event: Clone + Send + Sync + 'static;

    /// The bot's own user ID, used to ignore our own prefix messages.
    fn current_user_id(client: &Self::Client) -> u64;

    /// Tell the user that their interaction failed (red embed, ephemeral where possible).
    async fn send_failure_notice(
        client: &Self::Client,
        interaction: &Self::Interaction,
        description: &str,
    ) -> anyhow::Result<()>;
}

pub trait InboundMessage {
    fn author_id(&self) -> u64;
    fn content(&self) -> &str;
}

/// How an interaction should be routed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InteractionRoute<'a> {
    /// Slash or context menu invocation. `subcommand` is only set when the
    /// first option is sub-command shaped.
    Command {
        name: &'a str,
        subcommand: Option<&'a str>,
    },
    Autocomplete {
        name: &'a str,
        subcommand: Option<&'a str>,
    },
    /// Buttons, select menus, etc.
    Component { custom_id: &'a str },
    Modal { custom_id: &'a str },
    Unsupported,
}

pub trait InboundInteraction {
    fn route(&self) -> InteractionRoute<'_>;
}

// ============================================================================
// CATEGORIES & SCHEMA
// ============================================================================

/// The dispatch bucket a command is registered under.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum EventCategory {
    /// Prefix text commands (`!ping`).
    Prefix,
    /// Native interactions: slash, autocomplete, components, modals.
    Interaction,
    /// Any other named gateway event, e.g. `message` or `guild_member_addition`.
    Listener(String),
}

impl fmt::Display for EventCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EventCategory::Prefix => write!(f, "prefix"),
            EventCategory::Interaction => write!(f, "interaction"),
            EventCategory::Listener(event) => write!(f, "{}", event),
        }
    }
}

/// Platform-native command kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CommandKind {
    ChatInput,
    User,
    Message,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum OptionKind {
    SubCommand,
    SubCommandGroup,
    String,
    Integer,
    Number,
    Boolean,
    User,
    Channel,
    Role,
    Mentionable,
    Attachment,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OptionChoice {
    pub name: String,
    pub value: String,
}

/// Parameter schema for a command or subcommand.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CommandOption {
    pub kind: OptionKind,
    pub name: String,
    pub description: String,
    pub required: bool,
    pub autocomplete: bool,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub choices: Vec<OptionChoice>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<CommandOption>,
}

impl CommandOption {
    pub fn new(kind: OptionKind, name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            kind,
            name: name.into(),
            description: description.into(),
            required: false,
            autocomplete: false,
            choices: Vec::new(),
            options: Vec::new(),
        }
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub fn autocomplete(mut self) -> Self {
        self.autocomplete = true;
        self
    }

    pub fn choice(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.choices.push(OptionChoice {
            name: name.into(),
            value: value.into(),
        });
        self
    }

    pub fn sub_options(mut self, options: Vec<CommandOption>) -> Self {
        self.options = options;
        self
    }
}

// ============================================================================
// HANDLERS
// ============================================================================

pub type HandlerFuture = BoxFuture<'static, anyhow::Result<()>>;

/// What a command's `execute` receives, depending on its category.
pub enum Trigger<P: Platform> {
    Prefix {
        message: P::Message,
        args: Vec<String>,
    },
    Interaction(P::Interaction),
    Event(P::Event),
}

impl<P: Platform> Trigger<P> {
    fn label(&self) -> &'static str {
        match self {
            Trigger::Prefix { .. } => "prefix",
            Trigger::Interaction(_) => "interaction",
            Trigger::Event(_) => "event",
        }
    }
}

pub type ExecuteFn<P> =
    Arc<dyn Fn(<P as Platform>::Client, Trigger<P>) -> HandlerFuture + Send + Sync>;
pub type InteractionFn<P> = Arc<
    dyn Fn(<P as Platform>::Client, <P as Platform>::Interaction) -> HandlerFuture + Send + Sync,
>;

fn wrong_trigger<P: Platform>(expected: &'static str, trigger: &Trigger<P>) -> HandlerFuture {
    let got = trigger.label();
    async move {
        Err::<(), _>(anyhow::anyhow!(
            "handler expects a {} trigger, got {}",
            expected,
            got
        ))
    }
    .boxed()
}

fn interaction_fn<P, F, Fut>(f: F) -> InteractionFn<P>
where
    P: Platform,
    F: Fn(P::Client, P::Interaction) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = anyhow::Result<()>> + Send + 'static,
{
    Arc::new(move |client: P::Client, interaction: P::Interaction| {
        f(client, interaction).boxed()
    })
}

fn interaction_execute<P, F, Fut>(f: F) -> ExecuteFn<P>
where
    P: Platform,
    F: Fn(P::Client, P::Interaction) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = anyhow::Result<()>> + Send + 'static,
{
    Arc::new(move |client: P::Client, trigger: Trigger<P>| match trigger {
        Trigger::Interaction(interaction) => f(client, interaction).boxed(),
        other => wrong_trigger("interaction", &other),
    })
}

/// A top-level handler bound to one event category.
pub struct Command<P: Platform> {
    /// Lookup key within the category. Empty only for anonymous interaction handlers.
    pub name: String,
    pub category: EventCategory,
    /// Only commands with a kind are published to the platform.
    pub kind: Option<CommandKind>,
    pub description: Option<String>,
    pub options: Vec<CommandOption>,
    pub execute: ExecuteFn<P>,
    pub autocomplete: Option<InteractionFn<P>>,
}

impl<P: Platform> Command<P> {
    /// Chat-input (slash) command.
    pub fn slash<F, Fut>(name: impl Into<String>, description: impl Into<String>, execute: F) -> Self
    where
        F: Fn(P::Client, P::Interaction) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = anyhow::Result<()>> + Send + 'static,
    {
        Self {
            name: name.into(),
            category: EventCategory::Interaction,
            kind: Some(CommandKind::ChatInput),
            description: Some(description.into()),
            options: Vec::new(),
            execute: interaction_execute::<P, _, _>(execute),
            autocomplete: None,
        }
    }

    /// User or message context menu entry.
    pub fn context_menu<F, Fut>(name: impl Into<String>, kind: CommandKind, execute: F) -> Self
    where
        F: Fn(P::Client, P::Interaction) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = anyhow::Result<()>> + Send + 'static,
    {
        Self {
            name: name.into(),
            category: EventCategory::Interaction,
            kind: Some(kind),
            description: None,
            options: Vec::new(),
            execute: interaction_execute::<P, _, _>(execute),
            autocomplete: None,
        }
    }

    /// Button/select handler, keyed by the component's custom ID.
    pub fn component<F, Fut>(custom_id: impl Into<String>, execute: F) -> Self
    where
        F: Fn(P::Client, P::Interaction) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = anyhow::Result<()>> + Send + 'static,
    {
        Self {
            name: custom_id.into(),
            category: EventCategory::Interaction,
            kind: None,
            description: None,
            options: Vec::new(),
            execute: interaction_execute::<P, _, _>(execute),
            autocomplete: None,
        }
    }

    /// Modal submit handler. An empty custom ID receives every modal submission.
    pub fn modal<F, Fut>(custom_id: impl Into<String>, execute: F) -> Self
    where
        F: Fn(P::Client, P::Interaction) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = anyhow::Result<()>> + Send + 'static,
    {
        Self::component(custom_id, execute)
    }

    /// Prefix text command. `execute` gets the raw message and the positional args.
    pub fn prefix<F, Fut>(name: impl Into<String>, execute: F) -> Self
    where
        F: Fn(P::Client, P::Message, Vec<String>) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = anyhow::Result<()>> + Send + 'static,
    {
        Self {
            name: name.into(),
            category: EventCategory::Prefix,
            kind: None,
            description: None,
            options: Vec::new(),
            execute: Arc::new(move |client: P::Client, trigger: Trigger<P>| match trigger {
                Trigger::Prefix { message, args } => execute(client, message, args).boxed(),
                other => wrong_trigger("prefix", &other),
            }),
            autocomplete: None,
        }
    }

    /// Passive listener for a named platform event.
    pub fn listener<F, Fut>(event: impl Into<String>, name: impl Into<String>, execute: F) -> Self
    where
        F: Fn(P::Client, P::Event) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = anyhow::Result<()>> + Send + 'static,
    {
        Self {
            name: name.into(),
            category: EventCategory::Listener(event.into()),
            kind: None,
            description: None,
            options: Vec::new(),
            execute: Arc::new(move |client: P::Client, trigger: Trigger<P>| match trigger {
                Trigger::Event(event) => execute(client, event).boxed(),
                other => wrong_trigger("event", &other),
            }),
            autocomplete: None,
        }
    }

    pub fn with_options(mut self, options: Vec<CommandOption>) -> Self {
        self.options = options;
        self
    }

    pub fn with_autocomplete<F, Fut>(mut self, autocomplete: F) -> Self
    where
        F: Fn(P::Client, P::Interaction) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = anyhow::Result<()>> + Send + 'static,
    {
        self.autocomplete = Some(interaction_fn::<P, _, _>(autocomplete));
        self
    }
}

/// A handler bound under a parent command's name.
pub struct Subcommand<P: Platform> {
    /// Owning command. Subcommands with an empty parent are dropped at load time.
    pub parent: String,
    pub subcommand: String,
    pub description: String,
    pub options: Vec<CommandOption>,
    pub execute: InteractionFn<P>,
    pub autocomplete: Option<InteractionFn<P>>,
}

impl<P: Platform> Subcommand<P> {
    pub fn new<F, Fut>(
        parent: impl Into<String>,
        subcommand: impl Into<String>,
        description: impl Into<String>,
        execute: F,
    ) -> Self
    where
        F: Fn(P::Client, P::Interaction) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = anyhow::Result<()>> + Send + 'static,
    {
        Self {
            parent: parent.into(),
            subcommand: subcommand.into(),
            description: description.into(),
            options: Vec::new(),
            execute: interaction_fn::<P, _, _>(execute),
            autocomplete: None,
        }
    }

    pub fn with_options(mut self, options: Vec<CommandOption>) -> Self {
        self.options = options;
        self
    }

    pub fn with_autocomplete<F, Fut>(mut self, autocomplete: F) -> Self
    where
        F: Fn(P::Client, P::Interaction) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = anyhow::Result<()>> + Send + 'static,
    {
        self.autocomplete = Some(interaction_fn::<P, _, _>(autocomplete));
        self
    }
}

/// What a handler module produces: exactly one of the two shapes.
pub enum HandlerModule<P: Platform> {
    Command(Command<P>),
    Subcommand(Subcommand<P>),
}

impl<P: Platform> From<Command<P>> for HandlerModule<P> {
    fn from(command: Command<P>) -> Self {
        HandlerModule::Command(command)
    }
}

impl<P: Platform> From<Subcommand<P>> for HandlerModule<P> {
    fn from(subcommand: Subcommand<P>) -> Self {
        HandlerModule::Subcommand(subcommand)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::commands::test_support::{MockClient, MockEvent, MockPlatform};

    #[tokio::test]
    async fn test_prefix_command_rejects_event_trigger() {
        let command = Command::<MockPlatform>::prefix("ping", |_client, _msg, _args| async {
            Ok(())
        });

        let result = (command.execute)(
            MockClient::new(1),
            Trigger::Event(MockEvent("message".to_string())),
        )
        .await;

        let err = result.unwrap_err().to_string();
        assert!(err.contains("prefix"));
        assert!(err.contains("event"));
    }

    #[test]
    fn test_constructors_pin_category_and_kind() {
        let slash = Command::<MockPlatform>::slash("ping", "Ping", |_c, _i| async { Ok(()) });
        assert_eq!(slash.category, EventCategory::Interaction);
        assert_eq!(slash.kind, Some(CommandKind::ChatInput));

        let button = Command::<MockPlatform>::component("btn", |_c, _i| async { Ok(()) });
        assert_eq!(button.category, EventCategory::Interaction);
        assert_eq!(button.kind, None);

        let listener =
            Command::<MockPlatform>::listener("message", "audit", |_c, _e| async { Ok(()) });
        assert_eq!(
            listener.category,
            EventCategory::Listener("message".to_string())
        );
    }

    #[test]
    fn test_option_builder() {
        let option = CommandOption::new(OptionKind::String, "tag", "Resource tag")
            .required()
            .choice("Guide", "guide");

        assert!(option.required);
        assert!(!option.autocomplete);
        assert_eq!(option.choices.len(), 1);
        assert_eq!(option.choices[0].value, "guide");
    }
}

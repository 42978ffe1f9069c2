// Mock platform and log capture used by the dispatch tests.

use super::command_models::{InboundInteraction, InboundMessage, InteractionRoute, Platform};
use async_trait::async_trait;
use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, Mutex};
use tracing::field::{Field, Visit};
use tracing::subscriber::DefaultGuard;
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::layer::{Context, Layer, SubscriberExt};

pub struct MockPlatform;

#[derive(Clone)]
pub struct MockClient {
    pub user_id: u64,
    notices: Arc<Mutex<Vec<String>>>,
}

impl MockClient {
    pub fn new(user_id: u64) -> Self {
        Self {
            user_id,
            notices: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Failure notices sent to users so far.
    pub fn notices(&self) -> Vec<String> {
        self.notices.lock().unwrap().clone()
    }
}

#[derive(Debug, Clone)]
pub struct MockMessage {
    pub author_id: u64,
    pub content: String,
}

impl MockMessage {
    pub fn new(author_id: u64, content: &str) -> Self {
        Self {
            author_id,
            content: content.to_string(),
        }
    }
}

impl InboundMessage for MockMessage {
    fn author_id(&self) -> u64 {
        self.author_id
    }

    fn content(&self) -> &str {
        &self.content
    }
}

#[derive(Debug, Clone)]
enum MockKind {
    Command,
    Autocomplete,
    Component,
    Modal,
    Unsupported,
}

#[derive(Debug, Clone)]
pub struct MockInteraction {
    kind: MockKind,
    name: String,
    subcommand: Option<String>,
}

impl MockInteraction {
    fn build(kind: MockKind, name: &str, subcommand: Option<&str>) -> Self {
        Self {
            kind,
            name: name.to_string(),
            subcommand: subcommand.map(str::to_string),
        }
    }

    pub fn command(name: &str, subcommand: Option<&str>) -> Self {
        Self::build(MockKind::Command, name, subcommand)
    }

    pub fn autocomplete(name: &str, subcommand: Option<&str>) -> Self {
        Self::build(MockKind::Autocomplete, name, subcommand)
    }

    pub fn component(custom_id: &str) -> Self {
        Self::build(MockKind::Component, custom_id, None)
    }

    pub fn modal(custom_id: &str) -> Self {
        Self::build(MockKind::Modal, custom_id, None)
    }

    pub fn unsupported() -> Self {
        Self::build(MockKind::Unsupported, "", None)
    }
}

impl InboundInteraction for MockInteraction {
    fn route(&self) -> InteractionRoute<'_> {
        match self.kind {
            MockKind::Command => InteractionRoute::Command {
                name: &self.name,
                subcommand: self.subcommand.as_deref(),
            },
            MockKind::Autocomplete => InteractionRoute::Autocomplete {
                name: &self.name,
                subcommand: self.subcommand.as_deref(),
            },
            MockKind::Component => InteractionRoute::Component {
                custom_id: &self.name,
            },
            MockKind::Modal => InteractionRoute::Modal {
                custom_id: &self.name,
            },
            MockKind::Unsupported => InteractionRoute::Unsupported,
        }
    }
}

#[derive(Debug, Clone)]
pub struct MockEvent(pub String);

#[async_trait]
impl Platform for MockPlatform {
    type Client = MockClient;
    type Message = MockMessage;
    type Interaction = MockInteraction;
    type Event = MockEvent;

    fn current_user_id(client: &MockClient) -> u64 {
        client.user_id
    }

    async fn send_failure_notice(
        client: &MockClient,
        _interaction: &MockInteraction,
        description: &str,
    ) -> anyhow::Result<()> {
        client.notices.lock().unwrap().push(description.to_string());
        Ok(())
    }
}

// ----------------------------------------------------------------------------
// Log capture
// ----------------------------------------------------------------------------

/// Fields of one recorded event, values rendered as text.
pub type LogFields = HashMap<String, String>;

#[derive(Clone, Default)]
pub struct LogCapture {
    events: Arc<Mutex<Vec<(Level, LogFields)>>>,
}

impl LogCapture {
    /// Record events on this thread until the guard drops.
    pub fn install() -> (Self, DefaultGuard) {
        let capture = Self::default();
        let subscriber = tracing_subscriber::registry().with(capture.clone());
        let guard = tracing::subscriber::set_default(subscriber);
        (capture, guard)
    }

    pub fn errors(&self) -> Vec<LogFields> {
        self.events
            .lock()
            .unwrap()
            .iter()
            .filter(|(level, _)| *level == Level::ERROR)
            .map(|(_, fields)| fields.clone())
            .collect()
    }
}

impl<S: Subscriber> Layer<S> for LogCapture {
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        let mut visitor = FieldRecorder::default();
        event.record(&mut visitor);
        self.events
            .lock()
            .unwrap()
            .push((*event.metadata().level(), visitor.0));
    }
}

#[derive(Default)]
struct FieldRecorder(LogFields);

impl Visit for FieldRecorder {
    fn record_str(&mut self, field: &Field, value: &str) {
        self.0.insert(field.name().to_string(), value.to_string());
    }

    fn record_debug(&mut self, field: &Field, value: &dyn fmt::Debug) {
        self.0.insert(field.name().to_string(), format!("{:?}", value));
    }
}

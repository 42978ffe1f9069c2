// Handler loader.
//
// Handler modules are listed in an explicit manifest (see `handler_entry!`).
// Loading runs every factory, classifies what it returns and fills a
// `RegistryBuilder`. One bad module never stops the others from loading.

use super::command_models::{EventCategory, HandlerModule, Platform};
use super::registry::RegistryBuilder;
use std::any::Any;
use std::collections::HashMap;
use std::panic::{self, AssertUnwindSafe};

/// Factory signature every handler module exposes.
pub type HandlerFactory<P> =
    fn(&<P as Platform>::Client) -> anyhow::Result<HandlerModule<P>>;

/// One manifest line: where the handler lives and how to build it.
pub struct HandlerEntry<P: Platform> {
    pub origin: &'static str,
    pub build: HandlerFactory<P>,
}

impl<P: Platform> HandlerEntry<P> {
    pub fn new(origin: &'static str, build: HandlerFactory<P>) -> Self {
        Self { origin, build }
    }
}

/// Build a `HandlerEntry` from a module path whose `handler` fn is the factory.
#[macro_export]
macro_rules! handler_entry {
    ($($module:ident)::+) => {
        $crate::core::commands::HandlerEntry::new(
            stringify!($($module)::+),
            $($module)::+::handler,
        )
    };
}

/// Summary of a load pass, mostly for the startup log.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct LoadReport {
    pub commands: usize,
    pub subcommands: usize,
    pub skipped: usize,
    pub failed: usize,
}

/// Build every handler in `entries` and classify it into a fresh registry.
pub fn load<P: Platform>(
    entries: &[HandlerEntry<P>],
    client: &P::Client,
) -> (RegistryBuilder<P>, LoadReport) {
    let mut builder = RegistryBuilder::new();
    let mut report = LoadReport::default();
    // (category, name) -> origin, for overwrite warnings
    let mut origins: HashMap<(EventCategory, String), &'static str> = HashMap::new();

    for entry in entries {
        let module = match build_isolated(entry, client) {
            Ok(module) => module,
            Err(err) => {
                tracing::error!(origin = entry.origin, error = %err, "Error loading handler");
                report.failed += 1;
                continue;
            }
        };

        match module {
            HandlerModule::Subcommand(subcommand) => {
                if subcommand.parent.is_empty() {
                    tracing::debug!(
                        origin = entry.origin,
                        subcommand = %subcommand.subcommand,
                        "Skipping subcommand without a parent"
                    );
                    report.skipped += 1;
                    continue;
                }
                builder.insert_subcommand(subcommand);
                report.subcommands += 1;
            }
            HandlerModule::Command(command) => {
                if let EventCategory::Listener(event) = &command.category {
                    if event.is_empty() {
                        tracing::debug!(origin = entry.origin, "Skipping listener without an event name");
                        report.skipped += 1;
                        continue;
                    }
                }
                if command.category != EventCategory::Interaction && command.name.is_empty() {
                    tracing::debug!(
                        origin = entry.origin,
                        category = %command.category,
                        "Skipping nameless command outside the interaction category"
                    );
                    report.skipped += 1;
                    continue;
                }

                let key = (command.category.clone(), command.name.clone());
                if builder.insert_command(command).is_some() {
                    tracing::warn!(
                        category = %key.0,
                        command = %key.1,
                        previous = origins.get(&key).copied().unwrap_or("unknown"),
                        replacement = entry.origin,
                        "Handler name collision, keeping the later one"
                    );
                } else {
                    report.commands += 1;
                }
                origins.insert(key, entry.origin);
            }
        }
    }

    tracing::info!(
        commands = report.commands,
        subcommands = report.subcommands,
        skipped = report.skipped,
        failed = report.failed,
        "Loaded command handlers"
    );

    (builder, report)
}

/// Run a factory, turning a panic into an error so it stays isolated.
fn build_isolated<P: Platform>(
    entry: &HandlerEntry<P>,
    client: &P::Client,
) -> anyhow::Result<HandlerModule<P>> {
    match panic::catch_unwind(AssertUnwindSafe(|| (entry.build)(client))) {
        Ok(result) => result,
        Err(payload) => Err(anyhow::anyhow!(
            "handler factory panicked: {}",
            panic_message(payload.as_ref())
        )),
    }
}

/// Best-effort text of a panic payload.
pub(crate) fn panic_message(payload: &(dyn Any + Send)) -> String {
    payload
        .downcast_ref::<&str>()
        .map(|s| s.to_string())
        .or_else(|| payload.downcast_ref::<String>().cloned())
        .unwrap_or_else(|| "unknown panic".to_string())
}

// Command dispatch core: handler loading, the registry, event routing and
// publishing the command set to the platform.

pub mod command_models;
pub mod dispatcher;
pub mod handler_loader;
pub mod registry;
pub mod remote_sync;

#[cfg(test)]
pub mod test_support;

pub use command_models::*;
pub use dispatcher::{Dispatcher, Inbound, Routed, GENERIC_FAILURE_NOTICE};
pub use handler_loader::{load, HandlerEntry, HandlerFactory, LoadReport};
pub use registry::{Registry, RegistryBuilder, USE_SUBCOMMAND_NOTICE};
pub use remote_sync::{build_payload, sync_remote, CommandPayload, CommandRegistryApi, SyncOutcome};

pub mod command_registry;

pub use command_registry::SerenityCommandRegistry;

// The infra module contains implementations of core traits.
// Each feature implementation goes in its own submodule.

#[path = "resources/mod.rs"]
pub mod resources;

#[path = "discord/mod.rs"]
pub mod discord;

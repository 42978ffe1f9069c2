// Handler manifest.
//
// Every handler module exposes `handler(&DiscordClient)`. Adding a handler
// means adding its module below and one line to `manifest()`.

pub mod embeds;
pub mod listeners;
pub mod options;
pub mod prefix;
pub mod report;
pub mod resource;
pub mod review;
pub mod staff;

use crate::core::commands::HandlerEntry;
use crate::discord::Discord;

pub fn manifest() -> Vec<HandlerEntry<Discord>> {
    vec![
        crate::handler_entry!(prefix::ping),
        crate::handler_entry!(resource::submit),
        crate::handler_entry!(resource::view),
        crate::handler_entry!(resource::rate),
        crate::handler_entry!(resource::report),
        crate::handler_entry!(resource::stats),
        crate::handler_entry!(review::approve),
        crate::handler_entry!(review::decline),
        crate::handler_entry!(report::delete),
        crate::handler_entry!(report::save),
        crate::handler_entry!(report::edit),
        crate::handler_entry!(report::edit_modal),
        crate::handler_entry!(listeners::resource_mentions),
    ]
}

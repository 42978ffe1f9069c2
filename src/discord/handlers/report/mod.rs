// Staff buttons and the edit modal on report cards.

pub mod delete;
pub mod edit;
pub mod edit_modal;
pub mod save;

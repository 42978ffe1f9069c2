// Approve / decline buttons on submission cards.

pub mod approve;
pub mod decline;

// Text commands invoked with the configured prefix.

pub mod ping;

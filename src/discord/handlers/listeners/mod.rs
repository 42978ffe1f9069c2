// Passive listeners for gateway events.

pub mod resource_mentions;

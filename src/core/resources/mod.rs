// Resource catalog: submissions, staff moderation, reviews and lookups.

pub mod resource_models;
pub mod resource_service;

pub use resource_models::*;
pub use resource_service::{ResourceError, ResourceService, ResourceStore, ALL_TAGS};

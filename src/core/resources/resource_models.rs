// Resource catalog domain models.
//
// Pure data, no Discord or SQL types. IDs and user IDs are kept as strings
// because that is how they are stored and shown.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Moderation state of a resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResourceStatus {
    /// Submitted, waiting for staff review
    Pending,
    /// Approved and visible in searches
    Active,
    /// Declined or removed by staff
    Deleted,
}

impl ResourceStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ResourceStatus::Pending => "pending",
            ResourceStatus::Active => "active",
            ResourceStatus::Deleted => "deleted",
        }
    }
}

impl fmt::Display for ResourceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ResourceStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(ResourceStatus::Pending),
            "active" => Ok(ResourceStatus::Active),
            "deleted" => Ok(ResourceStatus::Deleted),
            other => Err(format!("unknown resource status: {}", other)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Resource {
    pub id: String,
    pub title: String,
    pub tag: String,
    pub url: String,
    pub description: Option<String>,
    /// User ID of the submitter
    pub author: String,
    /// Unix seconds
    pub created_at: i64,
    pub staff_action_at: Option<i64>,
    pub staff_action_by: Option<String>,
    pub status: ResourceStatus,
}

/// One user's review of one resource.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Review {
    pub resource_id: String,
    pub reviewer: String,
    /// Always within 1..=5
    pub rating: u8,
    pub comment: String,
    pub created_at: i64,
}

/// A user submission before it gets an ID.
#[derive(Debug, Clone)]
pub struct NewResource {
    pub title: String,
    pub tag: String,
    pub url: String,
    pub description: String,
    pub author: String,
}

/// A staff edit to a single field.
#[derive(Debug, Clone, PartialEq)]
pub enum ResourceEdit {
    Title(String),
    Tag(String),
    /// `None` clears the description
    Description(Option<String>),
    Url(String),
    Author(String),
}

impl ResourceEdit {
    pub fn column(&self) -> &'static str {
        match self {
            ResourceEdit::Title(_) => "title",
            ResourceEdit::Tag(_) => "tag",
            ResourceEdit::Description(_) => "description",
            ResourceEdit::Url(_) => "url",
            ResourceEdit::Author(_) => "author",
        }
    }

    pub fn value(&self) -> Option<&str> {
        match self {
            ResourceEdit::Title(v)
            | ResourceEdit::Tag(v)
            | ResourceEdit::Url(v)
            | ResourceEdit::Author(v) => Some(v),
            ResourceEdit::Description(v) => v.as_deref(),
        }
    }
}

/// Fields that can be checked for duplicates among active resources.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DuplicateField {
    Url,
    Title,
    Tag,
    Author,
}

impl DuplicateField {
    pub fn column(&self) -> &'static str {
        match self {
            DuplicateField::Url => "url",
            DuplicateField::Title => "title",
            DuplicateField::Tag => "tag",
            DuplicateField::Author => "author",
        }
    }
}

/// An autocomplete entry: display name and the resource ID it stands for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceChoice {
    pub name: String,
    pub value: String,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AverageRating {
    Unrated,
    Rated(f64),
}

impl fmt::Display for AverageRating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AverageRating::Unrated => write!(f, "Unrated"),
            AverageRating::Rated(avg) => write!(f, "{:.1}/5", avg),
        }
    }
}

/// Per-user numbers shown by the stats context menu.
#[derive(Debug, Clone, PartialEq)]
pub struct ContributorStats {
    pub active_resources: u64,
    pub total_resources: u64,
    /// Average rating of reviews on this user's resources
    pub average_rating: Option<f64>,
    pub reviews_written: u64,
}

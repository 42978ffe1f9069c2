// Resource catalog service - submissions, moderation, reviews and search.
//
// NO Discord dependencies here. Handlers pass plain strings in and format
// whatever comes back.

use super::resource_models::{
    AverageRating, ContributorStats, DuplicateField, NewResource, Resource, ResourceChoice,
    ResourceEdit, ResourceStatus, Review,
};
use async_trait::async_trait;
use chrono::Utc;
use rand::Rng;
use std::collections::HashSet;
use thiserror::Error;

/// Autocomplete lists are capped by the platform.
pub const MAX_CHOICES: usize = 25;
/// Tag value meaning "no tag filter".
pub const ALL_TAGS: &str = "ALL";
/// Jaro-Winkler floor for a title to count as a fuzzy match.
const MIN_TITLE_SIMILARITY: f64 = 0.8;

const ID_LETTERS: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ";
const ID_DIGITS: &[u8] = b"0123456789";

// ============================================================================
// ERRORS
// ============================================================================

#[derive(Debug, Error)]
pub enum ResourceError {
    #[error("Resource {0} not found")]
    NotFound(String),

    #[error("You have already reviewed this resource")]
    AlreadyReviewed,

    #[error("Storage error: {0}")]
    Storage(String),
}

// ============================================================================
// STORAGE TRAIT (PORT)
// ============================================================================

/// Persistence for resources and their reviews.
#[async_trait]
pub trait ResourceStore: Send + Sync {
    async fn get_resource(&self, id: &str) -> Result<Option<Resource>, ResourceError>;

    async fn insert_resource(&self, resource: &Resource) -> Result<(), ResourceError>;

    /// Every ID ever issued, regardless of status.
    async fn resource_ids(&self) -> Result<Vec<String>, ResourceError>;

    /// `(title, id)` pairs of active resources, optionally filtered by tag.
    async fn active_choices(&self, tag: Option<&str>) -> Result<Vec<ResourceChoice>, ResourceError>;

    /// Change status and stamp the staff action.
    async fn set_status(
        &self,
        id: &str,
        status: ResourceStatus,
        actor: &str,
        at: i64,
    ) -> Result<(), ResourceError>;

    /// Apply a single-field edit and stamp the staff action.
    async fn apply_edit(
        &self,
        id: &str,
        edit: &ResourceEdit,
        actor: &str,
        at: i64,
    ) -> Result<(), ResourceError>;

    async fn insert_review(&self, review: &Review) -> Result<(), ResourceError>;

    async fn has_review(&self, resource_id: &str, reviewer: &str) -> Result<bool, ResourceError>;

    async fn ratings_for_resource(&self, resource_id: &str) -> Result<Vec<u8>, ResourceError>;

    /// Ratings on every resource authored by `author`.
    async fn ratings_for_author(&self, author: &str) -> Result<Vec<u8>, ResourceError>;

    /// Resources by `author`, optionally only those with `status`.
    async fn count_by_author(
        &self,
        author: &str,
        status: Option<ResourceStatus>,
    ) -> Result<u64, ResourceError>;

    async fn review_count_by(&self, reviewer: &str) -> Result<u64, ResourceError>;

    /// ID of an active resource whose `field` equals `value`.
    async fn find_active_by(
        &self,
        field: DuplicateField,
        value: &str,
    ) -> Result<Option<String>, ResourceError>;
}

// ============================================================================
// CORE SERVICE
// ============================================================================

pub struct ResourceService<S: ResourceStore> {
    store: S,
}

impl<S: ResourceStore> ResourceService<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub async fn get_resource(&self, id: &str) -> Result<Option<Resource>, ResourceError> {
        self.store.get_resource(id).await
    }

    async fn require(&self, id: &str) -> Result<Resource, ResourceError> {
        self.store
            .get_resource(id)
            .await?
            .ok_or_else(|| ResourceError::NotFound(id.to_string()))
    }

    /// Autocomplete choices for active resources.
    ///
    /// An exact (case-insensitive) ID match comes first, then titles that
    /// fuzzy-match `search`. An empty search lists everything.
    pub async fn serve_resources(
        &self,
        tag: &str,
        search: &str,
    ) -> Result<Vec<ResourceChoice>, ResourceError> {
        let tag = (tag != ALL_TAGS && !tag.is_empty()).then_some(tag);
        let resources = self.store.active_choices(tag).await?;
        let results = rank_choices(resources, search);

        tracing::debug!(
            tag = tag.unwrap_or(ALL_TAGS),
            search,
            results = results.len(),
            "Served resource choices"
        );
        Ok(results)
    }

    pub async fn average_rating(&self, id: &str) -> Result<AverageRating, ResourceError> {
        let ratings = self.store.ratings_for_resource(id).await?;
        Ok(average(&ratings).map_or(AverageRating::Unrated, AverageRating::Rated))
    }

    pub async fn has_rated(&self, id: &str, reviewer: &str) -> Result<bool, ResourceError> {
        self.store.has_review(id, reviewer).await
    }

    /// Store a review. The rating is clamped to 1..=5 and the stored value returned.
    pub async fn rate_resource(
        &self,
        id: &str,
        reviewer: &str,
        rating: i64,
        comment: &str,
    ) -> Result<u8, ResourceError> {
        self.require(id).await?;
        if self.store.has_review(id, reviewer).await? {
            return Err(ResourceError::AlreadyReviewed);
        }

        let rating = clamp_rating(rating);
        self.store
            .insert_review(&Review {
                resource_id: id.to_string(),
                reviewer: reviewer.to_string(),
                rating,
                comment: comment.to_string(),
                created_at: Utc::now().timestamp(),
            })
            .await?;

        tracing::info!(resource = id, reviewer, rating, "Resource rated");
        Ok(rating)
    }

    pub async fn approve_resource(&self, id: &str, actor: &str) -> Result<(), ResourceError> {
        self.transition(id, ResourceStatus::Active, actor).await
    }

    pub async fn decline_resource(&self, id: &str, actor: &str) -> Result<(), ResourceError> {
        self.transition(id, ResourceStatus::Deleted, actor).await
    }

    pub async fn delete_resource(&self, id: &str, actor: &str) -> Result<(), ResourceError> {
        self.transition(id, ResourceStatus::Deleted, actor).await?;
        tracing::info!(resource = id, actor, "Resource marked as deleted");
        Ok(())
    }

    async fn transition(
        &self,
        id: &str,
        status: ResourceStatus,
        actor: &str,
    ) -> Result<(), ResourceError> {
        self.require(id).await?;
        self.store
            .set_status(id, status, actor, Utc::now().timestamp())
            .await
    }

    /// Apply a staff edit. A description of "none" clears it.
    pub async fn edit_resource(
        &self,
        id: &str,
        edit: ResourceEdit,
        actor: &str,
    ) -> Result<(), ResourceError> {
        self.require(id).await?;

        let edit = match edit {
            ResourceEdit::Description(Some(text)) if text.eq_ignore_ascii_case("none") => {
                ResourceEdit::Description(None)
            }
            other => other,
        };

        self.store
            .apply_edit(id, &edit, actor, Utc::now().timestamp())
            .await?;
        tracing::info!(resource = id, field = edit.column(), actor, "Resource updated");
        Ok(())
    }

    pub async fn contributor_stats(&self, user: &str) -> Result<ContributorStats, ResourceError> {
        let active_resources = self
            .store
            .count_by_author(user, Some(ResourceStatus::Active))
            .await?;
        let total_resources = self.store.count_by_author(user, None).await?;
        let ratings = self.store.ratings_for_author(user).await?;
        let reviews_written = self.store.review_count_by(user).await?;

        Ok(ContributorStats {
            active_resources,
            total_resources,
            average_rating: average(&ratings),
            reviews_written,
        })
    }

    /// Store a submission as pending and return its new ID.
    pub async fn submit_resource(&self, submission: NewResource) -> Result<String, ResourceError> {
        let id = self.generate_resource_id().await?;
        let description = Some(submission.description).filter(|d| !d.is_empty());

        self.store
            .insert_resource(&Resource {
                id: id.clone(),
                title: submission.title,
                tag: submission.tag,
                url: submission.url,
                description,
                author: submission.author,
                created_at: Utc::now().timestamp(),
                staff_action_at: None,
                staff_action_by: None,
                status: ResourceStatus::Pending,
            })
            .await?;

        tracing::info!(resource = %id, "Resource submitted for review");
        Ok(id)
    }

    /// A fresh `AA000`-style ID not used by any record.
    pub async fn generate_resource_id(&self) -> Result<String, ResourceError> {
        let existing: HashSet<String> = self.store.resource_ids().await?.into_iter().collect();
        Ok(unique_resource_id(&mut rand::thread_rng(), &existing))
    }

    /// ID of an active resource that already uses `value` for `field`.
    pub async fn check_duplicate(
        &self,
        field: DuplicateField,
        value: &str,
    ) -> Result<Option<String>, ResourceError> {
        self.store.find_active_by(field, value).await
    }
}

// ============================================================================
// HELPERS
// ============================================================================

pub fn clamp_rating(rating: i64) -> u8 {
    rating.clamp(1, 5) as u8
}

fn average(ratings: &[u8]) -> Option<f64> {
    if ratings.is_empty() {
        return None;
    }
    let total: u64 = ratings.iter().map(|&r| r as u64).sum();
    Some(total as f64 / ratings.len() as f64)
}

fn random_resource_id<R: Rng>(rng: &mut R) -> String {
    let letter = |rng: &mut R| ID_LETTERS[rng.gen_range(0..ID_LETTERS.len())] as char;
    let digit = |rng: &mut R| ID_DIGITS[rng.gen_range(0..ID_DIGITS.len())] as char;

    let mut id = String::with_capacity(5);
    id.push(letter(rng));
    id.push(letter(rng));
    for _ in 0..3 {
        id.push(digit(rng));
    }
    id
}

fn unique_resource_id<R: Rng>(rng: &mut R, existing: &HashSet<String>) -> String {
    loop {
        let id = random_resource_id(rng);
        if !existing.contains(&id) {
            return id;
        }
    }
}

/// Similarity in `0.0..=1.0`, or `None` when the title is too far off.
///
/// A title containing the query scores a full match; otherwise the query is
/// compared with the whole title and with each of its words.
fn title_score(title: &str, query: &str) -> Option<f64> {
    let title = title.to_lowercase();
    let query = query.to_lowercase();

    if title.contains(&query) {
        return Some(1.0);
    }

    let best = title
        .split_whitespace()
        .chain(std::iter::once(title.as_str()))
        .map(|word| strsim::jaro_winkler(&query, word))
        .fold(0.0, f64::max);

    (best >= MIN_TITLE_SIMILARITY).then_some(best)
}

fn rank_choices(mut resources: Vec<ResourceChoice>, search: &str) -> Vec<ResourceChoice> {
    if search.is_empty() {
        resources.truncate(MAX_CHOICES);
        return resources;
    }

    let mut results = Vec::new();
    if let Some(pos) = resources
        .iter()
        .position(|r| r.value.eq_ignore_ascii_case(search))
    {
        results.push(resources.remove(pos));
    }

    let mut scored: Vec<(f64, ResourceChoice)> = resources
        .into_iter()
        .filter_map(|r| title_score(&r.name, search).map(|score| (score, r)))
        .collect();
    // Stable, so equal scores keep the store's title order
    scored.sort_by(|(a, _), (b, _)| b.total_cmp(a));

    results.extend(scored.into_iter().map(|(_, r)| r));
    results.truncate(MAX_CHOICES);
    results
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::sync::Mutex;

    #[derive(Default)]
    struct MockResourceStore {
        resources: Mutex<Vec<Resource>>,
        reviews: Mutex<Vec<Review>>,
    }

    #[async_trait]
    impl ResourceStore for MockResourceStore {
        async fn get_resource(&self, id: &str) -> Result<Option<Resource>, ResourceError> {
            Ok(self
                .resources
                .lock()
                .unwrap()
                .iter()
                .find(|r| r.id == id)
                .cloned())
        }

        async fn insert_resource(&self, resource: &Resource) -> Result<(), ResourceError> {
            self.resources.lock().unwrap().push(resource.clone());
            Ok(())
        }

        async fn resource_ids(&self) -> Result<Vec<String>, ResourceError> {
            Ok(self
                .resources
                .lock()
                .unwrap()
                .iter()
                .map(|r| r.id.clone())
                .collect())
        }

        async fn active_choices(
            &self,
            tag: Option<&str>,
        ) -> Result<Vec<ResourceChoice>, ResourceError> {
            Ok(self
                .resources
                .lock()
                .unwrap()
                .iter()
                .filter(|r| r.status == ResourceStatus::Active)
                .filter(|r| tag.map_or(true, |t| r.tag == t))
                .map(|r| ResourceChoice {
                    name: r.title.clone(),
                    value: r.id.clone(),
                })
                .collect())
        }

        async fn set_status(
            &self,
            id: &str,
            status: ResourceStatus,
            actor: &str,
            at: i64,
        ) -> Result<(), ResourceError> {
            let mut resources = self.resources.lock().unwrap();
            let resource = resources
                .iter_mut()
                .find(|r| r.id == id)
                .ok_or_else(|| ResourceError::NotFound(id.to_string()))?;
            resource.status = status;
            resource.staff_action_by = Some(actor.to_string());
            resource.staff_action_at = Some(at);
            Ok(())
        }

        async fn apply_edit(
            &self,
            id: &str,
            edit: &ResourceEdit,
            actor: &str,
            at: i64,
        ) -> Result<(), ResourceError> {
            let mut resources = self.resources.lock().unwrap();
            let resource = resources
                .iter_mut()
                .find(|r| r.id == id)
                .ok_or_else(|| ResourceError::NotFound(id.to_string()))?;
            match edit {
                ResourceEdit::Title(v) => resource.title = v.clone(),
                ResourceEdit::Tag(v) => resource.tag = v.clone(),
                ResourceEdit::Description(v) => resource.description = v.clone(),
                ResourceEdit::Url(v) => resource.url = v.clone(),
                ResourceEdit::Author(v) => resource.author = v.clone(),
            }
            resource.staff_action_by = Some(actor.to_string());
            resource.staff_action_at = Some(at);
            Ok(())
        }

        async fn insert_review(&self, review: &Review) -> Result<(), ResourceError> {
            self.reviews.lock().unwrap().push(review.clone());
            Ok(())
        }

        async fn has_review(
            &self,
            resource_id: &str,
            reviewer: &str,
        ) -> Result<bool, ResourceError> {
            Ok(self
                .reviews
                .lock()
                .unwrap()
                .iter()
                .any(|r| r.resource_id == resource_id && r.reviewer == reviewer))
        }

        async fn ratings_for_resource(&self, resource_id: &str) -> Result<Vec<u8>, ResourceError> {
            Ok(self
                .reviews
                .lock()
                .unwrap()
                .iter()
                .filter(|r| r.resource_id == resource_id)
                .map(|r| r.rating)
                .collect())
        }

        async fn ratings_for_author(&self, author: &str) -> Result<Vec<u8>, ResourceError> {
            let owned: Vec<String> = self
                .resources
                .lock()
                .unwrap()
                .iter()
                .filter(|r| r.author == author)
                .map(|r| r.id.clone())
                .collect();
            Ok(self
                .reviews
                .lock()
                .unwrap()
                .iter()
                .filter(|r| owned.contains(&r.resource_id))
                .map(|r| r.rating)
                .collect())
        }

        async fn count_by_author(
            &self,
            author: &str,
            status: Option<ResourceStatus>,
        ) -> Result<u64, ResourceError> {
            Ok(self
                .resources
                .lock()
                .unwrap()
                .iter()
                .filter(|r| r.author == author)
                .filter(|r| status.map_or(true, |s| r.status == s))
                .count() as u64)
        }

        async fn review_count_by(&self, reviewer: &str) -> Result<u64, ResourceError> {
            Ok(self
                .reviews
                .lock()
                .unwrap()
                .iter()
                .filter(|r| r.reviewer == reviewer)
                .count() as u64)
        }

        async fn find_active_by(
            &self,
            field: DuplicateField,
            value: &str,
        ) -> Result<Option<String>, ResourceError> {
            Ok(self
                .resources
                .lock()
                .unwrap()
                .iter()
                .filter(|r| r.status == ResourceStatus::Active)
                .find(|r| match field {
                    DuplicateField::Url => r.url == value,
                    DuplicateField::Title => r.title == value,
                    DuplicateField::Tag => r.tag == value,
                    DuplicateField::Author => r.author == value,
                })
                .map(|r| r.id.clone()))
        }
    }

    fn submission(title: &str, url: &str) -> NewResource {
        NewResource {
            title: title.to_string(),
            tag: "guide".to_string(),
            url: url.to_string(),
            description: String::new(),
            author: "100".to_string(),
        }
    }

    async fn active(service: &ResourceService<MockResourceStore>, title: &str) -> String {
        let id = service
            .submit_resource(submission(title, &format!("https://example.com/{}", title)))
            .await
            .unwrap();
        service.approve_resource(&id, "staff").await.unwrap();
        id
    }

    #[tokio::test]
    async fn test_submission_is_pending_with_valid_id() {
        let service = ResourceService::new(MockResourceStore::default());
        let id = service
            .submit_resource(submission("Borrow checker", "https://a.dev"))
            .await
            .unwrap();

        assert_eq!(id.len(), 5);
        assert!(id[..2].chars().all(|c| c.is_ascii_uppercase()));
        assert!(id[2..].chars().all(|c| c.is_ascii_digit()));

        let stored = service.get_resource(&id).await.unwrap().unwrap();
        assert_eq!(stored.status, ResourceStatus::Pending);
        assert_eq!(stored.description, None);
        assert!(stored.staff_action_by.is_none());
    }

    #[tokio::test]
    async fn test_rating_is_clamped() {
        let service = ResourceService::new(MockResourceStore::default());
        let id = active(&service, "Lifetimes").await;

        assert_eq!(service.rate_resource(&id, "u1", 9, "great").await.unwrap(), 5);
        assert_eq!(service.rate_resource(&id, "u2", -3, "bad").await.unwrap(), 1);

        let ratings = service.store.ratings_for_resource(&id).await.unwrap();
        assert_eq!(ratings, vec![5, 1]);
        assert_eq!(
            service.average_rating(&id).await.unwrap(),
            AverageRating::Rated(3.0)
        );
    }

    #[tokio::test]
    async fn test_rating_twice_or_missing_resource_fails() {
        let service = ResourceService::new(MockResourceStore::default());
        let id = active(&service, "Traits").await;

        service.rate_resource(&id, "u1", 4, "").await.unwrap();
        assert!(service.has_rated(&id, "u1").await.unwrap());
        assert!(matches!(
            service.rate_resource(&id, "u1", 2, "").await,
            Err(ResourceError::AlreadyReviewed)
        ));
        assert!(matches!(
            service.rate_resource("ZZ999", "u1", 2, "").await,
            Err(ResourceError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_unrated_resource() {
        let service = ResourceService::new(MockResourceStore::default());
        let id = active(&service, "Macros").await;

        assert_eq!(
            service.average_rating(&id).await.unwrap(),
            AverageRating::Unrated
        );
    }

    #[tokio::test]
    async fn test_delete_stamps_staff_action() {
        let service = ResourceService::new(MockResourceStore::default());
        let id = active(&service, "Async").await;

        service.delete_resource(&id, "mod42").await.unwrap();

        let stored = service.get_resource(&id).await.unwrap().unwrap();
        assert_eq!(stored.status, ResourceStatus::Deleted);
        assert_eq!(stored.staff_action_by.as_deref(), Some("mod42"));
        assert!(stored.staff_action_at.is_some());
        assert!(matches!(
            service.delete_resource("QQ000", "mod42").await,
            Err(ResourceError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_description_none_clears_field() {
        let service = ResourceService::new(MockResourceStore::default());
        let id = active(&service, "Closures").await;

        service
            .edit_resource(&id, ResourceEdit::Description(Some("Short intro".into())), "m")
            .await
            .unwrap();
        assert_eq!(
            service.get_resource(&id).await.unwrap().unwrap().description.as_deref(),
            Some("Short intro")
        );

        service
            .edit_resource(&id, ResourceEdit::Description(Some("NONE".into())), "m")
            .await
            .unwrap();
        assert_eq!(
            service.get_resource(&id).await.unwrap().unwrap().description,
            None
        );
    }

    #[tokio::test]
    async fn test_duplicates_only_consider_active_resources() {
        let service = ResourceService::new(MockResourceStore::default());
        let pending = service
            .submit_resource(submission("Pending", "https://dup.dev"))
            .await
            .unwrap();

        assert_eq!(
            service
                .check_duplicate(DuplicateField::Url, "https://dup.dev")
                .await
                .unwrap(),
            None
        );

        service.approve_resource(&pending, "staff").await.unwrap();
        assert_eq!(
            service
                .check_duplicate(DuplicateField::Url, "https://dup.dev")
                .await
                .unwrap(),
            Some(pending)
        );
    }

    #[tokio::test]
    async fn test_contributor_stats() {
        let service = ResourceService::new(MockResourceStore::default());
        let first = active(&service, "One").await;
        let _second = active(&service, "Two").await;
        service
            .submit_resource(submission("Three", "https://three.dev"))
            .await
            .unwrap();

        service.rate_resource(&first, "200", 4, "").await.unwrap();
        service.rate_resource(&first, "300", 2, "").await.unwrap();

        let stats = service.contributor_stats("100").await.unwrap();
        assert_eq!(stats.active_resources, 2);
        assert_eq!(stats.total_resources, 3);
        assert_eq!(stats.average_rating, Some(3.0));
        assert_eq!(stats.reviews_written, 0);

        let reviewer = service.contributor_stats("200").await.unwrap();
        assert_eq!(reviewer.reviews_written, 1);
        assert_eq!(reviewer.average_rating, None);
    }

    #[tokio::test]
    async fn test_serve_resources_puts_id_match_first() {
        let service = ResourceService::new(MockResourceStore::default());
        let rust_book = active(&service, "The Rust Book").await;
        let _rustlings = active(&service, "Rustlings").await;
        let _hidden = service
            .submit_resource(submission("Rust pending", "https://p.dev"))
            .await
            .unwrap();

        let all = service.serve_resources(ALL_TAGS, "").await.unwrap();
        assert_eq!(all.len(), 2);

        let by_id = service
            .serve_resources(ALL_TAGS, &rust_book.to_lowercase())
            .await
            .unwrap();
        assert_eq!(by_id[0].value, rust_book);

        let by_title = service.serve_resources(ALL_TAGS, "rustl").await.unwrap();
        let names: Vec<&str> = by_title.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["Rustlings", "The Rust Book"]);

        let other_tag = service.serve_resources("video", "").await.unwrap();
        assert!(other_tag.is_empty());
    }

    #[test]
    fn test_title_score() {
        assert_eq!(title_score("Rust Book", "rust"), Some(1.0));
        // Typo in one word still matches, below a substring hit
        let typo = title_score("Rust Book", "bokk").unwrap();
        assert!(typo >= MIN_TITLE_SIMILARITY && typo < 1.0);
        assert_eq!(title_score("Rust Book", "xyz"), None);
    }

    #[test]
    fn test_rank_choices_orders_by_similarity() {
        let choices = vec![
            ResourceChoice {
                name: "Async Book".to_string(),
                value: "AA001".to_string(),
            },
            ResourceChoice {
                name: "Tokio Tutorial".to_string(),
                value: "AA002".to_string(),
            },
            ResourceChoice {
                name: "Rustonomicon".to_string(),
                value: "AA003".to_string(),
            },
        ];

        let ranked = rank_choices(choices.clone(), "tokyo");
        assert_eq!(ranked[0].value, "AA002");
        assert!(ranked.iter().all(|r| r.value != "AA003"));

        let by_id = rank_choices(choices, "aa003");
        assert_eq!(by_id[0].value, "AA003");
    }

    #[test]
    fn test_rank_choices_caps_results() {
        let many: Vec<ResourceChoice> = (0..40)
            .map(|i| ResourceChoice {
                name: format!("Guide {}", i),
                value: format!("AA{:03}", i),
            })
            .collect();

        assert_eq!(rank_choices(many.clone(), "").len(), MAX_CHOICES);
        assert_eq!(rank_choices(many, "guide").len(), MAX_CHOICES);
    }

    #[test]
    fn test_generated_ids_avoid_existing() {
        let first = random_resource_id(&mut StdRng::seed_from_u64(7));
        let existing: HashSet<String> = [first.clone()].into_iter().collect();

        // Same seed would produce `first` again; it must be skipped
        let second = unique_resource_id(&mut StdRng::seed_from_u64(7), &existing);
        assert_ne!(first, second);
        assert_eq!(second.len(), 5);
    }

    #[test]
    fn test_clamp_rating() {
        assert_eq!(clamp_rating(9), 5);
        assert_eq!(clamp_rating(-3), 1);
        assert_eq!(clamp_rating(3), 3);
    }
}

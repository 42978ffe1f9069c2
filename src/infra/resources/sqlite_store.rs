use crate::core::resources::{
    DuplicateField, Resource, ResourceChoice, ResourceEdit, ResourceError, ResourceStatus,
    ResourceStore, Review,
};
use async_trait::async_trait;
use sqlx::sqlite::{SqlitePoolOptions, SqliteRow};
use sqlx::{Pool, Row, Sqlite};
use std::path::Path;

const RESOURCE_COLUMNS: &str = "id, title, tag, url, description, author, created_at, \
                                staff_action_at, staff_action_by, status";

fn storage(e: sqlx::Error) -> ResourceError {
    ResourceError::Storage(e.to_string())
}

pub struct SqliteResourceStore {
    pool: Pool<Sqlite>,
}

impl SqliteResourceStore {
    /// Open (creating if needed) the database at `database_path` and migrate it.
    pub async fn new(database_path: &str) -> anyhow::Result<Self> {
        if let Some(parent) = Path::new(database_path).parent() {
            std::fs::create_dir_all(parent)?;
        }

        let pool = SqlitePoolOptions::new()
            .connect(&format!("sqlite://{}?mode=rwc", database_path))
            .await?;

        let store = Self::from_pool(pool);
        store.migrate().await?;
        Ok(store)
    }

    pub fn from_pool(pool: Pool<Sqlite>) -> Self {
        Self { pool }
    }

    pub async fn migrate(&self) -> anyhow::Result<()> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS resources (
                id TEXT PRIMARY KEY,
                title TEXT NOT NULL,
                tag TEXT NOT NULL,
                url TEXT NOT NULL,
                description TEXT,
                author TEXT NOT NULL,
                created_at INTEGER NOT NULL,
                staff_action_at INTEGER,
                staff_action_by TEXT,
                status TEXT NOT NULL DEFAULT 'pending'
            );
            "#,
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS reviews (
                resource_id TEXT NOT NULL,
                reviewer TEXT NOT NULL,
                rating INTEGER NOT NULL,
                comment TEXT NOT NULL DEFAULT '',
                created_at INTEGER NOT NULL,
                PRIMARY KEY (resource_id, reviewer)
            );
            "#,
        )
        .execute(&self.pool)
        .await?;

        sqlx::query("CREATE INDEX IF NOT EXISTS idx_resources_status ON resources (status)")
            .execute(&self.pool)
            .await?;

        Ok(())
    }
}

fn row_to_resource(row: &SqliteRow) -> Result<Resource, ResourceError> {
    let status: String = row.get("status");
    Ok(Resource {
        id: row.get("id"),
        title: row.get("title"),
        tag: row.get("tag"),
        url: row.get("url"),
        description: row.get("description"),
        author: row.get("author"),
        created_at: row.get("created_at"),
        staff_action_at: row.get("staff_action_at"),
        staff_action_by: row.get("staff_action_by"),
        status: status.parse::<ResourceStatus>().map_err(ResourceError::Storage)?,
    })
}

#[async_trait]
impl ResourceStore for SqliteResourceStore {
    async fn get_resource(&self, id: &str) -> Result<Option<Resource>, ResourceError> {
        let row = sqlx::query(&format!(
            "SELECT {} FROM resources WHERE id = ?",
            RESOURCE_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(storage)?;

        row.as_ref().map(row_to_resource).transpose()
    }

    async fn insert_resource(&self, resource: &Resource) -> Result<(), ResourceError> {
        sqlx::query(&format!(
            "INSERT INTO resources ({}) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?)",
            RESOURCE_COLUMNS
        ))
        .bind(&resource.id)
        .bind(&resource.title)
        .bind(&resource.tag)
        .bind(&resource.url)
        .bind(&resource.description)
        .bind(&resource.author)
        .bind(resource.created_at)
        .bind(resource.staff_action_at)
        .bind(&resource.staff_action_by)
        .bind(resource.status.as_str())
        .execute(&self.pool)
        .await
        .map_err(storage)?;
        Ok(())
    }

    async fn resource_ids(&self) -> Result<Vec<String>, ResourceError> {
        let rows = sqlx::query("SELECT id FROM resources")
            .fetch_all(&self.pool)
            .await
            .map_err(storage)?;
        Ok(rows.iter().map(|row| row.get("id")).collect())
    }

    async fn active_choices(
        &self,
        tag: Option<&str>,
    ) -> Result<Vec<ResourceChoice>, ResourceError> {
        let rows = sqlx::query(
            r#"
            SELECT id, title FROM resources
            WHERE status = 'active' AND (?1 IS NULL OR tag = ?1)
            ORDER BY title
            "#,
        )
        .bind(tag)
        .fetch_all(&self.pool)
        .await
        .map_err(storage)?;

        Ok(rows
            .iter()
            .map(|row| ResourceChoice {
                name: row.get("title"),
                value: row.get("id"),
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
        let result = sqlx::query(
            "UPDATE resources SET status = ?, staff_action_by = ?, staff_action_at = ? WHERE id = ?",
        )
        .bind(status.as_str())
        .bind(actor)
        .bind(at)
        .bind(id)
        .execute(&self.pool)
        .await
        .map_err(storage)?;

        if result.rows_affected() == 0 {
            return Err(ResourceError::NotFound(id.to_string()));
        }
        Ok(())
    }

    async fn apply_edit(
        &self,
        id: &str,
        edit: &ResourceEdit,
        actor: &str,
        at: i64,
    ) -> Result<(), ResourceError> {
        // Column names come from a closed enum, never from user input
        let result = sqlx::query(&format!(
            "UPDATE resources SET {} = ?, staff_action_by = ?, staff_action_at = ? WHERE id = ?",
            edit.column()
        ))
        .bind(edit.value())
        .bind(actor)
        .bind(at)
        .bind(id)
        .execute(&self.pool)
        .await
        .map_err(storage)?;

        if result.rows_affected() == 0 {
            return Err(ResourceError::NotFound(id.to_string()));
        }
        Ok(())
    }

    async fn insert_review(&self, review: &Review) -> Result<(), ResourceError> {
        sqlx::query(
            r#"
            INSERT INTO reviews (resource_id, reviewer, rating, comment, created_at)
            VALUES (?, ?, ?, ?, ?)
            "#,
        )
        .bind(&review.resource_id)
        .bind(&review.reviewer)
        .bind(review.rating as i64)
        .bind(&review.comment)
        .bind(review.created_at)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            let duplicate = e
                .as_database_error()
                .map_or(false, |db| db.is_unique_violation());
            if duplicate {
                ResourceError::AlreadyReviewed
            } else {
                storage(e)
            }
        })?;
        Ok(())
    }

    async fn has_review(&self, resource_id: &str, reviewer: &str) -> Result<bool, ResourceError> {
        let row = sqlx::query("SELECT 1 FROM reviews WHERE resource_id = ? AND reviewer = ?")
            .bind(resource_id)
            .bind(reviewer)
            .fetch_optional(&self.pool)
            .await
            .map_err(storage)?;
        Ok(row.is_some())
    }

    async fn ratings_for_resource(&self, resource_id: &str) -> Result<Vec<u8>, ResourceError> {
        let rows = sqlx::query("SELECT rating FROM reviews WHERE resource_id = ?")
            .bind(resource_id)
            .fetch_all(&self.pool)
            .await
            .map_err(storage)?;
        Ok(rows
            .iter()
            .map(|row| row.get::<i64, _>("rating") as u8)
            .collect())
    }

    async fn ratings_for_author(&self, author: &str) -> Result<Vec<u8>, ResourceError> {
        let rows = sqlx::query(
            r#"
            SELECT rv.rating FROM reviews rv
            JOIN resources r ON r.id = rv.resource_id
            WHERE r.author = ?
            "#,
        )
        .bind(author)
        .fetch_all(&self.pool)
        .await
        .map_err(storage)?;
        Ok(rows
            .iter()
            .map(|row| row.get::<i64, _>("rating") as u8)
            .collect())
    }

    async fn count_by_author(
        &self,
        author: &str,
        status: Option<ResourceStatus>,
    ) -> Result<u64, ResourceError> {
        let row = sqlx::query(
            "SELECT COUNT(*) AS n FROM resources WHERE author = ?1 AND (?2 IS NULL OR status = ?2)",
        )
        .bind(author)
        .bind(status.map(|s| s.as_str()))
        .fetch_one(&self.pool)
        .await
        .map_err(storage)?;
        Ok(row.get::<i64, _>("n") as u64)
    }

    async fn review_count_by(&self, reviewer: &str) -> Result<u64, ResourceError> {
        let row = sqlx::query("SELECT COUNT(*) AS n FROM reviews WHERE reviewer = ?")
            .bind(reviewer)
            .fetch_one(&self.pool)
            .await
            .map_err(storage)?;
        Ok(row.get::<i64, _>("n") as u64)
    }

    async fn find_active_by(
        &self,
        field: DuplicateField,
        value: &str,
    ) -> Result<Option<String>, ResourceError> {
        let row = sqlx::query(&format!(
            "SELECT id FROM resources WHERE status = 'active' AND {} = ? LIMIT 1",
            field.column()
        ))
        .bind(value)
        .fetch_optional(&self.pool)
        .await
        .map_err(storage)?;
        Ok(row.map(|row| row.get("id")))
    }
}

use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;

use crate::common::CategoryId;

/// Category in the classifieds taxonomy. `parent_id` is NULL for top-level
/// categories.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Category {
    pub id: CategoryId,
    pub name: String,
    pub slug: String,
    pub parent_id: Option<CategoryId>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

impl Category {
    /// Find a category by ID
    pub async fn find_by_id(id: CategoryId, pool: &PgPool) -> Result<Option<Self>> {
        let category = sqlx::query_as::<_, Self>("SELECT * FROM categories WHERE id = $1")
            .bind(id)
            .fetch_optional(pool)
            .await?;
        Ok(category)
    }

    /// Check that a category exists and is active
    pub async fn exists_active(id: CategoryId, pool: &PgPool) -> Result<bool> {
        let exists = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM categories WHERE id = $1 AND is_active)",
        )
        .bind(id)
        .fetch_one(pool)
        .await?;
        Ok(exists)
    }

    /// All active categories, ordered by name
    pub async fn find_active(pool: &PgPool) -> Result<Vec<Self>> {
        let categories =
            sqlx::query_as::<_, Self>("SELECT * FROM categories WHERE is_active ORDER BY name ASC")
                .fetch_all(pool)
                .await?;
        Ok(categories)
    }

    /// Children of a category, ordered by name
    pub async fn find_children(parent_id: CategoryId, pool: &PgPool) -> Result<Vec<Self>> {
        let categories = sqlx::query_as::<_, Self>(
            "SELECT * FROM categories WHERE parent_id = $1 AND is_active ORDER BY name ASC",
        )
        .bind(parent_id)
        .fetch_all(pool)
        .await?;
        Ok(categories)
    }
}

use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;

use crate::common::RegionId;

/// Top-level location a listing is posted under
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Region {
    pub id: RegionId,
    pub name: String,
    pub slug: String,
    pub created_at: DateTime<Utc>,
}

impl Region {
    /// Find a region by ID
    pub async fn find_by_id(id: RegionId, pool: &PgPool) -> Result<Option<Self>> {
        let region = sqlx::query_as::<_, Self>("SELECT * FROM regions WHERE id = $1")
            .bind(id)
            .fetch_optional(pool)
            .await?;
        Ok(region)
    }

    /// All regions, ordered by name
    pub async fn find_all(pool: &PgPool) -> Result<Vec<Self>> {
        let regions = sqlx::query_as::<_, Self>("SELECT * FROM regions ORDER BY name ASC")
            .fetch_all(pool)
            .await?;
        Ok(regions)
    }
}

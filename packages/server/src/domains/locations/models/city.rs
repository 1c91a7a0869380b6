use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;

use crate::common::{CityId, RegionId};

/// City within a region. `region_id` is the parent used by the
/// city-belongs-to-region check on every listing write.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct City {
    pub id: CityId,
    pub region_id: RegionId,
    pub name: String,
    pub slug: String,
    pub created_at: DateTime<Utc>,
}

impl City {
    /// Find a city by ID
    pub async fn find_by_id(id: CityId, pool: &PgPool) -> Result<Option<Self>> {
        let city = sqlx::query_as::<_, Self>("SELECT * FROM cities WHERE id = $1")
            .bind(id)
            .fetch_optional(pool)
            .await?;
        Ok(city)
    }

    /// Cities of a region, ordered by name
    pub async fn find_by_region(region_id: RegionId, pool: &PgPool) -> Result<Vec<Self>> {
        let cities =
            sqlx::query_as::<_, Self>("SELECT * FROM cities WHERE region_id = $1 ORDER BY name ASC")
                .bind(region_id)
                .fetch_all(pool)
                .await?;
        Ok(cities)
    }
}

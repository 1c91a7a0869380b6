use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::{PgConnection, PgPool};

use crate::common::{CategoryId, CityId, ListingId, MemberId, RegionId};
use crate::domains::listings::machines::LifecycleStamps;

/// Listing - a for-sale item post owned by a member
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Listing {
    pub id: ListingId,
    pub owner_id: MemberId,

    // Content
    pub title: String,
    pub description: String,

    // Reference data
    pub category_id: CategoryId,
    pub region_id: RegionId,
    pub city_id: CityId,

    // Pricing
    pub price_amount: Option<Decimal>,
    pub currency: String, // 'NAD', 'ZAR'
    pub is_negotiable: bool,

    // Lifecycle
    pub status: String, // 'draft', 'active', 'sold', 'archived'
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub published_at: Option<DateTime<Utc>>,
    pub sold_at: Option<DateTime<Utc>>,
    pub archived_at: Option<DateTime<Utc>>,
}

// =============================================================================
// Enums for type-safe edges
// =============================================================================

/// Listing status enum
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ListingStatus {
    Draft,
    Active,
    Sold,
    Archived,
}

impl std::fmt::Display for ListingStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ListingStatus::Draft => write!(f, "draft"),
            ListingStatus::Active => write!(f, "active"),
            ListingStatus::Sold => write!(f, "sold"),
            ListingStatus::Archived => write!(f, "archived"),
        }
    }
}

impl std::str::FromStr for ListingStatus {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> anyhow::Result<Self> {
        match s {
            "draft" => Ok(ListingStatus::Draft),
            "active" => Ok(ListingStatus::Active),
            "sold" => Ok(ListingStatus::Sold),
            "archived" => Ok(ListingStatus::Archived),
            _ => Err(anyhow::anyhow!("Invalid listing status: {}", s)),
        }
    }
}

/// Currency enum
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum ListingCurrency {
    Nad,
    Zar,
}

impl std::fmt::Display for ListingCurrency {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ListingCurrency::Nad => write!(f, "NAD"),
            ListingCurrency::Zar => write!(f, "ZAR"),
        }
    }
}

impl std::str::FromStr for ListingCurrency {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> anyhow::Result<Self> {
        match s {
            "NAD" => Ok(ListingCurrency::Nad),
            "ZAR" => Ok(ListingCurrency::Zar),
            _ => Err(anyhow::anyhow!("Invalid currency: {}", s)),
        }
    }
}

// =============================================================================
// SQL Queries - ALL queries must be in models/
// =============================================================================

impl Listing {
    /// Find listing by ID
    pub async fn find_by_id(id: ListingId, pool: &PgPool) -> Result<Option<Self>, sqlx::Error> {
        sqlx::query_as::<_, Listing>("SELECT * FROM listings WHERE id = $1")
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find listing by ID, taking the row lock.
    ///
    /// Every listing write goes through this inside a transaction so that
    /// concurrent writers on the same listing are serialized and the
    /// read-previous-status step cannot race.
    pub async fn find_by_id_for_update(
        id: ListingId,
        conn: &mut PgConnection,
    ) -> Result<Option<Self>, sqlx::Error> {
        sqlx::query_as::<_, Listing>("SELECT * FROM listings WHERE id = $1 FOR UPDATE")
            .bind(id)
            .fetch_optional(&mut *conn)
            .await
    }

    /// Find listings with optional filters, newest first
    #[allow(clippy::too_many_arguments)]
    pub async fn find_filtered(
        status: &str,
        category_id: Option<CategoryId>,
        region_id: Option<RegionId>,
        city_id: Option<CityId>,
        limit: i64,
        offset: i64,
        pool: &PgPool,
    ) -> Result<Vec<Self>, sqlx::Error> {
        sqlx::query_as::<_, Listing>(
            r#"
            SELECT * FROM listings
            WHERE status = $1
              AND ($2::uuid IS NULL OR category_id = $2)
              AND ($3::uuid IS NULL OR region_id = $3)
              AND ($4::uuid IS NULL OR city_id = $4)
            ORDER BY created_at DESC
            LIMIT $5 OFFSET $6
            "#,
        )
        .bind(status)
        .bind(category_id)
        .bind(region_id)
        .bind(city_id)
        .bind(limit)
        .bind(offset)
        .fetch_all(pool)
        .await
    }

    /// Find listings owned by a member, newest first
    pub async fn find_by_owner(
        owner_id: MemberId,
        pool: &PgPool,
    ) -> Result<Vec<Self>, sqlx::Error> {
        sqlx::query_as::<_, Listing>(
            "SELECT * FROM listings WHERE owner_id = $1 ORDER BY created_at DESC",
        )
        .bind(owner_id)
        .fetch_all(pool)
        .await
    }

    /// Create a new listing (status and stamps already decided by the caller)
    #[allow(clippy::too_many_arguments)]
    pub async fn create(
        owner_id: MemberId,
        title: String,
        description: String,
        category_id: CategoryId,
        region_id: RegionId,
        city_id: CityId,
        price_amount: Option<Decimal>,
        currency: String,
        is_negotiable: bool,
        status: String,
        stamps: LifecycleStamps,
        pool: &PgPool,
    ) -> Result<Self, sqlx::Error> {
        sqlx::query_as::<_, Listing>(
            r#"
            INSERT INTO listings (
                id,
                owner_id,
                title,
                description,
                category_id,
                region_id,
                city_id,
                price_amount,
                currency,
                is_negotiable,
                status,
                published_at,
                sold_at,
                archived_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14)
            RETURNING *
            "#,
        )
        .bind(ListingId::new())
        .bind(owner_id)
        .bind(title)
        .bind(description)
        .bind(category_id)
        .bind(region_id)
        .bind(city_id)
        .bind(price_amount)
        .bind(currency)
        .bind(is_negotiable)
        .bind(status)
        .bind(stamps.published_at)
        .bind(stamps.sold_at)
        .bind(stamps.archived_at)
        .fetch_one(pool)
        .await
    }

    /// Persist a fully-merged update. Runs inside the caller's transaction;
    /// `updated_at` is refreshed on every write.
    #[allow(clippy::too_many_arguments)]
    pub async fn update(
        id: ListingId,
        title: String,
        description: String,
        category_id: CategoryId,
        region_id: RegionId,
        city_id: CityId,
        price_amount: Option<Decimal>,
        currency: String,
        is_negotiable: bool,
        status: String,
        stamps: LifecycleStamps,
        conn: &mut PgConnection,
    ) -> Result<Self, sqlx::Error> {
        sqlx::query_as::<_, Listing>(
            r#"
            UPDATE listings
            SET
                title = $2,
                description = $3,
                category_id = $4,
                region_id = $5,
                city_id = $6,
                price_amount = $7,
                currency = $8,
                is_negotiable = $9,
                status = $10,
                published_at = $11,
                sold_at = $12,
                archived_at = $13,
                updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(title)
        .bind(description)
        .bind(category_id)
        .bind(region_id)
        .bind(city_id)
        .bind(price_amount)
        .bind(currency)
        .bind(is_negotiable)
        .bind(status)
        .bind(stamps.published_at)
        .bind(stamps.sold_at)
        .bind(stamps.archived_at)
        .fetch_one(&mut *conn)
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_status_roundtrip() {
        for status in [
            ListingStatus::Draft,
            ListingStatus::Active,
            ListingStatus::Sold,
            ListingStatus::Archived,
        ] {
            let parsed = ListingStatus::from_str(&status.to_string()).unwrap();
            assert_eq!(parsed, status);
        }
    }

    #[test]
    fn test_unknown_status_rejected() {
        assert!(ListingStatus::from_str("pending").is_err());
    }

    #[test]
    fn test_currency_roundtrip() {
        for currency in [ListingCurrency::Nad, ListingCurrency::Zar] {
            let parsed = ListingCurrency::from_str(&currency.to_string()).unwrap();
            assert_eq!(parsed, currency);
        }
    }
}

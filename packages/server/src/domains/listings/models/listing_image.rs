use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{PgConnection, PgPool};

use crate::common::{ListingId, ListingImageId};

/// ListingImage - a gallery image belonging to exactly one listing.
/// Bytes live in external storage; only the URL is kept here.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct ListingImage {
    pub id: ListingImageId,
    pub listing_id: ListingId,
    pub image_url: String,
    pub sort_order: i32,
    pub is_primary: bool,
    pub created_at: DateTime<Utc>,
}

// =============================================================================
// SQL Queries - ALL queries must be in models/
// =============================================================================

impl ListingImage {
    /// Find image by ID
    pub async fn find_by_id(
        id: ListingImageId,
        conn: &mut PgConnection,
    ) -> Result<Option<Self>, sqlx::Error> {
        sqlx::query_as::<_, ListingImage>("SELECT * FROM listing_images WHERE id = $1")
            .bind(id)
            .fetch_optional(&mut *conn)
            .await
    }

    /// Images of a listing in display order: sort_order ascending, ties
    /// broken by id ascending (v7 ids, so ties land in creation order).
    pub async fn find_by_listing(
        listing_id: ListingId,
        pool: &PgPool,
    ) -> Result<Vec<Self>, sqlx::Error> {
        sqlx::query_as::<_, ListingImage>(
            "SELECT * FROM listing_images WHERE listing_id = $1 ORDER BY sort_order ASC, id ASC",
        )
        .bind(listing_id)
        .fetch_all(pool)
        .await
    }

    /// Insert an image. Runs inside the caller's transaction; the caller has
    /// already cleared any existing primary when `is_primary` is set.
    pub async fn create(
        listing_id: ListingId,
        image_url: String,
        sort_order: i32,
        is_primary: bool,
        conn: &mut PgConnection,
    ) -> Result<Self, sqlx::Error> {
        sqlx::query_as::<_, ListingImage>(
            r#"
            INSERT INTO listing_images (id, listing_id, image_url, sort_order, is_primary)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING *
            "#,
        )
        .bind(ListingImageId::new())
        .bind(listing_id)
        .bind(image_url)
        .bind(sort_order)
        .bind(is_primary)
        .fetch_one(&mut *conn)
        .await
    }

    /// Clear the primary flag on every image of a listing
    pub async fn clear_primary(
        listing_id: ListingId,
        conn: &mut PgConnection,
    ) -> Result<u64, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE listing_images SET is_primary = FALSE WHERE listing_id = $1 AND is_primary",
        )
        .bind(listing_id)
        .execute(&mut *conn)
        .await?;
        Ok(result.rows_affected())
    }

    /// Make one image the primary and every other image of the listing
    /// non-primary, in a single statement so no intermediate state with two
    /// primaries (or none observable mid-flight) can be seen.
    pub async fn promote_primary(
        listing_id: ListingId,
        image_id: ListingImageId,
        conn: &mut PgConnection,
    ) -> Result<u64, sqlx::Error> {
        let result =
            sqlx::query("UPDATE listing_images SET is_primary = (id = $2) WHERE listing_id = $1")
                .bind(listing_id)
                .bind(image_id)
                .execute(&mut *conn)
                .await?;
        Ok(result.rows_affected())
    }

    /// Delete an image. Runs inside the caller's transaction.
    pub async fn delete(id: ListingImageId, conn: &mut PgConnection) -> Result<u64, sqlx::Error> {
        let result = sqlx::query("DELETE FROM listing_images WHERE id = $1")
            .bind(id)
            .execute(&mut *conn)
            .await?;
        Ok(result.rows_affected())
    }
}

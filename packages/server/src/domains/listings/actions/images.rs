//! Image actions: attach, detach and choose the primary image.
//!
//! The listing row lock serializes image writes per listing, the primary
//! flip is a single statement, and the partial unique index backs the
//! at-most-one-primary invariant against anything that slips through.

use sqlx::PgPool;
use tracing::info;

use crate::common::auth::{Actor, Capability};
use crate::common::{ListingId, ListingImageId, MemberId};
use crate::domains::listings::data::AddListingImageInput;
use crate::domains::listings::error::ListingError;
use crate::domains::listings::models::listing::Listing;
use crate::domains::listings::models::listing_image::ListingImage;

/// Attach an image to a listing (owner or admin).
pub async fn add_listing_image(
    input: AddListingImageInput,
    requested_by: MemberId,
    is_admin: bool,
    pool: &PgPool,
) -> Result<ListingImage, ListingError> {
    let listing_id = ListingId::from_uuid(input.listing_id);

    let mut tx = pool.begin().await?;

    let listing = Listing::find_by_id_for_update(listing_id, &mut tx)
        .await?
        .ok_or(ListingError::NotFound("listing"))?;

    Actor::new(requested_by, is_admin)
        .can(Capability::ManageListingImages)
        .of_owner(listing.owner_id)
        .check()?;

    let is_primary = input.is_primary.unwrap_or(false);
    if is_primary {
        ListingImage::clear_primary(listing_id, &mut tx).await?;
    }

    let image = ListingImage::create(
        listing_id,
        input.image_url,
        input.sort_order.unwrap_or(0),
        is_primary,
        &mut tx,
    )
    .await?;

    tx.commit().await?;

    info!(listing_id = %listing_id, image_id = %image.id, "Listing image added");
    Ok(image)
}

/// Remove an image from its listing (owner or admin).
pub async fn remove_listing_image(
    image_id: ListingImageId,
    requested_by: MemberId,
    is_admin: bool,
    pool: &PgPool,
) -> Result<(), ListingError> {
    let mut tx = pool.begin().await?;

    let image = ListingImage::find_by_id(image_id, &mut tx)
        .await?
        .ok_or(ListingError::NotFound("listing image"))?;

    let listing = Listing::find_by_id_for_update(image.listing_id, &mut tx)
        .await?
        .ok_or(ListingError::NotFound("listing"))?;

    Actor::new(requested_by, is_admin)
        .can(Capability::ManageListingImages)
        .of_owner(listing.owner_id)
        .check()?;

    ListingImage::delete(image_id, &mut tx).await?;

    tx.commit().await?;

    info!(listing_id = %listing.id, image_id = %image_id, "Listing image removed");
    Ok(())
}

/// Make one image the listing's primary, clearing every other (owner or
/// admin). Fails with NotFound if the image does not belong to the listing.
pub async fn set_primary_image(
    listing_id: ListingId,
    image_id: ListingImageId,
    requested_by: MemberId,
    is_admin: bool,
    pool: &PgPool,
) -> Result<(), ListingError> {
    let mut tx = pool.begin().await?;

    let listing = Listing::find_by_id_for_update(listing_id, &mut tx)
        .await?
        .ok_or(ListingError::NotFound("listing"))?;

    Actor::new(requested_by, is_admin)
        .can(Capability::ManageListingImages)
        .of_owner(listing.owner_id)
        .check()?;

    let image = ListingImage::find_by_id(image_id, &mut tx)
        .await?
        .ok_or(ListingError::NotFound("listing image"))?;
    if image.listing_id != listing_id {
        return Err(ListingError::NotFound("listing image"));
    }

    ListingImage::promote_primary(listing_id, image_id, &mut tx).await?;

    tx.commit().await?;

    info!(listing_id = %listing_id, image_id = %image_id, "Primary image set");
    Ok(())
}

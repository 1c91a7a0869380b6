//! Create/update actions for listings.
//!
//! Every write follows the same shape: read the previous row under its row
//! lock, run the pure transition check and business rules on the merged
//! state, compute lifecycle stamps, then persist - all inside one
//! transaction so a rejected write persists nothing.

use chrono::Utc;
use rust_decimal::Decimal;
use sqlx::PgPool;
use tracing::info;

use crate::common::auth::{Actor, Capability};
use crate::common::{CategoryId, CityId, ListingId, MemberId, RegionId};
use crate::domains::catalog::models::Category;
use crate::domains::listings::data::{CreateListingInput, UpdateListingInput};
use crate::domains::listings::error::ListingError;
use crate::domains::listings::machines::{self, LifecycleStamps};
use crate::domains::listings::models::listing::{Listing, ListingCurrency, ListingStatus};
use crate::domains::listings::rules;
use crate::domains::locations::models::{City, Region};

/// Convert a GraphQL float into a price decimal
fn parse_price(value: f64) -> Result<Decimal, ListingError> {
    Decimal::from_f64_retain(value)
        .ok_or_else(|| ListingError::Internal(anyhow::anyhow!("price_amount is not representable")))
}

/// Resolve and verify the reference data a listing points at, returning the
/// city's parent region for the referential check. Never cached: region and
/// city assignment can change between requests.
async fn resolve_references(
    category_id: CategoryId,
    region_id: RegionId,
    city_id: CityId,
    pool: &PgPool,
) -> Result<City, ListingError> {
    if !Category::exists_active(category_id, pool).await? {
        return Err(ListingError::NotFound("category"));
    }
    if Region::find_by_id(region_id, pool).await?.is_none() {
        return Err(ListingError::NotFound("region"));
    }
    City::find_by_id(city_id, pool)
        .await?
        .ok_or(ListingError::NotFound("city"))
}

/// Create a listing owned by the caller.
///
/// A new listing is implicitly draft: it may be created in draft or a direct
/// successor of draft, and gets its lifecycle stamps assigned as if it had
/// just transitioned there.
pub async fn create_listing(
    input: CreateListingInput,
    owner_id: MemberId,
    pool: &PgPool,
) -> Result<Listing, ListingError> {
    info!(owner_id = %owner_id, title = %input.title, "Creating listing");

    let status = input
        .status
        .map(ListingStatus::from)
        .unwrap_or(ListingStatus::Draft);
    machines::check_transition(None, status)?;

    let category_id = CategoryId::from_uuid(input.category_id);
    let region_id = RegionId::from_uuid(input.region_id);
    let city_id = CityId::from_uuid(input.city_id);
    let city = resolve_references(category_id, region_id, city_id, pool).await?;

    let price_amount = input.price_amount.map(parse_price).transpose()?;

    rules::validate_listing(status, price_amount, region_id, city_id, city.region_id)
        .map_err(ListingError::Validation)?;

    let stamps =
        machines::assign_lifecycle_stamps(None, status, LifecycleStamps::default(), Utc::now());
    let currency = input
        .currency
        .map(ListingCurrency::from)
        .unwrap_or(ListingCurrency::Nad);

    let listing = Listing::create(
        owner_id,
        input.title,
        input.description.unwrap_or_default(),
        category_id,
        region_id,
        city_id,
        price_amount,
        currency.to_string(),
        input.is_negotiable.unwrap_or(false),
        status.to_string(),
        stamps,
        pool,
    )
    .await?;

    info!(listing_id = %listing.id, status = %listing.status, "Listing created");
    Ok(listing)
}

/// Update a listing (owner or admin).
///
/// Reads the current row under its lock, merges the input over it, and only
/// persists once the transition check and every business rule have passed.
pub async fn update_listing(
    listing_id: ListingId,
    input: UpdateListingInput,
    requested_by: MemberId,
    is_admin: bool,
    pool: &PgPool,
) -> Result<Listing, ListingError> {
    let mut tx = pool.begin().await?;

    let current = Listing::find_by_id_for_update(listing_id, &mut tx)
        .await?
        .ok_or(ListingError::NotFound("listing"))?;

    Actor::new(requested_by, is_admin)
        .can(Capability::ManageListing)
        .of_owner(current.owner_id)
        .check()?;

    let previous: ListingStatus = current.status.parse()?;
    let next = input.status.map(ListingStatus::from).unwrap_or(previous);
    machines::check_transition(Some(previous), next)?;

    // Merge the input over the persisted row; owner is immutable.
    let category_id = input
        .category_id
        .map(CategoryId::from_uuid)
        .unwrap_or(current.category_id);
    let region_id = input
        .region_id
        .map(RegionId::from_uuid)
        .unwrap_or(current.region_id);
    let city_id = input
        .city_id
        .map(CityId::from_uuid)
        .unwrap_or(current.city_id);
    let city = resolve_references(category_id, region_id, city_id, pool).await?;

    let price_amount = if input.clear_price.unwrap_or(false) {
        None
    } else {
        match input.price_amount {
            Some(value) => Some(parse_price(value)?),
            None => current.price_amount,
        }
    };

    rules::validate_listing(next, price_amount, region_id, city_id, city.region_id)
        .map_err(ListingError::Validation)?;

    let stamps = machines::assign_lifecycle_stamps(
        Some(previous),
        next,
        LifecycleStamps {
            published_at: current.published_at,
            sold_at: current.sold_at,
            archived_at: current.archived_at,
        },
        Utc::now(),
    );

    let currency = match input.currency {
        Some(currency) => ListingCurrency::from(currency).to_string(),
        None => current.currency.clone(),
    };

    let updated = Listing::update(
        listing_id,
        input.title.unwrap_or(current.title),
        input.description.unwrap_or(current.description),
        category_id,
        region_id,
        city_id,
        price_amount,
        currency,
        input.is_negotiable.unwrap_or(current.is_negotiable),
        next.to_string(),
        stamps,
        &mut tx,
    )
    .await?;

    tx.commit().await?;

    info!(
        listing_id = %updated.id,
        from = %previous,
        to = %next,
        "Listing updated"
    );
    Ok(updated)
}

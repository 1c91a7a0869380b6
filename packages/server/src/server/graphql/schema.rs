//! GraphQL schema definition.

use super::context::GraphQLContext;
use juniper::{EmptySubscription, FieldError, FieldResult, RootNode, Value};
use tracing::error;
use uuid::Uuid;

// Common types
use crate::common::{CategoryId, CityId, ListingId, ListingImageId, RegionId};

// Domain actions
use crate::domains::listings::actions as listing_actions;

// Domain data types (GraphQL types)
use crate::domains::catalog::data::CategoryData;
use crate::domains::listings::data::{
    AddListingImageInput, CreateListingInput, ListingData, ListingImageData, ListingStatusData,
    UpdateListingInput,
};
use crate::domains::listings::error::ListingError;
use crate::domains::listings::models::listing::ListingStatus;
use crate::domains::locations::data::{CityData, RegionData};

// Domain models (for queries)
use crate::domains::catalog::models::Category;
use crate::domains::listings::models::listing::Listing;
use crate::domains::listings::models::listing_image::ListingImage;
use crate::domains::locations::models::{City, Region};

// =============================================================================
// Helper functions
// =============================================================================

/// Map a classified listing error to a FieldError with a stable `code`
/// extension (plus per-field `violations` for aggregated rule failures).
fn to_field_error(e: ListingError) -> FieldError {
    let mut extensions = juniper::Object::with_capacity(2);
    extensions.add_field("code", Value::scalar(e.code().to_string()));

    if let ListingError::Validation(violations) = &e {
        let entries: Vec<Value> = violations
            .as_slice()
            .iter()
            .map(|violation| {
                let mut entry = juniper::Object::with_capacity(3);
                entry.add_field("code", Value::scalar(violation.code().to_string()));
                entry.add_field("field", Value::scalar(violation.field().to_string()));
                entry.add_field("message", Value::scalar(violation.to_string()));
                Value::Object(entry)
            })
            .collect();
        extensions.add_field("violations", Value::list(entries));
    }

    if matches!(e, ListingError::Database(_) | ListingError::Internal(_)) {
        error!(error = %e, "Listing operation failed");
    }

    FieldError::new(e.to_string(), Value::Object(extensions))
}

/// Convert anyhow::Error to juniper FieldError for thin resolvers
fn anyhow_to_field_error(e: anyhow::Error) -> FieldError {
    FieldError::new(e.to_string(), juniper::Value::null())
}

pub struct Query;

#[juniper::graphql_object(context = GraphQLContext)]
impl Query {
    // =========================================================================
    // Listing Queries
    // =========================================================================

    /// Get a single listing by ID
    async fn listing(ctx: &GraphQLContext, id: Uuid) -> FieldResult<Option<ListingData>> {
        let listing_id = ListingId::from_uuid(id);
        let listing = Listing::find_by_id(listing_id, &ctx.db_pool).await?;
        Ok(listing.map(ListingData::from))
    }

    /// Get listings with optional filters (defaults to active listings)
    async fn listings(
        ctx: &GraphQLContext,
        status: Option<ListingStatusData>,
        category_id: Option<Uuid>,
        region_id: Option<Uuid>,
        city_id: Option<Uuid>,
        limit: Option<i32>,
        offset: Option<i32>,
    ) -> FieldResult<Vec<ListingData>> {
        let status_filter = status
            .map(ListingStatus::from)
            .unwrap_or(ListingStatus::Active)
            .to_string();
        let limit = i64::from(limit.unwrap_or(50).clamp(1, 100));
        let offset = i64::from(offset.unwrap_or(0).max(0));

        let listings = Listing::find_filtered(
            &status_filter,
            category_id.map(CategoryId::from_uuid),
            region_id.map(RegionId::from_uuid),
            city_id.map(CityId::from_uuid),
            limit,
            offset,
            &ctx.db_pool,
        )
        .await?;

        Ok(listings.into_iter().map(ListingData::from).collect())
    }

    /// Get the authenticated caller's own listings, any status
    async fn my_listings(ctx: &GraphQLContext) -> FieldResult<Vec<ListingData>> {
        let user = ctx.require_auth()?;
        let listings = Listing::find_by_owner(user.member_id, &ctx.db_pool).await?;
        Ok(listings.into_iter().map(ListingData::from).collect())
    }

    /// Get a listing's images in display order
    async fn listing_images(
        ctx: &GraphQLContext,
        listing_id: Uuid,
    ) -> FieldResult<Vec<ListingImageData>> {
        let listing_id = ListingId::from_uuid(listing_id);
        let images = ListingImage::find_by_listing(listing_id, &ctx.db_pool).await?;
        Ok(images.into_iter().map(ListingImageData::from).collect())
    }

    // =========================================================================
    // Reference Data Queries
    // =========================================================================

    /// Get all active categories
    async fn categories(ctx: &GraphQLContext) -> FieldResult<Vec<CategoryData>> {
        let categories = Category::find_active(&ctx.db_pool)
            .await
            .map_err(anyhow_to_field_error)?;
        Ok(categories.into_iter().map(CategoryData::from).collect())
    }

    /// Get a single category by ID
    async fn category(ctx: &GraphQLContext, id: Uuid) -> FieldResult<Option<CategoryData>> {
        let category_id = CategoryId::from_uuid(id);
        let category = Category::find_by_id(category_id, &ctx.db_pool)
            .await
            .map_err(anyhow_to_field_error)?;
        Ok(category.map(CategoryData::from))
    }

    /// Get the children of a category
    async fn category_children(
        ctx: &GraphQLContext,
        parent_id: Uuid,
    ) -> FieldResult<Vec<CategoryData>> {
        let parent_id = CategoryId::from_uuid(parent_id);
        let categories = Category::find_children(parent_id, &ctx.db_pool)
            .await
            .map_err(anyhow_to_field_error)?;
        Ok(categories.into_iter().map(CategoryData::from).collect())
    }

    /// Get all regions
    async fn regions(ctx: &GraphQLContext) -> FieldResult<Vec<RegionData>> {
        let regions = Region::find_all(&ctx.db_pool)
            .await
            .map_err(anyhow_to_field_error)?;
        Ok(regions.into_iter().map(RegionData::from).collect())
    }

    /// Get the cities of a region
    async fn cities(ctx: &GraphQLContext, region_id: Uuid) -> FieldResult<Vec<CityData>> {
        let region_id = RegionId::from_uuid(region_id);
        let cities = City::find_by_region(region_id, &ctx.db_pool)
            .await
            .map_err(anyhow_to_field_error)?;
        Ok(cities.into_iter().map(CityData::from).collect())
    }
}

pub struct Mutation;

#[juniper::graphql_object(context = GraphQLContext)]
impl Mutation {
    // =========================================================================
    // Listing Mutations
    // =========================================================================

    /// Create a listing owned by the caller
    async fn create_listing(
        ctx: &GraphQLContext,
        input: CreateListingInput,
    ) -> FieldResult<ListingData> {
        let user = ctx.require_auth()?;

        let listing = listing_actions::create_listing(input, user.member_id, &ctx.db_pool)
            .await
            .map_err(to_field_error)?;

        Ok(ListingData::from(listing))
    }

    /// Update a listing, including status changes (owner or admin)
    async fn update_listing(
        ctx: &GraphQLContext,
        id: Uuid,
        input: UpdateListingInput,
    ) -> FieldResult<ListingData> {
        let user = ctx.require_auth()?;

        let listing = listing_actions::update_listing(
            ListingId::from_uuid(id),
            input,
            user.member_id,
            user.is_admin,
            &ctx.db_pool,
        )
        .await
        .map_err(to_field_error)?;

        Ok(ListingData::from(listing))
    }

    // =========================================================================
    // Listing Image Mutations
    // =========================================================================

    /// Attach an image to a listing (owner or admin)
    async fn add_listing_image(
        ctx: &GraphQLContext,
        input: AddListingImageInput,
    ) -> FieldResult<ListingImageData> {
        let user = ctx.require_auth()?;

        let image =
            listing_actions::add_listing_image(input, user.member_id, user.is_admin, &ctx.db_pool)
                .await
                .map_err(to_field_error)?;

        Ok(ListingImageData::from(image))
    }

    /// Remove an image from its listing (owner or admin)
    async fn remove_listing_image(ctx: &GraphQLContext, id: Uuid) -> FieldResult<bool> {
        let user = ctx.require_auth()?;

        listing_actions::remove_listing_image(
            ListingImageId::from_uuid(id),
            user.member_id,
            user.is_admin,
            &ctx.db_pool,
        )
        .await
        .map_err(to_field_error)?;

        Ok(true)
    }

    /// Make an image the listing's primary, clearing any other (owner or admin)
    async fn set_primary_image(
        ctx: &GraphQLContext,
        listing_id: Uuid,
        image_id: Uuid,
    ) -> FieldResult<bool> {
        let user = ctx.require_auth()?;

        listing_actions::set_primary_image(
            ListingId::from_uuid(listing_id),
            ListingImageId::from_uuid(image_id),
            user.member_id,
            user.is_admin,
            &ctx.db_pool,
        )
        .await
        .map_err(to_field_error)?;

        Ok(true)
    }
}

/// The GraphQL schema type
pub type Schema = RootNode<'static, Query, Mutation, EmptySubscription<GraphQLContext>>;

/// Create the schema singleton
pub fn create_schema() -> Schema {
    Schema::new(Query, Mutation, EmptySubscription::new())
}

use chrono::{DateTime, Utc};
use juniper::{GraphQLEnum, GraphQLInputObject, GraphQLObject};
use rust_decimal::prelude::ToPrimitive;
use uuid::Uuid;

use crate::common::ListingId;
use crate::domains::listings::models::listing::{Listing, ListingCurrency, ListingStatus};
use crate::domains::listings::models::listing_image::ListingImage;
use crate::server::graphql::context::GraphQLContext;

/// GraphQL type for a listing
#[derive(Debug, Clone)]
pub struct ListingData {
    pub id: Uuid,
    pub owner_id: Uuid,
    pub title: String,
    pub description: String,
    pub category_id: Uuid,
    pub region_id: Uuid,
    pub city_id: Uuid,
    pub price_amount: Option<f64>,
    pub currency: CurrencyData,
    pub is_negotiable: bool,
    pub status: ListingStatusData,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub published_at: Option<DateTime<Utc>>,
    pub sold_at: Option<DateTime<Utc>>,
    pub archived_at: Option<DateTime<Utc>>,
}

#[juniper::graphql_object(Context = GraphQLContext)]
impl ListingData {
    fn id(&self) -> Uuid {
        self.id
    }
    fn owner_id(&self) -> Uuid {
        self.owner_id
    }
    fn title(&self) -> &str {
        &self.title
    }
    fn description(&self) -> &str {
        &self.description
    }
    fn category_id(&self) -> Uuid {
        self.category_id
    }
    fn region_id(&self) -> Uuid {
        self.region_id
    }
    fn city_id(&self) -> Uuid {
        self.city_id
    }
    fn price_amount(&self) -> Option<f64> {
        self.price_amount
    }
    fn currency(&self) -> CurrencyData {
        self.currency
    }
    fn is_negotiable(&self) -> bool {
        self.is_negotiable
    }
    fn status(&self) -> ListingStatusData {
        self.status
    }
    fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
    fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }
    fn published_at(&self) -> Option<DateTime<Utc>> {
        self.published_at
    }
    fn sold_at(&self) -> Option<DateTime<Utc>> {
        self.sold_at
    }
    fn archived_at(&self) -> Option<DateTime<Utc>> {
        self.archived_at
    }

    /// Images of this listing in display order
    async fn images(&self, context: &GraphQLContext) -> juniper::FieldResult<Vec<ListingImageData>> {
        let listing_id = ListingId::from_uuid(self.id);
        let images = ListingImage::find_by_listing(listing_id, &context.db_pool).await?;
        Ok(images.into_iter().map(ListingImageData::from).collect())
    }
}

impl From<Listing> for ListingData {
    fn from(listing: Listing) -> Self {
        Self {
            id: listing.id.into_uuid(),
            owner_id: listing.owner_id.into_uuid(),
            title: listing.title,
            description: listing.description,
            category_id: listing.category_id.into_uuid(),
            region_id: listing.region_id.into_uuid(),
            city_id: listing.city_id.into_uuid(),
            price_amount: listing.price_amount.and_then(|amount| amount.to_f64()),
            currency: match listing.currency.as_str() {
                "ZAR" => CurrencyData::Zar,
                _ => CurrencyData::Nad, // default fallback
            },
            is_negotiable: listing.is_negotiable,
            status: match listing.status.as_str() {
                "active" => ListingStatusData::Active,
                "sold" => ListingStatusData::Sold,
                "archived" => ListingStatusData::Archived,
                _ => ListingStatusData::Draft, // default fallback
            },
            created_at: listing.created_at,
            updated_at: listing.updated_at,
            published_at: listing.published_at,
            sold_at: listing.sold_at,
            archived_at: listing.archived_at,
        }
    }
}

/// GraphQL type for a listing image
#[derive(Debug, Clone, GraphQLObject)]
pub struct ListingImageData {
    pub id: Uuid,
    pub listing_id: Uuid,
    pub image_url: String,
    pub sort_order: i32,
    pub is_primary: bool,
    pub created_at: DateTime<Utc>,
}

impl From<ListingImage> for ListingImageData {
    fn from(image: ListingImage) -> Self {
        Self {
            id: image.id.into_uuid(),
            listing_id: image.listing_id.into_uuid(),
            image_url: image.image_url,
            sort_order: image.sort_order,
            is_primary: image.is_primary,
            created_at: image.created_at,
        }
    }
}

/// Listing status for GraphQL
#[derive(Debug, Clone, Copy, GraphQLEnum)]
pub enum ListingStatusData {
    Draft,
    Active,
    Sold,
    Archived,
}

impl From<ListingStatusData> for ListingStatus {
    fn from(status: ListingStatusData) -> Self {
        match status {
            ListingStatusData::Draft => ListingStatus::Draft,
            ListingStatusData::Active => ListingStatus::Active,
            ListingStatusData::Sold => ListingStatus::Sold,
            ListingStatusData::Archived => ListingStatus::Archived,
        }
    }
}

/// Currency for GraphQL
#[derive(Debug, Clone, Copy, GraphQLEnum)]
pub enum CurrencyData {
    Nad,
    Zar,
}

impl From<CurrencyData> for ListingCurrency {
    fn from(currency: CurrencyData) -> Self {
        match currency {
            CurrencyData::Nad => ListingCurrency::Nad,
            CurrencyData::Zar => ListingCurrency::Zar,
        }
    }
}

/// Input for creating a listing
#[derive(Debug, Clone, GraphQLInputObject)]
pub struct CreateListingInput {
    pub title: String,
    pub description: Option<String>,
    pub category_id: Uuid,
    pub region_id: Uuid,
    pub city_id: Uuid,
    pub price_amount: Option<f64>,
    pub currency: Option<CurrencyData>,
    pub is_negotiable: Option<bool>,
    /// Defaults to draft; active and archived are also accepted (one hop
    /// from draft), sold is not
    pub status: Option<ListingStatusData>,
}

/// Input for updating a listing. Absent fields are left unchanged.
#[derive(Debug, Clone, GraphQLInputObject)]
pub struct UpdateListingInput {
    pub title: Option<String>,
    pub description: Option<String>,
    pub category_id: Option<Uuid>,
    pub region_id: Option<Uuid>,
    pub city_id: Option<Uuid>,
    pub price_amount: Option<f64>,
    /// Explicitly remove the price (absent price_amount means "keep")
    pub clear_price: Option<bool>,
    pub currency: Option<CurrencyData>,
    pub is_negotiable: Option<bool>,
    pub status: Option<ListingStatusData>,
}

/// Input for attaching an image to a listing
#[derive(Debug, Clone, GraphQLInputObject)]
pub struct AddListingImageInput {
    pub listing_id: Uuid,
    pub image_url: String,
    pub sort_order: Option<i32>,
    pub is_primary: Option<bool>,
}

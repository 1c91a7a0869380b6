// Listings domain - the marketplace core.
//
// machines/ holds the pure status machine, rules.rs the collect-all business
// rules, models/ every SQL query, actions/ the transactional entry points
// called from GraphQL, data/ the GraphQL types.

pub mod actions;
pub mod data;
pub mod error;
pub mod machines;
pub mod models;
pub mod rules;

// Re-export data types (GraphQL types)
pub use data::types::{
    AddListingImageInput, CreateListingInput, CurrencyData, ListingData, ListingImageData,
    ListingStatusData, UpdateListingInput,
};

// Re-export the classified error
pub use error::ListingError;

// Re-export models (domain models)
pub use models::listing::{Listing, ListingCurrency, ListingStatus};
pub use models::listing_image::ListingImage;

pub mod listing;
pub mod listing_image;

pub use listing::{Listing, ListingCurrency, ListingStatus};
pub use listing_image::ListingImage;

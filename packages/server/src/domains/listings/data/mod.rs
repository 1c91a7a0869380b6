pub mod types;

pub use types::{
    AddListingImageInput, CreateListingInput, CurrencyData, ListingData, ListingImageData,
    ListingStatusData, UpdateListingInput,
};

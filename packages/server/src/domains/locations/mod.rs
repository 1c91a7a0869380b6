// Locations domain - region/city reference data.
//
// Read-only for the API: rows are seeded operationally. Listing writes
// re-resolve these rows on every request; nothing here is cached.

pub mod data;
pub mod models;

pub use data::{CityData, RegionData};
pub use models::{City, Region};

pub mod types;

pub use types::{CityData, RegionData};

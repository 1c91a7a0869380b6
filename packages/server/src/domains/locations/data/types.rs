use juniper::GraphQLObject;
use uuid::Uuid;

use crate::domains::locations::models::{City, Region};

/// GraphQL type for a region
#[derive(Debug, Clone, GraphQLObject)]
pub struct RegionData {
    pub id: Uuid,
    pub name: String,
    pub slug: String,
}

impl From<Region> for RegionData {
    fn from(region: Region) -> Self {
        Self {
            id: region.id.into_uuid(),
            name: region.name,
            slug: region.slug,
        }
    }
}

/// GraphQL type for a city
#[derive(Debug, Clone, GraphQLObject)]
pub struct CityData {
    pub id: Uuid,
    pub region_id: Uuid,
    pub name: String,
    pub slug: String,
}

impl From<City> for CityData {
    fn from(city: City) -> Self {
        Self {
            id: city.id.into_uuid(),
            region_id: city.region_id.into_uuid(),
            name: city.name,
            slug: city.slug,
        }
    }
}

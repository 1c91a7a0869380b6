//! Typed ID definitions for all domain entities.
//!
//! This module defines type aliases for each domain entity, providing
//! compile-time type safety for ID usage throughout the application.

// Re-export the core Id type and version markers
pub use super::id::{Id, V4, V7};

// ============================================================================
// Entity marker types
// ============================================================================

/// Marker type for Member entities (users, owned by the accounts service).
pub struct Member;

/// Marker type for Listing entities (for-sale posts).
pub struct Listing;

/// Marker type for ListingImage entities (gallery images of a listing).
pub struct ListingImage;

/// Marker type for Category entities (the classifieds taxonomy).
pub struct Category;

/// Marker type for Region entities (top-level locations).
pub struct Region;

/// Marker type for City entities (cities within a region).
pub struct City;

// ============================================================================
// Type aliases - the primary API
// ============================================================================

/// Typed ID for Member entities.
pub type MemberId = Id<Member>;

/// Typed ID for Listing entities.
pub type ListingId = Id<Listing>;

/// Typed ID for ListingImage entities.
pub type ListingImageId = Id<ListingImage>;

/// Typed ID for Category entities.
pub type CategoryId = Id<Category>;

/// Typed ID for Region entities.
pub type RegionId = Id<Region>;

/// Typed ID for City entities.
pub type CityId = Id<City>;

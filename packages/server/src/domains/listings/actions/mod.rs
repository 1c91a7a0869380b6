//! Listing actions - entry-point functions for listing operations
//!
//! These are called directly from GraphQL mutations. Actions are
//! self-contained: they take raw input, handle ID parsing, auth checks and
//! transactions, and return final models.

mod core;
mod images;

pub use core::{create_listing, update_listing};
pub use images::{add_listing_image, remove_listing_image, set_primary_image};

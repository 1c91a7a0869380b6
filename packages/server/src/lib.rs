// Classifieds Marketplace - API Core
//
// This crate provides the backend API for a classifieds marketplace: listings
// with a status lifecycle, their images, and the category/location reference
// data they point at. Architecture follows domain-driven design; all SQL lives
// in domains/*/models, GraphQL edges stay thin and delegate to domains/*/actions.

pub mod common;
pub mod config;
pub mod domains;
pub mod server;

pub use config::*;

// Domain modules
//
// Each domain owns its models (SQL queries), actions (entry points called
// from GraphQL), and data (GraphQL types).

pub mod auth;
pub mod catalog;
pub mod listings;
pub mod locations;

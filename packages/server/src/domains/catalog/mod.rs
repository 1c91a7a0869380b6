// Catalog domain - the category taxonomy listings are filed under.
//
// Read-only for the API: rows are seeded operationally.

pub mod data;
pub mod models;

pub use data::CategoryData;
pub use models::Category;

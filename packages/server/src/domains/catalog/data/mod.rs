pub mod types;

pub use types::CategoryData;

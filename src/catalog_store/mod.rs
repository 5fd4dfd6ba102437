mod models;
mod rest_store;
mod schema;
mod store;
mod trait_def;

pub use models::*;
pub use rest_store::{parse_content_range_total, RestCatalogStore};
pub use schema::CATALOG_VERSIONED_SCHEMAS;
pub use store::SqliteCatalogStore;
pub use trait_def::CatalogStore;

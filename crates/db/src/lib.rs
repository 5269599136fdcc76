pub mod catalog;
pub mod connection;
pub mod fixtures;
pub mod migrations;

pub use catalog::{
    Catalog, CatalogStore, EqualityFilter, FilterField, InMemoryCatalogStore, SqlCatalogStore,
    StoreError, RESULT_CAP,
};
pub use connection::{connect, connect_with_config, connect_with_settings, DbPool};
pub use fixtures::{CatalogSeedDataset, ListingSeedInfo, SeedResult, VerificationResult};

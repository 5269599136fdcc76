use std::sync::Arc;

use async_trait::async_trait;
use rust_decimal::Decimal;
use sqlx::sqlite::SqliteRow;
use sqlx::{QueryBuilder, Row};
use thiserror::Error;
use tokio::sync::RwLock;

use showroom_core::domain::listing::CarListing;
use showroom_core::domain::preferences::ConstraintSet;

use crate::connection::DbPool;

/// Row cap applied by the store before the price residual runs. A ceiling can
/// therefore thin a capped page below five rows instead of pulling in later
/// matches.
pub const RESULT_CAP: usize = 5;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
    #[error("decode error: {0}")]
    Decode(String),
}

/// Listing attribute the store can match exactly.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FilterField {
    Fuel,
    Brand,
    BodyStyle,
    Color,
}

impl FilterField {
    pub fn column(self) -> &'static str {
        match self {
            FilterField::Fuel => "fuel",
            FilterField::Brand => "brand",
            FilterField::BodyStyle => "body_style",
            FilterField::Color => "color",
        }
    }

    pub fn matches(self, listing: &CarListing, value: &str) -> bool {
        let stored = match self {
            FilterField::Fuel => listing.fuel.as_deref(),
            FilterField::Brand => listing.brand.as_deref(),
            FilterField::BodyStyle => listing.body_style.as_deref(),
            FilterField::Color => listing.color.as_deref(),
        };
        stored == Some(value)
    }
}

/// Store-side portion of a constraint set: the exact-match clauses in their
/// fixed evaluation order, with values already in the casing the catalog
/// stores.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct EqualityFilter {
    clauses: Vec<(FilterField, String)>,
}

impl EqualityFilter {
    pub fn from_constraints(constraints: &ConstraintSet) -> Self {
        let mut clauses = Vec::new();
        if let Some(fuel) = constraints.fuel {
            clauses.push((FilterField::Fuel, fuel.canonical()));
        }
        if let Some(brand) = constraints.brand {
            clauses.push((FilterField::Brand, brand.label().to_string()));
        }
        if let Some(body_style) = constraints.body_style {
            clauses.push((FilterField::BodyStyle, body_style.label().to_string()));
        }
        if let Some(color) = constraints.color {
            clauses.push((FilterField::Color, color.canonical()));
        }
        Self { clauses }
    }

    pub fn clauses(&self) -> &[(FilterField, String)] {
        &self.clauses
    }

    pub fn is_empty(&self) -> bool {
        self.clauses.is_empty()
    }
}

/// Read-only view of the car catalog. Implementations return rows in their
/// natural order and never reorder a page.
#[async_trait]
pub trait CatalogStore: Send + Sync {
    async fn fetch(
        &self,
        filter: &EqualityFilter,
        limit: usize,
    ) -> Result<Vec<CarListing>, StoreError>;
}

pub struct SqlCatalogStore {
    pool: DbPool,
}

impl SqlCatalogStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CatalogStore for SqlCatalogStore {
    async fn fetch(
        &self,
        filter: &EqualityFilter,
        limit: usize,
    ) -> Result<Vec<CarListing>, StoreError> {
        let mut query = QueryBuilder::new(
            "SELECT brand, name, body_style, color, interior_color, transmission, engine,
                    fuel, mileage, price, vin
             FROM car_listing",
        );
        query.push(" WHERE 1=1");
        for (field, value) in filter.clauses() {
            query.push(" AND ");
            query.push(field.column());
            query.push(" = ");
            query.push_bind(value.as_str());
        }
        query.push(" LIMIT ");
        query.push_bind(limit as i64);

        let rows = query.build().fetch_all(&self.pool).await?;
        rows.into_iter().map(listing_from_row).collect()
    }
}

fn listing_from_row(row: SqliteRow) -> Result<CarListing, StoreError> {
    Ok(CarListing {
        brand: attribute(&row, "brand")?,
        name: attribute(&row, "name")?,
        body_style: attribute(&row, "body_style")?,
        color: attribute(&row, "color")?,
        interior_color: attribute(&row, "interior_color")?,
        transmission: attribute(&row, "transmission")?,
        engine: attribute(&row, "engine")?,
        fuel: attribute(&row, "fuel")?,
        mileage: attribute(&row, "mileage")?,
        price: attribute(&row, "price")?,
        vin: attribute(&row, "vin")?,
    })
}

fn attribute(row: &SqliteRow, column: &str) -> Result<Option<String>, StoreError> {
    row.try_get(column).map_err(|error| StoreError::Decode(error.to_string()))
}

/// In-process catalog for tests and offline runs. Listings keep insertion
/// order, standing in for the SQL store's natural row order.
#[derive(Default)]
pub struct InMemoryCatalogStore {
    listings: RwLock<Vec<CarListing>>,
}

impl InMemoryCatalogStore {
    pub fn with_listings(listings: Vec<CarListing>) -> Self {
        Self { listings: RwLock::new(listings) }
    }

    pub async fn insert(&self, listing: CarListing) {
        self.listings.write().await.push(listing);
    }
}

#[async_trait]
impl CatalogStore for InMemoryCatalogStore {
    async fn fetch(
        &self,
        filter: &EqualityFilter,
        limit: usize,
    ) -> Result<Vec<CarListing>, StoreError> {
        let listings = self.listings.read().await;
        Ok(listings
            .iter()
            .filter(|listing| {
                filter.clauses().iter().all(|(field, value)| field.matches(listing, value))
            })
            .take(limit)
            .cloned()
            .collect())
    }
}

/// Two-stage catalog search: exact-match constraints go to the store together
/// with the row cap, then the price ceiling is applied locally to the page
/// that came back.
#[derive(Clone)]
pub struct Catalog {
    store: Arc<dyn CatalogStore>,
}

impl Catalog {
    pub fn new(store: Arc<dyn CatalogStore>) -> Self {
        Self { store }
    }

    pub async fn search(
        &self,
        constraints: &ConstraintSet,
    ) -> Result<Vec<CarListing>, StoreError> {
        let filter = EqualityFilter::from_constraints(constraints);
        let listings = self.store.fetch(&filter, RESULT_CAP).await?;

        let Some(ceiling) = constraints.price_ceiling else {
            return Ok(listings);
        };

        let ceiling = Decimal::from(ceiling);
        Ok(listings
            .into_iter()
            .filter(|listing| listed_price_or_zero(listing.price.as_deref()) <= ceiling)
            .collect())
    }
}

/// Missing or non-numeric listed prices count as zero, so incomplete rows
/// pass any ceiling instead of being dropped.
pub fn listed_price_or_zero(price: Option<&str>) -> Decimal {
    price.and_then(|raw| raw.trim().parse::<Decimal>().ok()).unwrap_or(Decimal::ZERO)
}

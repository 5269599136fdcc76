use sqlx::Executor;

use crate::catalog::StoreError;
use crate::connection::DbPool;

/// Canonical catalog rows backing local runs and the end-to-end chat scenarios.
const SEED_LISTINGS: &[SeedListingContract] = &[
    SeedListingContract {
        vin: "VIN-RAV4-0001",
        brand: "Toyota",
        name: "RAV4",
        body_style: "SUV",
        color: "Red",
        interior_color: Some("Black"),
        transmission: "Automatic",
        engine: "2.5L",
        fuel: "Gasoline",
        mileage: "15000",
        price: Some("18000"),
        description: "Red SUV under 20000 - expected hit for the scenario query",
    },
    SeedListingContract {
        vin: "VIN-ROGU-0002",
        brand: "Nissan",
        name: "Rogue",
        body_style: "SUV",
        color: "Black",
        interior_color: Some("Gray"),
        transmission: "Automatic",
        engine: "2.5L",
        fuel: "Gasoline",
        mileage: "22000",
        price: Some("19000"),
        description: "Black SUV under 20000 - excluded by color, not price",
    },
    SeedListingContract {
        vin: "VIN-330I-0003",
        brand: "BMW",
        name: "330i",
        body_style: "Sedan",
        color: "Blue",
        interior_color: Some("Black"),
        transmission: "Automatic",
        engine: "2.0L Turbo",
        fuel: "Gasoline",
        mileage: "30000",
        price: Some("32000"),
        description: "Gasoline sedan for brand and body-style filters",
    },
    SeedListingContract {
        vin: "VIN-GLA2-0004",
        brand: "Mercedes-Benz",
        name: "GLA 250",
        body_style: "SUV",
        color: "White",
        interior_color: Some("Beige"),
        transmission: "Automatic",
        engine: "2.0L Turbo",
        fuel: "Gasoline",
        mileage: "12000",
        price: Some("41000"),
        description: "Hyphenated brand stored verbatim",
    },
    SeedListingContract {
        vin: "VIN-LEAF-0005",
        brand: "Nissan",
        name: "Leaf",
        body_style: "Sedan",
        color: "White",
        interior_color: Some("Gray"),
        transmission: "Automatic",
        engine: "110kW",
        fuel: "Electric",
        mileage: "8000",
        price: Some("28000"),
        description: "Electric sedan for fuel filters",
    },
    SeedListingContract {
        vin: "VIN-HURA-0006",
        brand: "Lamborghini",
        name: "Huracan Spyder",
        body_style: "Convertible",
        color: "Green",
        interior_color: Some("Black"),
        transmission: "Automatic",
        engine: "5.2L V10",
        fuel: "Petrol",
        mileage: "3000",
        price: Some("260000"),
        description: "Petrol convertible at the top of the price range",
    },
    SeedListingContract {
        vin: "VIN-TUCS-0007",
        brand: "Hyundai",
        name: "Tucson",
        body_style: "SUV",
        color: "Gray",
        interior_color: None,
        transmission: "Automatic",
        engine: "1.6L Hybrid",
        fuel: "Hybrid",
        mileage: "27000",
        price: Some("N/A"),
        description: "Hybrid SUV with a non-numeric price marker and missing interior color",
    },
    SeedListingContract {
        vin: "VIN-TACO-0008",
        brand: "Toyota",
        name: "Tacoma",
        body_style: "Truck",
        color: "Silver",
        interior_color: Some("Black"),
        transmission: "Manual",
        engine: "3.5L V6",
        fuel: "Gasoline",
        mileage: "18000",
        price: Some("34000"),
        description: "Gasoline truck rounding out the body-style coverage",
    },
];

const SEED_VINS: &[&str] = &[
    "VIN-RAV4-0001",
    "VIN-ROGU-0002",
    "VIN-330I-0003",
    "VIN-GLA2-0004",
    "VIN-LEAF-0005",
    "VIN-HURA-0006",
    "VIN-TUCS-0007",
    "VIN-TACO-0008",
];

const NON_NUMERIC_PRICE_VIN: &str = "VIN-TUCS-0007";

/// Deterministic catalog seed dataset.
///
/// Provides fixtures for:
/// 1. The "red SUV under $20000" end-to-end chat scenario
/// 2. Coverage of every recognized fuel and body style
/// 3. A listing with attribute gaps (non-numeric price, missing interior)
pub struct CatalogSeedDataset;

impl CatalogSeedDataset {
    /// SQL fixture content for the catalog seed.
    pub const SQL: &str = include_str!("../../../config/fixtures/catalog_seed.sql");

    /// Load the catalog seed into the database. Reloading replaces rows by
    /// VIN instead of duplicating them.
    pub async fn load(pool: &DbPool) -> Result<SeedResult, StoreError> {
        let mut tx = pool.begin().await?;

        tx.execute(sqlx::query(Self::SQL)).await?;
        tx.commit().await?;

        let listings_seeded = SEED_LISTINGS
            .iter()
            .map(|listing| ListingSeedInfo {
                vin: listing.vin,
                label: listing.label(),
                description: listing.description,
            })
            .collect::<Vec<_>>();

        Ok(SeedResult { listings_seeded })
    }

    /// Verify that seeded rows exist and match the contract.
    pub async fn verify(pool: &DbPool) -> Result<VerificationResult, StoreError> {
        let mut checks = Vec::new();

        let quoted_vins = sql_array_from_ids(SEED_VINS);
        let expected_total = SEED_LISTINGS.len() as i64;
        let seeded_count: i64 = sqlx::query_scalar(&format!(
            "SELECT COUNT(1) FROM car_listing WHERE vin IN {quoted_vins}"
        ))
        .fetch_one(pool)
        .await?;
        checks.push(("seeded-listings", seeded_count == expected_total));

        for listing in SEED_LISTINGS {
            let row_ok: i64 = sqlx::query_scalar(
                "SELECT EXISTS(
                     SELECT 1 FROM car_listing
                     WHERE vin = ?1 AND brand = ?2 AND name = ?3 AND body_style = ?4
                       AND color = ?5 AND fuel = ?6 AND mileage = ?7
                       AND ((?8 IS NULL AND interior_color IS NULL) OR interior_color = ?8)
                       AND ((?9 IS NULL AND price IS NULL) OR price = ?9)
                 )",
            )
            .bind(listing.vin)
            .bind(listing.brand)
            .bind(listing.name)
            .bind(listing.body_style)
            .bind(listing.color)
            .bind(listing.fuel)
            .bind(listing.mileage)
            .bind(listing.interior_color)
            .bind(listing.price)
            .fetch_one(pool)
            .await?;
            checks.push((listing.vin, row_ok == 1));
        }

        let fuel_coverage: i64 = sqlx::query_scalar(&format!(
            "SELECT COUNT(DISTINCT fuel) FROM car_listing WHERE vin IN {quoted_vins}"
        ))
        .fetch_one(pool)
        .await?;
        checks.push(("fuel-coverage", fuel_coverage == 4));

        let body_style_coverage: i64 = sqlx::query_scalar(&format!(
            "SELECT COUNT(DISTINCT body_style) FROM car_listing WHERE vin IN {quoted_vins}"
        ))
        .fetch_one(pool)
        .await?;
        checks.push(("body-style-coverage", body_style_coverage == 4));

        let all_present = checks.iter().all(|(_, present)| *present);
        Ok(VerificationResult { all_present, checks })
    }

    /// Clean seeded fixtures from a test database.
    pub async fn clean(pool: &DbPool) -> Result<(), StoreError> {
        let mut tx = pool.begin().await?;

        let quoted_vins = sql_array_from_ids(SEED_VINS);
        sqlx::query(&format!("DELETE FROM car_listing WHERE vin IN {quoted_vins}"))
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(())
    }
}

#[derive(Debug, Clone, Copy)]
struct SeedListingContract {
    vin: &'static str,
    brand: &'static str,
    name: &'static str,
    body_style: &'static str,
    color: &'static str,
    interior_color: Option<&'static str>,
    transmission: &'static str,
    engine: &'static str,
    fuel: &'static str,
    mileage: &'static str,
    price: Option<&'static str>,
    description: &'static str,
}

impl SeedListingContract {
    fn label(&self) -> &'static str {
        match self.vin {
            "VIN-RAV4-0001" => "Toyota RAV4",
            "VIN-ROGU-0002" => "Nissan Rogue",
            "VIN-330I-0003" => "BMW 330i",
            "VIN-GLA2-0004" => "Mercedes-Benz GLA 250",
            "VIN-LEAF-0005" => "Nissan Leaf",
            "VIN-HURA-0006" => "Lamborghini Huracan Spyder",
            "VIN-TUCS-0007" => "Hyundai Tucson",
            _ => "Toyota Tacoma",
        }
    }
}

fn sql_array_from_ids(ids: &[&str]) -> String {
    let quoted = ids.iter().map(|id| format!("'{}'", id)).collect::<Vec<_>>().join(",");
    format!("({quoted})")
}

#[derive(Debug)]
pub struct SeedResult {
    pub listings_seeded: Vec<ListingSeedInfo>,
}

#[derive(Debug)]
pub struct ListingSeedInfo {
    pub vin: &'static str,
    pub label: &'static str,
    pub description: &'static str,
}

#[derive(Debug)]
pub struct VerificationResult {
    pub all_present: bool,
    pub checks: Vec<(&'static str, bool)>,
}

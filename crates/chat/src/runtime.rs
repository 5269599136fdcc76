use showroom_core::errors::ApplicationError;
use showroom_db::Catalog;
use tracing::debug;

use crate::extract::PreferenceExtractor;
use crate::reply::render_reply;

/// One chat message in, one rendered reply out.
///
/// The runtime owns the long-lived pipeline pieces: a stateless extractor and
/// the shared catalog handle. Messages carry no conversation state, so every
/// call is independent and repeatable.
#[derive(Clone)]
pub struct ChatRuntime {
    extractor: PreferenceExtractor,
    catalog: Catalog,
}

impl ChatRuntime {
    pub fn new(catalog: Catalog) -> Self {
        Self { extractor: PreferenceExtractor::new(), catalog }
    }

    pub async fn handle_message(&self, text: &str) -> Result<String, ApplicationError> {
        let constraints = self.extractor.extract(text);
        debug!(
            event_name = "chat.preferences_extracted",
            has_fuel = constraints.fuel.is_some(),
            has_brand = constraints.brand.is_some(),
            has_body_style = constraints.body_style.is_some(),
            has_color = constraints.color.is_some(),
            price_ceiling = constraints.price_ceiling,
            "preferences extracted from chat message"
        );

        let listings = self
            .catalog
            .search(&constraints)
            .await
            .map_err(|error| ApplicationError::Persistence(error.to_string()))?;
        debug!(
            event_name = "chat.catalog_searched",
            result_count = listings.len(),
            "catalog search completed"
        );

        Ok(render_reply(&listings))
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use showroom_core::domain::listing::CarListing;
    use showroom_core::errors::ApplicationError;
    use showroom_db::{Catalog, CatalogStore, EqualityFilter, InMemoryCatalogStore, StoreError};

    use super::ChatRuntime;
    use crate::reply::NO_MATCH_REPLY;

    fn listing(vin: &str, body_style: &str, color: &str, price: &str) -> CarListing {
        CarListing {
            brand: Some("Toyota".to_string()),
            name: Some("RAV4".to_string()),
            body_style: Some(body_style.to_string()),
            color: Some(color.to_string()),
            interior_color: Some("Black".to_string()),
            transmission: Some("Automatic".to_string()),
            engine: Some("2.5L".to_string()),
            fuel: Some("Gasoline".to_string()),
            mileage: Some("15000".to_string()),
            price: Some(price.to_string()),
            vin: Some(vin.to_string()),
        }
    }

    fn runtime_with(listings: Vec<CarListing>) -> ChatRuntime {
        let store = InMemoryCatalogStore::with_listings(listings);
        ChatRuntime::new(Catalog::new(Arc::new(store)))
    }

    struct FailingStore;

    #[async_trait::async_trait]
    impl CatalogStore for FailingStore {
        async fn fetch(
            &self,
            _filter: &EqualityFilter,
            _limit: usize,
        ) -> Result<Vec<CarListing>, StoreError> {
            Err(StoreError::Decode("listing row is unreadable".to_string()))
        }
    }

    #[tokio::test]
    async fn answers_red_suv_query_with_the_single_match() {
        let red_rav4 = listing("VIN-RED", "SUV", "Red", "18000");
        let black_rogue = CarListing {
            name: Some("Rogue".to_string()),
            ..listing("VIN-BLACK", "SUV", "Black", "19000")
        };
        let runtime = runtime_with(vec![red_rav4, black_rogue]);

        let reply = runtime.handle_message("I want a red SUV under $20000").await.unwrap();

        assert!(reply.starts_with("I found 1 car(s) matching your preferences."));
        assert!(reply.contains("VIN: VIN-RED\n"));
        assert!(!reply.contains("Rogue"));
        assert!(!reply.contains("VIN-BLACK"));
    }

    #[tokio::test]
    async fn unmatched_query_returns_the_apology() {
        let runtime = runtime_with(vec![listing("VIN-1", "SUV", "Red", "18000")]);

        let reply = runtime.handle_message("a green convertible").await.unwrap();
        assert_eq!(reply, NO_MATCH_REPLY);
    }

    #[tokio::test]
    async fn repeated_messages_produce_identical_replies() {
        let runtime = runtime_with(vec![
            listing("VIN-1", "SUV", "Red", "18000"),
            listing("VIN-2", "Sedan", "Blue", "32000"),
        ]);

        let first = runtime.handle_message("show me a red suv").await.unwrap();
        let second = runtime.handle_message("show me a red suv").await.unwrap();
        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn store_failure_surfaces_as_persistence_error() {
        let runtime = ChatRuntime::new(Catalog::new(Arc::new(FailingStore)));

        let error = runtime.handle_message("any car at all").await.unwrap_err();
        assert!(matches!(error, ApplicationError::Persistence(_)));
    }
}

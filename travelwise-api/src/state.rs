use std::sync::Arc;

use travelwise_catalog::CatalogStore;
use travelwise_core::airports::AirportLookup;
use travelwise_offer::{OfferStore, PromoEvaluator};
use travelwise_store::app_config::RateLimitConfig;
use travelwise_store::RedisClient;

#[derive(Clone)]
pub struct AppState {
    pub offers: Arc<dyn OfferStore>,
    pub catalog: Arc<dyn CatalogStore>,
    pub airports: Arc<dyn AirportLookup>,
    pub evaluator: PromoEvaluator,
    /// Absent in tests; the rate-limit middleware passes everything
    /// through when no Redis client is configured.
    pub redis: Option<Arc<RedisClient>>,
    pub rate_limit: RateLimitConfig,
}

impl AppState {
    pub fn new(
        offers: Arc<dyn OfferStore>,
        catalog: Arc<dyn CatalogStore>,
        airports: Arc<dyn AirportLookup>,
        redis: Option<Arc<RedisClient>>,
        rate_limit: RateLimitConfig,
    ) -> Self {
        let evaluator = PromoEvaluator::new(offers.clone());
        Self {
            offers,
            catalog,
            airports,
            evaluator,
            redis,
            rate_limit,
        }
    }
}

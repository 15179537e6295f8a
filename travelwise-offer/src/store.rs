use async_trait::async_trait;

use travelwise_core::StoreResult;

use crate::models::{Offer, OfferType};

/// Offer persistence boundary. Lookups are point-in-time reads; the only
/// mutation is `redeem`, which implementations must perform as a single
/// atomic check-and-increment (never check-then-write in two steps).
#[async_trait]
pub trait OfferStore: Send + Sync {
    /// Look up an offer by its promo code. `code` is already normalized
    /// to uppercase. Returns the offer regardless of validity; callers
    /// decide what an invalid offer looks like to the outside.
    async fn find_by_code(&self, code: &str) -> StoreResult<Option<Offer>>;

    /// Currently-valid offers, optionally restricted to one category,
    /// ordered by priority then recency.
    async fn list_current(&self, scope: Option<OfferType>, limit: usize)
        -> StoreResult<Vec<Offer>>;

    /// Currently-valid offers with priority >= 5, for the home page.
    async fn featured(&self, limit: usize) -> StoreResult<Vec<Offer>>;

    /// Consume one redemption if the offer is currently valid and under
    /// its usage cap. Returns whether a unit was consumed.
    async fn redeem(&self, code: &str) -> StoreResult<bool>;
}

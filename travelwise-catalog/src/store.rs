use async_trait::async_trait;
use chrono::NaiveDate;
use uuid::Uuid;

use travelwise_core::StoreResult;

use crate::car::Car;
use crate::flight::Flight;
use crate::hotel::Hotel;

/// Read-only access to the bookable-item catalog. Implementations narrow
/// candidates server-side where they can (route/day for flights, city
/// for hotels and cars); the engine re-applies the same constraints, so
/// a coarse implementation is still correct.
#[async_trait]
pub trait CatalogStore: Send + Sync {
    /// Active flights on the route departing within the given calendar day.
    async fn flights_on_route(
        &self,
        origin: &str,
        destination: &str,
        day: NaiveDate,
    ) -> StoreResult<Vec<Flight>>;

    async fn flight(&self, id: Uuid) -> StoreResult<Option<Flight>>;

    /// Every active flight, for the aggregation reports.
    async fn active_flights(&self) -> StoreResult<Vec<Flight>>;

    /// Active hotels in the given city.
    async fn hotels_in(&self, city: &str) -> StoreResult<Vec<Hotel>>;

    /// Active cars with a pickup location in the given city.
    async fn cars_in(&self, city: &str) -> StoreResult<Vec<Car>>;
}

//! In-memory store implementations backing tests and local development.
//! `redeem` holds one write lock across the check and the increment, so
//! the conditional update stays atomic like the SQL version.

use async_trait::async_trait;
use chrono::{NaiveDate, Utc};
use std::sync::RwLock;
use uuid::Uuid;

use travelwise_catalog::{Car, CatalogStore, Flight, Hotel};
use travelwise_core::{StoreError, StoreResult};
use travelwise_offer::{Offer, OfferStore, OfferType};

#[derive(Default)]
pub struct InMemoryOfferStore {
    offers: RwLock<Vec<Offer>>,
}

impl InMemoryOfferStore {
    pub fn new(offers: Vec<Offer>) -> Self {
        Self {
            offers: RwLock::new(offers),
        }
    }

    fn lock_err() -> StoreError {
        StoreError::Unavailable("offer store lock poisoned".into())
    }
}

#[async_trait]
impl OfferStore for InMemoryOfferStore {
    async fn find_by_code(&self, code: &str) -> StoreResult<Option<Offer>> {
        let offers = self.offers.read().map_err(|_| Self::lock_err())?;
        Ok(offers
            .iter()
            .find(|o| {
                o.promo_code
                    .as_deref()
                    .is_some_and(|c| c.eq_ignore_ascii_case(code))
            })
            .cloned())
    }

    async fn list_current(
        &self,
        scope: Option<OfferType>,
        limit: usize,
    ) -> StoreResult<Vec<Offer>> {
        let now = Utc::now();
        let offers = self.offers.read().map_err(|_| Self::lock_err())?;
        let mut current: Vec<Offer> = offers
            .iter()
            .filter(|o| o.is_currently_valid(now))
            .filter(|o| scope.is_none_or(|s| o.offer_type == s))
            .cloned()
            .collect();
        current.sort_by(|a, b| {
            b.priority
                .cmp(&a.priority)
                .then(b.created_at.cmp(&a.created_at))
        });
        current.truncate(limit);
        Ok(current)
    }

    async fn featured(&self, limit: usize) -> StoreResult<Vec<Offer>> {
        let now = Utc::now();
        let offers = self.offers.read().map_err(|_| Self::lock_err())?;
        let mut featured: Vec<Offer> = offers
            .iter()
            .filter(|o| o.is_currently_valid(now) && o.priority >= 5)
            .cloned()
            .collect();
        featured.sort_by(|a, b| b.priority.cmp(&a.priority));
        featured.truncate(limit);
        Ok(featured)
    }

    async fn redeem(&self, code: &str) -> StoreResult<bool> {
        let now = Utc::now();
        let mut offers = self.offers.write().map_err(|_| Self::lock_err())?;
        let Some(offer) = offers.iter_mut().find(|o| {
            o.promo_code
                .as_deref()
                .is_some_and(|c| c.eq_ignore_ascii_case(code))
        }) else {
            return Ok(false);
        };
        if !offer.is_currently_valid(now) || offer.usage_exhausted() {
            return Ok(false);
        }
        offer.usage_count += 1;
        Ok(true)
    }
}

#[derive(Default)]
pub struct InMemoryCatalogStore {
    flights: Vec<Flight>,
    hotels: Vec<Hotel>,
    cars: Vec<Car>,
}

impl InMemoryCatalogStore {
    pub fn new(flights: Vec<Flight>, hotels: Vec<Hotel>, cars: Vec<Car>) -> Self {
        Self {
            flights,
            hotels,
            cars,
        }
    }
}

#[async_trait]
impl CatalogStore for InMemoryCatalogStore {
    async fn flights_on_route(
        &self,
        origin: &str,
        destination: &str,
        day: NaiveDate,
    ) -> StoreResult<Vec<Flight>> {
        Ok(self
            .flights
            .iter()
            .filter(|f| {
                f.is_active
                    && f.departure.airport.code == origin
                    && f.arrival.airport.code == destination
                    && f.departure.time.date_naive() == day
            })
            .cloned()
            .collect())
    }

    async fn flight(&self, id: Uuid) -> StoreResult<Option<Flight>> {
        Ok(self.flights.iter().find(|f| f.id == id).cloned())
    }

    async fn active_flights(&self) -> StoreResult<Vec<Flight>> {
        Ok(self.flights.iter().filter(|f| f.is_active).cloned().collect())
    }

    async fn hotels_in(&self, city: &str) -> StoreResult<Vec<Hotel>> {
        Ok(self
            .hotels
            .iter()
            .filter(|h| h.is_active && h.city.eq_ignore_ascii_case(city))
            .cloned()
            .collect())
    }

    async fn cars_in(&self, city: &str) -> StoreResult<Vec<Car>> {
        Ok(self
            .cars
            .iter()
            .filter(|c| c.is_active && c.picks_up_in(city))
            .cloned()
            .collect())
    }
}

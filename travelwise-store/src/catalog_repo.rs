use async_trait::async_trait;
use chrono::NaiveDate;
use serde::de::DeserializeOwned;
use sqlx::postgres::PgRow;
use sqlx::{PgPool, Row};
use uuid::Uuid;

use travelwise_catalog::{Car, CatalogStore, Flight, Hotel};
use travelwise_core::{StoreError, StoreResult};

/// Catalog store over Postgres. Search keys (route, day, city, active
/// flag) are indexed columns; the full item document rides a `jsonb`
/// column and deserializes straight into the model types.
pub struct PostgresCatalogStore {
    pub pool: PgPool,
}

impl PostgresCatalogStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn db_err(e: sqlx::Error) -> StoreError {
    StoreError::Unavailable(e.to_string())
}

fn doc_from_row<T: DeserializeOwned>(row: &PgRow) -> StoreResult<T> {
    let doc: serde_json::Value = row
        .try_get("doc")
        .map_err(|e| StoreError::Corrupt(e.to_string()))?;
    serde_json::from_value(doc).map_err(|e| StoreError::Corrupt(e.to_string()))
}

#[async_trait]
impl CatalogStore for PostgresCatalogStore {
    async fn flights_on_route(
        &self,
        origin: &str,
        destination: &str,
        day: NaiveDate,
    ) -> StoreResult<Vec<Flight>> {
        // Calendar-day window [day 00:00, day+1 00:00).
        let rows = sqlx::query(
            "SELECT doc FROM flights \
             WHERE origin = $1 AND destination = $2 AND is_active \
               AND departs_at >= $3::date AND departs_at < $3::date + interval '1 day'",
        )
        .bind(origin)
        .bind(destination)
        .bind(day)
        .fetch_all(&self.pool)
        .await
        .map_err(db_err)?;
        rows.iter().map(doc_from_row).collect()
    }

    async fn flight(&self, id: Uuid) -> StoreResult<Option<Flight>> {
        let row = sqlx::query("SELECT doc FROM flights WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(db_err)?;
        row.as_ref().map(doc_from_row).transpose()
    }

    async fn active_flights(&self) -> StoreResult<Vec<Flight>> {
        let rows = sqlx::query("SELECT doc FROM flights WHERE is_active")
            .fetch_all(&self.pool)
            .await
            .map_err(db_err)?;
        rows.iter().map(doc_from_row).collect()
    }

    async fn hotels_in(&self, city: &str) -> StoreResult<Vec<Hotel>> {
        let rows = sqlx::query("SELECT doc FROM hotels WHERE lower(city) = lower($1) AND is_active")
            .bind(city)
            .fetch_all(&self.pool)
            .await
            .map_err(db_err)?;
        rows.iter().map(doc_from_row).collect()
    }

    async fn cars_in(&self, city: &str) -> StoreResult<Vec<Car>> {
        let rows = sqlx::query(
            "SELECT doc FROM cars WHERE lower($1) = ANY(SELECT lower(unnest(cities))) AND is_active",
        )
        .bind(city)
        .fetch_all(&self.pool)
        .await
        .map_err(db_err)?;
        rows.iter().map(doc_from_row).collect()
    }
}

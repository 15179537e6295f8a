use async_trait::async_trait;
use sqlx::postgres::PgRow;
use sqlx::{PgPool, Row};

use travelwise_core::{StoreError, StoreResult};
use travelwise_offer::{Offer, OfferConditions, OfferStore, OfferType, UsageLimit};

const OFFER_COLUMNS: &str = "id, title, description, offer_type, discount_type, discount_value, \
     minimum_amount, maximum_discount, promo_code, usage_total, usage_per_user, usage_count, \
     is_active, valid_from, valid_until, image, priority, created_at";

pub struct PostgresOfferStore {
    pub pool: PgPool,
}

impl PostgresOfferStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn offer_from_row(row: &PgRow) -> StoreResult<Offer> {
    let get_err = |e: sqlx::Error| StoreError::Corrupt(e.to_string());
    let offer_type: String = row.try_get("offer_type").map_err(get_err)?;
    let discount_type: String = row.try_get("discount_type").map_err(get_err)?;
    let usage_total: Option<i32> = row.try_get("usage_total").map_err(get_err)?;
    let usage_per_user: i32 = row.try_get("usage_per_user").map_err(get_err)?;
    let usage_count: i32 = row.try_get("usage_count").map_err(get_err)?;

    Ok(Offer {
        id: row.try_get("id").map_err(get_err)?,
        title: row.try_get("title").map_err(get_err)?,
        description: row.try_get("description").map_err(get_err)?,
        offer_type: offer_type.parse::<OfferType>().map_err(StoreError::Corrupt)?,
        discount_type: discount_type.parse().map_err(StoreError::Corrupt)?,
        discount_value: row.try_get("discount_value").map_err(get_err)?,
        conditions: OfferConditions {
            minimum_amount: row.try_get("minimum_amount").map_err(get_err)?,
            maximum_discount: row.try_get("maximum_discount").map_err(get_err)?,
        },
        promo_code: row.try_get("promo_code").map_err(get_err)?,
        usage_limit: UsageLimit {
            total: usage_total.map(|t| t.max(0) as u32),
            per_user: usage_per_user.max(0) as u32,
        },
        usage_count: usage_count.max(0) as u32,
        is_active: row.try_get("is_active").map_err(get_err)?,
        valid_from: row.try_get("valid_from").map_err(get_err)?,
        valid_until: row.try_get("valid_until").map_err(get_err)?,
        image: row.try_get("image").map_err(get_err)?,
        priority: row.try_get("priority").map_err(get_err)?,
        created_at: row.try_get("created_at").map_err(get_err)?,
    })
}

fn db_err(e: sqlx::Error) -> StoreError {
    StoreError::Unavailable(e.to_string())
}

#[async_trait]
impl OfferStore for PostgresOfferStore {
    async fn find_by_code(&self, code: &str) -> StoreResult<Option<Offer>> {
        let sql = format!("SELECT {OFFER_COLUMNS} FROM offers WHERE promo_code = $1");
        let row = sqlx::query(&sql)
            .bind(code)
            .fetch_optional(&self.pool)
            .await
            .map_err(db_err)?;
        row.as_ref().map(offer_from_row).transpose()
    }

    async fn list_current(
        &self,
        scope: Option<OfferType>,
        limit: usize,
    ) -> StoreResult<Vec<Offer>> {
        let sql = format!(
            "SELECT {OFFER_COLUMNS} FROM offers \
             WHERE is_active AND valid_from <= now() AND valid_until >= now() \
               AND ($1::text IS NULL OR offer_type = $1) \
             ORDER BY priority DESC, created_at DESC \
             LIMIT $2"
        );
        let rows = sqlx::query(&sql)
            .bind(scope.map(|s| s.as_str()))
            .bind(limit as i64)
            .fetch_all(&self.pool)
            .await
            .map_err(db_err)?;
        rows.iter().map(offer_from_row).collect()
    }

    async fn featured(&self, limit: usize) -> StoreResult<Vec<Offer>> {
        let sql = format!(
            "SELECT {OFFER_COLUMNS} FROM offers \
             WHERE is_active AND valid_from <= now() AND valid_until >= now() \
               AND priority >= 5 \
             ORDER BY priority DESC \
             LIMIT $1"
        );
        let rows = sqlx::query(&sql)
            .bind(limit as i64)
            .fetch_all(&self.pool)
            .await
            .map_err(db_err)?;
        rows.iter().map(offer_from_row).collect()
    }

    // One conditional statement: the usage check and the increment are
    // never split across round trips.
    async fn redeem(&self, code: &str) -> StoreResult<bool> {
        let result = sqlx::query(
            "UPDATE offers SET usage_count = usage_count + 1 \
             WHERE promo_code = $1 AND is_active \
               AND valid_from <= now() AND valid_until >= now() \
               AND (usage_total IS NULL OR usage_count < usage_total)",
        )
        .bind(code)
        .execute(&self.pool)
        .await
        .map_err(db_err)?;
        Ok(result.rows_affected() == 1)
    }
}

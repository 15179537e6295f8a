use chrono::{DateTime, Utc};
use serde::Serialize;
use std::sync::Arc;

use travelwise_core::money::{round_to_cents, Money};
use travelwise_core::{BookingType, StoreError};

use crate::models::{DiscountKind, Offer};
use crate::store::OfferStore;

/// The outcome of a successful promo validation. Computed only; the
/// evaluator never increments the redemption count.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DiscountResult {
    pub title: String,
    pub discount_type: DiscountKind,
    pub discount_value: Money,
    pub discount_amount: Money,
}

/// Every failure kind a caller can display. Unknown and expired codes
/// both map to `NotFound` so the response does not leak which codes
/// exist.
#[derive(Debug, thiserror::Error)]
pub enum PromoError {
    #[error("invalid or expired promo code")]
    NotFound,
    #[error("promo code usage limit exceeded")]
    LimitExceeded,
    #[error("promo code not valid for this booking type")]
    TypeMismatch,
    #[error("minimum booking amount of ${minimum} required")]
    BelowMinimum { minimum: Money },
    #[error("this promo code cannot be applied automatically")]
    UnsupportedDiscount,
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Eligibility checks and discount arithmetic for one offer at a point
/// in time. Pure; the async wrapper below supplies the lookup and clock.
pub fn compute_discount(
    offer: &Offer,
    booking_type: BookingType,
    amount: Money,
    now: DateTime<Utc>,
) -> Result<DiscountResult, PromoError> {
    if !offer.is_currently_valid(now) {
        return Err(PromoError::NotFound);
    }
    if offer.usage_exhausted() {
        return Err(PromoError::LimitExceeded);
    }
    if !offer.offer_type.applies_to(booking_type) {
        return Err(PromoError::TypeMismatch);
    }
    if let Some(minimum) = offer.conditions.minimum_amount {
        if amount < minimum {
            return Err(PromoError::BelowMinimum { minimum });
        }
    }

    let raw = match offer.discount_type {
        DiscountKind::Percentage => {
            let discount = amount * offer.discount_value / 100.0;
            match offer.conditions.maximum_discount {
                Some(cap) => discount.min(cap),
                None => discount,
            }
        }
        // Clamped to the booking amount so the payable total can never
        // go negative.
        DiscountKind::Fixed => offer.discount_value.min(amount),
        DiscountKind::Bogo => return Err(PromoError::UnsupportedDiscount),
    };

    Ok(DiscountResult {
        title: offer.title.clone(),
        discount_type: offer.discount_type,
        discount_value: offer.discount_value,
        discount_amount: round_to_cents(raw),
    })
}

/// Validates a promo code against the offer store and computes the
/// discount for a proposed booking amount.
#[derive(Clone)]
pub struct PromoEvaluator {
    store: Arc<dyn OfferStore>,
}

impl PromoEvaluator {
    pub fn new(store: Arc<dyn OfferStore>) -> Self {
        Self { store }
    }

    /// Point-in-time read: no side effects, no retries. Persisting the
    /// redemption is the checkout collaborator's job.
    pub async fn evaluate(
        &self,
        code: &str,
        booking_type: BookingType,
        amount: Money,
    ) -> Result<DiscountResult, PromoError> {
        let normalized = code.trim().to_uppercase();
        if normalized.is_empty() {
            return Err(PromoError::NotFound);
        }

        let offer = self
            .store
            .find_by_code(&normalized)
            .await?
            .ok_or(PromoError::NotFound)?;

        let result = compute_discount(&offer, booking_type, amount, Utc::now());
        if let Err(reason) = &result {
            tracing::debug!(code = %normalized, %reason, "promo code rejected");
        }
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{OfferConditions, OfferType, UsageLimit};
    use async_trait::async_trait;
    use chrono::Duration;
    use uuid::Uuid;

    fn offer(discount_type: DiscountKind, discount_value: f64) -> Offer {
        let now = Utc::now();
        Offer {
            id: Uuid::new_v4(),
            title: "Test Offer".to_string(),
            description: "test".to_string(),
            offer_type: OfferType::Flight,
            discount_type,
            discount_value,
            conditions: OfferConditions::default(),
            promo_code: Some("TEST".to_string()),
            usage_limit: UsageLimit::default(),
            usage_count: 0,
            is_active: true,
            valid_from: now - Duration::days(1),
            valid_until: now + Duration::days(1),
            image: None,
            priority: 0,
            created_at: now - Duration::days(1),
        }
    }

    #[test]
    fn percentage_discount_is_capped_at_maximum() {
        let mut o = offer(DiscountKind::Percentage, 20.0);
        o.conditions.maximum_discount = Some(50.0);
        let result = compute_discount(&o, BookingType::Flight, 500.0, Utc::now()).unwrap();
        // 20% of 500 = 100, capped to 50.
        assert_eq!(result.discount_amount, 50.0);

        // Below the cap the raw percentage applies.
        let result = compute_discount(&o, BookingType::Flight, 100.0, Utc::now()).unwrap();
        assert_eq!(result.discount_amount, 20.0);
    }

    #[test]
    fn uncapped_percentage_scales_with_amount() {
        let o = offer(DiscountKind::Percentage, 15.0);
        let result = compute_discount(&o, BookingType::Flight, 333.33, Utc::now()).unwrap();
        assert_eq!(result.discount_amount, 50.0);
    }

    #[test]
    fn fixed_discount_is_the_configured_value() {
        let o = offer(DiscountKind::Fixed, 30.0);
        let result = compute_discount(&o, BookingType::Flight, 100.0, Utc::now()).unwrap();
        assert_eq!(result.discount_amount, 30.0);
        assert_eq!(result.discount_value, 30.0);
    }

    #[test]
    fn fixed_discount_never_exceeds_the_booking_amount() {
        let o = offer(DiscountKind::Fixed, 75.0);
        let result = compute_discount(&o, BookingType::Flight, 40.0, Utc::now()).unwrap();
        assert_eq!(result.discount_amount, 40.0);
    }

    #[test]
    fn bogo_is_rejected_rather_than_guessed() {
        let o = offer(DiscountKind::Bogo, 1.0);
        let err = compute_discount(&o, BookingType::Flight, 100.0, Utc::now()).unwrap_err();
        assert!(matches!(err, PromoError::UnsupportedDiscount));
    }

    #[test]
    fn type_mismatch_unless_general() {
        let o = offer(DiscountKind::Fixed, 10.0);
        let err = compute_discount(&o, BookingType::Hotel, 100.0, Utc::now()).unwrap_err();
        assert!(matches!(err, PromoError::TypeMismatch));

        let mut general = offer(DiscountKind::Fixed, 10.0);
        general.offer_type = OfferType::General;
        assert!(compute_discount(&general, BookingType::Hotel, 100.0, Utc::now()).is_ok());
    }

    #[test]
    fn minimum_amount_boundary_is_eligible() {
        let mut o = offer(DiscountKind::Fixed, 10.0);
        o.conditions.minimum_amount = Some(200.0);

        let err = compute_discount(&o, BookingType::Flight, 199.99, Utc::now()).unwrap_err();
        match err {
            PromoError::BelowMinimum { minimum } => assert_eq!(minimum, 200.0),
            other => panic!("expected BelowMinimum, got {other:?}"),
        }

        // Equality passes.
        assert!(compute_discount(&o, BookingType::Flight, 200.0, Utc::now()).is_ok());
    }

    #[test]
    fn exhausted_usage_limit_wins_even_when_everything_else_passes() {
        let mut o = offer(DiscountKind::Percentage, 10.0);
        o.usage_limit.total = Some(100);
        o.usage_count = 100;
        let err = compute_discount(&o, BookingType::Flight, 500.0, Utc::now()).unwrap_err();
        assert!(matches!(err, PromoError::LimitExceeded));
    }

    #[test]
    fn expired_and_inactive_offers_read_as_not_found() {
        let now = Utc::now();
        let mut expired = offer(DiscountKind::Fixed, 10.0);
        expired.valid_until = now - Duration::days(1);
        assert!(matches!(
            compute_discount(&expired, BookingType::Flight, 100.0, now).unwrap_err(),
            PromoError::NotFound
        ));

        let mut disabled = offer(DiscountKind::Fixed, 10.0);
        disabled.is_active = false;
        assert!(matches!(
            compute_discount(&disabled, BookingType::Flight, 100.0, now).unwrap_err(),
            PromoError::NotFound
        ));
    }

    #[test]
    fn evaluation_is_idempotent() {
        let o = offer(DiscountKind::Percentage, 20.0);
        let now = Utc::now();
        let first = compute_discount(&o, BookingType::Flight, 250.0, now).unwrap();
        let second = compute_discount(&o, BookingType::Flight, 250.0, now).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn discount_rounds_half_away_from_zero() {
        // 12.5% of 1.00 = 0.125 -> 0.13.
        let o = offer(DiscountKind::Percentage, 12.5);
        let result = compute_discount(&o, BookingType::Flight, 1.0, Utc::now()).unwrap();
        assert_eq!(result.discount_amount, 0.13);
    }

    struct SingleOfferStore(Offer);

    #[async_trait]
    impl OfferStore for SingleOfferStore {
        async fn find_by_code(&self, code: &str) -> Result<Option<Offer>, StoreError> {
            Ok((self.0.promo_code.as_deref() == Some(code)).then(|| self.0.clone()))
        }

        async fn list_current(
            &self,
            _scope: Option<OfferType>,
            _limit: usize,
        ) -> Result<Vec<Offer>, StoreError> {
            Ok(vec![self.0.clone()])
        }

        async fn featured(&self, _limit: usize) -> Result<Vec<Offer>, StoreError> {
            Ok(vec![])
        }

        async fn redeem(&self, _code: &str) -> Result<bool, StoreError> {
            Ok(true)
        }
    }

    #[tokio::test]
    async fn lookup_is_case_insensitive() {
        let mut o = offer(DiscountKind::Fixed, 10.0);
        o.promo_code = Some("SUMMER20".to_string());
        let evaluator = PromoEvaluator::new(Arc::new(SingleOfferStore(o)));

        let result = evaluator
            .evaluate(" summer20 ", BookingType::Flight, 100.0)
            .await
            .unwrap();
        assert_eq!(result.discount_amount, 10.0);
    }

    #[tokio::test]
    async fn unknown_codes_are_not_found() {
        let evaluator = PromoEvaluator::new(Arc::new(SingleOfferStore(offer(
            DiscountKind::Fixed,
            10.0,
        ))));
        let err = evaluator
            .evaluate("NOPE", BookingType::Flight, 100.0)
            .await
            .unwrap_err();
        assert!(matches!(err, PromoError::NotFound));
    }
}

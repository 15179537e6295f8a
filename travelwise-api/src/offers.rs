use axum::{
    extract::{Query, State},
    Json,
};
use serde::{Deserialize, Serialize};

use travelwise_core::BookingType;
use travelwise_offer::{DiscountResult, Offer, OfferType};

use crate::error::AppError;
use crate::state::AppState;

const DEFAULT_LIST_LIMIT: usize = 10;
const FEATURED_LIMIT: usize = 6;

// ============================================================================
// Request/Response Types
// ============================================================================

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListOffersQuery {
    /// "flight" | "hotel" | "car" | "package" | "general" | "all"
    #[serde(rename = "type")]
    pub offer_type: Option<String>,
    pub limit: Option<usize>,
}

#[derive(Debug, Serialize)]
pub struct OffersResponse {
    pub offers: Vec<Offer>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidatePromoRequest {
    pub promo_code: String,
    pub booking_type: String,
    pub amount: f64,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidatePromoResponse {
    pub valid: bool,
    pub offer: DiscountResult,
}

// ============================================================================
// Handlers
// ============================================================================

/// GET /offers — currently-valid offers, optionally scoped to one category.
pub async fn list(
    State(state): State<AppState>,
    Query(query): Query<ListOffersQuery>,
) -> Result<Json<OffersResponse>, AppError> {
    let scope = match query.offer_type.as_deref() {
        None | Some("all") => None,
        Some(raw) => Some(raw.parse::<OfferType>().map_err(AppError::BadRequest)?),
    };
    let limit = query.limit.unwrap_or(DEFAULT_LIST_LIMIT);

    let offers = state.offers.list_current(scope, limit).await?;
    Ok(Json(OffersResponse { offers }))
}

/// GET /offers/featured
pub async fn featured(State(state): State<AppState>) -> Result<Json<OffersResponse>, AppError> {
    let offers = state.offers.featured(FEATURED_LIMIT).await?;
    Ok(Json(OffersResponse { offers }))
}

/// POST /offers/validate-promo — computes eligibility and discount only;
/// redemption is persisted at checkout, not here.
pub async fn validate_promo(
    State(state): State<AppState>,
    Json(req): Json<ValidatePromoRequest>,
) -> Result<Json<ValidatePromoResponse>, AppError> {
    let booking_type = req
        .booking_type
        .parse::<BookingType>()
        .map_err(AppError::BadRequest)?;
    if !req.amount.is_finite() || req.amount < 0.0 {
        return Err(AppError::BadRequest("amount must be a non-negative number".into()));
    }

    let offer = state
        .evaluator
        .evaluate(&req.promo_code, booking_type, req.amount)
        .await?;

    Ok(Json(ValidatePromoResponse { valid: true, offer }))
}

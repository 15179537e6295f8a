use axum::{
    extract::{Query, State},
    Json,
};
use serde::{Deserialize, Serialize};

use travelwise_catalog::criteria::{HotelSearchCriteria, HotelSortKey};
use travelwise_catalog::search::search_hotels;
use travelwise_catalog::Hotel;

use crate::error::AppError;
use crate::state::AppState;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HotelSearchQuery {
    pub destination: String,
    pub check_in: String,
    pub check_out: String,
    pub max_price: Option<f64>,
    pub min_rating: Option<f64>,
    pub sort_by: Option<String>,
}

impl HotelSearchQuery {
    fn to_criteria(&self) -> Result<HotelSearchCriteria, AppError> {
        let check_in = self
            .check_in
            .parse()
            .map_err(|_| AppError::BadRequest(format!("invalid checkIn: {}", self.check_in)))?;
        let check_out = self
            .check_out
            .parse()
            .map_err(|_| AppError::BadRequest(format!("invalid checkOut: {}", self.check_out)))?;
        let sort_by = self
            .sort_by
            .as_deref()
            .map(|s| s.parse::<HotelSortKey>().map_err(AppError::BadRequest))
            .transpose()?
            .unwrap_or_default();

        HotelSearchCriteria::new(
            &self.destination,
            check_in,
            check_out,
            self.max_price,
            self.min_rating,
            sort_by,
        )
        .map_err(AppError::BadRequest)
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HotelSearchResponse {
    pub hotels: Vec<Hotel>,
    pub total: usize,
    pub search_params: HotelSearchQuery,
}

/// GET /hotels/search
pub async fn search(
    State(state): State<AppState>,
    Query(query): Query<HotelSearchQuery>,
) -> Result<Json<HotelSearchResponse>, AppError> {
    let criteria = query.to_criteria()?;
    let candidates = state.catalog.hotels_in(&criteria.destination).await?;
    let hotels = search_hotels(&candidates, &criteria);

    Ok(Json(HotelSearchResponse {
        total: hotels.len(),
        hotels,
        search_params: query,
    }))
}

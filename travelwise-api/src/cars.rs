use axum::{
    extract::{Query, State},
    Json,
};
use serde::{Deserialize, Serialize};

use travelwise_catalog::criteria::{CarSearchCriteria, CarSortKey};
use travelwise_catalog::search::search_cars;
use travelwise_catalog::{Car, CarCategory, Transmission};

use crate::error::AppError;
use crate::state::AppState;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CarSearchQuery {
    pub location: String,
    pub pickup_date: String,
    pub dropoff_date: String,
    pub category: Option<String>,
    pub transmission: Option<String>,
    pub company: Option<String>,
    pub max_price: Option<f64>,
    pub sort_by: Option<String>,
}

impl CarSearchQuery {
    fn to_criteria(&self) -> Result<CarSearchCriteria, AppError> {
        let pickup_date = self.pickup_date.parse().map_err(|_| {
            AppError::BadRequest(format!("invalid pickupDate: {}", self.pickup_date))
        })?;
        let dropoff_date = self.dropoff_date.parse().map_err(|_| {
            AppError::BadRequest(format!("invalid dropoffDate: {}", self.dropoff_date))
        })?;
        let category = self
            .category
            .as_deref()
            .map(|c| c.parse::<CarCategory>().map_err(AppError::BadRequest))
            .transpose()?;
        let transmission = self
            .transmission
            .as_deref()
            .map(|t| t.parse::<Transmission>().map_err(AppError::BadRequest))
            .transpose()?;
        let sort_by = self
            .sort_by
            .as_deref()
            .map(|s| s.parse::<CarSortKey>().map_err(AppError::BadRequest))
            .transpose()?
            .unwrap_or_default();

        CarSearchCriteria::new(
            &self.location,
            pickup_date,
            dropoff_date,
            category,
            transmission,
            self.company.clone(),
            self.max_price,
            sort_by,
        )
        .map_err(AppError::BadRequest)
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CarSearchResponse {
    pub cars: Vec<Car>,
    pub total: usize,
    pub search_params: CarSearchQuery,
}

/// GET /cars/search
pub async fn search(
    State(state): State<AppState>,
    Query(query): Query<CarSearchQuery>,
) -> Result<Json<CarSearchResponse>, AppError> {
    let criteria = query.to_criteria()?;
    let candidates = state.catalog.cars_in(&criteria.location).await?;
    let cars = search_cars(&candidates, &criteria);

    Ok(Json(CarSearchResponse {
        total: cars.len(),
        cars,
        search_params: query,
    }))
}

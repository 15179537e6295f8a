use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use travelwise_catalog::aggregate::{
    airline_directory, popular_destinations, AirlineSummary, DestinationSummary,
};
use travelwise_catalog::criteria::{FlightSearchCriteria, FlightSortKey, StopsFilter};
use travelwise_catalog::search::search_flights;
use travelwise_catalog::{Flight, TravelClass};

use crate::error::AppError;
use crate::state::AppState;

const POPULAR_DESTINATIONS_LIMIT: usize = 10;

// ============================================================================
// Request/Response Types
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FlightSearchQuery {
    pub from: String,
    pub to: String,
    pub depart_date: String,
    pub return_date: Option<String>,
    pub passengers: Option<u32>,
    #[serde(rename = "class")]
    pub travel_class: Option<String>,
    pub max_price: Option<f64>,
    pub stops: Option<String>,
    /// Comma-separated airline codes.
    pub airlines: Option<String>,
    pub sort_by: Option<String>,
}

impl FlightSearchQuery {
    fn to_criteria(&self) -> Result<FlightSearchCriteria, AppError> {
        let depart_date = self
            .depart_date
            .parse()
            .map_err(|_| AppError::BadRequest(format!("invalid departDate: {}", self.depart_date)))?;
        let return_date = self
            .return_date
            .as_deref()
            .map(|d| {
                d.parse()
                    .map_err(|_| AppError::BadRequest(format!("invalid returnDate: {d}")))
            })
            .transpose()?;
        let travel_class = self
            .travel_class
            .as_deref()
            .unwrap_or("economy")
            .parse::<TravelClass>()
            .map_err(AppError::BadRequest)?;
        let stops = self
            .stops
            .as_deref()
            .map(|s| s.parse::<StopsFilter>().map_err(AppError::BadRequest))
            .transpose()?;
        let airlines = self
            .airlines
            .as_deref()
            .map(|list| list.split(',').map(str::to_string).collect::<Vec<_>>());
        let sort_by = self
            .sort_by
            .as_deref()
            .map(|s| s.parse::<FlightSortKey>().map_err(AppError::BadRequest))
            .transpose()?
            .unwrap_or_default();

        FlightSearchCriteria::new(
            &self.from,
            &self.to,
            depart_date,
            return_date,
            self.passengers.unwrap_or(1),
            travel_class,
            self.max_price,
            stops,
            airlines,
            sort_by,
        )
        .map_err(AppError::BadRequest)
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FlightSearchResponse {
    pub flights: Vec<Flight>,
    pub total: usize,
    pub search_params: FlightSearchQuery,
}

#[derive(Debug, Serialize)]
pub struct FlightResponse {
    pub flight: Flight,
}

#[derive(Debug, Serialize)]
pub struct DestinationsResponse {
    pub destinations: Vec<DestinationSummary>,
}

#[derive(Debug, Serialize)]
pub struct AirlinesResponse {
    pub airlines: Vec<AirlineSummary>,
}

// ============================================================================
// Handlers
// ============================================================================

/// GET /flights/search
pub async fn search(
    State(state): State<AppState>,
    Query(query): Query<FlightSearchQuery>,
) -> Result<Json<FlightSearchResponse>, AppError> {
    let criteria = query.to_criteria()?;

    let candidates = state
        .catalog
        .flights_on_route(&criteria.origin, &criteria.destination, criteria.depart_date)
        .await?;
    let flights = search_flights(&candidates, &criteria);

    tracing::debug!(
        origin = %criteria.origin,
        destination = %criteria.destination,
        candidates = candidates.len(),
        matched = flights.len(),
        "flight search"
    );

    Ok(Json(FlightSearchResponse {
        total: flights.len(),
        flights,
        search_params: query,
    }))
}

/// GET /flights/{id}
pub async fn get_flight(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<FlightResponse>, AppError> {
    let flight = state
        .catalog
        .flight(id)
        .await?
        .ok_or_else(|| AppError::NotFound("Flight not found".to_string()))?;
    Ok(Json(FlightResponse { flight }))
}

/// GET /flights/destinations/popular
pub async fn popular(
    State(state): State<AppState>,
) -> Result<Json<DestinationsResponse>, AppError> {
    let flights = state.catalog.active_flights().await?;
    Ok(Json(DestinationsResponse {
        destinations: popular_destinations(&flights, POPULAR_DESTINATIONS_LIMIT),
    }))
}

/// GET /flights/airlines/list
pub async fn airlines(State(state): State<AppState>) -> Result<Json<AirlinesResponse>, AppError> {
    let flights = state.catalog.active_flights().await?;
    Ok(Json(AirlinesResponse {
        airlines: airline_directory(&flights),
    }))
}

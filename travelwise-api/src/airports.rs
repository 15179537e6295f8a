use axum::{
    extract::{Query, State},
    Json,
};
use serde::Deserialize;

use travelwise_core::airports::{AirportSuggestion, MAX_SUGGESTIONS, MIN_QUERY_LEN};

use crate::error::AppError;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct AirportQuery {
    pub q: Option<String>,
}

/// GET /airports?q= — autocomplete suggestions. Queries shorter than
/// three characters return an empty list without calling the lookup
/// service.
pub async fn search(
    State(state): State<AppState>,
    Query(query): Query<AirportQuery>,
) -> Result<Json<Vec<AirportSuggestion>>, AppError> {
    let keyword = query.q.as_deref().unwrap_or("").trim().to_string();
    if keyword.len() < MIN_QUERY_LEN {
        return Ok(Json(vec![]));
    }

    let mut suggestions = state.airports.search(&keyword).await?;
    suggestions.truncate(MAX_SUGGESTIONS);
    Ok(Json(suggestions))
}

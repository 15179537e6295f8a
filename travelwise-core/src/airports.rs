use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::StoreError;

/// Queries shorter than this return an empty suggestion list without
/// touching the lookup service.
pub const MIN_QUERY_LEN: usize = 3;

/// Upper bound on suggestions returned to the client.
pub const MAX_SUGGESTIONS: usize = 10;

/// One autocomplete suggestion, shaped for the search widgets.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AirportSuggestion {
    /// Display label, e.g. "Heathrow (LHR)".
    pub label: String,
    pub iata_code: String,
    pub city: String,
    pub country: String,
}

/// Keyed airport/city lookup, treated as a black box. The production
/// implementation talks to the Amadeus reference-data API.
#[async_trait]
pub trait AirportLookup: Send + Sync {
    async fn search(&self, keyword: &str) -> Result<Vec<AirportSuggestion>, StoreError>;
}

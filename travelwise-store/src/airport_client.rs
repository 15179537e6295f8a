use async_trait::async_trait;
use serde::Deserialize;
use std::time::{Duration, Instant};
use tokio::sync::Mutex;

use travelwise_core::airports::{AirportLookup, AirportSuggestion, MAX_SUGGESTIONS};
use travelwise_core::{StoreError, StoreResult};

use crate::app_config::AmadeusConfig;

/// Amadeus reference-data client: client-credentials OAuth with a cached
/// token, then keyword lookups against the locations endpoint.
pub struct AmadeusClient {
    http: reqwest::Client,
    base_url: String,
    client_id: String,
    client_secret: String,
    token: Mutex<Option<CachedToken>>,
}

struct CachedToken {
    access_token: String,
    expires_at: Instant,
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    expires_in: u64,
}

#[derive(Debug, Deserialize)]
struct LocationsResponse {
    #[serde(default)]
    data: Vec<Location>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Location {
    name: String,
    iata_code: String,
    address: LocationAddress,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct LocationAddress {
    city_name: String,
    country_name: String,
}

fn http_err(e: reqwest::Error) -> StoreError {
    StoreError::Unavailable(e.to_string())
}

impl AmadeusClient {
    pub fn new(config: &AmadeusConfig) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: config.base_url.trim_end_matches('/').to_string(),
            client_id: config.client_id.clone(),
            client_secret: config.client_secret.clone(),
            token: Mutex::new(None),
        }
    }

    async fn access_token(&self) -> StoreResult<String> {
        let mut guard = self.token.lock().await;
        if let Some(cached) = guard.as_ref() {
            if cached.expires_at > Instant::now() {
                return Ok(cached.access_token.clone());
            }
        }

        let url = format!("{}/v1/security/oauth2/token", self.base_url);
        let response = self
            .http
            .post(&url)
            .form(&[
                ("grant_type", "client_credentials"),
                ("client_id", self.client_id.as_str()),
                ("client_secret", self.client_secret.as_str()),
            ])
            .send()
            .await
            .map_err(http_err)?
            .error_for_status()
            .map_err(http_err)?;

        let token: TokenResponse = response.json().await.map_err(http_err)?;
        // Refresh a little early so an in-flight request never carries a
        // token that expires mid-call.
        let ttl = token.expires_in.saturating_sub(30);
        let cached = CachedToken {
            access_token: token.access_token.clone(),
            expires_at: Instant::now() + Duration::from_secs(ttl),
        };
        *guard = Some(cached);
        Ok(token.access_token)
    }
}

#[async_trait]
impl AirportLookup for AmadeusClient {
    async fn search(&self, keyword: &str) -> StoreResult<Vec<AirportSuggestion>> {
        let token = self.access_token().await?;
        let url = format!("{}/v1/reference-data/locations", self.base_url);
        let response = self
            .http
            .get(&url)
            .bearer_auth(token)
            .query(&[
                ("keyword", keyword),
                ("subType", "CITY,AIRPORT"),
                ("page[limit]", &MAX_SUGGESTIONS.to_string()),
            ])
            .send()
            .await
            .map_err(http_err)?
            .error_for_status()
            .map_err(http_err)?;

        let body: LocationsResponse = response.json().await.map_err(http_err)?;
        Ok(body
            .data
            .into_iter()
            .take(MAX_SUGGESTIONS)
            .map(|loc| AirportSuggestion {
                label: format!("{} ({})", loc.name, loc.iata_code),
                iata_code: loc.iata_code,
                city: loc.address.city_name,
                country: loc.address.country_name,
            })
            .collect())
    }
}

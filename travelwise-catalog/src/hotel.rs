use serde::{Deserialize, Serialize};
use uuid::Uuid;

use travelwise_core::money::Money;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct NightlyPricing {
    pub base_rate: Money,
    pub currency: String,
    #[serde(default)]
    pub taxes_included: bool,
}

/// A hotel catalog record.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Hotel {
    pub id: Uuid,
    pub name: String,
    pub city: String,
    pub country: String,
    /// Star classification, 1-5.
    pub stars: u8,
    /// Average guest rating, 0.0-5.0.
    pub rating: f64,
    #[serde(default)]
    pub review_count: u32,
    #[serde(default)]
    pub amenities: Vec<String>,
    pub pricing: NightlyPricing,
    pub is_active: bool,
}

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

use travelwise_core::money::Money;

/// Cabin classes a seat can be sold in. `economy` pricing is always
/// present on a flight document; the others are optional.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "camelCase")]
pub enum TravelClass {
    Economy,
    PremiumEconomy,
    Business,
    First,
}

impl TravelClass {
    pub fn as_str(self) -> &'static str {
        match self {
            TravelClass::Economy => "economy",
            TravelClass::PremiumEconomy => "premiumEconomy",
            TravelClass::Business => "business",
            TravelClass::First => "first",
        }
    }
}

impl fmt::Display for TravelClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TravelClass {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "economy" => Ok(TravelClass::Economy),
            "premiumEconomy" => Ok(TravelClass::PremiumEconomy),
            "business" => Ok(TravelClass::Business),
            "first" => Ok(TravelClass::First),
            other => Err(format!("unknown travel class: {other}")),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Airline {
    pub name: String,
    pub code: String,
    pub logo: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Airport {
    pub code: String,
    pub name: String,
    pub city: String,
    pub country: String,
}

/// Departure or arrival side of a flight.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct FlightEndpoint {
    pub airport: Airport,
    pub terminal: Option<String>,
    pub gate: Option<String>,
    pub time: DateTime<Utc>,
}

/// An intermediate stop on a non-direct flight.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Stop {
    pub airport: Airport,
    /// Layover duration in minutes.
    pub duration: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CabinPricing {
    pub available: i32,
    pub price: Money,
    pub currency: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct FlightPricing {
    pub economy: CabinPricing,
    pub premium_economy: Option<CabinPricing>,
    pub business: Option<CabinPricing>,
    pub first: Option<CabinPricing>,
}

impl FlightPricing {
    pub fn cabin(&self, class: TravelClass) -> Option<&CabinPricing> {
        match class {
            TravelClass::Economy => Some(&self.economy),
            TravelClass::PremiumEconomy => self.premium_economy.as_ref(),
            TravelClass::Business => self.business.as_ref(),
            TravelClass::First => self.first.as_ref(),
        }
    }
}

/// A flight catalog record. Only `is_active == true` records are
/// eligible for search results.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Flight {
    pub id: Uuid,
    pub airline: Airline,
    pub flight_number: String,
    pub aircraft: Option<String>,
    pub departure: FlightEndpoint,
    pub arrival: FlightEndpoint,
    /// Total travel time in minutes.
    pub duration: i64,
    #[serde(default)]
    pub stops: Vec<Stop>,
    pub pricing: FlightPricing,
    #[serde(default)]
    pub amenities: Vec<String>,
    pub is_active: bool,
}

impl Flight {
    pub fn is_nonstop(&self) -> bool {
        self.stops.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flight_document_round_trips_as_camel_case() {
        let json = r#"{
            "id": "4b59bd9e-5e9b-4a5c-9b16-6ab10cc1cf27",
            "airline": {"name": "Skyline Air", "code": "SK", "logo": null},
            "flightNumber": "SK101",
            "aircraft": "A320",
            "departure": {
                "airport": {"code": "JFK", "name": "John F. Kennedy", "city": "New York", "country": "USA"},
                "terminal": "4", "gate": null, "time": "2026-09-12T08:30:00Z"
            },
            "arrival": {
                "airport": {"code": "LHR", "name": "Heathrow", "city": "London", "country": "UK"},
                "terminal": null, "gate": null, "time": "2026-09-12T20:45:00Z"
            },
            "duration": 435,
            "stops": [],
            "pricing": {
                "economy": {"available": 42, "price": 389.0, "currency": "USD"},
                "premiumEconomy": null, "business": null, "first": null
            },
            "amenities": ["wifi", "meals"],
            "isActive": true
        }"#;
        let flight: Flight = serde_json::from_str(json).expect("deserialize flight");
        assert_eq!(flight.airline.code, "SK");
        assert!(flight.is_nonstop());
        assert_eq!(flight.pricing.cabin(TravelClass::Economy).unwrap().price, 389.0);
        assert!(flight.pricing.cabin(TravelClass::Business).is_none());
    }
}

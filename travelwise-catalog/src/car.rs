use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

use travelwise_core::money::Money;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum CarCategory {
    Economy,
    Compact,
    MidSize,
    FullSize,
    Luxury,
    Suv,
    Convertible,
}

impl FromStr for CarCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "economy" => Ok(CarCategory::Economy),
            "compact" => Ok(CarCategory::Compact),
            "mid-size" => Ok(CarCategory::MidSize),
            "full-size" => Ok(CarCategory::FullSize),
            "luxury" => Ok(CarCategory::Luxury),
            "suv" => Ok(CarCategory::Suv),
            "convertible" => Ok(CarCategory::Convertible),
            other => Err(format!("unknown car category: {other}")),
        }
    }
}

impl fmt::Display for CarCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            CarCategory::Economy => "economy",
            CarCategory::Compact => "compact",
            CarCategory::MidSize => "mid-size",
            CarCategory::FullSize => "full-size",
            CarCategory::Luxury => "luxury",
            CarCategory::Suv => "suv",
            CarCategory::Convertible => "convertible",
        };
        f.write_str(s)
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Transmission {
    Automatic,
    Manual,
}

impl FromStr for Transmission {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "automatic" => Ok(Transmission::Automatic),
            "manual" => Ok(Transmission::Manual),
            other => Err(format!("unknown transmission: {other}")),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RentalCompany {
    pub name: String,
    pub rating: Option<f64>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RentalPricing {
    pub daily_rate: Money,
    pub weekly_rate: Option<Money>,
    pub currency: String,
}

/// A rental-car catalog record. `locations` is the list of pickup cities
/// the car can be collected in.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Car {
    pub id: Uuid,
    pub make: String,
    pub model: String,
    pub year: u16,
    pub category: CarCategory,
    pub transmission: Transmission,
    pub seats: u8,
    pub company: RentalCompany,
    pub pricing: RentalPricing,
    pub locations: Vec<String>,
    pub is_active: bool,
}

impl Car {
    pub fn picks_up_in(&self, city: &str) -> bool {
        self.locations.iter().any(|l| l.eq_ignore_ascii_case(city))
    }
}

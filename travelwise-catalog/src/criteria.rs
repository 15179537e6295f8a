use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

use travelwise_core::money::Money;

use crate::car::{CarCategory, Transmission};
use crate::flight::TravelClass;

/// Search results never exceed this many items, before the availability
/// post-filter runs.
pub const RESULT_CAP: usize = 50;

/// Stop-count constraint for flight searches.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum StopsFilter {
    /// Zero intermediate stops.
    Nonstop,
    /// Exactly one intermediate stop.
    OneStop,
}

impl FromStr for StopsFilter {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "nonstop" => Ok(StopsFilter::Nonstop),
            "1stop" => Ok(StopsFilter::OneStop),
            other => Err(format!("unknown stops filter: {other}")),
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub enum FlightSortKey {
    #[default]
    Price,
    Duration,
    Departure,
}

impl FromStr for FlightSortKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "price" => Ok(FlightSortKey::Price),
            "duration" => Ok(FlightSortKey::Duration),
            "departure" => Ok(FlightSortKey::Departure),
            other => Err(format!("unknown sort key: {other}")),
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub enum HotelSortKey {
    #[default]
    Price,
    Rating,
}

impl FromStr for HotelSortKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "price" => Ok(HotelSortKey::Price),
            "rating" => Ok(HotelSortKey::Rating),
            other => Err(format!("unknown sort key: {other}")),
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub enum CarSortKey {
    #[default]
    Price,
    Company,
}

impl FromStr for CarSortKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "price" => Ok(CarSortKey::Price),
            "company" => Ok(CarSortKey::Company),
            other => Err(format!("unknown sort key: {other}")),
        }
    }
}

/// Validated flight search criteria. Airport codes are normalized to
/// uppercase by `new`; predicates are only ever built from this type,
/// never from raw query strings.
#[derive(Debug, Clone, PartialEq)]
pub struct FlightSearchCriteria {
    pub origin: String,
    pub destination: String,
    pub depart_date: NaiveDate,
    pub return_date: Option<NaiveDate>,
    pub passengers: u32,
    pub travel_class: TravelClass,
    pub max_price: Option<Money>,
    pub stops: Option<StopsFilter>,
    pub airlines: Option<Vec<String>>,
    pub sort_by: FlightSortKey,
}

impl FlightSearchCriteria {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        origin: &str,
        destination: &str,
        depart_date: NaiveDate,
        return_date: Option<NaiveDate>,
        passengers: u32,
        travel_class: TravelClass,
        max_price: Option<Money>,
        stops: Option<StopsFilter>,
        airlines: Option<Vec<String>>,
        sort_by: FlightSortKey,
    ) -> Result<Self, String> {
        let origin = origin.trim().to_uppercase();
        let destination = destination.trim().to_uppercase();
        if origin.is_empty() || destination.is_empty() {
            return Err("origin and destination are required".into());
        }
        if origin == destination {
            return Err("origin and destination must differ".into());
        }
        if passengers == 0 {
            return Err("passenger count must be at least 1".into());
        }
        if let Some(ret) = return_date {
            if ret < depart_date {
                return Err("return date must not precede the departure date".into());
            }
        }
        if let Some(price) = max_price {
            if price <= 0.0 {
                return Err("maxPrice must be positive".into());
            }
        }
        let airlines = airlines.map(|list| {
            list.into_iter()
                .map(|a| a.trim().to_uppercase())
                .filter(|a| !a.is_empty())
                .collect::<Vec<_>>()
        });
        Ok(Self {
            origin,
            destination,
            depart_date,
            return_date,
            passengers,
            travel_class,
            max_price,
            stops,
            airlines,
            sort_by,
        })
    }
}

/// Validated hotel search criteria.
#[derive(Debug, Clone, PartialEq)]
pub struct HotelSearchCriteria {
    pub destination: String,
    pub check_in: NaiveDate,
    pub check_out: NaiveDate,
    pub max_nightly_rate: Option<Money>,
    pub min_rating: Option<f64>,
    pub sort_by: HotelSortKey,
}

impl HotelSearchCriteria {
    pub fn new(
        destination: &str,
        check_in: NaiveDate,
        check_out: NaiveDate,
        max_nightly_rate: Option<Money>,
        min_rating: Option<f64>,
        sort_by: HotelSortKey,
    ) -> Result<Self, String> {
        let destination = destination.trim().to_string();
        if destination.is_empty() {
            return Err("destination is required".into());
        }
        if check_out <= check_in {
            return Err("check-out must be after check-in".into());
        }
        Ok(Self {
            destination,
            check_in,
            check_out,
            max_nightly_rate,
            min_rating,
            sort_by,
        })
    }
}

/// Validated car search criteria.
#[derive(Debug, Clone, PartialEq)]
pub struct CarSearchCriteria {
    pub location: String,
    pub pickup_date: NaiveDate,
    pub dropoff_date: NaiveDate,
    pub category: Option<CarCategory>,
    pub transmission: Option<Transmission>,
    pub company: Option<String>,
    pub max_daily_rate: Option<Money>,
    pub sort_by: CarSortKey,
}

impl CarSearchCriteria {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        location: &str,
        pickup_date: NaiveDate,
        dropoff_date: NaiveDate,
        category: Option<CarCategory>,
        transmission: Option<Transmission>,
        company: Option<String>,
        max_daily_rate: Option<Money>,
        sort_by: CarSortKey,
    ) -> Result<Self, String> {
        let location = location.trim().to_string();
        if location.is_empty() {
            return Err("pickup location is required".into());
        }
        if dropoff_date < pickup_date {
            return Err("drop-off date must not precede the pickup date".into());
        }
        Ok(Self {
            location,
            pickup_date,
            dropoff_date,
            category,
            transmission,
            company,
            max_daily_rate,
            sort_by,
        })
    }
}

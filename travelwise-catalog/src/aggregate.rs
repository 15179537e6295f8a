//! Grouping reports over the flight catalog. These are not part of the
//! search path, but share its "active items only" predicate.

use serde::Serialize;

use travelwise_core::money::Money;

use crate::flight::Flight;

/// One row of the popular-destinations report: active flights grouped by
/// arrival city, with first-seen country/airport representatives.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DestinationSummary {
    pub city: String,
    pub country: String,
    pub airport: String,
    pub count: usize,
    pub min_price: Money,
}

pub fn popular_destinations(catalog: &[Flight], limit: usize) -> Vec<DestinationSummary> {
    let mut groups: Vec<DestinationSummary> = Vec::new();
    for flight in catalog.iter().filter(|f| f.is_active) {
        let arrival = &flight.arrival.airport;
        let economy_price = flight.pricing.economy.price;
        match groups.iter_mut().find(|g| g.city == arrival.city) {
            Some(group) => {
                group.count += 1;
                group.min_price = group.min_price.min(economy_price);
            }
            None => groups.push(DestinationSummary {
                city: arrival.city.clone(),
                country: arrival.country.clone(),
                airport: arrival.code.clone(),
                count: 1,
                min_price: economy_price,
            }),
        }
    }
    // Descending by member count; stable, so equal counts keep first-seen order.
    groups.sort_by(|a, b| b.count.cmp(&a.count));
    groups.truncate(limit);
    groups
}

/// One row of the airline directory: active flights grouped by airline
/// code, first-seen name and logo.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AirlineSummary {
    pub code: String,
    pub name: String,
    pub logo: Option<String>,
}

pub fn airline_directory(catalog: &[Flight]) -> Vec<AirlineSummary> {
    let mut airlines: Vec<AirlineSummary> = Vec::new();
    for flight in catalog.iter().filter(|f| f.is_active) {
        if !airlines.iter().any(|a| a.code == flight.airline.code) {
            airlines.push(AirlineSummary {
                code: flight.airline.code.clone(),
                name: flight.airline.name.clone(),
                logo: flight.airline.logo.clone(),
            });
        }
    }
    airlines.sort_by(|a, b| a.name.cmp(&b.name));
    airlines
}

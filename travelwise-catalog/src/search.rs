//! The search/filter/sort engine. Pure functions over a candidate slice:
//! the store narrows candidates server-side (route/day, city), and the
//! same predicates applied here make the engine correct over an
//! un-narrowed catalog too.

use crate::car::Car;
use crate::criteria::{
    CarSearchCriteria, CarSortKey, FlightSearchCriteria, FlightSortKey, HotelSearchCriteria,
    HotelSortKey, RESULT_CAP,
};
use crate::filter::{car_predicates, flight_predicates, hotel_predicates};
use crate::flight::Flight;
use crate::hotel::Hotel;

/// Filter, sort and cap flight candidates, then drop flights without
/// enough seats in the requested class. Availability is class-specific
/// and therefore runs after the flat predicates, like the source system.
pub fn search_flights(catalog: &[Flight], criteria: &FlightSearchCriteria) -> Vec<Flight> {
    let predicates = flight_predicates(criteria);
    let mut matches: Vec<Flight> = catalog
        .iter()
        .filter(|f| f.is_active)
        .filter(|f| predicates.iter().all(|p| p.matches(f)))
        .cloned()
        .collect();

    match criteria.sort_by {
        FlightSortKey::Price => {
            let class = criteria.travel_class;
            matches.sort_by(|a, b| {
                let pa = a.pricing.cabin(class).map_or(f64::INFINITY, |c| c.price);
                let pb = b.pricing.cabin(class).map_or(f64::INFINITY, |c| c.price);
                pa.total_cmp(&pb)
            });
        }
        FlightSortKey::Duration => matches.sort_by_key(|f| f.duration),
        FlightSortKey::Departure => matches.sort_by_key(|f| f.departure.time),
    }

    matches.truncate(RESULT_CAP);
    matches.retain(|f| {
        f.pricing
            .cabin(criteria.travel_class)
            .is_some_and(|cabin| cabin.available >= criteria.passengers as i32)
    });
    matches
}

pub fn search_hotels(catalog: &[Hotel], criteria: &HotelSearchCriteria) -> Vec<Hotel> {
    let predicates = hotel_predicates(criteria);
    let mut matches: Vec<Hotel> = catalog
        .iter()
        .filter(|h| h.is_active)
        .filter(|h| predicates.iter().all(|p| p.matches(h)))
        .cloned()
        .collect();

    match criteria.sort_by {
        HotelSortKey::Price => {
            matches.sort_by(|a, b| a.pricing.base_rate.total_cmp(&b.pricing.base_rate))
        }
        HotelSortKey::Rating => matches.sort_by(|a, b| a.rating.total_cmp(&b.rating)),
    }

    matches.truncate(RESULT_CAP);
    matches
}

pub fn search_cars(catalog: &[Car], criteria: &CarSearchCriteria) -> Vec<Car> {
    let predicates = car_predicates(criteria);
    let mut matches: Vec<Car> = catalog
        .iter()
        .filter(|c| c.is_active)
        .filter(|c| predicates.iter().all(|p| p.matches(c)))
        .cloned()
        .collect();

    match criteria.sort_by {
        CarSortKey::Price => {
            matches.sort_by(|a, b| a.pricing.daily_rate.total_cmp(&b.pricing.daily_rate))
        }
        CarSortKey::Company => matches.sort_by(|a, b| a.company.name.cmp(&b.company.name)),
    }

    matches.truncate(RESULT_CAP);
    matches
}

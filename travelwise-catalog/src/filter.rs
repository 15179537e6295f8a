//! Tagged filter predicates, one variant per supported constraint.
//!
//! The engine builds these explicitly from validated criteria and then
//! tests every candidate against all of them, instead of mutating an ad
//! hoc query object per request parameter.

use chrono::NaiveDate;

use travelwise_core::money::Money;

use crate::car::{Car, CarCategory, Transmission};
use crate::criteria::{
    CarSearchCriteria, FlightSearchCriteria, HotelSearchCriteria, StopsFilter,
};
use crate::flight::{Flight, TravelClass};
use crate::hotel::Hotel;

#[derive(Debug, Clone, PartialEq)]
pub enum FlightPredicate {
    Route { origin: String, destination: String },
    DepartsOn(NaiveDate),
    MaxPrice { class: TravelClass, ceiling: Money },
    Stops(StopsFilter),
    AirlineIn(Vec<String>),
}

impl FlightPredicate {
    pub fn matches(&self, flight: &Flight) -> bool {
        match self {
            FlightPredicate::Route { origin, destination } => {
                flight.departure.airport.code == *origin
                    && flight.arrival.airport.code == *destination
            }
            // Calendar-day window: [date 00:00, date+1 00:00).
            FlightPredicate::DepartsOn(date) => flight.departure.time.date_naive() == *date,
            FlightPredicate::MaxPrice { class, ceiling } => flight
                .pricing
                .cabin(*class)
                .is_some_and(|cabin| cabin.price <= *ceiling),
            FlightPredicate::Stops(StopsFilter::Nonstop) => flight.stops.is_empty(),
            FlightPredicate::Stops(StopsFilter::OneStop) => flight.stops.len() == 1,
            FlightPredicate::AirlineIn(codes) => codes.contains(&flight.airline.code),
        }
    }
}

pub fn flight_predicates(criteria: &FlightSearchCriteria) -> Vec<FlightPredicate> {
    let mut predicates = vec![
        FlightPredicate::Route {
            origin: criteria.origin.clone(),
            destination: criteria.destination.clone(),
        },
        FlightPredicate::DepartsOn(criteria.depart_date),
    ];
    if let Some(ceiling) = criteria.max_price {
        predicates.push(FlightPredicate::MaxPrice {
            class: criteria.travel_class,
            ceiling,
        });
    }
    if let Some(stops) = criteria.stops {
        predicates.push(FlightPredicate::Stops(stops));
    }
    if let Some(airlines) = &criteria.airlines {
        if !airlines.is_empty() {
            predicates.push(FlightPredicate::AirlineIn(airlines.clone()));
        }
    }
    predicates
}

#[derive(Debug, Clone, PartialEq)]
pub enum HotelPredicate {
    City(String),
    MaxNightlyRate(Money),
    MinRating(f64),
}

impl HotelPredicate {
    pub fn matches(&self, hotel: &Hotel) -> bool {
        match self {
            HotelPredicate::City(city) => hotel.city.eq_ignore_ascii_case(city),
            HotelPredicate::MaxNightlyRate(ceiling) => hotel.pricing.base_rate <= *ceiling,
            HotelPredicate::MinRating(floor) => hotel.rating >= *floor,
        }
    }
}

pub fn hotel_predicates(criteria: &HotelSearchCriteria) -> Vec<HotelPredicate> {
    let mut predicates = vec![HotelPredicate::City(criteria.destination.clone())];
    if let Some(ceiling) = criteria.max_nightly_rate {
        predicates.push(HotelPredicate::MaxNightlyRate(ceiling));
    }
    if let Some(floor) = criteria.min_rating {
        predicates.push(HotelPredicate::MinRating(floor));
    }
    predicates
}

#[derive(Debug, Clone, PartialEq)]
pub enum CarPredicate {
    PickupCity(String),
    Category(CarCategory),
    Transmission(Transmission),
    Company(String),
    MaxDailyRate(Money),
}

impl CarPredicate {
    pub fn matches(&self, car: &Car) -> bool {
        match self {
            CarPredicate::PickupCity(city) => car.picks_up_in(city),
            CarPredicate::Category(category) => car.category == *category,
            CarPredicate::Transmission(transmission) => car.transmission == *transmission,
            CarPredicate::Company(name) => car.company.name.eq_ignore_ascii_case(name),
            CarPredicate::MaxDailyRate(ceiling) => car.pricing.daily_rate <= *ceiling,
        }
    }
}

pub fn car_predicates(criteria: &CarSearchCriteria) -> Vec<CarPredicate> {
    let mut predicates = vec![CarPredicate::PickupCity(criteria.location.clone())];
    if let Some(category) = criteria.category {
        predicates.push(CarPredicate::Category(category));
    }
    if let Some(transmission) = criteria.transmission {
        predicates.push(CarPredicate::Transmission(transmission));
    }
    if let Some(company) = &criteria.company {
        predicates.push(CarPredicate::Company(company.clone()));
    }
    if let Some(ceiling) = criteria.max_daily_rate {
        predicates.push(CarPredicate::MaxDailyRate(ceiling));
    }
    predicates
}

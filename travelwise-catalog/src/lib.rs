pub mod aggregate;
pub mod car;
pub mod criteria;
pub mod filter;
pub mod flight;
pub mod hotel;
pub mod search;
pub mod store;

pub use car::{Car, CarCategory, Transmission};
pub use flight::{Airline, Airport, CabinPricing, Flight, FlightEndpoint, FlightPricing, TravelClass};
pub use hotel::{Hotel, NightlyPricing};
pub use store::CatalogStore;

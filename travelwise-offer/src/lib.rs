pub mod evaluator;
pub mod models;
pub mod store;

pub use evaluator::{DiscountResult, PromoError, PromoEvaluator};
pub use models::{DiscountKind, Offer, OfferConditions, OfferType, UsageLimit};
pub use store::OfferStore;

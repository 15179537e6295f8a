use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

use travelwise_core::money::Money;
use travelwise_core::BookingType;

/// Which booking categories an offer applies to. `General` applies to
/// all of them.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum OfferType {
    Flight,
    Hotel,
    Car,
    Package,
    General,
}

impl OfferType {
    pub fn applies_to(self, booking: BookingType) -> bool {
        match self {
            OfferType::General => true,
            OfferType::Flight => booking == BookingType::Flight,
            OfferType::Hotel => booking == BookingType::Hotel,
            OfferType::Car => booking == BookingType::Car,
            OfferType::Package => booking == BookingType::Package,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            OfferType::Flight => "flight",
            OfferType::Hotel => "hotel",
            OfferType::Car => "car",
            OfferType::Package => "package",
            OfferType::General => "general",
        }
    }
}

impl fmt::Display for OfferType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OfferType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "flight" => Ok(OfferType::Flight),
            "hotel" => Ok(OfferType::Hotel),
            "car" => Ok(OfferType::Car),
            "package" => Ok(OfferType::Package),
            "general" => Ok(OfferType::General),
            other => Err(format!("unknown offer type: {other}")),
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum DiscountKind {
    Percentage,
    Fixed,
    Bogo,
}

impl DiscountKind {
    pub fn as_str(self) -> &'static str {
        match self {
            DiscountKind::Percentage => "percentage",
            DiscountKind::Fixed => "fixed",
            DiscountKind::Bogo => "bogo",
        }
    }
}

impl FromStr for DiscountKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "percentage" => Ok(DiscountKind::Percentage),
            "fixed" => Ok(DiscountKind::Fixed),
            "bogo" => Ok(DiscountKind::Bogo),
            other => Err(format!("unknown discount type: {other}")),
        }
    }
}

/// Eligibility conditions attached to an offer.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct OfferConditions {
    /// Floor on the booking amount required for eligibility.
    pub minimum_amount: Option<Money>,
    /// Cap on the computed discount; only meaningful for percentage offers.
    pub maximum_discount: Option<Money>,
}

fn default_per_user() -> u32 {
    1
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct UsageLimit {
    /// Global redemption cap; `None` means unlimited.
    pub total: Option<u32>,
    #[serde(default = "default_per_user")]
    pub per_user: u32,
}

impl Default for UsageLimit {
    fn default() -> Self {
        Self {
            total: None,
            per_user: default_per_user(),
        }
    }
}

/// A discount-granting record, optionally gated behind a promo code.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Offer {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    #[serde(rename = "type")]
    pub offer_type: OfferType,
    pub discount_type: DiscountKind,
    pub discount_value: Money,
    #[serde(default)]
    pub conditions: OfferConditions,
    /// Stored uppercase; lookups normalize before matching.
    pub promo_code: Option<String>,
    #[serde(default)]
    pub usage_limit: UsageLimit,
    #[serde(default)]
    pub usage_count: u32,
    pub is_active: bool,
    pub valid_from: DateTime<Utc>,
    pub valid_until: DateTime<Utc>,
    pub image: Option<String>,
    #[serde(default)]
    pub priority: i32,
    pub created_at: DateTime<Utc>,
}

impl Offer {
    /// Active flag true and `now` within the inclusive validity window.
    pub fn is_currently_valid(&self, now: DateTime<Utc>) -> bool {
        self.is_active && self.valid_from <= now && now <= self.valid_until
    }

    /// Whether the global redemption cap has been reached.
    pub fn usage_exhausted(&self) -> bool {
        self.usage_limit
            .total
            .is_some_and(|total| self.usage_count >= total)
    }
}

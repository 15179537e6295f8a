use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The bookable categories a customer can check out with. Offers are
/// scoped to one of these (or to `general`, see the offer crate).
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum BookingType {
    Flight,
    Hotel,
    Car,
    Package,
}

impl BookingType {
    pub fn as_str(self) -> &'static str {
        match self {
            BookingType::Flight => "flight",
            BookingType::Hotel => "hotel",
            BookingType::Car => "car",
            BookingType::Package => "package",
        }
    }
}

impl fmt::Display for BookingType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BookingType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "flight" => Ok(BookingType::Flight),
            "hotel" => Ok(BookingType::Hotel),
            "car" => Ok(BookingType::Car),
            "package" => Ok(BookingType::Package),
            other => Err(format!("unknown booking type: {other}")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_wire_names() {
        assert_eq!("flight".parse::<BookingType>().unwrap(), BookingType::Flight);
        assert!("cruise".parse::<BookingType>().is_err());
    }
}

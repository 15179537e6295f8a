/// Monetary amounts are plain currency units (dollars), matching the wire
/// format of the catalog and offer documents.
pub type Money = f64;

/// Round to two decimal places, half away from zero at the cent boundary.
pub fn round_to_cents(amount: Money) -> Money {
    (amount * 100.0).round() / 100.0
}

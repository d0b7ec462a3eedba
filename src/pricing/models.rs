//! Pricing value types.
//!
//! `PriceQuote` is both the quote-endpoint response and the frozen
//! snapshot embedded in a persisted booking, so everything here derives
//! `Deserialize` as well as `Serialize`. All amounts are i64 minor
//! currency units.

use serde::{Deserialize, Serialize};

/// Kind of a breakdown line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LineKind {
    Accommodation,
    Vehicle,
    Activity,
    Extra,
}

/// One priced line in the quote breakdown
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LineItem {
    #[serde(rename = "type")]
    pub kind: LineKind,
    pub name: String,
    /// Unit price for this line
    pub price: i64,
    pub quantity: i64,
    pub total: i64,
}

/// A complete price computation for a booking request.
///
/// Breakdown order is fixed: accommodation, vehicle, activities in
/// request order, extra-nights-before, extra-nights-after.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PriceQuote {
    pub accommodation_total: i64,
    pub vehicle_total: i64,
    pub activities_total: i64,
    pub extras_total: i64,
    pub subtotal: i64,
    pub taxes: i64,
    pub total: i64,
    pub breakdown: Vec<LineItem>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stored_snapshot_deserializes() {
        // Shape of the JSONB snapshot persisted on a booking
        let stored = serde_json::json!({
            "accommodation_total": 150000,
            "vehicle_total": 40000,
            "activities_total": 0,
            "extras_total": 0,
            "subtotal": 290000,
            "taxes": 69600,
            "total": 359600,
            "breakdown": [
                { "type": "accommodation", "name": "Seaside Lodge", "price": 30000, "quantity": 5, "total": 150000 },
                { "type": "vehicle", "name": "Minibus", "price": 8000, "quantity": 5, "total": 40000 }
            ]
        });

        let quote: PriceQuote = serde_json::from_value(stored).unwrap();
        assert_eq!(quote.total, quote.subtotal + quote.taxes);
        assert_eq!(quote.breakdown[0].kind, LineKind::Accommodation);
        assert_eq!(quote.breakdown[1].kind, LineKind::Vehicle);
    }
}

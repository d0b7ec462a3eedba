//! Response DTOs for pricing-aware endpoints.
//!
//! The quote endpoint responds with `PriceQuote` directly (see
//! `pricing::models`); the types here enrich catalog items with their
//! seasonal prices for the trip composer.

use serde::Serialize;

use crate::models::catalog::{Accommodation, Vehicle};

use super::queries::SeasonRule;

/// A seasonal price formula attached to a composed catalog item
#[derive(Debug, Clone, Serialize)]
pub struct SeasonPrice {
    pub base_price: i64,
    pub per_person_price: i64,
}

impl From<&SeasonRule> for SeasonPrice {
    fn from(rule: &SeasonRule) -> Self {
        SeasonPrice {
            base_price: rule.base_price,
            per_person_price: rule.per_person_price,
        }
    }
}

/// Pick the rule whose date range name contains the given marker
/// ("high"/"low"), case-insensitive. Lets the client preview both
/// seasonal prices before a start date is chosen.
pub fn season_price(rules: &[SeasonRule], marker: &str) -> Option<SeasonPrice> {
    rules
        .iter()
        .find(|r| r.range_name.to_lowercase().contains(marker))
        .map(SeasonPrice::from)
}

/// An accommodation offered on a trip, with its seasonal price preview
#[derive(Debug, Clone, Serialize)]
pub struct PricedAccommodation {
    #[serde(flatten)]
    pub accommodation: Accommodation,
    pub high_price: Option<SeasonPrice>,
    pub low_price: Option<SeasonPrice>,
}

/// A vehicle offered on a trip, with its seasonal price preview
#[derive(Debug, Clone, Serialize)]
pub struct PricedVehicle {
    #[serde(flatten)]
    pub vehicle: Vehicle,
    pub high_price: Option<SeasonPrice>,
    pub low_price: Option<SeasonPrice>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rules() -> Vec<SeasonRule> {
        vec![
            SeasonRule {
                base_price: 30000,
                per_person_price: 5000,
                range_name: "High Season".to_string(),
            },
            SeasonRule {
                base_price: 18000,
                per_person_price: 3000,
                range_name: "low season".to_string(),
            },
        ]
    }

    #[test]
    fn test_season_price_matches_case_insensitively() {
        let rules = rules();
        assert_eq!(season_price(&rules, "high").unwrap().base_price, 30000);
        assert_eq!(season_price(&rules, "low").unwrap().base_price, 18000);
    }

    #[test]
    fn test_season_price_none_when_no_matching_range() {
        let rules = vec![SeasonRule {
            base_price: 1000,
            per_person_price: 0,
            range_name: "Shoulder".to_string(),
        }];
        assert!(season_price(&rules, "high").is_none());
    }
}

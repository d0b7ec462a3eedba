//! Catalog models: items, seasonal date ranges and pricing rules.
//!
//! All prices are integers in minor currency units (cents).

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Reduce a date to its year-agnostic `month * 100 + day` key.
///
/// Seasonal windows recur every year, so ranges and booking dates are
/// compared on this key alone.
pub fn month_day_key(date: NaiveDate) -> u32 {
    date.month() * 100 + date.day()
}

/// A recurring seasonal window (e.g. "High Season")
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct DateRange {
    pub id: Uuid,
    pub name: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub is_active: bool,
}

impl DateRange {
    /// Check whether a month-day key falls inside this range, boundaries
    /// inclusive.
    ///
    /// A range whose start key exceeds its end key crosses the year
    /// boundary (e.g. Dec 20 - Jan 10) and matches on either side of it.
    pub fn contains_month_day(&self, key: u32) -> bool {
        let start = month_day_key(self.start_date);
        let end = month_day_key(self.end_date);
        if start <= end {
            start <= key && key <= end
        } else {
            key >= start || key <= end
        }
    }
}

/// The kind of catalog item a pricing rule applies to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemType {
    Accommodation,
    Vehicle,
    Activity,
}

impl ItemType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ItemType::Accommodation => "accommodation",
            ItemType::Vehicle => "vehicle",
            ItemType::Activity => "activity",
        }
    }
}

/// A price formula binding one catalog item to one date range
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct PricingRule {
    pub id: Uuid,
    pub item_type: String,
    pub item_id: Uuid,
    pub date_range_id: Uuid,
    pub base_price: i64,
    pub per_person_price: i64,
    pub is_active: bool,
}

impl PricingRule {
    /// Evaluate the rule formula for a party of the given size.
    ///
    /// Saturates instead of wrapping on absurd inputs; the quote
    /// computation rejects saturated amounts when it multiplies by
    /// duration.
    pub fn unit_price(&self, party_size: i64) -> i64 {
        self.per_person_price
            .saturating_mul(party_size)
            .saturating_add(self.base_price)
    }
}

#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Accommodation {
    pub id: Uuid,
    pub name: String,
    pub description: String,
    pub image_url: String,
    pub is_active: bool,
}

#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Vehicle {
    pub id: Uuid,
    pub name: String,
    pub description: String,
    pub seats: i32,
    pub image_url: String,
    pub is_active: bool,
}

#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Activity {
    pub id: Uuid,
    pub name: String,
    pub description: String,
    /// Intrinsic per-person price, used as a fallback when no rule exists
    pub per_person_price: i64,
    pub image_url: String,
    pub is_active: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn range(start: (u32, u32), end: (u32, u32)) -> DateRange {
        DateRange {
            id: Uuid::new_v4(),
            name: "test".to_string(),
            start_date: NaiveDate::from_ymd_opt(2024, start.0, start.1).unwrap(),
            end_date: NaiveDate::from_ymd_opt(2024, end.0, end.1).unwrap(),
            is_active: true,
        }
    }

    #[test]
    fn test_month_day_key() {
        assert_eq!(month_day_key(NaiveDate::from_ymd_opt(2024, 1, 1).unwrap()), 101);
        assert_eq!(month_day_key(NaiveDate::from_ymd_opt(2024, 12, 31).unwrap()), 1231);
        assert_eq!(month_day_key(NaiveDate::from_ymd_opt(1999, 7, 15).unwrap()), 715);
    }

    #[test]
    fn test_contains_month_day_inclusive_boundaries() {
        let r = range((6, 1), (8, 31));
        assert!(r.contains_month_day(601));
        assert!(r.contains_month_day(831));
        assert!(r.contains_month_day(715));
        assert!(!r.contains_month_day(531));
        assert!(!r.contains_month_day(901));
    }

    #[test]
    fn test_contains_month_day_year_is_irrelevant() {
        let r = range((6, 1), (8, 31));
        let key = month_day_key(NaiveDate::from_ymd_opt(1987, 7, 4).unwrap());
        assert!(r.contains_month_day(key));
    }

    #[test]
    fn test_contains_month_day_wraparound_range() {
        // Dec 20 - Jan 10 crosses the year boundary
        let r = range((12, 20), (1, 10));
        assert!(r.contains_month_day(1225));
        assert!(r.contains_month_day(105));
        assert!(r.contains_month_day(1220));
        assert!(r.contains_month_day(110));
        assert!(!r.contains_month_day(111));
        assert!(!r.contains_month_day(1219));
        assert!(!r.contains_month_day(615));
    }

    #[test]
    fn test_rule_unit_price() {
        let rule = PricingRule {
            id: Uuid::new_v4(),
            item_type: "accommodation".to_string(),
            item_id: Uuid::new_v4(),
            date_range_id: Uuid::new_v4(),
            base_price: 20000,
            per_person_price: 5000,
            is_active: true,
        };
        assert_eq!(rule.unit_price(2), 30000);
        assert_eq!(rule.unit_price(0), 20000);
    }

    #[test]
    fn test_rule_unit_price_saturates_instead_of_wrapping() {
        let rule = PricingRule {
            id: Uuid::new_v4(),
            item_type: "accommodation".to_string(),
            item_id: Uuid::new_v4(),
            date_range_id: Uuid::new_v4(),
            base_price: 1,
            per_person_price: i64::MAX,
            is_active: true,
        };
        assert_eq!(rule.unit_price(2), i64::MAX);
    }
}

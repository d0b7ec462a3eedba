//! Core pricing calculation functions.
//!
//! Pure functions for pricing math - no database access. The service
//! layer gathers catalog rows into `QuoteInputs`; everything price-shaped
//! is computed here so the engine stays deterministic and testable.

use chrono::NaiveDate;
use rust_decimal::prelude::*;
use rust_decimal::Decimal;

use crate::models::booking::ExtraNights;
use crate::models::catalog::{month_day_key, DateRange, PricingRule};

use super::models::{LineItem, LineKind, PriceQuote};
use super::services::PricingError;

/// How the engine treats a selected item with no configured rate
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RateFallback {
    /// Missing rate prices the line at 0 (the historical behavior)
    Lenient,
    /// Missing rate fails the quote with `RateNotConfigured`
    Strict,
}

/// Round to specified decimal places using banker's rounding (ROUND_HALF_EVEN).
///
/// Used for the single tax rounding step; everything else stays in
/// integer minor units and never rounds.
pub fn round_money(amount: Decimal, places: u32) -> Decimal {
    amount.round_dp_with_strategy(places, RoundingStrategy::MidpointNearestEven)
}

/// Parse a booking start date leniently.
///
/// Accepts a plain `YYYY-MM-DD` or a full RFC 3339 timestamp. An
/// unparseable value yields `None`, which downstream means "no seasonal
/// match" rather than a hard failure.
pub fn parse_start_date(raw: &str) -> Option<NaiveDate> {
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return Some(date);
    }
    chrono::DateTime::parse_from_rfc3339(raw)
        .ok()
        .map(|dt| dt.date_naive())
}

/// Resolve the seasonal date range applicable to a booking start date.
///
/// Matching is year-agnostic (month+day only, boundaries inclusive).
/// When ranges overlap the first match in catalog order wins; the store
/// orders ranges by start date. `None` (no match, or no date) is a valid
/// outcome and falls through to rule-less pricing.
pub fn resolve_date_range(date: Option<NaiveDate>, ranges: &[DateRange]) -> Option<&DateRange> {
    let key = month_day_key(date?);
    ranges
        .iter()
        .filter(|r| r.is_active)
        .find(|r| r.contains_month_day(key))
}

/// Accommodation or vehicle line input: the selected item's label and its
/// seasonal rule, if one matched
#[derive(Debug, Clone)]
pub struct RateLine {
    pub name: String,
    pub rule: Option<PricingRule>,
}

/// Activity line input. `intrinsic_per_person` carries the activity's own
/// price, used when no rule exists; `None` means the activity itself
/// could not be found.
#[derive(Debug, Clone)]
pub struct ActivityLine {
    pub name: String,
    pub rule: Option<PricingRule>,
    pub intrinsic_per_person: Option<i64>,
}

/// Everything the quote computation needs, pre-fetched by the service layer
#[derive(Debug, Clone)]
pub struct QuoteInputs {
    pub duration: i64,
    pub party_size: i64,
    pub extra_nights: ExtraNights,
    /// Flat base price of the trip itself
    pub trip_base_price: i64,
    pub accommodation: RateLine,
    pub vehicle: RateLine,
    pub activities: Vec<ActivityLine>,
}

fn missing_rate(kind: &'static str, item: &str) -> PricingError {
    PricingError::RateNotConfigured {
        item_type: kind,
        item: item.to_string(),
    }
}

// Money math never wraps: an i64-overflowing amount is a bad quote, not
// a negative total.
fn line_total(unit: i64, quantity: i64) -> Result<i64, PricingError> {
    unit.checked_mul(quantity).ok_or(PricingError::AmountOverflow)
}

fn add_amount(acc: i64, amount: i64) -> Result<i64, PricingError> {
    acc.checked_add(amount).ok_or(PricingError::AmountOverflow)
}

/// Compute the full price breakdown for a booking request.
///
/// Breakdown order is fixed: accommodation, vehicle, activities in input
/// order, extra-nights-before (if any), extra-nights-after (if any).
/// Taxes are rounded exactly once, after the integer subtotal is final.
pub fn compute_quote(
    inputs: &QuoteInputs,
    tax_rate: Decimal,
    fallback: RateFallback,
) -> Result<PriceQuote, PricingError> {
    let mut breakdown: Vec<LineItem> = Vec::new();
    let party = inputs.party_size;

    // Accommodation: basePrice + perPersonPrice * partySize, per night
    let accommodation_unit = match &inputs.accommodation.rule {
        Some(rule) => rule.unit_price(party),
        None if fallback == RateFallback::Strict => {
            return Err(missing_rate("accommodation", &inputs.accommodation.name))
        }
        None => 0,
    };
    let accommodation_total = line_total(accommodation_unit, inputs.duration)?;
    breakdown.push(LineItem {
        kind: LineKind::Accommodation,
        name: inputs.accommodation.name.clone(),
        price: accommodation_unit,
        quantity: inputs.duration,
        total: accommodation_total,
    });

    // Vehicle: base price only, no per-person component
    let vehicle_unit = match &inputs.vehicle.rule {
        Some(rule) => rule.base_price,
        None if fallback == RateFallback::Strict => {
            return Err(missing_rate("vehicle", &inputs.vehicle.name))
        }
        None => 0,
    };
    let vehicle_total = line_total(vehicle_unit, inputs.duration)?;
    breakdown.push(LineItem {
        kind: LineKind::Vehicle,
        name: inputs.vehicle.name.clone(),
        price: vehicle_unit,
        quantity: inputs.duration,
        total: vehicle_total,
    });

    // Activities, one line each in request order
    let mut activities_total = 0i64;
    for activity in &inputs.activities {
        let price = match (&activity.rule, activity.intrinsic_per_person) {
            (Some(rule), _) => rule.unit_price(party),
            (None, Some(per_person)) => line_total(per_person, party)?,
            (None, None) if fallback == RateFallback::Strict => {
                return Err(missing_rate("activity", &activity.name))
            }
            (None, None) => 0,
        };
        activities_total = add_amount(activities_total, price)?;
        breakdown.push(LineItem {
            kind: LineKind::Activity,
            name: activity.name.clone(),
            price,
            quantity: 1,
            total: price,
        });
    }

    // Extra nights reuse the accommodation unit price already resolved
    // above; they are never re-priced against a different season.
    let mut extras_total = 0i64;
    if inputs.extra_nights.before > 0 {
        let total = line_total(accommodation_unit, inputs.extra_nights.before)?;
        extras_total = add_amount(extras_total, total)?;
        breakdown.push(LineItem {
            kind: LineKind::Extra,
            name: format!("Extra nights before ({})", inputs.extra_nights.before),
            price: accommodation_unit,
            quantity: inputs.extra_nights.before,
            total,
        });
    }
    if inputs.extra_nights.after > 0 {
        let total = line_total(accommodation_unit, inputs.extra_nights.after)?;
        extras_total = add_amount(extras_total, total)?;
        breakdown.push(LineItem {
            kind: LineKind::Extra,
            name: format!("Extra nights after ({})", inputs.extra_nights.after),
            price: accommodation_unit,
            quantity: inputs.extra_nights.after,
            total,
        });
    }

    let subtotal = add_amount(
        add_amount(
            add_amount(
                add_amount(accommodation_total, vehicle_total)?,
                activities_total,
            )?,
            extras_total,
        )?,
        inputs.trip_base_price,
    )?;
    let taxes = round_money(Decimal::from(subtotal) * tax_rate, 0)
        .to_i64()
        .ok_or(PricingError::AmountOverflow)?;
    let total = add_amount(subtotal, taxes)?;

    Ok(PriceQuote {
        accommodation_total,
        vehicle_total,
        activities_total,
        extras_total,
        subtotal,
        taxes,
        total,
        breakdown,
    })
}

//! Pricing service functions with database access.
//!
//! These assemble `QuoteInputs` from the catalog (through the cache where
//! possible) and hand the math to the pure calculators. The engine never
//! trusts a client-supplied price; callers re-derive quotes server-side.

use std::sync::Arc;

use sqlx::PgPool;
use uuid::Uuid;

use crate::cache::AppCache;
use crate::config::Config;
use crate::db;
use crate::error::Result;
use crate::models::booking::Travelers;
use crate::models::catalog::{DateRange, ItemType};
use crate::models::trip::TripConfiguration;

use super::calculators::{self, ActivityLine, QuoteInputs, RateLine};
use super::models::PriceQuote;
use super::queries;
use super::requests::PricingRequest;

/// Domain-level pricing failures. Missing catalog rates only surface in
/// strict mode; the lenient default degrades those lines to 0.
#[derive(Debug, Clone, thiserror::Error)]
pub enum PricingError {
    #[error("Trip not found")]
    TripNotFound,

    #[error("No rate configured for {item_type} {item}")]
    RateNotConfigured {
        item_type: &'static str,
        item: String,
    },

    #[error("Quoted amount exceeds the representable money range")]
    AmountOverflow,
}

impl PricingError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, PricingError::TripNotFound)
    }
}

/// Active date ranges, cache-first
pub async fn active_date_ranges(pool: &PgPool, cache: &AppCache) -> Result<Arc<Vec<DateRange>>> {
    if let Some(cached) = cache.date_ranges.get(AppCache::DATE_RANGES_KEY).await {
        return Ok(cached);
    }
    let ranges = Arc::new(queries::get_active_date_ranges(pool).await?);
    cache
        .date_ranges
        .insert(AppCache::DATE_RANGES_KEY.to_string(), ranges.clone())
        .await;
    Ok(ranges)
}

/// Load an active trip configuration, cache-first. Inactive and unknown
/// trips both resolve to `None`.
pub async fn load_trip(
    pool: &PgPool,
    cache: &AppCache,
    trip_id: Uuid,
) -> Result<Option<Arc<TripConfiguration>>> {
    if let Some(cached) = cache.trips.get(&trip_id).await {
        return Ok(Some(cached));
    }
    match db::get_active_trip(pool, trip_id).await? {
        Some(trip) => {
            let trip = Arc::new(trip);
            cache.trips.insert(trip_id, trip.clone()).await;
            Ok(Some(trip))
        }
        None => Ok(None),
    }
}

/// Compute a deterministic price breakdown for a booking request.
///
/// Fails fast when the trip is missing or inactive (the booking has no
/// base price without it). Unresolvable accommodation/vehicle/activity
/// rates are not errors in lenient mode; they price at 0.
pub async fn quote_booking_price(
    pool: &PgPool,
    cache: &AppCache,
    config: &Config,
    req: &PricingRequest,
) -> Result<PriceQuote> {
    let trip = load_trip(pool, cache, req.trip_id)
        .await?
        .ok_or(PricingError::TripNotFound)?;

    let start_date = calculators::parse_start_date(&req.start_date);
    let ranges = active_date_ranges(pool, cache).await?;
    let date_range = calculators::resolve_date_range(start_date, &ranges);
    let date_range_id = date_range.map(|r| r.id);

    tracing::debug!(
        trip_id = %req.trip_id,
        start_date = %req.start_date,
        season = date_range.map(|r| r.name.as_str()).unwrap_or("none"),
        "resolving quote"
    );

    let travelers: Travelers = req.travelers.into();

    let accommodation_rule = match date_range_id {
        Some(range_id) => {
            queries::find_rule(pool, ItemType::Accommodation, req.selected_accommodation, range_id)
                .await?
        }
        None => None,
    };

    let vehicle_rule = match date_range_id {
        Some(range_id) => {
            queries::find_rule(pool, ItemType::Vehicle, req.selected_vehicle, range_id).await?
        }
        None => None,
    };

    let mut activities = Vec::with_capacity(req.selected_activities.len());
    for activity_id in &req.selected_activities {
        let activity = queries::get_activity(pool, *activity_id).await?;
        let rule = match date_range_id {
            Some(range_id) => {
                queries::find_rule(pool, ItemType::Activity, *activity_id, range_id).await?
            }
            None => None,
        };
        activities.push(ActivityLine {
            name: activity
                .as_ref()
                .map(|a| a.name.clone())
                .unwrap_or_else(|| activity_id.to_string()),
            rule,
            intrinsic_per_person: activity.map(|a| a.per_person_price),
        });
    }

    let inputs = QuoteInputs {
        duration: req.duration,
        party_size: travelers.party_size(),
        extra_nights: req.extra_nights.into(),
        trip_base_price: trip.price,
        accommodation: RateLine {
            name: req.selected_accommodation.to_string(),
            rule: accommodation_rule,
        },
        vehicle: RateLine {
            name: req.selected_vehicle.to_string(),
            rule: vehicle_rule,
        },
        activities,
    };

    let quote = calculators::compute_quote(&inputs, config.tax_rate, config.rate_fallback)?;
    Ok(quote)
}

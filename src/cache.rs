//! In-memory caching using moka
//!
//! Seasonal date ranges and trip configurations are read on every quote
//! but change rarely (admin back-office edits), so both are cached with
//! short TTLs. Bookings are never cached; their price snapshot is frozen
//! in the row itself.

use moka::future::Cache;
use serde::Serialize;
use sqlx::PgPool;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::interval;
use tracing::{info, warn};
use uuid::Uuid;

use crate::models::{DateRange, TripConfiguration};
use crate::pricing::queries as pricing_queries;

/// Application cache for catalog reads
#[derive(Clone)]
pub struct AppCache {
    /// Active date ranges, one entry under `DATE_RANGES_KEY`
    pub date_ranges: Cache<String, Arc<Vec<DateRange>>>,
    /// Active trip configurations (id -> trip)
    pub trips: Cache<Uuid, Arc<TripConfiguration>>,
}

impl AppCache {
    pub const DATE_RANGES_KEY: &'static str = "active";

    /// Create a new cache instance with configured TTLs
    pub fn new() -> Self {
        Self {
            // Date ranges: single entry, 5 min TTL
            date_ranges: Cache::builder()
                .max_capacity(1)
                .time_to_live(Duration::from_secs(5 * 60))
                .build(),

            // Trips: 200 entries, 10 min TTL, 5 min idle
            trips: Cache::builder()
                .max_capacity(200)
                .time_to_live(Duration::from_secs(10 * 60))
                .time_to_idle(Duration::from_secs(5 * 60))
                .build(),
        }
    }

    /// Get cache statistics for monitoring
    pub fn stats(&self) -> CacheStats {
        CacheStats {
            date_ranges_cached: self.date_ranges.entry_count() > 0,
            trips_size: self.trips.entry_count(),
        }
    }

    /// Invalidate all caches
    pub fn invalidate_all(&self) {
        self.date_ranges.invalidate_all();
        self.trips.invalidate_all();
        info!("All caches invalidated");
    }
}

impl Default for AppCache {
    fn default() -> Self {
        Self::new()
    }
}

/// Cache statistics for monitoring endpoint
#[derive(Debug, Clone, Serialize)]
pub struct CacheStats {
    pub date_ranges_cached: bool,
    pub trips_size: u64,
}

/// Start background cache warmer
///
/// Warms the cache on startup and refreshes every 5 minutes.
pub async fn start_cache_warmer(cache: AppCache, db: PgPool) {
    warm_cache(&cache, &db).await;

    let mut interval = interval(Duration::from_secs(5 * 60));
    loop {
        interval.tick().await;
        warm_cache(&cache, &db).await;
    }
}

/// Warm the cache with commonly accessed data
async fn warm_cache(cache: &AppCache, db: &PgPool) {
    info!("Starting cache warm-up...");

    match pricing_queries::get_active_date_ranges(db).await {
        Ok(ranges) => {
            cache
                .date_ranges
                .insert(AppCache::DATE_RANGES_KEY.to_string(), Arc::new(ranges))
                .await;
        }
        Err(e) => warn!("Failed to warm date range cache: {}", e),
    }

    match crate::db::get_active_trips(db).await {
        Ok(trips) => {
            for trip in trips {
                cache.trips.insert(trip.id, Arc::new(trip)).await;
            }
        }
        Err(e) => warn!("Failed to warm trip cache: {}", e),
    }

    info!("Cache warm-up complete. Stats: {:?}", cache.stats());
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_invalidate_all_clears_cached_entries() {
        let cache = AppCache::new();
        cache
            .date_ranges
            .insert(AppCache::DATE_RANGES_KEY.to_string(), Arc::new(vec![]))
            .await;
        assert!(cache.date_ranges.get(AppCache::DATE_RANGES_KEY).await.is_some());

        // invalidate_all only drops entries inserted strictly before the
        // call's timestamp
        tokio::time::sleep(Duration::from_millis(10)).await;
        cache.invalidate_all();
        assert!(cache.date_ranges.get(AppCache::DATE_RANGES_KEY).await.is_none());
    }
}

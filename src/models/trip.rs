//! Trip configuration models

use serde::{Deserialize, Serialize};
use sqlx::types::Json;
use sqlx::FromRow;
use uuid::Uuid;

/// One day-slot of optional activities offered during the trip
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DayActivity {
    pub day: i32,
    pub max_activities: i32,
    pub available_activities: Vec<Uuid>,
}

/// A purchasable tour: duration, flat base price and the catalog subsets
/// offered for it (referenced by id, not embedded)
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct TripConfiguration {
    pub id: Uuid,
    pub name: String,
    pub description: String,
    /// Trip length in days
    pub duration: i32,
    /// Flat base price of the tour, minor currency units
    pub price: i64,
    pub accommodation_ids: Vec<Uuid>,
    pub vehicle_ids: Vec<Uuid>,
    pub day_activities: Json<Vec<DayActivity>>,
    pub is_active: bool,
}

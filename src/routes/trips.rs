//! Trip route handlers: listing and the composed booking view

use axum::{
    extract::{Path, State},
    Json,
};
use serde::Serialize;
use uuid::Uuid;

use crate::db;
use crate::error::{AppError, Result};
use crate::models::catalog::{Activity, ItemType};
use crate::models::trip::TripConfiguration;
use crate::pricing::queries as pricing_queries;
use crate::pricing::responses::{season_price, PricedAccommodation, PricedVehicle};
use crate::pricing::services;
use crate::AppState;

/// A day-slot with its activity references resolved to full objects
#[derive(Debug, Serialize)]
pub struct DayActivitiesDetail {
    pub day: i32,
    pub max_activities: i32,
    pub activities: Vec<Activity>,
}

/// The purchasable view of a trip: referenced items resolved, each
/// accommodation/vehicle carrying its high/low season price preview
#[derive(Debug, Serialize)]
pub struct TripDetailResponse {
    pub id: Uuid,
    pub name: String,
    pub description: String,
    pub duration: i32,
    pub price: i64,
    pub accommodations: Vec<PricedAccommodation>,
    pub vehicles: Vec<PricedVehicle>,
    pub day_activities: Vec<DayActivitiesDetail>,
}

/// List all active trips, newest first
pub async fn list(State(state): State<AppState>) -> Result<Json<Vec<TripConfiguration>>> {
    let trips = db::get_active_trips(&state.db).await?;
    Ok(Json(trips))
}

/// Composed trip detail for the client booking flow. Inactive or
/// dangling item references are dropped silently rather than erroring.
pub async fn detail(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<TripDetailResponse>> {
    let trip = services::load_trip(&state.db, &state.cache, id)
        .await?
        .ok_or(AppError::NotFound("Trip"))?;

    let mut accommodations = Vec::new();
    for item in db::get_accommodations_by_ids(&state.db, &trip.accommodation_ids).await? {
        let rules =
            pricing_queries::find_rules_for_item(&state.db, ItemType::Accommodation, item.id)
                .await?;
        accommodations.push(PricedAccommodation {
            accommodation: item,
            high_price: season_price(&rules, "high"),
            low_price: season_price(&rules, "low"),
        });
    }

    let mut vehicles = Vec::new();
    for item in db::get_vehicles_by_ids(&state.db, &trip.vehicle_ids).await? {
        let rules =
            pricing_queries::find_rules_for_item(&state.db, ItemType::Vehicle, item.id).await?;
        vehicles.push(PricedVehicle {
            vehicle: item,
            high_price: season_price(&rules, "high"),
            low_price: season_price(&rules, "low"),
        });
    }

    let mut day_activities = Vec::new();
    for slot in trip.day_activities.iter() {
        let activities =
            db::get_activities_by_ids(&state.db, &slot.available_activities).await?;
        day_activities.push(DayActivitiesDetail {
            day: slot.day,
            max_activities: slot.max_activities,
            activities,
        });
    }

    Ok(Json(TripDetailResponse {
        id: trip.id,
        name: trip.name.clone(),
        description: trip.description.clone(),
        duration: trip.duration,
        price: trip.price,
        accommodations,
        vehicles,
        day_activities,
    }))
}

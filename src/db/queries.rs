//! Database queries for trips, catalog items and bookings

use chrono::NaiveDate;
use sqlx::types::Json;
use sqlx::PgPool;
use uuid::Uuid;

use crate::error::Result;
use crate::models::booking::{Booking, CustomerInfo, ExtraNights, TravelerDetail, Travelers};
use crate::models::catalog::{Accommodation, Activity, Vehicle};
use crate::models::trip::TripConfiguration;
use crate::pricing::PriceQuote;

const TRIP_COLUMNS: &str = "id, name, description, duration, price, \
     accommodation_ids, vehicle_ids, day_activities, is_active";

const BOOKING_COLUMNS: &str = "id, trip_id, customer_info, travelers, traveler_details, \
     start_date, selected_accommodation, selected_vehicle, selected_activities, \
     extra_nights, pricing, status, payment_status, created_at, updated_at";

/// All active trips, newest first
pub async fn get_active_trips(pool: &PgPool) -> Result<Vec<TripConfiguration>> {
    let trips = sqlx::query_as::<_, TripConfiguration>(&format!(
        "SELECT {TRIP_COLUMNS} FROM trips WHERE is_active ORDER BY created_at DESC"
    ))
    .fetch_all(pool)
    .await?;

    Ok(trips)
}

/// Get an active trip by id. Inactive trips resolve to `None`, the same
/// as unknown ids.
pub async fn get_active_trip(pool: &PgPool, id: Uuid) -> Result<Option<TripConfiguration>> {
    let trip = sqlx::query_as::<_, TripConfiguration>(&format!(
        "SELECT {TRIP_COLUMNS} FROM trips WHERE id = $1 AND is_active"
    ))
    .bind(id)
    .fetch_optional(pool)
    .await?;

    Ok(trip)
}

/// Active accommodations among the given ids; dangling references are
/// dropped silently
pub async fn get_accommodations_by_ids(
    pool: &PgPool,
    ids: &[Uuid],
) -> Result<Vec<Accommodation>> {
    let items = sqlx::query_as::<_, Accommodation>(
        r#"
        SELECT id, name, description, image_url, is_active
        FROM accommodations
        WHERE id = ANY($1)
          AND is_active
        ORDER BY name
        "#,
    )
    .bind(ids)
    .fetch_all(pool)
    .await?;

    Ok(items)
}

/// Active vehicles among the given ids
pub async fn get_vehicles_by_ids(pool: &PgPool, ids: &[Uuid]) -> Result<Vec<Vehicle>> {
    let items = sqlx::query_as::<_, Vehicle>(
        r#"
        SELECT id, name, description, seats, image_url, is_active
        FROM vehicles
        WHERE id = ANY($1)
          AND is_active
        ORDER BY name
        "#,
    )
    .bind(ids)
    .fetch_all(pool)
    .await?;

    Ok(items)
}

/// Active activities among the given ids
pub async fn get_activities_by_ids(pool: &PgPool, ids: &[Uuid]) -> Result<Vec<Activity>> {
    let items = sqlx::query_as::<_, Activity>(
        r#"
        SELECT id, name, description, per_person_price, image_url, is_active
        FROM activities
        WHERE id = ANY($1)
          AND is_active
        ORDER BY name
        "#,
    )
    .bind(ids)
    .fetch_all(pool)
    .await?;

    Ok(items)
}

/// Everything needed to persist a new booking. The pricing snapshot is
/// computed server-side before this is built.
#[derive(Debug)]
pub struct NewBooking {
    pub trip_id: Uuid,
    pub customer_info: CustomerInfo,
    pub travelers: Travelers,
    pub traveler_details: Vec<TravelerDetail>,
    pub start_date: NaiveDate,
    pub selected_accommodation: Uuid,
    pub selected_vehicle: Uuid,
    pub selected_activities: Vec<Uuid>,
    pub extra_nights: ExtraNights,
    pub pricing: PriceQuote,
}

/// Insert a booking with its frozen pricing snapshot. The single INSERT
/// keeps booking + pricing atomic; a booking without pricing cannot
/// exist.
pub async fn insert_booking(pool: &PgPool, new: NewBooking) -> Result<Booking> {
    let booking = sqlx::query_as::<_, Booking>(&format!(
        r#"
        INSERT INTO bookings (
            trip_id, customer_info, travelers, traveler_details, start_date,
            selected_accommodation, selected_vehicle, selected_activities,
            extra_nights, pricing
        )
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
        RETURNING {BOOKING_COLUMNS}
        "#
    ))
    .bind(new.trip_id)
    .bind(Json(new.customer_info))
    .bind(Json(new.travelers))
    .bind(Json(new.traveler_details))
    .bind(new.start_date)
    .bind(new.selected_accommodation)
    .bind(new.selected_vehicle)
    .bind(new.selected_activities)
    .bind(Json(new.extra_nights))
    .bind(Json(new.pricing))
    .fetch_one(pool)
    .await?;

    Ok(booking)
}

/// Get a booking by id
pub async fn get_booking(pool: &PgPool, id: Uuid) -> Result<Option<Booking>> {
    let booking = sqlx::query_as::<_, Booking>(&format!(
        "SELECT {BOOKING_COLUMNS} FROM bookings WHERE id = $1"
    ))
    .bind(id)
    .fetch_optional(pool)
    .await?;

    Ok(booking)
}

/// Update only the status fields of a booking. The pricing snapshot is
/// deliberately untouchable here.
pub async fn update_booking_status(
    pool: &PgPool,
    id: Uuid,
    status: &str,
    payment_status: &str,
) -> Result<Option<Booking>> {
    let booking = sqlx::query_as::<_, Booking>(&format!(
        r#"
        UPDATE bookings
        SET status = $2, payment_status = $3, updated_at = now()
        WHERE id = $1
        RETURNING {BOOKING_COLUMNS}
        "#
    ))
    .bind(id)
    .bind(status)
    .bind(payment_status)
    .fetch_optional(pool)
    .await?;

    Ok(booking)
}

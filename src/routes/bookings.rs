//! Booking route handlers: creation, lookup and status transitions

use std::str::FromStr;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use chrono::NaiveDate;
use serde::Deserialize;
use uuid::Uuid;
use validator::Validate;

use crate::db::{self, queries::NewBooking};
use crate::error::{AppError, Result};
use crate::models::booking::{
    Address, Booking, BookingStatus, CustomerInfo, PaymentStatus, TravelerDetail, TravelerType,
};
use crate::pricing::requests::{ExtraNightsRequest, PricingRequest, TravelersRequest};
use crate::pricing::services;
use crate::AppState;

#[derive(Debug, Deserialize, Validate)]
pub struct AddressRequest {
    pub street: String,
    pub city: String,
    pub country: String,
    pub zip_code: String,
}

#[derive(Debug, Deserialize, Validate)]
pub struct CustomerInfoRequest {
    #[validate(length(min = 1))]
    pub first_name: String,
    #[validate(length(min = 1))]
    pub last_name: String,
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 1))]
    pub phone: String,
    #[validate(nested)]
    pub address: AddressRequest,
}

impl From<CustomerInfoRequest> for CustomerInfo {
    fn from(req: CustomerInfoRequest) -> Self {
        CustomerInfo {
            first_name: req.first_name,
            last_name: req.last_name,
            email: req.email,
            phone: req.phone,
            address: Address {
                street: req.address.street,
                city: req.address.city,
                country: req.address.country,
                zip_code: req.address.zip_code,
            },
        }
    }
}

#[derive(Debug, Deserialize, Validate)]
pub struct TravelerDetailRequest {
    #[serde(default)]
    pub title: Option<String>,
    #[validate(length(min = 1))]
    pub first_name: String,
    #[validate(length(min = 1))]
    pub last_name: String,
    pub date_of_birth: NaiveDate,
    #[serde(default)]
    pub passport_number: Option<String>,
    #[validate(length(min = 1))]
    pub country_of_residence: String,
    #[serde(rename = "type")]
    pub traveler_type: TravelerType,
}

impl From<TravelerDetailRequest> for TravelerDetail {
    fn from(req: TravelerDetailRequest) -> Self {
        TravelerDetail {
            title: req.title,
            first_name: req.first_name,
            last_name: req.last_name,
            date_of_birth: req.date_of_birth,
            passport_number: req.passport_number,
            country_of_residence: req.country_of_residence,
            traveler_type: req.traveler_type,
        }
    }
}

/// Booking submission from the step wizard. Carries the same selection
/// fields as a pricing request; the price itself is never accepted from
/// the client.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateBookingRequest {
    pub trip_id: Uuid,
    #[validate(nested)]
    pub customer_info: CustomerInfoRequest,
    #[validate(nested)]
    pub travelers: TravelersRequest,
    #[validate(nested)]
    #[serde(default)]
    pub traveler_details: Vec<TravelerDetailRequest>,
    pub start_date: NaiveDate,
    pub selected_accommodation: Uuid,
    pub selected_vehicle: Uuid,
    #[serde(default)]
    pub selected_activities: Vec<Uuid>,
    #[validate(nested)]
    #[serde(default)]
    pub extra_nights: ExtraNightsRequest,
}

#[derive(Debug, Deserialize)]
pub struct UpdateStatusRequest {
    #[serde(default)]
    pub status: Option<BookingStatus>,
    #[serde(default)]
    pub payment_status: Option<PaymentStatus>,
}

/// Create a booking.
///
/// The pricing request is re-derived server-side: duration comes from
/// the trip configuration, the quote is recomputed by the engine, and
/// the result is persisted as the frozen snapshot the customer agreed
/// to.
pub async fn create(
    State(state): State<AppState>,
    Json(req): Json<CreateBookingRequest>,
) -> Result<(StatusCode, Json<Booking>)> {
    req.validate()?;

    let trip = services::load_trip(&state.db, &state.cache, req.trip_id)
        .await?
        .ok_or(AppError::NotFound("Trip"))?;

    let pricing_request = PricingRequest {
        start_date: req.start_date.format("%Y-%m-%d").to_string(),
        travelers: req.travelers,
        selected_accommodation: req.selected_accommodation,
        selected_vehicle: req.selected_vehicle,
        selected_activities: req.selected_activities.clone(),
        extra_nights: req.extra_nights,
        duration: i64::from(trip.duration),
        trip_id: req.trip_id,
    };

    let pricing =
        services::quote_booking_price(&state.db, &state.cache, &state.config, &pricing_request)
            .await?;

    let booking = db::insert_booking(
        &state.db,
        NewBooking {
            trip_id: req.trip_id,
            customer_info: req.customer_info.into(),
            travelers: req.travelers.into(),
            traveler_details: req.traveler_details.into_iter().map(Into::into).collect(),
            start_date: req.start_date,
            selected_accommodation: req.selected_accommodation,
            selected_vehicle: req.selected_vehicle,
            selected_activities: req.selected_activities,
            extra_nights: req.extra_nights.into(),
            pricing,
        },
    )
    .await?;

    tracing::info!(booking_id = %booking.id, trip_id = %booking.trip_id, "booking created");

    Ok((StatusCode::CREATED, Json(booking)))
}

/// Get a booking by id
pub async fn detail(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Booking>> {
    let booking = db::get_booking(&state.db, id)
        .await?
        .ok_or(AppError::NotFound("Booking"))?;
    Ok(Json(booking))
}

/// Partial update of `status` / `payment_status`, the only booking
/// fields mutable after creation. Transitions are validated against the
/// state machines; the pricing snapshot is never touched.
pub async fn update_status(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(req): Json<UpdateStatusRequest>,
) -> Result<Json<Booking>> {
    let booking = db::get_booking(&state.db, id)
        .await?
        .ok_or(AppError::NotFound("Booking"))?;

    let current_status = BookingStatus::from_str(&booking.status)
        .map_err(AppError::Internal)?;
    let current_payment = PaymentStatus::from_str(&booking.payment_status)
        .map_err(AppError::Internal)?;

    let next_status = match req.status {
        Some(next) if next != current_status => {
            if !current_status.can_transition_to(next) {
                return Err(AppError::InvalidTransition(format!(
                    "Cannot change status from {} to {}",
                    current_status.as_str(),
                    next.as_str()
                )));
            }
            next
        }
        _ => current_status,
    };

    let next_payment = match req.payment_status {
        Some(next) if next != current_payment => {
            if !current_payment.can_transition_to(next) {
                return Err(AppError::InvalidTransition(format!(
                    "Cannot change payment status from {} to {}",
                    current_payment.as_str(),
                    next.as_str()
                )));
            }
            next
        }
        _ => current_payment,
    };

    let updated = db::update_booking_status(
        &state.db,
        id,
        next_status.as_str(),
        next_payment.as_str(),
    )
    .await?
    .ok_or(AppError::NotFound("Booking"))?;

    tracing::info!(
        booking_id = %id,
        status = next_status.as_str(),
        payment_status = next_payment.as_str(),
        "booking status updated"
    );

    Ok(Json(updated))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use serde_json::json;

    use crate::cache::AppCache;
    use crate::config::Config;
    use crate::pricing::RateFallback;

    fn test_state(pool: sqlx::PgPool) -> AppState {
        AppState {
            db: pool,
            cache: AppCache::new(),
            config: Config {
                database_url: String::new(),
                bind_addr: String::new(),
                tax_rate: dec!(0.24),
                rate_fallback: RateFallback::Lenient,
            },
        }
    }

    fn booking_request(trip_id: Uuid) -> CreateBookingRequest {
        serde_json::from_value(json!({
            "trip_id": trip_id,
            "customer_info": {
                "first_name": "Maija",
                "last_name": "Korhonen",
                "email": "maija@example.com",
                "phone": "+358401234567",
                "address": {
                    "street": "Mannerheimintie 1",
                    "city": "Helsinki",
                    "country": "FI",
                    "zip_code": "00100"
                }
            },
            "travelers": { "adults": 2 },
            "start_date": "2025-07-01",
            "selected_accommodation": Uuid::new_v4(),
            "selected_vehicle": Uuid::new_v4()
        }))
        .unwrap()
    }

    #[test]
    fn test_create_booking_request_validates_customer_email() {
        let mut req = booking_request(Uuid::new_v4());
        req.customer_info.email = "not-an-email".to_string();
        assert!(req.validate().is_err());
    }

    // Run with a live Postgres: `cargo test -- --ignored`.
    #[sqlx::test(migrations = "./migrations")]
    #[ignore = "needs a Postgres instance (DATABASE_URL)"]
    async fn test_create_rejects_inactive_trip_and_persists_nothing(pool: sqlx::PgPool) {
        let trip_id = Uuid::new_v4();
        sqlx::query(
            "INSERT INTO trips (id, name, duration, price, is_active) \
             VALUES ($1, 'Archipelago Loop', 5, 100000, FALSE)",
        )
        .bind(trip_id)
        .execute(&pool)
        .await
        .unwrap();

        let result =
            create(State(test_state(pool.clone())), Json(booking_request(trip_id))).await;
        assert!(matches!(result, Err(AppError::NotFound("Trip"))));

        let bookings: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM bookings")
            .fetch_one(&pool)
            .await
            .unwrap();
        assert_eq!(bookings, 0);
    }
}

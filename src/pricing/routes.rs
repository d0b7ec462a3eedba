//! Pricing route handlers

use axum::{extract::State, routing::post, Json, Router};
use validator::Validate;

use crate::error::Result;
use crate::AppState;

use super::models::PriceQuote;
use super::requests::PricingRequest;
use super::services;

/// Router for the pricing endpoints
pub fn router() -> Router<AppState> {
    Router::new().route("/api/pricing/calculate", post(calculate))
}

/// Interactive price quote. Idempotent and side-effect-free; the booking
/// flow calls it repeatedly as the customer changes selections.
pub async fn calculate(
    State(state): State<AppState>,
    Json(req): Json<PricingRequest>,
) -> Result<Json<PriceQuote>> {
    req.validate()?;
    let quote = services::quote_booking_price(&state.db, &state.cache, &state.config, &req).await?;
    Ok(Json(quote))
}

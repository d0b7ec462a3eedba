//! Request DTOs for pricing API endpoints

use serde::Deserialize;
use uuid::Uuid;
use validator::Validate;

use crate::models::booking::{ExtraNights, Travelers};

/// Party composition in a request. At least one adult is required;
/// infants are accepted but never priced.
#[derive(Debug, Clone, Copy, Deserialize, Validate)]
pub struct TravelersRequest {
    #[validate(range(min = 1, max = 50))]
    pub adults: i32,
    #[validate(range(min = 0, max = 50))]
    #[serde(default)]
    pub children: i32,
    #[validate(range(min = 0, max = 50))]
    #[serde(default)]
    pub infants: i32,
}

impl From<TravelersRequest> for Travelers {
    fn from(req: TravelersRequest) -> Self {
        Travelers {
            adults: req.adults,
            children: req.children,
            infants: req.infants,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, Deserialize, Validate)]
pub struct ExtraNightsRequest {
    #[validate(range(min = 0, max = 30))]
    #[serde(default)]
    pub before: i64,
    #[validate(range(min = 0, max = 30))]
    #[serde(default)]
    pub after: i64,
}

impl From<ExtraNightsRequest> for ExtraNights {
    fn from(req: ExtraNightsRequest) -> Self {
        ExtraNights { before: req.before, after: req.after }
    }
}

/// Request for an interactive price quote.
///
/// `start_date` is kept as a raw string on purpose: an unparseable date
/// is not a validation failure, it simply matches no seasonal window and
/// the quote proceeds on fallback rates.
#[derive(Debug, Deserialize, Validate)]
pub struct PricingRequest {
    pub start_date: String,
    #[validate(nested)]
    pub travelers: TravelersRequest,
    pub selected_accommodation: Uuid,
    pub selected_vehicle: Uuid,
    #[serde(default)]
    pub selected_activities: Vec<Uuid>,
    #[validate(nested)]
    #[serde(default)]
    pub extra_nights: ExtraNightsRequest,
    #[validate(range(min = 1, max = 365))]
    pub duration: i64,
    pub trip_id: Uuid,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_optional_fields_default() {
        let req: PricingRequest = serde_json::from_value(serde_json::json!({
            "start_date": "2025-07-01",
            "travelers": { "adults": 2 },
            "selected_accommodation": "7b4f9f2e-9f6a-4f7e-b0d3-0a8f3f1c2d4e",
            "selected_vehicle": "3d1a6c8b-2e5f-4a9c-8d7e-1f0b2c3d4e5f",
            "duration": 5,
            "trip_id": "9c8b7a6d-5e4f-3a2b-1c0d-9e8f7a6b5c4d"
        }))
        .unwrap();

        assert!(req.selected_activities.is_empty());
        assert_eq!(req.extra_nights.before, 0);
        assert_eq!(req.extra_nights.after, 0);
        assert_eq!(req.travelers.children, 0);
        assert!(req.validate().is_ok());
    }

    #[test]
    fn test_zero_adults_fails_validation() {
        let req: PricingRequest = serde_json::from_value(serde_json::json!({
            "start_date": "2025-07-01",
            "travelers": { "adults": 0 },
            "selected_accommodation": "7b4f9f2e-9f6a-4f7e-b0d3-0a8f3f1c2d4e",
            "selected_vehicle": "3d1a6c8b-2e5f-4a9c-8d7e-1f0b2c3d4e5f",
            "duration": 5,
            "trip_id": "9c8b7a6d-5e4f-3a2b-1c0d-9e8f7a6b5c4d"
        }))
        .unwrap();

        assert!(req.validate().is_err());
    }

    #[test]
    fn test_absurd_duration_fails_validation() {
        let req: PricingRequest = serde_json::from_value(serde_json::json!({
            "start_date": "2025-07-01",
            "travelers": { "adults": 2 },
            "selected_accommodation": "7b4f9f2e-9f6a-4f7e-b0d3-0a8f3f1c2d4e",
            "selected_vehicle": "3d1a6c8b-2e5f-4a9c-8d7e-1f0b2c3d4e5f",
            "duration": 4_611_686_018_427_387_903i64,
            "trip_id": "9c8b7a6d-5e4f-3a2b-1c0d-9e8f7a6b5c4d"
        }))
        .unwrap();

        assert!(req.validate().is_err());
    }

    #[test]
    fn test_excessive_extra_nights_fail_validation() {
        let req: PricingRequest = serde_json::from_value(serde_json::json!({
            "start_date": "2025-07-01",
            "travelers": { "adults": 1 },
            "selected_accommodation": "7b4f9f2e-9f6a-4f7e-b0d3-0a8f3f1c2d4e",
            "selected_vehicle": "3d1a6c8b-2e5f-4a9c-8d7e-1f0b2c3d4e5f",
            "extra_nights": { "before": 31 },
            "duration": 5,
            "trip_id": "9c8b7a6d-5e4f-3a2b-1c0d-9e8f7a6b5c4d"
        }))
        .unwrap();

        assert!(req.validate().is_err());
    }

    #[test]
    fn test_negative_extra_nights_fail_validation() {
        let req: PricingRequest = serde_json::from_value(serde_json::json!({
            "start_date": "2025-07-01",
            "travelers": { "adults": 1 },
            "selected_accommodation": "7b4f9f2e-9f6a-4f7e-b0d3-0a8f3f1c2d4e",
            "selected_vehicle": "3d1a6c8b-2e5f-4a9c-8d7e-1f0b2c3d4e5f",
            "extra_nights": { "before": -1 },
            "duration": 5,
            "trip_id": "9c8b7a6d-5e4f-3a2b-1c0d-9e8f7a6b5c4d"
        }))
        .unwrap();

        assert!(req.validate().is_err());
    }
}

//! Booking model and status state machines.
//!
//! `status` and `payment_status` are independent axes. Unlike the rest of
//! the booking record they are the only fields mutable after creation;
//! the `pricing` snapshot is frozen at creation time so later catalog
//! edits never alter what the customer agreed to pay.

use std::str::FromStr;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::types::Json;
use sqlx::FromRow;
use uuid::Uuid;

use crate::pricing::PriceQuote;

/// Booking lifecycle status.
///
/// Allowed transitions: pending -> confirmed | cancelled,
/// confirmed -> completed | cancelled. Cancelled and completed are
/// terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BookingStatus {
    Pending,
    Confirmed,
    Cancelled,
    Completed,
}

impl BookingStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            BookingStatus::Pending => "pending",
            BookingStatus::Confirmed => "confirmed",
            BookingStatus::Cancelled => "cancelled",
            BookingStatus::Completed => "completed",
        }
    }

    pub fn can_transition_to(&self, next: BookingStatus) -> bool {
        use BookingStatus::*;
        matches!(
            (self, next),
            (Pending, Confirmed) | (Pending, Cancelled) | (Confirmed, Completed) | (Confirmed, Cancelled)
        )
    }
}

impl FromStr for BookingStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(BookingStatus::Pending),
            "confirmed" => Ok(BookingStatus::Confirmed),
            "cancelled" => Ok(BookingStatus::Cancelled),
            "completed" => Ok(BookingStatus::Completed),
            other => Err(format!("unknown booking status: {}", other)),
        }
    }
}

/// Payment status, independent from the booking status axis.
///
/// Allowed transitions: pending -> paid | refunded, paid -> refunded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentStatus {
    Pending,
    Paid,
    Refunded,
}

impl PaymentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentStatus::Pending => "pending",
            PaymentStatus::Paid => "paid",
            PaymentStatus::Refunded => "refunded",
        }
    }

    pub fn can_transition_to(&self, next: PaymentStatus) -> bool {
        use PaymentStatus::*;
        matches!((self, next), (Pending, Paid) | (Pending, Refunded) | (Paid, Refunded))
    }
}

impl FromStr for PaymentStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(PaymentStatus::Pending),
            "paid" => Ok(PaymentStatus::Paid),
            "refunded" => Ok(PaymentStatus::Refunded),
            other => Err(format!("unknown payment status: {}", other)),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Address {
    pub street: String,
    pub city: String,
    pub country: String,
    pub zip_code: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CustomerInfo {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub address: Address,
}

/// Party composition. Infants travel free and are excluded from all
/// per-person pricing.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Travelers {
    pub adults: i32,
    pub children: i32,
    pub infants: i32,
}

impl Travelers {
    /// Adults + children; the count used for per-person pricing
    pub fn party_size(&self) -> i64 {
        i64::from(self.adults) + i64::from(self.children)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TravelerType {
    Adult,
    Child,
    Infant,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TravelerDetail {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    pub first_name: String,
    pub last_name: String,
    pub date_of_birth: NaiveDate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub passport_number: Option<String>,
    pub country_of_residence: String,
    #[serde(rename = "type")]
    pub traveler_type: TravelerType,
}

/// Extra accommodation nights booked around the trip itself
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct ExtraNights {
    #[serde(default)]
    pub before: i64,
    #[serde(default)]
    pub after: i64,
}

/// A persisted booking with its frozen price snapshot
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Booking {
    pub id: Uuid,
    pub trip_id: Uuid,
    pub customer_info: Json<CustomerInfo>,
    pub travelers: Json<Travelers>,
    pub traveler_details: Json<Vec<TravelerDetail>>,
    pub start_date: NaiveDate,
    pub selected_accommodation: Uuid,
    pub selected_vehicle: Uuid,
    pub selected_activities: Vec<Uuid>,
    pub extra_nights: Json<ExtraNights>,
    pub pricing: Json<PriceQuote>,
    pub status: String,
    pub payment_status: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_transitions_from_pending() {
        assert!(BookingStatus::Pending.can_transition_to(BookingStatus::Confirmed));
        assert!(BookingStatus::Pending.can_transition_to(BookingStatus::Cancelled));
        assert!(!BookingStatus::Pending.can_transition_to(BookingStatus::Completed));
        assert!(!BookingStatus::Pending.can_transition_to(BookingStatus::Pending));
    }

    #[test]
    fn test_status_transitions_from_confirmed() {
        assert!(BookingStatus::Confirmed.can_transition_to(BookingStatus::Completed));
        assert!(BookingStatus::Confirmed.can_transition_to(BookingStatus::Cancelled));
        assert!(!BookingStatus::Confirmed.can_transition_to(BookingStatus::Pending));
    }

    #[test]
    fn test_terminal_statuses_are_immutable() {
        for next in [
            BookingStatus::Pending,
            BookingStatus::Confirmed,
            BookingStatus::Cancelled,
            BookingStatus::Completed,
        ] {
            assert!(!BookingStatus::Cancelled.can_transition_to(next));
            assert!(!BookingStatus::Completed.can_transition_to(next));
        }
    }

    #[test]
    fn test_completed_cannot_regress_to_pending() {
        assert!(!BookingStatus::Completed.can_transition_to(BookingStatus::Pending));
    }

    #[test]
    fn test_payment_transitions() {
        assert!(PaymentStatus::Pending.can_transition_to(PaymentStatus::Paid));
        assert!(PaymentStatus::Pending.can_transition_to(PaymentStatus::Refunded));
        assert!(PaymentStatus::Paid.can_transition_to(PaymentStatus::Refunded));
        assert!(!PaymentStatus::Paid.can_transition_to(PaymentStatus::Pending));
        assert!(!PaymentStatus::Refunded.can_transition_to(PaymentStatus::Paid));
    }

    #[test]
    fn test_status_round_trips_through_str() {
        for status in ["pending", "confirmed", "cancelled", "completed"] {
            assert_eq!(BookingStatus::from_str(status).unwrap().as_str(), status);
        }
        assert!(BookingStatus::from_str("archived").is_err());
    }

    #[test]
    fn test_party_size_excludes_infants() {
        let travelers = Travelers { adults: 2, children: 1, infants: 3 };
        assert_eq!(travelers.party_size(), 3);
    }
}

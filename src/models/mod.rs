//! Database models

pub mod booking;
pub mod catalog;
pub mod trip;

pub use booking::{
    Booking, BookingStatus, CustomerInfo, ExtraNights, PaymentStatus, TravelerDetail, Travelers,
};
pub use catalog::{month_day_key, Accommodation, Activity, DateRange, ItemType, PricingRule, Vehicle};
pub use trip::{DayActivity, TripConfiguration};

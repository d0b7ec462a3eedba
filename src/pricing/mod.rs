//! Pricing engine module.
//!
//! Computes deterministic price breakdowns for bookings: seasonal date
//! range resolution, per-item pricing rules, extra nights and taxes.
//! The quote returned here is also the frozen snapshot persisted on a
//! booking, so the interactive flow and the final record always agree.

pub mod calculators;
pub mod models;
pub mod queries;
pub mod requests;
pub mod responses;
pub mod routes;
pub mod services;

// Re-export commonly used items
pub use calculators::{round_money, RateFallback};
pub use models::{LineItem, LineKind, PriceQuote};
pub use requests::PricingRequest;
pub use routes::router;
pub use services::PricingError;

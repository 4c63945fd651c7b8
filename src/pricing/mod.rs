//! Group-pricing engine module.
//!
//! Computes what a booking costs for a given party size under a
//! provider-configured pricing policy: total amount, per-person share, and
//! any discount applied. The calculation core is pure; routes expose it to
//! the platform over HTTP/JSON for configuration previews and validation,
//! and the services layer carries the booking-time contract.

pub mod calculators;
pub mod models;
pub mod requests;
pub mod responses;
pub mod routes;
pub mod services;
pub mod validators;

// Re-export commonly used items
pub use calculators::{calculate_price, preview_table, round_money, PreviewRow, STEP_SIZE};
pub use models::{GroupDiscount, PriceTier, PricingPolicy, PricingResult};
pub use routes::router;
pub use services::{
    decode_stored_policy, encode_policy, price_booking, BookingPriceSnapshot, PricingError,
    SlotPricingSource,
};
pub use validators::{validate_policy, ValidationReport};

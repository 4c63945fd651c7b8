//! Request DTOs for pricing API endpoints.
//!
//! The platform speaks camelCase JSON; policy payloads use the same wire
//! shape that is persisted on availability and service records.

use rust_decimal::Decimal;
use serde::Deserialize;

use super::models::PricingPolicy;

/// Request to preview pricing: a single party size or a 1..=maxSize table.
///
/// Exactly one of `party_size` and `max_size` must be supplied; the handler
/// rejects anything else.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PreviewRequest {
    #[serde(default)]
    pub pricing_rules: Option<PricingPolicy>,
    #[serde(default)]
    pub party_size: Option<i32>,
    #[serde(default)]
    pub max_size: Option<i32>,
    #[serde(default)]
    pub fallback_price: Option<Decimal>,
}

/// Request to validate a drafted policy before it is persisted.
///
/// The rules arrive as raw JSON so that a policy the engine cannot even
/// decode comes back as a validation message instead of a transport error.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidateRequest {
    pub pricing_rules: serde_json::Value,
}

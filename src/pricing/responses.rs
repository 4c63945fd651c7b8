//! Response DTOs for pricing API endpoints.

use rust_decimal::Decimal;
use serde::Serialize;

use super::calculators::PreviewRow;
use super::models::PricingResult;

/// Priced result for JSON responses
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PricingResultResponse {
    #[serde(with = "rust_decimal::serde::str")]
    pub total_price: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub price_per_person: Decimal,
    pub breakdown: String,
    pub applied_rule: String,
    #[serde(
        with = "rust_decimal::serde::str_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub savings: Option<Decimal>,
}

impl From<PricingResult> for PricingResultResponse {
    fn from(result: PricingResult) -> Self {
        Self {
            total_price: result.total_price,
            price_per_person: result.price_per_person,
            breakdown: result.breakdown,
            applied_rule: result.applied_rule,
            savings: result.savings,
        }
    }
}

/// One row of the preview table
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PreviewRowResponse {
    pub party_size: i32,
    pub calculation: PricingResultResponse,
}

impl From<PreviewRow> for PreviewRowResponse {
    fn from(row: PreviewRow) -> Self {
        Self {
            party_size: row.party_size,
            calculation: row.calculation.into(),
        }
    }
}

/// Preview endpoint payload: a single result when `partySize` was supplied,
/// the full table when `maxSize` was.
#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum PreviewResponse {
    Single(PricingResultResponse),
    Table(Vec<PreviewRowResponse>),
}

/// Validation outcome for the policy configuration form
#[derive(Debug, Serialize)]
pub struct ValidationResponse {
    pub valid: bool,
    pub errors: Vec<String>,
}

/// Generic error response body
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorResponse {
    pub error_type: String,
    pub message: String,
}

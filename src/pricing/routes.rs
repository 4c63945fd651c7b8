//! Pricing API route handlers.
//!
//! Called by the platform (configuration UI and booking workflow) over
//! HTTP/JSON. Handler logic lives in plain functions so it can be tested
//! without a running server.

use axum::{
    extract::State,
    routing::{get, post},
    Json, Router,
};

use crate::error::{AppError, Result};
use crate::AppState;

use super::calculators::{calculate_price, preview_table};
use super::models::PricingPolicy;
use super::requests::{PreviewRequest, ValidateRequest};
use super::responses::{
    PreviewResponse, PreviewRowResponse, PricingResultResponse, ValidationResponse,
};
use super::validators::validate_policy;

/// Build the pricing API router
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/healthz", get(healthz))
        .route("/api/pricing/preview", post(preview))
        .route("/api/pricing/validate", post(validate))
}

async fn healthz() -> &'static str {
    "ok"
}

/// Preview endpoint: one result for `partySize`, a table for `maxSize`.
async fn preview(
    State(state): State<AppState>,
    Json(request): Json<PreviewRequest>,
) -> Result<Json<PreviewResponse>> {
    Ok(Json(build_preview(
        &request,
        state.limits.max_preview_rows,
    )?))
}

/// Validate endpoint for the policy configuration form.
async fn validate(Json(request): Json<ValidateRequest>) -> Json<ValidationResponse> {
    Json(build_validation(&request))
}

fn build_preview(request: &PreviewRequest, max_rows: i32) -> Result<PreviewResponse> {
    let policy = request.pricing_rules.as_ref();

    match (request.party_size, request.max_size) {
        (Some(party_size), None) => {
            if party_size < 1 {
                return Err(AppError::BadRequest(
                    "partySize must be at least 1".to_string(),
                ));
            }
            let result = calculate_price(party_size, policy, request.fallback_price);
            Ok(PreviewResponse::Single(PricingResultResponse::from(result)))
        }
        (None, Some(max_size)) => {
            if max_size < 1 {
                return Err(AppError::BadRequest(
                    "maxSize must be at least 1".to_string(),
                ));
            }
            if max_size > max_rows {
                return Err(AppError::BadRequest(format!(
                    "maxSize must not exceed {max_rows}"
                )));
            }
            let rows = preview_table(policy, max_size, request.fallback_price);
            Ok(PreviewResponse::Table(
                rows.into_iter().map(PreviewRowResponse::from).collect(),
            ))
        }
        _ => Err(AppError::BadRequest(
            "exactly one of partySize or maxSize is required".to_string(),
        )),
    }
}

fn build_validation(request: &ValidateRequest) -> ValidationResponse {
    match serde_json::from_value::<PricingPolicy>(request.pricing_rules.clone()) {
        Ok(policy) => {
            let report = validate_policy(&policy);
            ValidationResponse {
                valid: report.valid,
                errors: report.errors,
            }
        }
        Err(e) => ValidationResponse {
            valid: false,
            errors: vec![format!("pricingRules: {e}")],
        },
    }
}

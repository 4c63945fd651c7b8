//! Policy validation.
//!
//! Checks a `PricingPolicy` for internal consistency before it is persisted.
//! Violations come back as human-readable strings naming the wire field and
//! the constraint; callers decide whether to block persistence. Validation
//! never mutates the policy and may be re-run defensively at any time.

use rust_decimal::Decimal;

use super::models::{GroupDiscount, PriceTier, PricingPolicy};

/// Outcome of validating one policy.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationReport {
    pub valid: bool,
    pub errors: Vec<String>,
}

impl ValidationReport {
    fn from_errors(errors: Vec<String>) -> Self {
        Self {
            valid: errors.is_empty(),
            errors,
        }
    }
}

/// Validate a policy against its per-variant constraints.
///
/// Gaps or overlaps between tiers are accepted; tier selection at
/// calculation time takes the first matching range in list order.
pub fn validate_policy(policy: &PricingPolicy) -> ValidationReport {
    let mut errors = Vec::new();

    match policy {
        PricingPolicy::Simple { price_per_person } => {
            if *price_per_person <= Decimal::ZERO {
                errors.push("pricePerPerson must be greater than 0".to_string());
            }
        }
        PricingPolicy::Tiered { tiers } => {
            if tiers.is_empty() {
                errors.push("tiers must contain at least one tier".to_string());
            }
            for (i, tier) in tiers.iter().enumerate() {
                check_tier(i, tier, &mut errors);
            }
        }
        PricingPolicy::Discount {
            base_price,
            discounts,
        } => {
            if *base_price <= Decimal::ZERO {
                errors.push("basePrice must be greater than 0".to_string());
            }
            if discounts.is_empty() {
                errors.push("discounts must contain at least one discount".to_string());
            }
            for (i, discount) in discounts.iter().enumerate() {
                check_discount(i, discount, &mut errors);
            }
        }
        PricingPolicy::Flat {
            total_price,
            max_capacity,
        } => {
            if *total_price <= Decimal::ZERO {
                errors.push("totalPrice must be greater than 0".to_string());
            }
            if *max_capacity < 1 {
                errors.push("maxCapacity must be at least 1".to_string());
            }
        }
        PricingPolicy::Hybrid {
            solo_price,
            group_price,
            group_min_size,
            flat_rate_threshold,
            flat_rate_price,
        } => {
            if *solo_price <= Decimal::ZERO {
                errors.push("soloPrice must be greater than 0".to_string());
            }
            if *group_price <= Decimal::ZERO {
                errors.push("groupPrice must be greater than 0".to_string());
            }
            if *group_min_size < 2 {
                errors.push("groupMinSize must be at least 2".to_string());
            }
            if let Some(threshold) = flat_rate_threshold {
                if flat_rate_price.is_none() {
                    errors.push(
                        "flatRatePrice is required when flatRateThreshold is set".to_string(),
                    );
                }
                if *threshold < *group_min_size {
                    errors.push("flatRateThreshold must be >= groupMinSize".to_string());
                }
            }
        }
        PricingPolicy::StepBased {
            solo_price,
            drop_rate_percent,
            min_price_per_person,
            min_session_earnings,
        } => {
            if *solo_price <= Decimal::ZERO {
                errors.push("soloPrice must be greater than 0".to_string());
            }
            if *drop_rate_percent < Decimal::ZERO || *drop_rate_percent > Decimal::ONE_HUNDRED {
                errors.push("dropRatePercent must be between 0 and 100".to_string());
            }
            if *min_price_per_person <= Decimal::ZERO {
                errors.push("minPricePerPerson must be greater than 0".to_string());
            }
            if *min_session_earnings < Decimal::ZERO {
                errors.push("minSessionEarnings must be at least 0".to_string());
            }
            // A lone solo booking must satisfy both bounds on its own.
            if *min_price_per_person > *solo_price {
                errors.push("minPricePerPerson must not exceed soloPrice".to_string());
            }
            if *min_session_earnings > *solo_price {
                errors.push("minSessionEarnings must not exceed soloPrice".to_string());
            }
        }
    }

    ValidationReport::from_errors(errors)
}

fn check_tier(index: usize, tier: &PriceTier, errors: &mut Vec<String>) {
    if tier.min_size < 1 {
        errors.push(format!("tiers[{index}].minSize must be at least 1"));
    }
    if tier.max_size < tier.min_size {
        errors.push(format!("tiers[{index}].maxSize must be >= minSize"));
    }
    if tier.price_per_person <= Decimal::ZERO {
        errors.push(format!("tiers[{index}].pricePerPerson must be greater than 0"));
    }
}

fn check_discount(index: usize, discount: &GroupDiscount, errors: &mut Vec<String>) {
    if discount.min_size < 2 {
        errors.push(format!("discounts[{index}].minSize must be at least 2"));
    }
    if discount.discount_percent < Decimal::ZERO
        || discount.discount_percent > Decimal::ONE_HUNDRED
    {
        errors.push(format!(
            "discounts[{index}].discountPercent must be between 0 and 100"
        ));
    }
}

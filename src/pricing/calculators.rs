//! Core pricing calculation functions.
//!
//! Pure functions for pricing math - no database access, no I/O. Every call
//! is deterministic, stateless, and safe to run concurrently from any number
//! of request handlers. `party_size >= 1` is a caller precondition enforced
//! by the booking workflow and the API layer.

use rust_decimal::prelude::*;
use rust_decimal::Decimal;

use super::models::{GroupDiscount, PriceTier, PricingPolicy, PricingResult};

/// Party-count bucket width for step-based decay. Platform-wide constant,
/// not a policy field: parties of 1-2 share step 0, 3-4 share step 1, and
/// so on.
pub const STEP_SIZE: i32 = 2;

/// Round to specified decimal places using banker's rounding
/// (ROUND_HALF_EVEN).
///
/// Banker's rounding rounds to the nearest even number when the value is
/// exactly halfway between two possibilities. This reduces cumulative
/// rounding bias.
///
/// # Examples
/// ```
/// use rust_decimal_macros::dec;
/// use groupbook_pricing::pricing::round_money;
///
/// assert_eq!(round_money(dec!(2.5), 0), dec!(2));   // rounds to even
/// assert_eq!(round_money(dec!(3.5), 0), dec!(4));   // rounds to even
/// assert_eq!(round_money(dec!(1.234), 2), dec!(1.23));
/// ```
pub fn round_money(amount: Decimal, places: u32) -> Decimal {
    amount.round_dp_with_strategy(places, RoundingStrategy::MidpointNearestEven)
}

/// Compute what a booking costs for `party_size` people under `policy`.
///
/// With no policy configured, `fallback_amount` is the total for the whole
/// party (NOT a per-person rate) and is split evenly. The same fallback path
/// is taken by a tiered policy whose ranges do not cover `party_size`.
///
/// The calculator does not enforce policy validity; callers validate at
/// configuration time. It never fails for well-typed input.
pub fn calculate_price(
    party_size: i32,
    policy: Option<&PricingPolicy>,
    fallback_amount: Option<Decimal>,
) -> PricingResult {
    match policy {
        None => fallback_price(party_size, fallback_amount),
        Some(PricingPolicy::Simple { price_per_person }) => {
            price_simple(party_size, *price_per_person)
        }
        Some(PricingPolicy::Tiered { tiers }) => price_tiered(party_size, tiers, fallback_amount),
        Some(PricingPolicy::Discount {
            base_price,
            discounts,
        }) => price_discount(party_size, *base_price, discounts),
        Some(PricingPolicy::Flat {
            total_price,
            max_capacity,
        }) => price_flat(party_size, *total_price, *max_capacity),
        Some(PricingPolicy::Hybrid {
            solo_price,
            group_price,
            flat_rate_threshold,
            flat_rate_price,
            ..
        }) => price_hybrid(
            party_size,
            *solo_price,
            *group_price,
            *flat_rate_threshold,
            *flat_rate_price,
        ),
        Some(PricingPolicy::StepBased {
            solo_price,
            drop_rate_percent,
            min_price_per_person,
            min_session_earnings,
        }) => price_step_based(
            party_size,
            *solo_price,
            *drop_rate_percent,
            *min_price_per_person,
            *min_session_earnings,
        ),
    }
}

/// One row of a pricing preview table.
#[derive(Debug, Clone, PartialEq)]
pub struct PreviewRow {
    pub party_size: i32,
    pub calculation: PricingResult,
}

/// Tabulate `calculate_price` for every party size from 1 to `max_size`
/// inclusive.
///
/// Used by the configuration UI and the preview endpoint. Each row is
/// exactly what a direct calculator call for that size returns; no logic of
/// its own.
pub fn preview_table(
    policy: Option<&PricingPolicy>,
    max_size: i32,
    fallback_amount: Option<Decimal>,
) -> Vec<PreviewRow> {
    (1..=max_size)
        .map(|party_size| PreviewRow {
            party_size,
            calculation: calculate_price(party_size, policy, fallback_amount),
        })
        .collect()
}

/// Pricing when no policy applies: the fallback amount is the total for the
/// whole party, split evenly per person. Absent a fallback, everything is
/// zero.
fn fallback_price(party_size: i32, fallback_amount: Option<Decimal>) -> PricingResult {
    let total = fallback_amount.unwrap_or(Decimal::ZERO);
    let per_person = total / Decimal::from(party_size);
    let (applied_rule, breakdown) = if fallback_amount.is_some() {
        (
            "fallback",
            format!("${total:.2} standard price split {party_size} ways"),
        )
    } else {
        ("none", "no pricing configured".to_string())
    };
    PricingResult {
        total_price: total,
        price_per_person: per_person,
        breakdown,
        applied_rule: applied_rule.to_string(),
        savings: None,
    }
}

fn price_simple(party_size: i32, price_per_person: Decimal) -> PricingResult {
    PricingResult {
        total_price: price_per_person * Decimal::from(party_size),
        price_per_person,
        breakdown: format!("{party_size} × ${price_per_person:.2} (per person)"),
        applied_rule: "per-person".to_string(),
        savings: None,
    }
}

fn price_tiered(
    party_size: i32,
    tiers: &[PriceTier],
    fallback_amount: Option<Decimal>,
) -> PricingResult {
    let tier = tiers
        .iter()
        .find(|t| t.min_size <= party_size && party_size <= t.max_size);
    match tier {
        Some(tier) => PricingResult {
            total_price: tier.price_per_person * Decimal::from(party_size),
            price_per_person: tier.price_per_person,
            breakdown: format!(
                "{party_size} × ${:.2} (tier {}-{})",
                tier.price_per_person, tier.min_size, tier.max_size
            ),
            applied_rule: "tier".to_string(),
            savings: None,
        },
        // Party size outside every tier range: degrade exactly like a
        // missing policy rather than inventing a rate.
        None => fallback_price(party_size, fallback_amount),
    }
}

fn price_discount(
    party_size: i32,
    base_price: Decimal,
    discounts: &[GroupDiscount],
) -> PricingResult {
    // Closest-from-below match: the largest qualifying threshold wins.
    let applied = discounts
        .iter()
        .filter(|d| d.min_size <= party_size)
        .max_by_key(|d| d.min_size);
    let percent = applied.map(|d| d.discount_percent).unwrap_or(Decimal::ZERO);

    let per_person = base_price * (Decimal::ONE - percent / Decimal::ONE_HUNDRED);
    let total = per_person * Decimal::from(party_size);
    let discounted = percent > Decimal::ZERO;

    PricingResult {
        total_price: total,
        price_per_person: per_person,
        breakdown: if discounted {
            format!("{party_size} × ${per_person:.2} ({percent}% group discount)")
        } else {
            format!("{party_size} × ${per_person:.2} (base rate)")
        },
        applied_rule: "group-discount".to_string(),
        savings: discounted.then(|| (base_price - per_person) * Decimal::from(party_size)),
    }
}

fn price_flat(party_size: i32, total_price: Decimal, max_capacity: i32) -> PricingResult {
    // Price is independent of party size. Capacity is enforced upstream by
    // the booking seam, which rejects oversize parties before pricing.
    PricingResult {
        total_price,
        price_per_person: total_price / Decimal::from(party_size),
        breakdown: format!("${total_price:.2} flat (up to {max_capacity} people)"),
        applied_rule: "flat-rate".to_string(),
        savings: None,
    }
}

fn price_hybrid(
    party_size: i32,
    solo_price: Decimal,
    group_price: Decimal,
    flat_rate_threshold: Option<i32>,
    flat_rate_price: Option<Decimal>,
) -> PricingResult {
    if party_size == 1 {
        return PricingResult {
            total_price: solo_price,
            price_per_person: solo_price,
            breakdown: format!("1 × ${solo_price:.2} (solo rate)"),
            applied_rule: "solo".to_string(),
            savings: None,
        };
    }

    if let (Some(threshold), Some(flat_price)) = (flat_rate_threshold, flat_rate_price) {
        if party_size >= threshold {
            return PricingResult {
                total_price: flat_price,
                price_per_person: flat_price / Decimal::from(party_size),
                breakdown: format!("${flat_price:.2} flat rate for {party_size} people"),
                applied_rule: "flat-threshold".to_string(),
                savings: None,
            };
        }
    }

    // Everything that is neither solo nor past the cutoff takes the group
    // rate, including sizes below groupMinSize.
    PricingResult {
        total_price: group_price * Decimal::from(party_size),
        price_per_person: group_price,
        breakdown: format!("{party_size} × ${group_price:.2} (group rate)"),
        applied_rule: "group-rate".to_string(),
        savings: None,
    }
}

fn price_step_based(
    party_size: i32,
    solo_price: Decimal,
    drop_rate_percent: Decimal,
    min_price_per_person: Decimal,
    min_session_earnings: Decimal,
) -> PricingResult {
    let step_index = (party_size - 1) / STEP_SIZE;
    let retained = Decimal::ONE - drop_rate_percent / Decimal::ONE_HUNDRED;

    let mut raw = solo_price;
    for _ in 0..step_index {
        raw *= retained;
    }

    let count = Decimal::from(party_size);
    let mut per_person = raw.max(min_price_per_person);
    let mut total = per_person * count;
    let mut applied_rule = if raw < min_price_per_person {
        "step-floor"
    } else {
        "step-decay"
    };

    // The session minimum overrides the per-person floor.
    if total < min_session_earnings {
        per_person = min_session_earnings / count;
        total = min_session_earnings;
        applied_rule = "minimum-earnings";
    }

    // Whole-unit rounding is unique to this model; the rounded per-person
    // rate is authoritative and the total is recomputed from it.
    per_person = round_money(per_person, 0);
    total = per_person * count;

    PricingResult {
        total_price: total,
        price_per_person: per_person,
        breakdown: format!("{party_size} × ${per_person:.2} (step {step_index})"),
        applied_rule: applied_rule.to_string(),
        savings: None,
    }
}

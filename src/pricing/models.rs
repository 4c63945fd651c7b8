//! Domain models for the group-pricing engine.
//!
//! A provider configures exactly one `PricingPolicy` per availability slot or
//! service offering. The policy is a value type: validated once, serialized
//! onto the record, and replaced wholesale on edit. A booking captures its
//! computed price as a frozen snapshot, so later policy edits never reprice
//! existing bookings.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A contiguous party-size range mapped to a per-person rate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceTier {
    pub min_size: i32,
    pub max_size: i32,
    pub price_per_person: Decimal,
}

/// A percentage discount unlocked at a minimum party size.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GroupDiscount {
    pub min_size: i32,
    pub discount_percent: Decimal,
}

/// Provider-configured pricing policy for a slot or service offering.
///
/// Exactly one variant is active at a time; the `type` field discriminates
/// the serialized form stored on availability and service records. The set
/// is closed: providers pick from these six models, there is no extension
/// point.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum PricingPolicy {
    /// Flat per-person rate, no discount.
    #[serde(rename_all = "camelCase")]
    Simple { price_per_person: Decimal },

    /// Per-person rate selected by which size range the party falls into.
    #[serde(rename_all = "camelCase")]
    Tiered { tiers: Vec<PriceTier> },

    /// Per-person base rate with percentage discounts at size thresholds.
    /// The largest qualifying threshold wins.
    #[serde(rename_all = "camelCase")]
    Discount {
        base_price: Decimal,
        discounts: Vec<GroupDiscount>,
    },

    /// One price for the whole booking regardless of size, bounded by
    /// capacity.
    #[serde(rename_all = "camelCase")]
    Flat {
        total_price: Decimal,
        max_capacity: i32,
    },

    /// Three-tier blend: solo rate, per-person group rate, and an optional
    /// flat-rate cutoff for large parties. `flatRatePrice` accompanies
    /// `flatRateThreshold` whenever the threshold is set.
    #[serde(rename_all = "camelCase")]
    Hybrid {
        solo_price: Decimal,
        group_price: Decimal,
        group_min_size: i32,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        flat_rate_threshold: Option<i32>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        flat_rate_price: Option<Decimal>,
    },

    /// Per-person price decays geometrically every fixed step of people,
    /// floored at `minPricePerPerson`, then boosted if the session total
    /// would fall below `minSessionEarnings`.
    #[serde(rename_all = "camelCase")]
    StepBased {
        solo_price: Decimal,
        drop_rate_percent: Decimal,
        min_price_per_person: Decimal,
        min_session_earnings: Decimal,
    },
}

impl PricingPolicy {
    /// Wire-format discriminator for this policy, as stored in the `type`
    /// field of the serialized form.
    pub fn kind(&self) -> &'static str {
        match self {
            PricingPolicy::Simple { .. } => "simple",
            PricingPolicy::Tiered { .. } => "tiered",
            PricingPolicy::Discount { .. } => "discount",
            PricingPolicy::Flat { .. } => "flat",
            PricingPolicy::Hybrid { .. } => "hybrid",
            PricingPolicy::StepBased { .. } => "step-based",
        }
    }
}

/// Result of one pricing calculation.
///
/// `total_price` is authoritative; `price_per_person` is the per-head share.
/// `breakdown` and `applied_rule` are free-form display strings and carry no
/// further contract.
#[derive(Debug, Clone, PartialEq)]
pub struct PricingResult {
    pub total_price: Decimal,
    pub price_per_person: Decimal,
    pub breakdown: String,
    pub applied_rule: String,
    /// Amount saved versus the undiscounted base, when a discount applied.
    pub savings: Option<Decimal>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_policy_decodes_wire_format() {
        let policy: PricingPolicy = serde_json::from_str(
            r#"{"type":"step-based","soloPrice":100,"dropRatePercent":10,
                "minPricePerPerson":50,"minSessionEarnings":100}"#,
        )
        .unwrap();
        assert_eq!(
            policy,
            PricingPolicy::StepBased {
                solo_price: dec!(100),
                drop_rate_percent: dec!(10),
                min_price_per_person: dec!(50),
                min_session_earnings: dec!(100),
            }
        );
        assert_eq!(policy.kind(), "step-based");
    }

    #[test]
    fn test_hybrid_optional_fields_default_to_none() {
        let policy: PricingPolicy = serde_json::from_str(
            r#"{"type":"hybrid","soloPrice":100,"groupPrice":80,"groupMinSize":2}"#,
        )
        .unwrap();
        match policy {
            PricingPolicy::Hybrid {
                flat_rate_threshold,
                flat_rate_price,
                ..
            } => {
                assert!(flat_rate_threshold.is_none());
                assert!(flat_rate_price.is_none());
            }
            other => panic!("expected hybrid, got {}", other.kind()),
        }
    }

    #[test]
    fn test_unknown_type_tag_is_rejected() {
        let result: Result<PricingPolicy, _> =
            serde_json::from_str(r#"{"type":"seasonal","basePrice":100}"#);
        assert!(result.is_err());
    }
}

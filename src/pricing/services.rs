//! Booking-time pricing services.
//!
//! The booking workflow resolves a slot's stored pricing configuration,
//! prices the requested party, and persists the returned snapshot verbatim.
//! Stored policy JSON is opaque data here: it is decoded defensively, and a
//! slot with unreadable pricing degrades to its legacy price rather than
//! failing the booking.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use uuid::Uuid;

use super::calculators::calculate_price;
use super::models::PricingPolicy;
use super::validators::validate_policy;

/// Pricing-relevant fields of an availability slot, as loaded by the booking
/// workflow. Persistence and tenant ownership stay outside this module.
#[derive(Debug, Clone)]
pub struct SlotPricingSource {
    pub slot_id: Uuid,
    pub provider_id: Uuid,
    /// Serialized policy attached to the slot, if the provider configured
    /// one.
    pub policy_json: Option<String>,
    /// Flat total carried over from before per-slot policies existed.
    pub legacy_price: Option<Decimal>,
    /// Serialized provider-wide default policy.
    pub provider_default_json: Option<String>,
}

/// Frozen pricing captured on a booking record. Later policy edits never
/// touch a booking that already holds its snapshot.
#[derive(Debug, Clone)]
pub struct BookingPriceSnapshot {
    pub total_price: Decimal,
    pub price_per_person: Decimal,
    pub applied_rule: String,
    pub breakdown: String,
    pub savings: Option<Decimal>,
    pub priced_at: DateTime<Utc>,
}

/// Pricing calculation error types
#[derive(Debug, Clone)]
pub enum PricingError {
    PartySizeOutOfRange {
        party_size: i32,
    },
    CapacityExceeded {
        party_size: i32,
        max_capacity: i32,
    },
    InvalidPolicy {
        message: String,
        errors: Vec<String>,
    },
}

impl std::fmt::Display for PricingError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PricingError::PartySizeOutOfRange { party_size } => {
                write!(f, "Party size must be at least 1 (got {})", party_size)
            }
            PricingError::CapacityExceeded {
                party_size,
                max_capacity,
            } => {
                write!(
                    f,
                    "Party of {} exceeds slot capacity of {}",
                    party_size, max_capacity
                )
            }
            PricingError::InvalidPolicy { message, .. } => {
                write!(f, "Invalid pricing policy: {}", message)
            }
        }
    }
}

impl std::error::Error for PricingError {}

/// Decode a stored policy, tolerating malformed and legacy data.
///
/// Unparseable JSON and unknown `type` tags are data errors, not pricing
/// errors: log and fall through to the next pricing source.
pub fn decode_stored_policy(raw: &str, slot_id: Uuid) -> Option<PricingPolicy> {
    match serde_json::from_str(raw) {
        Ok(policy) => Some(policy),
        Err(e) => {
            tracing::warn!("slot {slot_id}: ignoring unreadable pricing policy: {e}");
            None
        }
    }
}

/// Serialize a provider-authored policy for persistence, validating first.
pub fn encode_policy(policy: &PricingPolicy) -> Result<String, PricingError> {
    let report = validate_policy(policy);
    if !report.valid {
        return Err(PricingError::InvalidPolicy {
            message: format!("{} policy failed validation", policy.kind()),
            errors: report.errors,
        });
    }
    serde_json::to_string(policy).map_err(|e| PricingError::InvalidPolicy {
        message: format!("could not serialize {} policy: {e}", policy.kind()),
        errors: vec![],
    })
}

/// Price a booking request against a slot's pricing configuration.
///
/// Resolution order: the slot's own policy, else the slot's legacy flat
/// price as the fallback total, else the provider default policy. The legacy
/// price also backs a tiered policy whose ranges miss the party size.
pub fn price_booking(
    source: &SlotPricingSource,
    party_size: i32,
) -> Result<BookingPriceSnapshot, PricingError> {
    if party_size < 1 {
        return Err(PricingError::PartySizeOutOfRange { party_size });
    }

    let slot_policy = source
        .policy_json
        .as_deref()
        .and_then(|raw| decode_stored_policy(raw, source.slot_id));

    let (policy, fallback_amount) = match (slot_policy, source.legacy_price) {
        (Some(policy), legacy) => (Some(policy), legacy),
        (None, Some(legacy)) => (None, Some(legacy)),
        (None, None) => {
            let default = source
                .provider_default_json
                .as_deref()
                .and_then(|raw| decode_stored_policy(raw, source.slot_id));
            if default.is_none() {
                tracing::debug!(
                    "slot {} (provider {}): no pricing configured",
                    source.slot_id,
                    source.provider_id
                );
            }
            (default, None)
        }
    };

    // Flat policies carry a hard capacity; reject oversize parties before
    // pricing instead of silently recomputing.
    if let Some(PricingPolicy::Flat { max_capacity, .. }) = &policy {
        if party_size > *max_capacity {
            return Err(PricingError::CapacityExceeded {
                party_size,
                max_capacity: *max_capacity,
            });
        }
    }

    let result = calculate_price(party_size, policy.as_ref(), fallback_amount);
    Ok(BookingPriceSnapshot {
        total_price: result.total_price,
        price_per_person: result.price_per_person,
        applied_rule: result.applied_rule,
        breakdown: result.breakdown,
        savings: result.savings,
        priced_at: Utc::now(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn source(
        policy_json: Option<&str>,
        legacy_price: Option<Decimal>,
        provider_default_json: Option<&str>,
    ) -> SlotPricingSource {
        SlotPricingSource {
            slot_id: Uuid::new_v4(),
            provider_id: Uuid::new_v4(),
            policy_json: policy_json.map(str::to_string),
            legacy_price,
            provider_default_json: provider_default_json.map(str::to_string),
        }
    }

    // ==================== resolution order ====================

    #[test]
    fn test_slot_policy_wins_over_legacy_price() {
        let src = source(
            Some(r#"{"type":"simple","pricePerPerson":25}"#),
            Some(dec!(999)),
            None,
        );
        let snapshot = price_booking(&src, 4).unwrap();
        assert_eq!(snapshot.total_price, dec!(100));
        assert_eq!(snapshot.price_per_person, dec!(25));
    }

    #[test]
    fn test_legacy_price_wins_over_provider_default() {
        let src = source(
            None,
            Some(dec!(90)),
            Some(r#"{"type":"simple","pricePerPerson":999}"#),
        );
        let snapshot = price_booking(&src, 3).unwrap();
        assert_eq!(snapshot.total_price, dec!(90));
        assert_eq!(snapshot.price_per_person, dec!(30));
        assert_eq!(snapshot.applied_rule, "fallback");
    }

    #[test]
    fn test_provider_default_used_last() {
        let src = source(None, None, Some(r#"{"type":"simple","pricePerPerson":25}"#));
        let snapshot = price_booking(&src, 4).unwrap();
        assert_eq!(snapshot.total_price, dec!(100));
    }

    #[test]
    fn test_nothing_configured_prices_at_zero() {
        let src = source(None, None, None);
        let snapshot = price_booking(&src, 2).unwrap();
        assert_eq!(snapshot.total_price, dec!(0));
        assert_eq!(snapshot.applied_rule, "none");
    }

    #[test]
    fn test_tiered_slot_policy_falls_back_to_legacy_price() {
        let src = source(
            Some(r#"{"type":"tiered","tiers":[{"minSize":1,"maxSize":4,"pricePerPerson":80}]}"#),
            Some(dec!(120)),
            None,
        );
        let snapshot = price_booking(&src, 6).unwrap();
        assert_eq!(snapshot.total_price, dec!(120));
        assert_eq!(snapshot.price_per_person, dec!(20));
    }

    // ==================== defensive decoding ====================

    #[test]
    fn test_malformed_slot_policy_degrades_to_legacy_price() {
        let src = source(Some("{not json"), Some(dec!(90)), None);
        let snapshot = price_booking(&src, 3).unwrap();
        assert_eq!(snapshot.total_price, dec!(90));
        assert_eq!(snapshot.price_per_person, dec!(30));
    }

    #[test]
    fn test_unknown_policy_type_degrades_to_legacy_price() {
        let src = source(
            Some(r#"{"type":"seasonal","basePrice":100}"#),
            Some(dec!(60)),
            None,
        );
        let snapshot = price_booking(&src, 2).unwrap();
        assert_eq!(snapshot.total_price, dec!(60));
    }

    #[test]
    fn test_decode_stored_policy_roundtrip() {
        let policy = PricingPolicy::Flat {
            total_price: dec!(500),
            max_capacity: 10,
        };
        let raw = encode_policy(&policy).unwrap();
        let decoded = decode_stored_policy(&raw, Uuid::new_v4()).unwrap();
        assert_eq!(decoded, policy);
    }

    // ==================== guards ====================

    #[test]
    fn test_rejects_party_size_below_one() {
        let src = source(None, Some(dec!(90)), None);
        let err = price_booking(&src, 0).unwrap_err();
        assert!(matches!(
            err,
            PricingError::PartySizeOutOfRange { party_size: 0 }
        ));
    }

    #[test]
    fn test_rejects_party_over_flat_capacity() {
        let src = source(
            Some(r#"{"type":"flat","totalPrice":500,"maxCapacity":10}"#),
            None,
            None,
        );
        let err = price_booking(&src, 12).unwrap_err();
        assert!(matches!(
            err,
            PricingError::CapacityExceeded {
                party_size: 12,
                max_capacity: 10
            }
        ));

        let ok = price_booking(&src, 10).unwrap();
        assert_eq!(ok.total_price, dec!(500));
        assert_eq!(ok.price_per_person, dec!(50));
    }

    // ==================== encode_policy ====================

    #[test]
    fn test_encode_policy_rejects_invalid() {
        let policy = PricingPolicy::Flat {
            total_price: dec!(500),
            max_capacity: 0,
        };
        let err = encode_policy(&policy).unwrap_err();
        match err {
            PricingError::InvalidPolicy { errors, .. } => {
                assert!(errors.iter().any(|e| e.contains("maxCapacity")));
            }
            other => panic!("expected InvalidPolicy, got {other}"),
        }
    }

    #[test]
    fn test_encode_policy_emits_wire_format() {
        let policy = PricingPolicy::Simple {
            price_per_person: dec!(25),
        };
        let raw = encode_policy(&policy).unwrap();
        let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
        assert_eq!(value["type"], "simple");
        assert!(value.get("pricePerPerson").is_some());
    }

    // ==================== errors ====================

    #[test]
    fn test_pricing_error_display() {
        let err = PricingError::PartySizeOutOfRange { party_size: 0 };
        assert!(err.to_string().contains("at least 1"));

        let err = PricingError::CapacityExceeded {
            party_size: 12,
            max_capacity: 10,
        };
        assert!(err.to_string().contains("12"));
        assert!(err.to_string().contains("10"));

        let err = PricingError::InvalidPolicy {
            message: "test error".to_string(),
            errors: vec![],
        };
        assert!(err.to_string().contains("test error"));
    }
}

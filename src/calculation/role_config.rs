//! Per-slot pay configuration.
//!
//! A slot's base pay, cap and gratuity share come from exactly one source,
//! resolved top-down: a per-role pay override on the event, or else the
//! labor rules the slot was planned with.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::models::{EventType, GratuityShare, StaffMember, StaffPayOverride, StaffRole};

/// Where a slot's pay configuration came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RoleConfigSource {
    /// A pay override on the event for the slot's role.
    Override,
    /// The labor rules.
    Rules,
}

/// The pay configuration one slot is paid with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolvedRoleConfig {
    /// Which source won.
    pub source: RoleConfigSource,
    /// Base pay as a percentage of the subtotal.
    pub base_pay_percent: Decimal,
    /// Maximum payout; `None` is uncapped.
    pub cap: Option<Decimal>,
    /// How the slot's gratuity share is computed.
    pub gratuity: GratuityShare,
}

/// Resolves the pay configuration for one staff slot.
///
/// The first override whose role equals the slot's role replaces base pay,
/// cap and gratuity share entirely; its gratuity percentage is taken of the
/// total gratuity. Without one, the slot keeps its planned base pay and cap
/// and shares gratuity by event type: buffets split evenly across all
/// slots, private dinners pay assistants from the assistant percentage and
/// chefs from the chef pool.
pub fn resolve_role_config(
    slot: &StaffMember,
    overrides: &[StaffPayOverride],
    event_type: EventType,
) -> ResolvedRoleConfig {
    if let Some(o) = overrides.iter().find(|o| o.role == slot.role) {
        return ResolvedRoleConfig {
            source: RoleConfigSource::Override,
            base_pay_percent: o.base_pay_percent,
            cap: o.cap,
            gratuity: GratuityShare::OfTotal {
                percent: o.gratuity_split_percent,
            },
        };
    }

    let gratuity = match (event_type, slot.role) {
        (EventType::Buffet, _) => GratuityShare::EvenSplit,
        (EventType::PrivateDinner, StaffRole::Assistant) => GratuityShare::AssistantPool,
        (EventType::PrivateDinner, StaffRole::Chef(_)) => GratuityShare::ChefPool,
    };

    ResolvedRoleConfig {
        source: RoleConfigSource::Rules,
        base_pay_percent: slot.base_pay_percent,
        cap: slot.cap,
        gratuity,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ChefRole;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn member(role: StaffRole) -> StaffMember {
        StaffMember {
            role,
            base_pay_percent: dec("15"),
            cap: Some(dec("350")),
            is_owner: false,
            owner_role: None,
        }
    }

    fn override_for(role: StaffRole, base: &str, split: &str, cap: Option<&str>) -> StaffPayOverride {
        StaffPayOverride {
            role,
            base_pay_percent: dec(base),
            gratuity_split_percent: dec(split),
            cap: cap.map(dec),
        }
    }

    #[test]
    fn test_rules_source_for_private_chef() {
        let slot = member(StaffRole::Chef(ChefRole::Lead));
        let config = resolve_role_config(&slot, &[], EventType::PrivateDinner);

        assert_eq!(config.source, RoleConfigSource::Rules);
        assert_eq!(config.base_pay_percent, dec("15"));
        assert_eq!(config.cap, Some(dec("350")));
        assert_eq!(config.gratuity, GratuityShare::ChefPool);
    }

    #[test]
    fn test_rules_source_for_private_assistant() {
        let slot = member(StaffRole::Assistant);
        let config = resolve_role_config(&slot, &[], EventType::PrivateDinner);
        assert_eq!(config.gratuity, GratuityShare::AssistantPool);
    }

    #[test]
    fn test_buffet_splits_evenly_for_every_role() {
        for role in [StaffRole::Chef(ChefRole::Buffet), StaffRole::Assistant] {
            let config = resolve_role_config(&member(role), &[], EventType::Buffet);
            assert_eq!(config.gratuity, GratuityShare::EvenSplit);
        }
    }

    #[test]
    fn test_override_replaces_everything() {
        let slot = member(StaffRole::Chef(ChefRole::Lead));
        let overrides = vec![override_for(StaffRole::Chef(ChefRole::Lead), "20", "30", None)];
        let config = resolve_role_config(&slot, &overrides, EventType::PrivateDinner);

        assert_eq!(config.source, RoleConfigSource::Override);
        assert_eq!(config.base_pay_percent, dec("20"));
        assert_eq!(config.cap, None);
        assert_eq!(
            config.gratuity,
            GratuityShare::OfTotal {
                percent: dec("30")
            }
        );
    }

    #[test]
    fn test_override_for_other_role_is_ignored() {
        let slot = member(StaffRole::Assistant);
        let overrides = vec![override_for(
            StaffRole::Chef(ChefRole::Lead),
            "20",
            "30",
            Some("500"),
        )];
        let config = resolve_role_config(&slot, &overrides, EventType::PrivateDinner);
        assert_eq!(config.source, RoleConfigSource::Rules);
    }

    #[test]
    fn test_first_override_for_role_wins() {
        let slot = member(StaffRole::Assistant);
        let overrides = vec![
            override_for(StaffRole::Assistant, "6", "40", Some("200")),
            override_for(StaffRole::Assistant, "9", "10", None),
        ];
        let config = resolve_role_config(&slot, &overrides, EventType::Buffet);

        assert_eq!(config.base_pay_percent, dec("6"));
        assert_eq!(config.cap, Some(dec("200")));
    }
}

//! Event input model and related types.
//!
//! This module defines the [`EventInput`] a booking supplies to the engine,
//! the [`EventType`] enum and per-role [`StaffPayOverride`]s.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::config::{MAX_AMOUNT, MAX_PERCENT};
use crate::error::{EngineError, EngineResult};

use super::StaffRole;

/// The kind of event being catered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventType {
    /// Plated private dinner cooked on site.
    PrivateDinner,
    /// Self-serve buffet.
    Buffet,
}

impl EventType {
    /// Returns the snake_case name used in configuration and JSON.
    pub fn as_str(&self) -> &'static str {
        match self {
            EventType::PrivateDinner => "private_dinner",
            EventType::Buffet => "buffet",
        }
    }
}

impl std::fmt::Display for EventType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A per-event pay override for one staff role.
///
/// When present it fully replaces the role's base-pay percentage, cap and
/// gratuity share. `gratuity_split_percent` is the role's fraction of the
/// total gratuity, not a share of a pool divided with other roles.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StaffPayOverride {
    /// The role this override applies to (every slot of that role).
    pub role: StaffRole,
    /// Base pay as a percentage of the subtotal.
    pub base_pay_percent: Decimal,
    /// Percentage of total gratuity paid to each slot of this role.
    pub gratuity_split_percent: Decimal,
    /// Maximum payout per slot; `None` leaves the role uncapped.
    #[serde(default)]
    pub cap: Option<Decimal>,
}

/// The inputs describing a single event booking.
///
/// Immutable for the duration of a calculation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventInput {
    /// Number of adult guests.
    pub adults: u32,
    /// Number of child guests.
    #[serde(default)]
    pub children: u32,
    /// The kind of event.
    pub event_type: EventType,
    /// The date the event takes place.
    pub event_date: NaiveDate,
    /// One-way travel distance to the venue in miles.
    #[serde(default)]
    pub distance_miles: Decimal,
    /// Optional per-guest upcharge for a premium menu.
    #[serde(default)]
    pub premium_add_on: Option<Decimal>,
    /// Optional per-role pay overrides.
    #[serde(default)]
    pub staff_pay_overrides: Vec<StaffPayOverride>,
    /// Optional explicit staffing profile; wins over auto-matching when it resolves.
    #[serde(default)]
    pub staffing_profile_id: Option<String>,
    /// Subtotal already priced by a detailed menu; used instead of guest pricing when >= 0.
    #[serde(default)]
    pub subtotal_override: Option<Decimal>,
    /// Food cost already priced by a detailed menu; used instead of the percentage when >= 0.
    #[serde(default)]
    pub food_cost_override: Option<Decimal>,
}

impl EventInput {
    /// Creates an input with the given guest counts and no optional extras.
    pub fn new(adults: u32, children: u32, event_type: EventType, event_date: NaiveDate) -> Self {
        Self {
            adults,
            children,
            event_type,
            event_date,
            distance_miles: Decimal::ZERO,
            premium_add_on: None,
            staff_pay_overrides: Vec::new(),
            staffing_profile_id: None,
            subtotal_override: None,
            food_cost_override: None,
        }
    }

    /// Total number of guests (adults and children).
    pub fn guest_count(&self) -> u32 {
        self.adults.saturating_add(self.children)
    }

    /// Returns the override for a role, if any. The first matching entry wins.
    pub fn override_for(&self, role: StaffRole) -> Option<&StaffPayOverride> {
        self.staff_pay_overrides.iter().find(|o| o.role == role)
    }

    /// Rejects inputs a booking form should never produce.
    ///
    /// The engine itself clamps these values, so this is only used at the API
    /// boundary to surface caller bugs instead of silently coercing them.
    pub fn validate(&self) -> EngineResult<()> {
        check_amount("distance_miles", Some(self.distance_miles))?;
        check_amount("premium_add_on", self.premium_add_on)?;
        if self.subtotal_override.is_some_and(|s| s > MAX_AMOUNT) {
            return Err(invalid("subtotal_override", &too_large(MAX_AMOUNT)));
        }
        if self.food_cost_override.is_some_and(|f| f > MAX_AMOUNT) {
            return Err(invalid("food_cost_override", &too_large(MAX_AMOUNT)));
        }
        for o in &self.staff_pay_overrides {
            let field = format!("staff_pay_overrides[{}]", o.role);
            for percent in [o.base_pay_percent, o.gratuity_split_percent] {
                if percent < Decimal::ZERO {
                    return Err(invalid(&field, "percentages must not be negative"));
                }
                if percent > MAX_PERCENT {
                    return Err(invalid(
                        &field,
                        &format!("percentages {}", too_large(MAX_PERCENT)),
                    ));
                }
            }
            match o.cap {
                Some(c) if c < Decimal::ZERO => {
                    return Err(invalid(&field, "cap must not be negative"));
                }
                Some(c) if c > MAX_AMOUNT => {
                    return Err(invalid(&field, &format!("cap {}", too_large(MAX_AMOUNT))));
                }
                _ => {}
            }
        }
        Ok(())
    }
}

fn check_amount(field: &str, value: Option<Decimal>) -> EngineResult<()> {
    match value {
        Some(v) if v < Decimal::ZERO => Err(invalid(field, "must not be negative")),
        Some(v) if v > MAX_AMOUNT => Err(invalid(field, &too_large(MAX_AMOUNT))),
        _ => Ok(()),
    }
}

fn too_large(max: Decimal) -> String {
    format!("must not exceed {}", max)
}

fn invalid(field: &str, message: &str) -> EngineError {
    EngineError::InvalidInput {
        field: field.to_string(),
        message: message.to_string(),
    }
}

//! Staffing models.
//!
//! Roles, staffing profiles and the derived [`StaffingPlan`] that drives
//! labor compensation.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::EventType;

/// Sentinel `max_guests` value meaning "no upper bound".
pub const UNBOUNDED_MAX_GUESTS: u32 = 9999;

/// The variant of chef working a slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChefRole {
    /// Lead chef of a private dinner.
    Lead,
    /// Single chef covering a private dinner past one chef's capacity.
    Overflow,
    /// Additional full chef on a large private dinner.
    Full,
    /// Buffet chef.
    Buffet,
}

impl ChefRole {
    /// Returns the snake_case name used in configuration and JSON.
    pub fn as_str(&self) -> &'static str {
        match self {
            ChefRole::Lead => "lead",
            ChefRole::Overflow => "overflow",
            ChefRole::Full => "full",
            ChefRole::Buffet => "buffet",
        }
    }
}

/// A staff slot role: one of the chef variants, or an assistant.
///
/// Serialized as a flat string (`"lead"`, `"overflow"`, `"full"`, `"buffet"`,
/// `"assistant"`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum StaffRole {
    /// A chef slot.
    Chef(ChefRole),
    /// An assistant slot.
    Assistant,
}

impl StaffRole {
    /// Returns true for chef slots.
    pub fn is_chef(&self) -> bool {
        matches!(self, StaffRole::Chef(_))
    }

    /// Returns the snake_case name used in configuration and JSON.
    pub fn as_str(&self) -> &'static str {
        match self {
            StaffRole::Chef(chef) => chef.as_str(),
            StaffRole::Assistant => "assistant",
        }
    }
}

impl std::fmt::Display for StaffRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for StaffRole {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "lead" => Ok(StaffRole::Chef(ChefRole::Lead)),
            "overflow" => Ok(StaffRole::Chef(ChefRole::Overflow)),
            "full" => Ok(StaffRole::Chef(ChefRole::Full)),
            "buffet" => Ok(StaffRole::Chef(ChefRole::Buffet)),
            "assistant" => Ok(StaffRole::Assistant),
            other => Err(format!("unknown staff role: {}", other)),
        }
    }
}

impl TryFrom<String> for StaffRole {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<StaffRole> for String {
    fn from(role: StaffRole) -> Self {
        role.as_str().to_string()
    }
}

/// Which event types a staffing profile applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum ProfileEventType {
    /// Applies to every event type.
    Any,
    /// Applies to one event type only.
    Only(EventType),
}

impl ProfileEventType {
    /// Returns true if the profile may be used for `event_type`.
    pub fn covers(&self, event_type: EventType) -> bool {
        match self {
            ProfileEventType::Any => true,
            ProfileEventType::Only(t) => *t == event_type,
        }
    }

    /// Returns true only for an exact (non-`any`) match.
    pub fn is_exact(&self, event_type: EventType) -> bool {
        *self == ProfileEventType::Only(event_type)
    }
}

impl TryFrom<String> for ProfileEventType {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        match value.as_str() {
            "any" => Ok(ProfileEventType::Any),
            "private_dinner" => Ok(ProfileEventType::Only(EventType::PrivateDinner)),
            "buffet" => Ok(ProfileEventType::Only(EventType::Buffet)),
            other => Err(format!("unknown profile event type: {}", other)),
        }
    }
}

impl From<ProfileEventType> for String {
    fn from(value: ProfileEventType) -> Self {
        match value {
            ProfileEventType::Any => "any".to_string(),
            ProfileEventType::Only(t) => t.as_str().to_string(),
        }
    }
}

/// A named, guest-range-scoped staff composition template.
///
/// Created and edited by an external configuration UI; read-only here. The
/// `roles` list defines both the composition and the order slots are paid in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StaffingProfile {
    /// Stable identifier referenced by bookings.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Event types this profile applies to.
    pub event_type: ProfileEventType,
    /// Smallest guest count (inclusive) this profile matches.
    #[serde(default)]
    pub min_guests: u32,
    /// Largest guest count (inclusive); [`UNBOUNDED_MAX_GUESTS`] means no limit.
    #[serde(default = "default_max_guests")]
    pub max_guests: u32,
    /// Staff slots in pay order.
    pub roles: Vec<StaffRole>,
}

fn default_max_guests() -> u32 {
    UNBOUNDED_MAX_GUESTS
}

impl StaffingProfile {
    /// Returns true if `guest_count` lies within `[min_guests, max_guests]`.
    pub fn covers_guest_count(&self, guest_count: u32) -> bool {
        guest_count >= self.min_guests && guest_count <= self.max_guests
    }

    /// Width of the guest range; narrower profiles are more specific.
    pub fn range_width(&self) -> u32 {
        self.max_guests.saturating_sub(self.min_guests)
    }
}

/// One of the two business owners.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OwnerRole {
    /// First owner.
    OwnerA,
    /// Second owner.
    OwnerB,
}

/// A single planned staff slot with the pay rules it was planned with.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StaffMember {
    /// The slot role.
    pub role: StaffRole,
    /// Base pay as a percentage of the subtotal, from the labor rules.
    pub base_pay_percent: Decimal,
    /// Maximum payout for this slot, from the labor rules.
    pub cap: Option<Decimal>,
    /// Whether an owner works this slot.
    pub is_owner: bool,
    /// Which owner works this slot.
    pub owner_role: Option<OwnerRole>,
}

/// Which staff work an event. `staff` order is authoritative for pay.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StaffingPlan {
    /// Chef roles in plan order.
    pub chef_roles: Vec<ChefRole>,
    /// Whether at least one assistant slot is planned.
    pub assistant_needed: bool,
    /// Number of staff slots.
    pub total_staff_count: u32,
    /// Every slot in pay order.
    pub staff: Vec<StaffMember>,
    /// The profile the plan was built from, if any.
    pub matched_profile_id: Option<String>,
    /// Name of the matched profile, if any.
    pub matched_profile_name: Option<String>,
}

impl StaffingPlan {
    /// Builds a plan from ordered slots, deriving the summary fields.
    pub fn from_staff(staff: Vec<StaffMember>, profile: Option<&StaffingProfile>) -> Self {
        let chef_roles = staff
            .iter()
            .filter_map(|s| match s.role {
                StaffRole::Chef(chef) => Some(chef),
                StaffRole::Assistant => None,
            })
            .collect();
        let assistant_needed = staff.iter().any(|s| s.role == StaffRole::Assistant);

        Self {
            chef_roles,
            assistant_needed,
            total_staff_count: staff.len() as u32,
            staff,
            matched_profile_id: profile.map(|p| p.id.clone()),
            matched_profile_name: profile.map(|p| p.name.clone()),
        }
    }

    /// Number of chef slots.
    pub fn chef_count(&self) -> u32 {
        self.chef_roles.len() as u32
    }
}

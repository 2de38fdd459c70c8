//! Money rules configuration types.
//!
//! This module contains the strongly-typed [`MoneyRules`] structure and its
//! groups. Every group implements `Default` with the shipped business
//! defaults; a partial rules document is merged over these by
//! [`MoneyRules::from_partial`](super::MoneyRules::from_partial).

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::models::{ChefRole, EventType, OwnerRole, StaffRole, StaffingProfile};

/// Largest dollar amount or mileage the engine works with.
pub const MAX_AMOUNT: Decimal = Decimal::from_parts(1_000_000_000, 0, 0, false, 0);

/// Largest percentage the engine works with.
pub const MAX_PERCENT: Decimal = Decimal::from_parts(1_000, 0, 0, false, 0);

/// Smallest increment the distance fee is charged in.
const MIN_INCREMENT_MILES: Decimal = Decimal::from_parts(1, 0, 0, false, 2);

/// Reads an amount the way money math expects it: clamped to `0..=MAX_AMOUNT`.
pub fn bounded_amount(value: Decimal) -> Decimal {
    value.clamp(Decimal::ZERO, MAX_AMOUNT)
}

/// Reads a percentage the way money math expects it: clamped to `0..=MAX_PERCENT`.
pub fn bounded_percent(value: Decimal) -> Decimal {
    value.clamp(Decimal::ZERO, MAX_PERCENT)
}

/// `percent` of `amount`, saturating instead of overflowing.
pub fn percent_of(amount: Decimal, percent: Decimal) -> Decimal {
    amount.saturating_mul(bounded_percent(percent)) / Decimal::ONE_HUNDRED
}

/// Guest pricing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PricingRules {
    /// Per-adult price for private dinners.
    pub private_dinner_base_price: Decimal,
    /// Per-adult price for buffets.
    pub buffet_base_price: Decimal,
    /// Discount children get off the base price, in percent.
    pub child_discount_percent: Decimal,
    /// Gratuity charged on the subtotal, in percent.
    pub default_gratuity_percent: Decimal,
}

impl Default for PricingRules {
    fn default() -> Self {
        Self {
            private_dinner_base_price: Decimal::new(85, 0),
            buffet_base_price: Decimal::new(45, 0),
            child_discount_percent: Decimal::new(50, 0),
            default_gratuity_percent: Decimal::new(20, 0),
        }
    }
}

impl PricingRules {
    /// Base price per adult for an event type.
    pub fn base_price(&self, event_type: EventType) -> Decimal {
        match event_type {
            EventType::PrivateDinner => self.private_dinner_base_price,
            EventType::Buffet => self.buffet_base_price,
        }
    }
}

/// Marks the first slot of `role` in a plan as worked by `owner`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OwnerAssignment {
    /// The owner.
    pub owner: OwnerRole,
    /// The role the owner works.
    pub role: StaffRole,
}

/// Staffing capacity, profiles and owner assignments.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StaffingRules {
    /// Guests one private-dinner chef can serve.
    pub max_guests_per_chef_private: u32,
    /// Guests one buffet chef can serve.
    pub max_guests_per_chef_buffet: u32,
    /// Whether the private-dinner fallback always adds an assistant.
    pub assistant_required: bool,
    /// Named staffing profiles, in configuration order.
    pub profiles: Vec<StaffingProfile>,
    /// Which owner works which role.
    pub owner_assignments: Vec<OwnerAssignment>,
}

const DEFAULT_MAX_GUESTS_PER_CHEF_PRIVATE: u32 = 15;
const DEFAULT_MAX_GUESTS_PER_CHEF_BUFFET: u32 = 25;
const DEFAULT_INCREMENT_MILES: i64 = 5;

impl Default for StaffingRules {
    fn default() -> Self {
        Self {
            max_guests_per_chef_private: DEFAULT_MAX_GUESTS_PER_CHEF_PRIVATE,
            max_guests_per_chef_buffet: DEFAULT_MAX_GUESTS_PER_CHEF_BUFFET,
            assistant_required: true,
            profiles: Vec::new(),
            owner_assignments: vec![
                OwnerAssignment {
                    owner: OwnerRole::OwnerA,
                    role: StaffRole::Chef(ChefRole::Lead),
                },
                OwnerAssignment {
                    owner: OwnerRole::OwnerB,
                    role: StaffRole::Assistant,
                },
            ],
        }
    }
}

impl StaffingRules {
    /// Guests per private-dinner chef; zero falls back to the default.
    pub fn private_chef_capacity(&self) -> u32 {
        match self.max_guests_per_chef_private {
            0 => DEFAULT_MAX_GUESTS_PER_CHEF_PRIVATE,
            n => n,
        }
    }

    /// Guests per buffet chef; zero falls back to the default.
    pub fn buffet_chef_capacity(&self) -> u32 {
        match self.max_guests_per_chef_buffet {
            0 => DEFAULT_MAX_GUESTS_PER_CHEF_BUFFET,
            n => n,
        }
    }
}

/// Private-dinner labor: base pay and caps per role plus the gratuity pools.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PrivateLaborRules {
    /// Lead chef base pay, as a percentage of the subtotal.
    pub lead_chef_base_percent: Decimal,
    /// Maximum payout for the lead chef.
    pub lead_chef_cap: Option<Decimal>,
    /// Overflow chef base pay, as a percentage of the subtotal.
    pub overflow_chef_base_percent: Decimal,
    /// Maximum payout for the overflow chef.
    pub overflow_chef_cap: Option<Decimal>,
    /// Base pay per additional full chef.
    pub full_chef_base_percent: Decimal,
    /// Maximum payout per additional full chef.
    pub full_chef_cap: Option<Decimal>,
    /// Assistant base pay, as a percentage of the subtotal.
    pub assistant_base_percent: Decimal,
    /// Maximum payout per assistant.
    pub assistant_cap: Option<Decimal>,
    /// Share of gratuity pooled for chefs, split evenly between chef slots.
    pub chef_gratuity_split_percent: Decimal,
    /// Share of gratuity paid to each assistant slot.
    pub assistant_gratuity_split_percent: Decimal,
}

impl Default for PrivateLaborRules {
    fn default() -> Self {
        Self {
            lead_chef_base_percent: Decimal::new(15, 0),
            lead_chef_cap: Some(Decimal::new(350, 0)),
            overflow_chef_base_percent: Decimal::new(12, 0),
            overflow_chef_cap: Some(Decimal::new(300, 0)),
            full_chef_base_percent: Decimal::new(10, 0),
            full_chef_cap: Some(Decimal::new(250, 0)),
            assistant_base_percent: Decimal::new(5, 0),
            assistant_cap: Some(Decimal::new(150, 0)),
            chef_gratuity_split_percent: Decimal::new(55, 0),
            assistant_gratuity_split_percent: Decimal::new(45, 0),
        }
    }
}

/// Buffet labor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BuffetLaborRules {
    /// Base pay per buffet chef, as a percentage of the subtotal.
    pub chef_base_percent: Decimal,
    /// Maximum payout per buffet chef.
    pub chef_cap: Option<Decimal>,
}

impl Default for BuffetLaborRules {
    fn default() -> Self {
        Self {
            chef_base_percent: Decimal::new(10, 0),
            chef_cap: Some(Decimal::new(300, 0)),
        }
    }
}

/// Event costs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CostRules {
    /// Food cost for private dinners, as a percentage of the subtotal.
    pub food_cost_percent_private: Decimal,
    /// Food cost for buffets, as a percentage of the subtotal.
    pub food_cost_percent_buffet: Decimal,
    /// Supplies cost, as a percentage of the subtotal.
    pub supplies_cost_percent: Decimal,
    /// Flat transportation stipend per event.
    pub transportation_stipend: Decimal,
}

impl Default for CostRules {
    fn default() -> Self {
        Self {
            food_cost_percent_private: Decimal::new(25, 0),
            food_cost_percent_buffet: Decimal::new(30, 0),
            supplies_cost_percent: Decimal::new(3, 0),
            transportation_stipend: Decimal::new(25, 0),
        }
    }
}

impl CostRules {
    /// Food cost percentage for an event type.
    pub fn food_cost_percent(&self, event_type: EventType) -> Decimal {
        match event_type {
            EventType::PrivateDinner => self.food_cost_percent_private,
            EventType::Buffet => self.food_cost_percent_buffet,
        }
    }
}

/// Tiered distance fee.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DistanceRules {
    /// Miles included at no charge.
    pub free_distance_miles: Decimal,
    /// Fee charged once the free distance is exceeded.
    pub base_distance_fee: Decimal,
    /// Fee per (started) increment beyond the free distance.
    pub additional_fee_per_increment: Decimal,
    /// Size of one increment in miles.
    pub increment_miles: Decimal,
}

impl Default for DistanceRules {
    fn default() -> Self {
        Self {
            free_distance_miles: Decimal::new(20, 0),
            base_distance_fee: Decimal::new(25, 0),
            additional_fee_per_increment: Decimal::new(10, 0),
            increment_miles: Decimal::new(DEFAULT_INCREMENT_MILES, 0),
        }
    }
}

impl DistanceRules {
    /// Increment size; values under a hundredth of a mile fall back to the default.
    pub fn increment_size(&self) -> Decimal {
        if self.increment_miles >= MIN_INCREMENT_MILES {
            bounded_amount(self.increment_miles)
        } else {
            Decimal::new(DEFAULT_INCREMENT_MILES, 0)
        }
    }
}

/// How gross profit is split.
///
/// The percentages are independent and deliberately not checked to sum to 100.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProfitDistributionRules {
    /// Share of gross profit retained by the business.
    pub retained_earnings_percent: Decimal,
    /// Share of gross profit distributed to owners.
    pub owner_distribution_percent: Decimal,
    /// Owner A's equity share of the distribution.
    pub owner_a_equity_percent: Decimal,
    /// Owner B's equity share of the distribution.
    pub owner_b_equity_percent: Decimal,
}

impl Default for ProfitDistributionRules {
    fn default() -> Self {
        Self {
            retained_earnings_percent: Decimal::new(30, 0),
            owner_distribution_percent: Decimal::new(70, 0),
            owner_a_equity_percent: Decimal::new(50, 0),
            owner_b_equity_percent: Decimal::new(50, 0),
        }
    }
}

impl ProfitDistributionRules {
    /// Equity percentage for an owner.
    pub fn equity_percent(&self, owner: OwnerRole) -> Decimal {
        match owner {
            OwnerRole::OwnerA => self.owner_a_equity_percent,
            OwnerRole::OwnerB => self.owner_b_equity_percent,
        }
    }
}

/// Advisory ceilings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SafetyLimits {
    /// Ceiling for labor paid as a percentage of subtotal + gratuity.
    pub max_labor_percent: Decimal,
    /// Ceiling for food cost as a percentage of subtotal.
    pub max_food_cost_percent: Decimal,
    /// Whether to emit warnings at all.
    pub warn_when_exceeded: bool,
}

impl Default for SafetyLimits {
    fn default() -> Self {
        Self {
            max_labor_percent: Decimal::new(35, 0),
            max_food_cost_percent: Decimal::new(30, 0),
            warn_when_exceeded: true,
        }
    }
}

/// The complete, user-editable rules configuration.
///
/// Externally owned; the engine only ever borrows it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MoneyRules {
    /// Guest pricing.
    pub pricing: PricingRules,
    /// Staffing capacity and profiles.
    pub staffing: StaffingRules,
    /// Private-dinner labor.
    pub private_labor: PrivateLaborRules,
    /// Buffet labor.
    pub buffet_labor: BuffetLaborRules,
    /// Event costs.
    pub costs: CostRules,
    /// Distance fee tiers.
    pub distance: DistanceRules,
    /// Profit split.
    pub profit_distribution: ProfitDistributionRules,
    /// Advisory ceilings.
    pub safety_limits: SafetyLimits,
}

//! Financial result models for the event financials engine.
//!
//! This module contains [`EventFinancials`], the immutable output of a
//! calculation, along with per-slot [`LaborCompensation`], the profit split,
//! the audit trail and the rounded [`BookingSnapshot`] bookings persist.

use chrono::NaiveDate;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

use super::{EventType, OwnerRole, StaffRole, StaffingPlan};

/// How a slot's share of the gratuity was determined.
///
/// # Example
///
/// ```
/// use event_financials::models::GratuityShare;
///
/// let share = GratuityShare::EvenSplit;
/// assert_eq!(serde_json::to_string(&share).unwrap(), "{\"kind\":\"even_split\"}");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum GratuityShare {
    /// A fixed percentage of total gratuity, from a pay override.
    OfTotal {
        /// Percentage of total gratuity.
        percent: Decimal,
    },
    /// Total gratuity divided evenly across every staff slot (buffet).
    EvenSplit,
    /// An equal share of the private-dinner chef pool.
    ChefPool,
    /// The private-dinner assistant percentage.
    AssistantPool,
}

/// Pay for a single staff slot.
///
/// Always satisfies `final_pay + excess_to_profit == total_calculated`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LaborCompensation {
    /// The slot role.
    pub role: StaffRole,
    /// Base pay percentage that was applied.
    pub base_pay_percent: Decimal,
    /// Base pay (subtotal x base pay percentage).
    pub base_pay: Decimal,
    /// How the gratuity share was determined.
    pub gratuity_rule: GratuityShare,
    /// This slot's share of the gratuity.
    pub gratuity_share: Decimal,
    /// Base pay plus gratuity share, before the cap.
    pub total_calculated: Decimal,
    /// The cap applied, if any.
    pub cap: Option<Decimal>,
    /// What the slot is actually paid.
    pub final_pay: Decimal,
    /// Whether the cap reduced the pay.
    pub was_capped: bool,
    /// Amount withheld by the cap, retained as profit.
    pub excess_to_profit: Decimal,
    /// Whether an owner works this slot.
    pub is_owner: bool,
    /// Which owner works this slot.
    pub owner_role: Option<OwnerRole>,
}

/// Gross profit split into retained earnings and owner distributions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfitDistribution {
    /// Share of gross profit kept in the business.
    pub retained_amount: Decimal,
    /// Share of gross profit paid out to the owners.
    pub distribution_amount: Decimal,
    /// Owner A's share of the distribution.
    pub owner_a_share: Decimal,
    /// Owner B's share of the distribution.
    pub owner_b_share: Decimal,
}

/// Everything one owner takes home from an event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OwnerPayout {
    /// The owner.
    pub owner: OwnerRole,
    /// Owner's equity percentage of the distribution.
    pub equity_percent: Decimal,
    /// Final pay for slots this owner worked.
    pub labor_pay: Decimal,
    /// Owner's share of the profit distribution.
    pub distribution_share: Decimal,
    /// Labor pay plus distribution share.
    pub total: Decimal,
}

/// A single step in the audit trace recording a calculation decision.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditStep {
    /// The sequential step number.
    pub step_number: u32,
    /// The identifier of the rule that was applied.
    pub rule_id: String,
    /// The human-readable name of the rule.
    pub rule_name: String,
    /// The input data for this step.
    pub input: serde_json::Value,
    /// The output data from this step.
    pub output: serde_json::Value,
    /// Human-readable explanation of the decision.
    pub reasoning: String,
}

/// The complete, immutable financial breakdown of one event.
///
/// Recomputed from scratch on every call; contains no timestamps or
/// identifiers so identical inputs give identical values.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventFinancials {
    /// The kind of event.
    pub event_type: EventType,
    /// The date of the event.
    pub event_date: NaiveDate,
    /// Adults and children combined.
    pub guest_count: u32,
    /// Per-adult price for the event type.
    pub base_price: Decimal,
    /// Per-child price after the child discount.
    pub child_price: Decimal,
    /// Pre-gratuity, pre-fee revenue.
    pub subtotal: Decimal,
    /// Gratuity pool.
    pub gratuity: Decimal,
    /// Travel fee.
    pub distance_fee: Decimal,
    /// Subtotal + gratuity + distance fee.
    pub total_charged: Decimal,
    /// Who works the event.
    pub staffing: StaffingPlan,
    /// Pay per staff slot, in plan order.
    pub labor: Vec<LaborCompensation>,
    /// Sum of pay before caps.
    pub total_labor_calculated: Decimal,
    /// Sum of final pay.
    pub total_labor_paid: Decimal,
    /// Sum of capped excess retained as profit.
    pub total_excess_to_profit: Decimal,
    /// Food cost.
    pub food_cost: Decimal,
    /// Supplies cost.
    pub supplies_cost: Decimal,
    /// Flat transportation stipend.
    pub transportation_cost: Decimal,
    /// Food + supplies + transportation.
    pub total_costs: Decimal,
    /// Subtotal + gratuity - costs - labor paid.
    pub gross_profit: Decimal,
    /// Split of gross profit.
    pub profit_distribution: ProfitDistribution,
    /// Per-owner take-home.
    pub owner_payouts: Vec<OwnerPayout>,
    /// Labor paid as a percentage of subtotal + gratuity.
    pub labor_percent_of_revenue: Decimal,
    /// Food cost as a percentage of subtotal.
    pub food_cost_percent: Decimal,
    /// Advisory safety-limit warnings.
    pub warnings: Vec<String>,
    /// Every calculation decision, in order.
    pub audit_trace: Vec<AuditStep>,
}

/// One staff line of a persisted booking snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SnapshotLaborLine {
    /// The slot role.
    pub role: StaffRole,
    /// Final pay, rounded to cents.
    pub final_pay: Decimal,
    /// Whether the cap applied.
    pub was_capped: bool,
}

/// Point-in-time figures a booking stores once finalized.
///
/// Later edits to the rules never change a stored snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookingSnapshot {
    /// Subtotal, rounded to cents.
    pub subtotal: Decimal,
    /// Gratuity, rounded to cents.
    pub gratuity: Decimal,
    /// Distance fee, rounded to cents.
    pub distance_fee: Decimal,
    /// Total charged, rounded to cents.
    pub total: Decimal,
    /// Total labor paid, rounded to cents.
    pub total_labor_paid: Decimal,
    /// Gross profit, rounded to cents.
    pub gross_profit: Decimal,
    /// The staffing profile used, if any.
    pub staffing_profile_id: Option<String>,
    /// Per-slot pay.
    pub labor: Vec<SnapshotLaborLine>,
}

/// Rounds a money value to cents, half away from zero, always keeping two places.
pub fn round_money(value: Decimal) -> Decimal {
    let mut rounded = value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    rounded.rescale(2);
    rounded
}

impl EventFinancials {
    /// Produces the rounded snapshot a booking persists.
    ///
    /// This is the only place money is rounded.
    pub fn to_snapshot(&self) -> BookingSnapshot {
        BookingSnapshot {
            subtotal: round_money(self.subtotal),
            gratuity: round_money(self.gratuity),
            distance_fee: round_money(self.distance_fee),
            total: round_money(self.total_charged),
            total_labor_paid: round_money(self.total_labor_paid),
            gross_profit: round_money(self.gross_profit),
            staffing_profile_id: self.staffing.matched_profile_id.clone(),
            labor: self
                .labor
                .iter()
                .map(|l| SnapshotLaborLine {
                    role: l.role,
                    final_pay: round_money(l.final_pay),
                    was_capped: l.was_capped,
                })
                .collect(),
        }
    }
}

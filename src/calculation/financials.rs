//! The event financials pipeline.
//!
//! Runs pricing, staffing, labor, costs, profit and the safety audit in that
//! order and assembles one [`EventFinancials`].

use tracing::debug;

use crate::config::MoneyRules;
use crate::models::{AuditStep, EventFinancials, EventInput};

use super::costs::calculate_costs;
use super::labor::calculate_labor;
use super::pricing::calculate_pricing;
use super::profit::calculate_profit;
use super::safety::audit_safety_limits;
use super::staffing::{build_plan, staffing_audit_step};

/// Computes the full financial breakdown of an event.
///
/// This is a pure function of its arguments: no I/O, no clock, no shared
/// state. Calling it twice with the same input and rules gives identical
/// results. Business conditions such as a missing profile, zero revenue or
/// an exceeded ceiling never fail; they degrade to defaults or warnings.
///
/// # Example
///
/// ```
/// use chrono::NaiveDate;
/// use event_financials::calculate_event_financials;
/// use event_financials::config::MoneyRules;
/// use event_financials::models::{EventInput, EventType};
/// use rust_decimal::Decimal;
///
/// let date = NaiveDate::from_ymd_opt(2026, 6, 20).unwrap();
/// let input = EventInput::new(10, 0, EventType::PrivateDinner, date);
/// let financials = calculate_event_financials(&input, &MoneyRules::default());
///
/// assert_eq!(financials.subtotal, Decimal::new(850, 0));
/// assert_eq!(financials.total_charged, Decimal::new(1020, 0));
/// ```
pub fn calculate_event_financials(input: &EventInput, rules: &MoneyRules) -> EventFinancials {
    let mut audit_trace: Vec<AuditStep> = Vec::new();
    let mut step_number: u32 = 1;
    let guest_count = input.guest_count();

    let pricing = calculate_pricing(input, rules, step_number);
    step_number += pricing.audit_steps.len() as u32;
    audit_trace.extend(pricing.audit_steps);
    debug!(
        subtotal = %pricing.subtotal,
        gratuity = %pricing.gratuity,
        distance_fee = %pricing.distance_fee,
        "Priced event"
    );

    let (staffing, profile) = build_plan(
        guest_count,
        input.event_type,
        input.staffing_profile_id.as_deref(),
        rules,
    );
    audit_trace.push(staffing_audit_step(
        &staffing,
        guest_count,
        input.event_type,
        profile,
        step_number,
    ));
    step_number += 1;

    let labor = calculate_labor(
        &staffing,
        pricing.subtotal,
        pricing.gratuity,
        input.event_type,
        &input.staff_pay_overrides,
        rules,
        step_number,
    );
    step_number += labor.audit_steps.len() as u32;
    audit_trace.extend(labor.audit_steps);

    let costs = calculate_costs(
        pricing.subtotal,
        input.event_type,
        input.food_cost_override,
        rules,
        step_number,
    );
    audit_trace.push(costs.audit_step);
    step_number += 1;

    let profit = calculate_profit(
        pricing.subtotal,
        pricing.gratuity,
        costs.total_costs,
        &labor.labor,
        &rules.profit_distribution,
        step_number,
    );
    audit_trace.push(profit.audit_step);
    step_number += 1;

    let safety = audit_safety_limits(
        labor.total_labor_paid,
        pricing.subtotal,
        pricing.gratuity,
        costs.food_cost,
        &rules.safety_limits,
        step_number,
    );
    audit_trace.push(safety.audit_step);

    debug!(
        gross_profit = %profit.gross_profit,
        warnings = safety.warnings.len(),
        steps = audit_trace.len(),
        "Calculated event financials"
    );

    EventFinancials {
        event_type: input.event_type,
        event_date: input.event_date,
        guest_count,
        base_price: pricing.base_price,
        child_price: pricing.child_price,
        subtotal: pricing.subtotal,
        gratuity: pricing.gratuity,
        distance_fee: pricing.distance_fee,
        total_charged: pricing.total_charged,
        staffing,
        labor: labor.labor,
        total_labor_calculated: labor.total_labor_calculated,
        total_labor_paid: labor.total_labor_paid,
        total_excess_to_profit: labor.total_excess_to_profit,
        food_cost: costs.food_cost,
        supplies_cost: costs.supplies_cost,
        transportation_cost: costs.transportation_cost,
        total_costs: costs.total_costs,
        gross_profit: profit.gross_profit,
        profit_distribution: profit.distribution,
        owner_payouts: profit.owner_payouts,
        labor_percent_of_revenue: safety.labor_percent_of_revenue,
        food_cost_percent: safety.food_cost_percent,
        warnings: safety.warnings,
        audit_trace,
    }
}

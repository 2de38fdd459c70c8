//! Labor compensation.
//!
//! Pays every slot of a staffing plan: base pay from the subtotal, a share
//! of the gratuity, then the slot's cap. Whatever the cap withholds is
//! retained as profit.

use rust_decimal::Decimal;
use tracing::debug;

use crate::config::{MoneyRules, bounded_amount, bounded_percent, percent_of};
use crate::models::{
    AuditStep, EventType, GratuityShare, LaborCompensation, StaffPayOverride, StaffingPlan,
};

use super::role_config::{RoleConfigSource, resolve_role_config};

/// Pay for every slot of a plan, with totals.
#[derive(Debug, Clone)]
pub struct LaborResult {
    /// One entry per slot, in plan order.
    pub labor: Vec<LaborCompensation>,
    /// Sum of pay before caps.
    pub total_labor_calculated: Decimal,
    /// Sum of final pay.
    pub total_labor_paid: Decimal,
    /// Sum withheld by caps.
    pub total_excess_to_profit: Decimal,
    /// One audit step per slot.
    pub audit_steps: Vec<AuditStep>,
}

/// The outcome of applying a cap to a calculated amount.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CappedPay {
    /// What is paid.
    pub final_pay: Decimal,
    /// Whether the cap reduced the pay.
    pub was_capped: bool,
    /// What the cap withheld.
    pub excess_to_profit: Decimal,
}

/// Applies a pay cap.
///
/// Pay is capped only when it is strictly above the cap. The result always
/// satisfies `final_pay + excess_to_profit == total_calculated`.
///
/// # Example
///
/// ```
/// use event_financials::calculation::apply_cap;
/// use rust_decimal::Decimal;
///
/// let pay = apply_cap(Decimal::new(500, 0), Some(Decimal::new(350, 0)));
/// assert!(pay.was_capped);
/// assert_eq!(pay.final_pay, Decimal::new(350, 0));
/// assert_eq!(pay.excess_to_profit, Decimal::new(150, 0));
/// ```
pub fn apply_cap(total_calculated: Decimal, cap: Option<Decimal>) -> CappedPay {
    match cap {
        Some(cap) if total_calculated > cap => CappedPay {
            final_pay: cap,
            was_capped: true,
            excess_to_profit: total_calculated - cap,
        },
        _ => CappedPay {
            final_pay: total_calculated,
            was_capped: false,
            excess_to_profit: Decimal::ZERO,
        },
    }
}

/// Computes pay for every slot in a staffing plan.
///
/// # Arguments
///
/// * `plan` - The staffing plan; its slot order is kept
/// * `subtotal` - Event subtotal base pay is taken from
/// * `gratuity` - Total gratuity
/// * `event_type` - Selects the buffet or private-dinner gratuity split
/// * `overrides` - Per-role pay overrides from the event
/// * `rules` - The money rules, supplying the private-dinner gratuity pools
/// * `step_number` - The step number of the first audit step produced
pub fn calculate_labor(
    plan: &StaffingPlan,
    subtotal: Decimal,
    gratuity: Decimal,
    event_type: EventType,
    overrides: &[StaffPayOverride],
    rules: &MoneyRules,
    step_number: u32,
) -> LaborResult {
    let staff_count = Decimal::from(plan.total_staff_count.max(1));
    let chef_count = Decimal::from(plan.chef_count().max(1));
    let chef_pool = percent_of(gratuity, rules.private_labor.chef_gratuity_split_percent);
    let assistant_share =
        percent_of(gratuity, rules.private_labor.assistant_gratuity_split_percent);

    let mut labor = Vec::with_capacity(plan.staff.len());
    let mut audit_steps = Vec::with_capacity(plan.staff.len());

    for (index, slot) in plan.staff.iter().enumerate() {
        let config = resolve_role_config(slot, overrides, event_type);
        let base_pay_percent = bounded_percent(config.base_pay_percent);
        let cap = config.cap.map(bounded_amount);

        let base_pay = percent_of(subtotal, base_pay_percent);
        let gratuity_share = match config.gratuity {
            GratuityShare::OfTotal { percent } => percent_of(gratuity, percent),
            GratuityShare::EvenSplit => gratuity / staff_count,
            GratuityShare::ChefPool => chef_pool / chef_count,
            GratuityShare::AssistantPool => assistant_share,
        };
        let total_calculated = base_pay.saturating_add(gratuity_share);
        let pay = apply_cap(total_calculated, cap);

        audit_steps.push(AuditStep {
            step_number: step_number + index as u32,
            rule_id: format!("labor_{}", slot.role),
            rule_name: format!("Labor: {} (slot {})", slot.role, index + 1),
            input: serde_json::json!({
                "source": config.source,
                "base_pay_percent": base_pay_percent.normalize().to_string(),
                "gratuity_rule": config.gratuity,
                "cap": cap.map(|c| c.normalize().to_string()),
                "is_owner": slot.is_owner
            }),
            output: serde_json::json!({
                "base_pay": base_pay.normalize().to_string(),
                "gratuity_share": gratuity_share.normalize().to_string(),
                "total_calculated": total_calculated.normalize().to_string(),
                "final_pay": pay.final_pay.normalize().to_string(),
                "excess_to_profit": pay.excess_to_profit.normalize().to_string()
            }),
            reasoning: slot_reasoning(&config.source, total_calculated, cap, &pay),
        });

        labor.push(LaborCompensation {
            role: slot.role,
            base_pay_percent,
            base_pay,
            gratuity_rule: config.gratuity,
            gratuity_share,
            total_calculated,
            cap,
            final_pay: pay.final_pay,
            was_capped: pay.was_capped,
            excess_to_profit: pay.excess_to_profit,
            is_owner: slot.is_owner,
            owner_role: slot.owner_role,
        });
    }

    let total_labor_calculated = saturating_sum(labor.iter().map(|l| l.total_calculated));
    let total_labor_paid = saturating_sum(labor.iter().map(|l| l.final_pay));
    let total_excess_to_profit = saturating_sum(labor.iter().map(|l| l.excess_to_profit));

    debug!(
        slots = labor.len(),
        total_labor_paid = %total_labor_paid,
        total_excess_to_profit = %total_excess_to_profit,
        "Calculated labor"
    );

    LaborResult {
        labor,
        total_labor_calculated,
        total_labor_paid,
        total_excess_to_profit,
        audit_steps,
    }
}

fn saturating_sum(amounts: impl Iterator<Item = Decimal>) -> Decimal {
    amounts.fold(Decimal::ZERO, Decimal::saturating_add)
}

fn slot_reasoning(
    source: &RoleConfigSource,
    total_calculated: Decimal,
    cap: Option<Decimal>,
    pay: &CappedPay,
) -> String {
    let from = match source {
        RoleConfigSource::Override => "pay override",
        RoleConfigSource::Rules => "labor rules",
    };
    match cap {
        Some(cap) if pay.was_capped => format!(
            "Calculated ${} from {} exceeds the ${} cap; ${} retained as profit",
            total_calculated.normalize(),
            from,
            cap.normalize(),
            pay.excess_to_profit.normalize()
        ),
        Some(cap) => format!(
            "Calculated ${} from {} is within the ${} cap",
            total_calculated.normalize(),
            from,
            cap.normalize()
        ),
        None => format!(
            "Calculated ${} from {}, uncapped",
            total_calculated.normalize(),
            from
        ),
    }
}

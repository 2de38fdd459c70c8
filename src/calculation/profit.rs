//! Gross profit and its distribution.
//!
//! Gross profit is split into retained earnings and an owner distribution,
//! which is then divided by equity. The percentages are independent inputs;
//! nothing here checks that they sum to 100, and a negative gross profit
//! produces negative shares.

use rust_decimal::Decimal;
use tracing::debug;

use crate::config::{ProfitDistributionRules, percent_of};
use crate::models::{AuditStep, LaborCompensation, OwnerPayout, OwnerRole, ProfitDistribution};

/// Gross profit, its split, and what each owner takes home.
#[derive(Debug, Clone)]
pub struct ProfitResult {
    /// Subtotal + gratuity - costs - labor paid.
    pub gross_profit: Decimal,
    /// The retained/distributed split.
    pub distribution: ProfitDistribution,
    /// One payout per owner, owner A first.
    pub owner_payouts: Vec<OwnerPayout>,
    /// The audit step for this calculation.
    pub audit_step: AuditStep,
}

/// Splits a gross profit figure.
pub fn distribute_profit(
    gross_profit: Decimal,
    rules: &ProfitDistributionRules,
) -> ProfitDistribution {
    let distribution_amount = percent_of(gross_profit, rules.owner_distribution_percent);

    ProfitDistribution {
        retained_amount: percent_of(gross_profit, rules.retained_earnings_percent),
        distribution_amount,
        owner_a_share: percent_of(distribution_amount, rules.owner_a_equity_percent),
        owner_b_share: percent_of(distribution_amount, rules.owner_b_equity_percent),
    }
}

/// Computes gross profit, distributes it and totals each owner's payout.
///
/// # Arguments
///
/// * `subtotal` - Event subtotal
/// * `gratuity` - Total gratuity
/// * `total_costs` - Food, supplies and transportation
/// * `labor` - Pay per slot; owner-flagged slots count toward owner payouts
/// * `rules` - The profit distribution rules
/// * `step_number` - The step number of the audit step produced
pub fn calculate_profit(
    subtotal: Decimal,
    gratuity: Decimal,
    total_costs: Decimal,
    labor: &[LaborCompensation],
    rules: &ProfitDistributionRules,
    step_number: u32,
) -> ProfitResult {
    let total_labor_paid = labor
        .iter()
        .map(|l| l.final_pay)
        .fold(Decimal::ZERO, Decimal::saturating_add);
    let revenue = subtotal.saturating_add(gratuity);
    let gross_profit = revenue
        .saturating_sub(total_costs)
        .saturating_sub(total_labor_paid);
    let distribution = distribute_profit(gross_profit, rules);

    let owner_payouts: Vec<OwnerPayout> = [OwnerRole::OwnerA, OwnerRole::OwnerB]
        .into_iter()
        .map(|owner| {
            let labor_pay = labor
                .iter()
                .filter(|l| l.owner_role == Some(owner))
                .map(|l| l.final_pay)
                .fold(Decimal::ZERO, Decimal::saturating_add);
            let distribution_share = match owner {
                OwnerRole::OwnerA => distribution.owner_a_share,
                OwnerRole::OwnerB => distribution.owner_b_share,
            };
            OwnerPayout {
                owner,
                equity_percent: rules.equity_percent(owner),
                labor_pay,
                distribution_share,
                total: labor_pay.saturating_add(distribution_share),
            }
        })
        .collect();

    debug!(gross_profit = %gross_profit, "Distributed profit");

    let audit_step = AuditStep {
        step_number,
        rule_id: "profit_distribution".to_string(),
        rule_name: "Profit Distribution".to_string(),
        input: serde_json::json!({
            "revenue": revenue.normalize().to_string(),
            "total_costs": total_costs.normalize().to_string(),
            "total_labor_paid": total_labor_paid.normalize().to_string(),
            "retained_earnings_percent": rules.retained_earnings_percent.normalize().to_string(),
            "owner_distribution_percent": rules.owner_distribution_percent.normalize().to_string()
        }),
        output: serde_json::json!({
            "gross_profit": gross_profit.normalize().to_string(),
            "retained_amount": distribution.retained_amount.normalize().to_string(),
            "distribution_amount": distribution.distribution_amount.normalize().to_string(),
            "owner_a_share": distribution.owner_a_share.normalize().to_string(),
            "owner_b_share": distribution.owner_b_share.normalize().to_string()
        }),
        reasoning: format!(
            "${} revenue - ${} costs - ${} labor = ${} gross profit; ${} retained, ${} distributed",
            revenue.normalize(),
            total_costs.normalize(),
            total_labor_paid.normalize(),
            gross_profit.normalize(),
            distribution.retained_amount.normalize(),
            distribution.distribution_amount.normalize()
        ),
    };

    ProfitResult {
        gross_profit,
        distribution,
        owner_payouts,
        audit_step,
    }
}

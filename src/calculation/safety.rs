//! Safety-limit auditing.
//!
//! Compares labor and food cost ratios against their configured ceilings.
//! Warnings are advisory and never change any amount.

use rust_decimal::{Decimal, RoundingStrategy};

use crate::config::{SafetyLimits, bounded_percent};
use crate::models::AuditStep;

const HUNDRED: Decimal = Decimal::ONE_HUNDRED;

/// The audited ratios and any warnings.
#[derive(Debug, Clone)]
pub struct SafetyResult {
    /// Labor paid as a percentage of subtotal + gratuity.
    pub labor_percent_of_revenue: Decimal,
    /// Food cost as a percentage of subtotal.
    pub food_cost_percent: Decimal,
    /// One entry per ceiling exceeded.
    pub warnings: Vec<String>,
    /// The audit step for this check.
    pub audit_step: AuditStep,
}

/// Returns `part / whole * 100`, or zero when `whole` is not positive.
/// Ratios too large to represent saturate at `Decimal::MAX`.
fn ratio_percent(part: Decimal, whole: Decimal) -> Decimal {
    if whole > Decimal::ZERO {
        part.checked_div(whole)
            .and_then(|ratio| ratio.checked_mul(HUNDRED))
            .unwrap_or(Decimal::MAX)
    } else {
        Decimal::ZERO
    }
}

fn one_decimal(value: Decimal) -> String {
    format!(
        "{:.1}",
        value.round_dp_with_strategy(1, RoundingStrategy::MidpointAwayFromZero)
    )
}

/// Audits labor and food cost against the safety limits.
///
/// The ratios are always computed. Warnings are only produced when
/// `warn_when_exceeded` is set, and only for ratios strictly above their
/// ceiling.
pub fn audit_safety_limits(
    total_labor_paid: Decimal,
    subtotal: Decimal,
    gratuity: Decimal,
    food_cost: Decimal,
    limits: &SafetyLimits,
    step_number: u32,
) -> SafetyResult {
    let labor_percent_of_revenue =
        ratio_percent(total_labor_paid, subtotal.saturating_add(gratuity));
    let food_cost_percent = ratio_percent(food_cost, subtotal);
    let max_labor = bounded_percent(limits.max_labor_percent);
    let max_food = bounded_percent(limits.max_food_cost_percent);

    let mut warnings = Vec::new();
    if limits.warn_when_exceeded {
        if labor_percent_of_revenue > max_labor {
            warnings.push(format!(
                "Labor cost is {}% of revenue, above the {}% limit",
                one_decimal(labor_percent_of_revenue),
                max_labor.normalize()
            ));
        }
        if food_cost_percent > max_food {
            warnings.push(format!(
                "Food cost is {}% of subtotal, above the {}% limit",
                one_decimal(food_cost_percent),
                max_food.normalize()
            ));
        }
    }

    let audit_step = AuditStep {
        step_number,
        rule_id: "safety_limits".to_string(),
        rule_name: "Safety Limits".to_string(),
        input: serde_json::json!({
            "max_labor_percent": max_labor.normalize().to_string(),
            "max_food_cost_percent": max_food.normalize().to_string(),
            "warn_when_exceeded": limits.warn_when_exceeded
        }),
        output: serde_json::json!({
            "labor_percent_of_revenue": one_decimal(labor_percent_of_revenue),
            "food_cost_percent": one_decimal(food_cost_percent),
            "warnings": warnings.len()
        }),
        reasoning: if !limits.warn_when_exceeded {
            "Safety warnings are turned off".to_string()
        } else if warnings.is_empty() {
            format!(
                "Labor {}% and food cost {}% are within limits",
                one_decimal(labor_percent_of_revenue),
                one_decimal(food_cost_percent)
            )
        } else {
            warnings.join("; ")
        },
    };

    SafetyResult {
        labor_percent_of_revenue,
        food_cost_percent,
        warnings,
        audit_step,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn test_within_limits_has_no_warnings() {
        let result = audit_safety_limits(
            dec("300"),
            dec("1000"),
            dec("200"),
            dec("250"),
            &SafetyLimits::default(),
            1,
        );

        assert_eq!(result.labor_percent_of_revenue, dec("25"));
        assert_eq!(result.food_cost_percent, dec("25"));
        assert!(result.warnings.is_empty());
    }

    #[test]
    fn test_food_cost_above_limit_warns_once() {
        let result = audit_safety_limits(
            dec("300"),
            dec("1000"),
            dec("200"),
            dec("350"),
            &SafetyLimits::default(),
            1,
        );

        assert_eq!(result.warnings.len(), 1);
        assert_eq!(
            result.warnings[0],
            "Food cost is 35.0% of subtotal, above the 30% limit"
        );
    }

    #[test]
    fn test_labor_above_limit_warns() {
        let result = audit_safety_limits(
            dec("500"),
            dec("1000"),
            dec("200"),
            dec("100"),
            &SafetyLimits::default(),
            1,
        );

        assert_eq!(
            result.warnings,
            vec!["Labor cost is 41.7% of revenue, above the 35% limit".to_string()]
        );
    }

    #[test]
    fn test_exactly_at_limit_does_not_warn() {
        let result = audit_safety_limits(
            dec("420"),
            dec("1000"),
            dec("200"),
            dec("300"),
            &SafetyLimits::default(),
            1,
        );
        assert!(result.warnings.is_empty());
    }

    #[test]
    fn test_disabled_warnings_still_compute_ratios() {
        let limits = SafetyLimits {
            warn_when_exceeded: false,
            ..SafetyLimits::default()
        };
        let result = audit_safety_limits(
            dec("900"),
            dec("1000"),
            dec("200"),
            dec("900"),
            &limits,
            1,
        );

        assert!(result.warnings.is_empty());
        assert_eq!(result.food_cost_percent, dec("90"));
    }

    #[test]
    fn test_unrepresentable_ratio_saturates_and_warns() {
        let result = audit_safety_limits(
            Decimal::ZERO,
            Decimal::new(1, 28),
            Decimal::ZERO,
            dec("1000000000"),
            &SafetyLimits::default(),
            1,
        );

        assert_eq!(result.food_cost_percent, Decimal::MAX);
        assert_eq!(result.warnings.len(), 1);
    }

    #[test]
    fn test_zero_revenue_gives_zero_ratios() {
        let result = audit_safety_limits(
            dec("100"),
            Decimal::ZERO,
            Decimal::ZERO,
            dec("50"),
            &SafetyLimits::default(),
            1,
        );

        assert_eq!(result.labor_percent_of_revenue, Decimal::ZERO);
        assert_eq!(result.food_cost_percent, Decimal::ZERO);
        assert!(result.warnings.is_empty());
    }
}

//! Event cost calculation.

use rust_decimal::Decimal;

use crate::config::{MoneyRules, bounded_amount, bounded_percent, percent_of};
use crate::models::{AuditStep, EventType};

/// Food, supplies and transportation costs.
#[derive(Debug, Clone)]
pub struct CostsResult {
    /// Food cost.
    pub food_cost: Decimal,
    /// Supplies cost.
    pub supplies_cost: Decimal,
    /// Transportation stipend.
    pub transportation_cost: Decimal,
    /// Sum of the three.
    pub total_costs: Decimal,
    /// The audit step for this calculation.
    pub audit_step: AuditStep,
}

/// Calculates event costs from the subtotal.
///
/// A `food_cost_override` of zero or more replaces the percentage-based food
/// cost. Transportation is a flat stipend and does not scale with guests.
/// Negative rule values count as zero.
pub fn calculate_costs(
    subtotal: Decimal,
    event_type: EventType,
    food_cost_override: Option<Decimal>,
    rules: &MoneyRules,
    step_number: u32,
) -> CostsResult {
    let costs = &rules.costs;
    let food_percent = bounded_percent(costs.food_cost_percent(event_type));
    let supplies_percent = bounded_percent(costs.supplies_cost_percent);

    let food_override = food_cost_override
        .filter(|f| *f >= Decimal::ZERO)
        .map(bounded_amount);
    let food_cost = food_override.unwrap_or_else(|| percent_of(subtotal, food_percent));
    let supplies_cost = percent_of(subtotal, supplies_percent);
    let transportation_cost = bounded_amount(costs.transportation_stipend);
    let total_costs = food_cost
        .saturating_add(supplies_cost)
        .saturating_add(transportation_cost);

    let food_reasoning = match food_override {
        Some(f) => format!("menu-priced food ${}", f.normalize()),
        None => format!("food {}% = ${}", food_percent.normalize(), food_cost.normalize()),
    };

    let audit_step = AuditStep {
        step_number,
        rule_id: "event_costs".to_string(),
        rule_name: "Event Costs".to_string(),
        input: serde_json::json!({
            "subtotal": subtotal.normalize().to_string(),
            "food_cost_percent": food_percent.normalize().to_string(),
            "food_cost_override": food_override.map(|f| f.normalize().to_string()),
            "supplies_cost_percent": supplies_percent.normalize().to_string(),
            "transportation_stipend": transportation_cost.normalize().to_string()
        }),
        output: serde_json::json!({
            "food_cost": food_cost.normalize().to_string(),
            "supplies_cost": supplies_cost.normalize().to_string(),
            "transportation_cost": transportation_cost.normalize().to_string(),
            "total_costs": total_costs.normalize().to_string()
        }),
        reasoning: format!(
            "On ${} subtotal: {}, supplies {}% = ${}, transportation ${}; total ${}",
            subtotal.normalize(),
            food_reasoning,
            supplies_percent.normalize(),
            supplies_cost.normalize(),
            transportation_cost.normalize(),
            total_costs.normalize()
        ),
    };

    CostsResult {
        food_cost,
        supplies_cost,
        transportation_cost,
        total_costs,
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
    fn test_private_dinner_costs() {
        let result = calculate_costs(
            dec("850"),
            EventType::PrivateDinner,
            None,
            &MoneyRules::default(),
            1,
        );

        // 25% food, 3% supplies, $25 stipend
        assert_eq!(result.food_cost, dec("212.5"));
        assert_eq!(result.supplies_cost, dec("25.5"));
        assert_eq!(result.transportation_cost, dec("25"));
        assert_eq!(result.total_costs, dec("263"));
    }

    #[test]
    fn test_buffet_uses_buffet_food_percentage() {
        let result = calculate_costs(dec("1000"), EventType::Buffet, None, &MoneyRules::default(), 1);
        assert_eq!(result.food_cost, dec("300"));
    }

    #[test]
    fn test_food_cost_override_replaces_percentage() {
        let result = calculate_costs(
            dec("1000"),
            EventType::PrivateDinner,
            Some(dec("350")),
            &MoneyRules::default(),
            1,
        );

        assert_eq!(result.food_cost, dec("350"));
        assert!(result.audit_step.reasoning.contains("menu-priced"));
    }

    #[test]
    fn test_negative_food_cost_override_is_ignored() {
        let result = calculate_costs(
            dec("1000"),
            EventType::PrivateDinner,
            Some(dec("-5")),
            &MoneyRules::default(),
            1,
        );
        assert_eq!(result.food_cost, dec("250"));
    }

    #[test]
    fn test_transportation_does_not_scale_with_subtotal() {
        let rules = MoneyRules::default();
        let small = calculate_costs(dec("100"), EventType::Buffet, None, &rules, 1);
        let large = calculate_costs(dec("10000"), EventType::Buffet, None, &rules, 1);
        assert_eq!(small.transportation_cost, large.transportation_cost);
    }

    #[test]
    fn test_negative_stipend_reads_as_zero() {
        let mut rules = MoneyRules::default();
        rules.costs.transportation_stipend = dec("-25");
        let result = calculate_costs(dec("1000"), EventType::Buffet, None, &rules, 1);

        assert_eq!(result.transportation_cost, Decimal::ZERO);
        // 300 food + 30 supplies
        assert_eq!(result.total_costs, dec("330"));
    }

    #[test]
    fn test_oversized_values_are_bounded() {
        let mut rules = MoneyRules::default();
        rules.costs.transportation_stipend = Decimal::MAX;
        rules.costs.supplies_cost_percent = Decimal::MAX;
        let result = calculate_costs(
            Decimal::MAX,
            EventType::Buffet,
            Some(Decimal::MAX),
            &rules,
            1,
        );

        assert_eq!(result.food_cost, dec("1000000000"));
        assert_eq!(result.transportation_cost, dec("1000000000"));
        assert!(result.total_costs > result.supplies_cost);
    }

    #[test]
    fn test_negative_percentages_read_as_zero() {
        let mut rules = MoneyRules::default();
        rules.costs.supplies_cost_percent = dec("-3");
        let result = calculate_costs(dec("1000"), EventType::Buffet, None, &rules, 1);
        assert_eq!(result.supplies_cost, Decimal::ZERO);
    }
}

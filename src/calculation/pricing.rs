//! Guest pricing and distance fee calculation.
//!
//! This module turns guest counts, event type and travel distance into the
//! subtotal, gratuity, distance fee and total charged for an event.

use rust_decimal::Decimal;

use crate::config::{DistanceRules, MoneyRules, bounded_amount, bounded_percent, percent_of};
use crate::models::{AuditStep, EventInput};

const HUNDRED: Decimal = Decimal::ONE_HUNDRED;

/// The revenue side of an event, with audit steps.
#[derive(Debug, Clone)]
pub struct PricingResult {
    /// Per-adult price for the event type.
    pub base_price: Decimal,
    /// Per-child price after the child discount.
    pub child_price: Decimal,
    /// Subtotal from guest pricing, before any menu override.
    pub computed_subtotal: Decimal,
    /// The subtotal actually used.
    pub subtotal: Decimal,
    /// Gratuity on the subtotal.
    pub gratuity: Decimal,
    /// Travel fee.
    pub distance_fee: Decimal,
    /// Subtotal + gratuity + distance fee.
    pub total_charged: Decimal,
    /// Audit steps for pricing and the distance fee, in order.
    pub audit_steps: Vec<AuditStep>,
}

/// Computes the distance fee for a trip.
///
/// Nothing is charged up to `free_distance_miles`. Past it, the base fee is
/// charged plus one `additional_fee_per_increment` for every started
/// increment of `increment_miles`. Negative distances and rule amounts
/// count as zero.
///
/// # Examples
///
/// ```
/// use event_financials::calculation::calculate_distance_fee;
/// use event_financials::config::DistanceRules;
/// use rust_decimal::Decimal;
///
/// let rules = DistanceRules::default(); // 20 free miles, $25 base, $10 per 5 miles
/// assert_eq!(calculate_distance_fee(Decimal::new(20, 0), &rules), Decimal::ZERO);
/// assert_eq!(calculate_distance_fee(Decimal::new(21, 0), &rules), Decimal::new(35, 0));
/// assert_eq!(calculate_distance_fee(Decimal::new(31, 0), &rules), Decimal::new(55, 0));
/// ```
pub fn calculate_distance_fee(distance_miles: Decimal, rules: &DistanceRules) -> Decimal {
    let miles = bounded_amount(distance_miles);
    let free_miles = bounded_amount(rules.free_distance_miles);
    if miles <= free_miles {
        return Decimal::ZERO;
    }

    let increments = ((miles - free_miles) / rules.increment_size()).ceil();
    bounded_amount(rules.base_distance_fee)
        + increments * bounded_amount(rules.additional_fee_per_increment)
}

/// Prices an event.
///
/// # Arguments
///
/// * `input` - The event being priced
/// * `rules` - The money rules
/// * `step_number` - The step number of the first audit step produced
///
/// A `subtotal_override` of zero or more replaces the guest-priced subtotal.
/// Prices, the premium and the override are read through [`bounded_amount`].
pub fn calculate_pricing(input: &EventInput, rules: &MoneyRules, step_number: u32) -> PricingResult {
    let pricing = &rules.pricing;

    let base_price = bounded_amount(pricing.base_price(input.event_type));
    let child_price =
        (base_price * (Decimal::ONE - bounded_percent(pricing.child_discount_percent) / HUNDRED))
            .max(Decimal::ZERO);
    let premium = bounded_amount(input.premium_add_on.unwrap_or(Decimal::ZERO));

    let adults = Decimal::from(input.adults);
    let children = Decimal::from(input.children);
    let computed_subtotal =
        adults * base_price + children * child_price + (adults + children) * premium;

    let subtotal_override = input
        .subtotal_override
        .filter(|s| *s >= Decimal::ZERO)
        .map(bounded_amount);
    let subtotal = subtotal_override.unwrap_or(computed_subtotal);
    let gratuity_percent = bounded_percent(pricing.default_gratuity_percent);
    let gratuity = percent_of(subtotal, gratuity_percent);

    let reasoning = match subtotal_override {
        Some(s) => format!(
            "Menu-priced subtotal ${} used instead of guest pricing ${}; gratuity {}% = ${}",
            s.normalize(),
            computed_subtotal.normalize(),
            gratuity_percent.normalize(),
            gratuity.normalize()
        ),
        None => format!(
            "{} adults x ${} + {} children x ${} + {} guests x ${} premium = ${}; gratuity {}% = ${}",
            input.adults,
            base_price.normalize(),
            input.children,
            child_price.normalize(),
            input.guest_count(),
            premium.normalize(),
            subtotal.normalize(),
            gratuity_percent.normalize(),
            gratuity.normalize()
        ),
    };

    let pricing_step = AuditStep {
        step_number,
        rule_id: "guest_pricing".to_string(),
        rule_name: "Guest Pricing".to_string(),
        input: serde_json::json!({
            "event_type": input.event_type.as_str(),
            "adults": input.adults,
            "children": input.children,
            "base_price": base_price.normalize().to_string(),
            "child_discount_percent": pricing.child_discount_percent.normalize().to_string(),
            "premium_add_on": premium.normalize().to_string(),
            "subtotal_override": subtotal_override.map(|s| s.normalize().to_string())
        }),
        output: serde_json::json!({
            "child_price": child_price.normalize().to_string(),
            "computed_subtotal": computed_subtotal.normalize().to_string(),
            "subtotal": subtotal.normalize().to_string(),
            "gratuity": gratuity.normalize().to_string()
        }),
        reasoning,
    };

    let distance = &rules.distance;
    let distance_fee = calculate_distance_fee(input.distance_miles, distance);
    let distance_step = AuditStep {
        step_number: step_number + 1,
        rule_id: "distance_fee".to_string(),
        rule_name: "Distance Fee".to_string(),
        input: serde_json::json!({
            "distance_miles": input.distance_miles.normalize().to_string(),
            "free_distance_miles": bounded_amount(distance.free_distance_miles)
                .normalize()
                .to_string(),
            "increment_miles": distance.increment_size().normalize().to_string()
        }),
        output: serde_json::json!({
            "distance_fee": distance_fee.normalize().to_string()
        }),
        reasoning: if distance_fee.is_zero() {
            format!(
                "{} miles is within the {} free miles",
                input.distance_miles.normalize(),
                bounded_amount(distance.free_distance_miles).normalize()
            )
        } else {
            format!(
                "{} miles exceeds {} free miles: ${} base + started {}-mile increments at ${} = ${}",
                input.distance_miles.normalize(),
                bounded_amount(distance.free_distance_miles).normalize(),
                bounded_amount(distance.base_distance_fee).normalize(),
                distance.increment_size().normalize(),
                bounded_amount(distance.additional_fee_per_increment).normalize(),
                distance_fee.normalize()
            )
        },
    };

    PricingResult {
        base_price,
        child_price,
        computed_subtotal,
        subtotal,
        gratuity,
        distance_fee,
        total_charged: subtotal + gratuity + distance_fee,
        audit_steps: vec![pricing_step, distance_step],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::EventType;
    use chrono::NaiveDate;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn create_test_input(adults: u32, children: u32, event_type: EventType) -> EventInput {
        EventInput::new(
            adults,
            children,
            event_type,
            NaiveDate::from_ymd_opt(2026, 6, 20).unwrap(),
        )
    }

    #[test]
    fn test_private_dinner_ten_adults_within_free_distance() {
        let mut input = create_test_input(10, 0, EventType::PrivateDinner);
        input.distance_miles = dec("10");
        let result = calculate_pricing(&input, &MoneyRules::default(), 1);

        assert_eq!(result.subtotal, dec("850"));
        assert_eq!(result.gratuity, dec("170"));
        assert_eq!(result.distance_fee, Decimal::ZERO);
        assert_eq!(result.total_charged, dec("1020"));
    }

    #[test]
    fn test_children_get_discounted_price() {
        let input = create_test_input(4, 2, EventType::PrivateDinner);
        let result = calculate_pricing(&input, &MoneyRules::default(), 1);

        // 4 x 85 + 2 x 42.5
        assert_eq!(result.child_price, dec("42.5"));
        assert_eq!(result.subtotal, dec("425"));
    }

    #[test]
    fn test_premium_add_on_applies_to_every_guest() {
        let mut input = create_test_input(10, 2, EventType::Buffet);
        input.premium_add_on = Some(dec("5"));
        let result = calculate_pricing(&input, &MoneyRules::default(), 1);

        // 10 x 45 + 2 x 22.5 + 12 x 5
        assert_eq!(result.subtotal, dec("555"));
    }

    #[test]
    fn test_subtotal_override_wins_when_non_negative() {
        let mut input = create_test_input(10, 0, EventType::PrivateDinner);
        input.subtotal_override = Some(dec("1200"));
        let result = calculate_pricing(&input, &MoneyRules::default(), 1);

        assert_eq!(result.computed_subtotal, dec("850"));
        assert_eq!(result.subtotal, dec("1200"));
        assert_eq!(result.gratuity, dec("240"));
        assert!(result.audit_steps[0].reasoning.contains("Menu-priced"));
    }

    #[test]
    fn test_zero_subtotal_override_is_honored() {
        let mut input = create_test_input(10, 0, EventType::PrivateDinner);
        input.subtotal_override = Some(Decimal::ZERO);
        let result = calculate_pricing(&input, &MoneyRules::default(), 1);

        assert_eq!(result.subtotal, Decimal::ZERO);
        assert_eq!(result.gratuity, Decimal::ZERO);
    }

    #[test]
    fn test_negative_subtotal_override_is_ignored() {
        let mut input = create_test_input(10, 0, EventType::PrivateDinner);
        input.subtotal_override = Some(dec("-1"));
        let result = calculate_pricing(&input, &MoneyRules::default(), 1);

        assert_eq!(result.subtotal, dec("850"));
    }

    #[test]
    fn test_negative_gratuity_percent_reads_as_zero() {
        let mut rules = MoneyRules::default();
        rules.pricing.default_gratuity_percent = dec("-20");
        let input = create_test_input(10, 0, EventType::PrivateDinner);
        let result = calculate_pricing(&input, &rules, 1);

        assert_eq!(result.gratuity, Decimal::ZERO);
    }

    #[test]
    fn test_distance_fee_zero_at_free_threshold() {
        let rules = DistanceRules::default();
        assert_eq!(calculate_distance_fee(dec("20"), &rules), Decimal::ZERO);
    }

    #[test]
    fn test_distance_fee_one_mile_over_bills_full_increment() {
        let rules = DistanceRules::default();
        assert_eq!(calculate_distance_fee(dec("21"), &rules), dec("35"));
    }

    #[test]
    fn test_distance_fee_exact_increment_boundary() {
        let rules = DistanceRules::default();
        assert_eq!(calculate_distance_fee(dec("25"), &rules), dec("35"));
        assert_eq!(calculate_distance_fee(dec("25.1"), &rules), dec("45"));
    }

    #[test]
    fn test_distance_fee_negative_distance_is_free() {
        let rules = DistanceRules::default();
        assert_eq!(calculate_distance_fee(dec("-50"), &rules), Decimal::ZERO);
    }

    #[test]
    fn test_distance_fee_at_decimal_max_does_not_overflow() {
        let rules = DistanceRules::default();
        let fee = calculate_distance_fee(Decimal::MAX, &rules);

        // 1e9 miles: 25 + (1e9 - 20) / 5 x 10
        assert_eq!(fee, dec("1999999985"));
    }

    #[test]
    fn test_distance_fee_with_tiny_increment_uses_default_increment() {
        let rules = DistanceRules {
            increment_miles: Decimal::new(1, 28),
            ..DistanceRules::default()
        };
        assert_eq!(calculate_distance_fee(dec("21"), &rules), dec("35"));
    }

    #[test]
    fn test_negative_distance_rules_read_as_zero() {
        let rules = DistanceRules {
            base_distance_fee: dec("-100"),
            additional_fee_per_increment: dec("-10"),
            ..DistanceRules::default()
        };
        assert_eq!(calculate_distance_fee(dec("21"), &rules), Decimal::ZERO);

        let no_free_miles = DistanceRules {
            free_distance_miles: dec("-20"),
            ..DistanceRules::default()
        };
        // 1 mile, one started increment
        assert_eq!(calculate_distance_fee(dec("1"), &no_free_miles), dec("35"));
    }

    #[test]
    fn test_negative_base_price_reads_as_zero() {
        let mut rules = MoneyRules::default();
        rules.pricing.buffet_base_price = dec("-45");
        let input = create_test_input(10, 2, EventType::Buffet);
        let result = calculate_pricing(&input, &rules, 1);

        assert_eq!(result.base_price, Decimal::ZERO);
        assert_eq!(result.child_price, Decimal::ZERO);
        assert_eq!(result.subtotal, Decimal::ZERO);
        assert_eq!(result.gratuity, Decimal::ZERO);
    }

    #[test]
    fn test_oversized_prices_are_bounded() {
        let mut rules = MoneyRules::default();
        rules.pricing.private_dinner_base_price = Decimal::from_scientific("1e27").unwrap();
        rules.pricing.default_gratuity_percent = Decimal::MAX;
        let mut input = create_test_input(100, 0, EventType::PrivateDinner);
        input.premium_add_on = Some(Decimal::MAX);
        let result = calculate_pricing(&input, &rules, 1);

        assert_eq!(result.base_price, dec("1000000000"));
        // 100 x 1e9 base + 100 x 1e9 premium, gratuity at 1000%
        assert_eq!(result.subtotal, dec("200000000000"));
        assert_eq!(result.gratuity, dec("2000000000000"));
    }

    #[test]
    fn test_oversized_subtotal_override_is_bounded() {
        let mut input = create_test_input(10, 0, EventType::PrivateDinner);
        input.subtotal_override = Some(Decimal::MAX);
        let result = calculate_pricing(&input, &MoneyRules::default(), 1);

        assert_eq!(result.subtotal, dec("1000000000"));
    }

    #[test]
    fn test_audit_steps_are_numbered_from_start() {
        let input = create_test_input(10, 0, EventType::Buffet);
        let result = calculate_pricing(&input, &MoneyRules::default(), 3);

        assert_eq!(result.audit_steps[0].step_number, 3);
        assert_eq!(result.audit_steps[0].rule_id, "guest_pricing");
        assert_eq!(result.audit_steps[1].step_number, 4);
        assert_eq!(result.audit_steps[1].rule_id, "distance_fee");
        assert_eq!(
            result.audit_steps[0].output["subtotal"].as_str().unwrap(),
            "450"
        );
    }
}

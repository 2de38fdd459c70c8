//! Lenient merging of partial rules documents over the defaults.
//!
//! Rules are edited by hand and by a settings UI, so a stored document may be
//! missing groups, carry `null`s, or hold values like `"NaN"` in numeric
//! fields. Every such gap keeps the default instead of failing the load.
//! Numbers outside `0..=MAX_AMOUNT` are gaps too.

use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use std::str::FromStr;
use tracing::{debug, warn};

use crate::error::{EngineError, EngineResult};

use super::types::{MAX_AMOUNT, MoneyRules};

impl MoneyRules {
    /// Builds rules from a possibly partial document, filling gaps with defaults.
    ///
    /// Missing keys, `null`s, unparseable numbers, negative or oversized
    /// numbers and type mismatches keep the default value. A `null` cap is the
    /// exception: it means the role is uncapped. Unknown keys are ignored. Entries of `staffing.profiles`
    /// and `staffing.owner_assignments` are parsed one at a time and malformed
    /// entries are dropped. Only a document whose root is not a mapping is
    /// rejected.
    ///
    /// # Example
    ///
    /// ```
    /// use event_financials::config::MoneyRules;
    /// use rust_decimal::Decimal;
    ///
    /// let rules = MoneyRules::from_partial(serde_json::json!({
    ///     "pricing": { "default_gratuity_percent": 18, "buffet_base_price": "NaN" }
    /// }))
    /// .unwrap();
    ///
    /// assert_eq!(rules.pricing.default_gratuity_percent, Decimal::new(18, 0));
    /// assert_eq!(rules.pricing.buffet_base_price, Decimal::new(45, 0));
    /// ```
    pub fn from_partial(document: Value) -> EngineResult<Self> {
        let mut document = match document {
            Value::Object(map) => map,
            Value::Null => Map::new(),
            other => {
                return Err(EngineError::InvalidRules {
                    message: format!("expected a mapping at the root, found {}", kind(&other)),
                });
            }
        };

        let staffing = document.get_mut("staffing").and_then(Value::as_object_mut);
        let (profiles, owner_assignments) = match staffing {
            Some(group) => (
                take_list(group, "staffing.profiles"),
                take_list(group, "staffing.owner_assignments"),
            ),
            None => (None, None),
        };

        let mut merged =
            serde_json::to_value(MoneyRules::default()).map_err(|e| EngineError::InvalidRules {
                message: e.to_string(),
            })?;
        merge_value(&mut merged, Value::Object(document), "");

        let mut rules: MoneyRules =
            serde_json::from_value(merged).map_err(|e| EngineError::InvalidRules {
                message: e.to_string(),
            })?;

        if let Some(profiles) = profiles {
            rules.staffing.profiles = profiles;
        }
        if let Some(assignments) = owner_assignments {
            rules.staffing.owner_assignments = assignments;
        }

        Ok(rules)
    }
}

/// Removes a list from a group and parses it entry by entry.
fn take_list<T: DeserializeOwned>(group: &mut Map<String, Value>, path: &str) -> Option<Vec<T>> {
    let key = path.rsplit('.').next().unwrap_or(path);
    match group.remove(key)? {
        Value::Array(items) => Some(
            items
                .into_iter()
                .enumerate()
                .filter_map(|(index, item)| match serde_json::from_value(item) {
                    Ok(parsed) => Some(parsed),
                    Err(err) => {
                        warn!(path, index, error = %err, "Dropping malformed rules entry");
                        None
                    }
                })
                .collect(),
        ),
        Value::Null => None,
        other => {
            warn!(path, found = kind(&other), "Expected a list, keeping default");
            None
        }
    }
}

/// Overlays `user` onto `slot`, keeping the default wherever the user value is unusable.
fn merge_value(slot: &mut Value, user: Value, path: &str) {
    match (slot, user) {
        (target, Value::Null) if path.ends_with("_cap") => {
            debug!(path, "Null cap, role is uncapped");
            *target = Value::Null;
        }
        (_, Value::Null) => {
            debug!(path, "Null rules value, keeping default");
        }
        (Value::Object(defaults), Value::Object(overrides)) => {
            for (key, value) in overrides {
                let child = if path.is_empty() {
                    key.clone()
                } else {
                    format!("{}.{}", path, key)
                };
                match defaults.get_mut(&key) {
                    Some(target) => merge_value(target, value, &child),
                    None => debug!(path = %child, "Ignoring unknown rules key"),
                }
            }
        }
        // Decimal fields serialize as strings; `None` caps serialize as null.
        (target @ (Value::String(_) | Value::Null), value) => match as_decimal(&value) {
            Some(d) if d < Decimal::ZERO => {
                warn!(path, value = %value, "Negative value, keeping default");
            }
            Some(d) if d > MAX_AMOUNT => {
                warn!(path, value = %value, "Value too large, keeping default");
            }
            Some(d) => *target = Value::String(d.to_string()),
            None => warn!(path, value = %value, "Not a number, keeping default"),
        },
        (target @ Value::Number(_), value) => {
            match as_decimal(&value)
                .filter(|d| d.fract().is_zero())
                .and_then(|d| d.to_u32())
            {
                Some(n) => *target = Value::from(n),
                None => warn!(path, value = %value, "Not a whole non-negative number, keeping default"),
            }
        }
        (target @ Value::Bool(_), Value::Bool(b)) => *target = Value::Bool(b),
        (target @ Value::Array(_), Value::Array(items)) => *target = Value::Array(items),
        (target, value) => {
            warn!(
                path,
                expected = kind(target),
                found = kind(&value),
                "Type mismatch, keeping default"
            );
        }
    }
}

fn as_decimal(value: &Value) -> Option<Decimal> {
    let text = match value {
        Value::Number(n) => n.to_string(),
        Value::String(s) => s.trim().to_string(),
        _ => return None,
    };
    Decimal::from_str(&text)
        .or_else(|_| Decimal::from_scientific(&text))
        .ok()
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "list",
        Value::Object(_) => "mapping",
    }
}

//! Rules loading functionality.
//!
//! This module provides the [`RulesLoader`] type for loading money rules
//! from YAML files.

use serde_json::Value;
use std::fs;
use std::path::Path;
use tracing::info;

use crate::error::{EngineError, EngineResult};
use crate::models::StaffingProfile;

use super::types::MoneyRules;

/// Loads and provides access to a money rules configuration.
///
/// # Directory Structure
///
/// ```text
/// config/default/
/// ├── rules.yaml     # Pricing, labor, costs, distance, profit split, safety limits
/// └── profiles.yaml  # Optional: named staffing profiles (replaces any in rules.yaml)
/// ```
///
/// Both files may be partial; anything missing or invalid falls back to the
/// built-in defaults (see [`MoneyRules::from_partial`]).
///
/// # Example
///
/// ```no_run
/// use event_financials::config::RulesLoader;
///
/// let loader = RulesLoader::load("./config/default").unwrap();
/// println!("Loaded {} staffing profiles", loader.rules().staffing.profiles.len());
/// ```
#[derive(Debug, Clone)]
pub struct RulesLoader {
    rules: MoneyRules,
}

impl RulesLoader {
    /// Loads rules from the specified directory.
    ///
    /// # Returns
    ///
    /// Returns a `RulesLoader` on success, or an error if:
    /// - `rules.yaml` is missing (`ConfigNotFound`)
    /// - either file contains invalid YAML (`ConfigParseError`)
    pub fn load<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let path = path.as_ref();

        let rules_path = path.join("rules.yaml");
        let mut document = Self::load_yaml(&rules_path)?;

        let profiles_path = path.join("profiles.yaml");
        if profiles_path.exists() {
            let profiles = Self::load_yaml(&profiles_path)?;
            Self::attach_profiles(&mut document, profiles, &profiles_path)?;
        }

        let rules = MoneyRules::from_partial(document)?;
        info!(
            path = %path.display(),
            profiles = rules.staffing.profiles.len(),
            "Loaded money rules"
        );

        Ok(Self { rules })
    }

    /// Parses rules from a YAML string.
    pub fn from_yaml_str(content: &str) -> EngineResult<Self> {
        let document: Value =
            serde_yaml::from_str(content).map_err(|e| EngineError::ConfigParseError {
                path: "<inline>".to_string(),
                message: e.to_string(),
            })?;
        let rules = MoneyRules::from_partial(document)?;
        Ok(Self { rules })
    }

    /// Loads and parses a YAML file into an untyped document.
    fn load_yaml(path: &Path) -> EngineResult<Value> {
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| EngineError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        serde_yaml::from_str(&content).map_err(|e| EngineError::ConfigParseError {
            path: path_str,
            message: e.to_string(),
        })
    }

    /// Moves the `profiles` list of `profiles.yaml` under `staffing.profiles`.
    fn attach_profiles(document: &mut Value, profiles: Value, path: &Path) -> EngineResult<()> {
        let list = match profiles {
            Value::Object(mut map) => map.remove("profiles").unwrap_or(Value::Null),
            Value::Null => Value::Null,
            _ => {
                return Err(EngineError::ConfigParseError {
                    path: path.display().to_string(),
                    message: "expected a mapping with a 'profiles' list".to_string(),
                });
            }
        };
        if list.is_null() {
            return Ok(());
        }

        if document.is_null() {
            *document = Value::Object(Default::default());
        }
        if let Some(root) = document.as_object_mut() {
            let staffing = root
                .entry("staffing")
                .or_insert_with(|| Value::Object(Default::default()));
            if !staffing.is_object() {
                *staffing = Value::Object(Default::default());
            }
            if let Some(group) = staffing.as_object_mut() {
                group.insert("profiles".to_string(), list);
            }
        }
        Ok(())
    }

    /// Returns the loaded rules.
    pub fn rules(&self) -> &MoneyRules {
        &self.rules
    }

    /// Consumes the loader, returning the rules.
    pub fn into_rules(self) -> MoneyRules {
        self.rules
    }

    /// Looks up a staffing profile by id.
    pub fn profile(&self, id: &str) -> Option<&StaffingProfile> {
        self.rules.staffing.profiles.iter().find(|p| p.id == id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ChefRole, EventType, ProfileEventType, StaffRole};
    use rust_decimal::Decimal;
    use std::str::FromStr;

    fn config_path() -> &'static str {
        "./config/default"
    }

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn test_load_default_configuration() {
        let result = RulesLoader::load(config_path());
        assert!(result.is_ok(), "Failed to load config: {:?}", result.err());

        let loader = result.unwrap();
        let rules = loader.rules();
        assert_eq!(rules.pricing.private_dinner_base_price, dec("85"));
        assert_eq!(rules.pricing.default_gratuity_percent, dec("20"));
        assert_eq!(rules.staffing.max_guests_per_chef_buffet, 25);
        assert_eq!(rules.private_labor.lead_chef_cap, Some(dec("350")));
    }

    #[test]
    fn test_shipped_rules_match_builtin_defaults() {
        let loader = RulesLoader::load(config_path()).unwrap();
        let mut rules = loader.into_rules();
        rules.staffing.profiles.clear();
        assert_eq!(rules, MoneyRules::default());
    }

    #[test]
    fn test_profiles_file_is_loaded() {
        let loader = RulesLoader::load(config_path()).unwrap();

        let profile = loader.profile("large-private").unwrap();
        assert_eq!(profile.name, "Large Private Dinner");
        assert_eq!(
            profile.event_type,
            ProfileEventType::Only(EventType::PrivateDinner)
        );
        assert_eq!(profile.roles[0], StaffRole::Chef(ChefRole::Lead));
        assert!(loader.profile("missing").is_none());
    }

    #[test]
    fn test_load_missing_directory_returns_error() {
        let result = RulesLoader::load("/nonexistent/path");

        match result {
            Err(EngineError::ConfigNotFound { path }) => {
                assert!(path.contains("rules.yaml"));
            }
            _ => panic!("Expected ConfigNotFound error"),
        }
    }

    #[test]
    fn test_from_yaml_str_partial_rules() {
        let yaml = r#"
pricing:
  buffet_base_price: 50
safety_limits:
  warn_when_exceeded: false
"#;
        let loader = RulesLoader::from_yaml_str(yaml).unwrap();
        assert_eq!(loader.rules().pricing.buffet_base_price, dec("50"));
        assert_eq!(loader.rules().pricing.private_dinner_base_price, dec("85"));
        assert!(!loader.rules().safety_limits.warn_when_exceeded);
    }

    #[test]
    fn test_from_yaml_str_nan_falls_back_to_default() {
        let yaml = "costs:\n  food_cost_percent_private: .nan\n";
        let loader = RulesLoader::from_yaml_str(yaml).unwrap();
        assert_eq!(loader.rules().costs.food_cost_percent_private, dec("25"));
    }

    #[test]
    fn test_from_yaml_str_invalid_syntax_returns_parse_error() {
        let result = RulesLoader::from_yaml_str("pricing: [unclosed");
        assert!(matches!(result, Err(EngineError::ConfigParseError { .. })));
    }

    #[test]
    fn test_attach_profiles_creates_staffing_group() {
        let mut document = Value::Null;
        let profiles = serde_json::json!({
            "profiles": [{ "id": "x", "name": "X", "event_type": "any", "roles": ["buffet"] }]
        });

        RulesLoader::attach_profiles(&mut document, profiles, Path::new("profiles.yaml")).unwrap();

        let rules = MoneyRules::from_partial(document).unwrap();
        assert_eq!(rules.staffing.profiles.len(), 1);
        assert_eq!(rules.staffing.profiles[0].id, "x");
    }
}

//! Rules configuration for the event financials engine.
//!
//! This module holds the [`MoneyRules`] configuration with its defaults, the
//! lenient merge that turns partial documents into complete rules, and the
//! YAML [`RulesLoader`].
//!
//! # Example
//!
//! ```no_run
//! use event_financials::config::RulesLoader;
//!
//! let loader = RulesLoader::load("./config/default").unwrap();
//! println!("Gratuity: {}%", loader.rules().pricing.default_gratuity_percent);
//! ```

mod loader;
mod merge;
mod types;

pub use loader::RulesLoader;
pub use types::{
    BuffetLaborRules, CostRules, DistanceRules, MAX_AMOUNT, MAX_PERCENT, MoneyRules,
    OwnerAssignment, PricingRules, PrivateLaborRules, ProfitDistributionRules, SafetyLimits,
    StaffingRules, bounded_amount, bounded_percent, percent_of,
};

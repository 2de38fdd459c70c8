//! Calculation logic for the event financials engine.
//!
//! This module contains every stage of the financials pipeline: guest
//! pricing and distance fees, staffing profile matching and plan
//! construction, per-slot pay resolution, labor compensation with caps,
//! costs, profit distribution and the safety-limit audit.
//! [`calculate_event_financials`] runs them in order.

mod costs;
mod financials;
mod labor;
mod pricing;
mod profile_matching;
mod profit;
mod role_config;
mod safety;
mod staffing;

pub use costs::{CostsResult, calculate_costs};
pub use financials::calculate_event_financials;
pub use labor::{CappedPay, LaborResult, apply_cap, calculate_labor};
pub use pricing::{PricingResult, calculate_distance_fee, calculate_pricing};
pub use profile_matching::find_matching_profile;
pub use profit::{ProfitResult, calculate_profit, distribute_profit};
pub use role_config::{ResolvedRoleConfig, RoleConfigSource, resolve_role_config};
pub use safety::{SafetyResult, audit_safety_limits};
pub use staffing::plan_staffing;

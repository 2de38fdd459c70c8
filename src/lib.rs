//! Event Financials Engine for a catering business
//!
//! This crate computes the full financial breakdown of a catering booking:
//! guest pricing, distance fees, the staffing plan, per-slot labor pay with
//! caps and gratuity splits, costs, gross profit with its owner distribution,
//! and advisory safety-limit warnings. The calculation is a pure function of
//! an [`models::EventInput`] and a [`config::MoneyRules`] value.

#![warn(missing_docs)]

pub mod api;
pub mod calculation;
pub mod config;
pub mod error;
pub mod models;

pub use calculation::{calculate_event_financials, find_matching_profile};

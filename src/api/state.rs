//! Application state for the event financials API.
//!
//! This module defines the shared application state that is available
//! to all request handlers.

use std::sync::Arc;

use crate::config::MoneyRules;

/// Shared application state.
///
/// Holds the money rules loaded at startup. Handlers only read them; a
/// request may bring its own rules snapshot instead.
#[derive(Clone)]
pub struct AppState {
    /// The active money rules.
    rules: Arc<MoneyRules>,
}

impl AppState {
    /// Creates a new application state with the given rules.
    pub fn new(rules: MoneyRules) -> Self {
        Self {
            rules: Arc::new(rules),
        }
    }

    /// Returns the active money rules.
    pub fn rules(&self) -> &MoneyRules {
        &self.rules
    }
}

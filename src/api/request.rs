//! Request types for the event financials API.
//!
//! This module defines the JSON request structures for the `/financials`
//! and `/profiles/match` endpoints.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::models::{EventInput, EventType};

/// Request body for the `/financials` endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FinancialsRequest {
    /// The event to compute.
    pub event: EventInput,
    /// A stored rules snapshot to compute with instead of the server rules.
    ///
    /// May be partial; gaps are filled from the defaults. Lets a caller
    /// reproduce the numbers a booking was finalized with.
    #[serde(default)]
    pub rules: Option<Value>,
}

/// Request body for the `/profiles/match` endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProfileMatchRequest {
    /// The kind of event.
    pub event_type: EventType,
    /// Adults and children combined.
    pub guest_count: u32,
    /// An explicit profile chosen on the draft booking.
    #[serde(default)]
    pub staffing_profile_id: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;

    #[test]
    fn test_deserialize_financials_request() {
        let json = r#"{
            "event": {
                "adults": 10,
                "event_type": "private_dinner",
                "event_date": "2026-06-20",
                "distance_miles": "12.5"
            }
        }"#;

        let request: FinancialsRequest = serde_json::from_str(json).unwrap();
        assert_eq!(request.event.adults, 10);
        assert_eq!(request.event.children, 0);
        assert_eq!(request.event.distance_miles, Decimal::new(125, 1));
        assert!(request.rules.is_none());
    }

    #[test]
    fn test_deserialize_financials_request_with_rules() {
        let json = r#"{
            "event": {
                "adults": 40,
                "event_type": "buffet",
                "event_date": "2026-06-20"
            },
            "rules": { "pricing": { "buffet_base_price": 50 } }
        }"#;

        let request: FinancialsRequest = serde_json::from_str(json).unwrap();
        assert_eq!(request.event.event_type, EventType::Buffet);
        assert!(request.rules.unwrap().get("pricing").is_some());
    }

    #[test]
    fn test_missing_event_type_fails() {
        let json = r#"{ "event": { "adults": 10, "event_date": "2026-06-20" } }"#;
        let result: Result<FinancialsRequest, _> = serde_json::from_str(json);
        assert!(result.is_err());
    }

    #[test]
    fn test_deserialize_profile_match_request() {
        let json = r#"{ "event_type": "buffet", "guest_count": 120 }"#;
        let request: ProfileMatchRequest = serde_json::from_str(json).unwrap();
        assert_eq!(request.guest_count, 120);
        assert!(request.staffing_profile_id.is_none());
    }
}

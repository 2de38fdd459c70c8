//! Staffing profile matching.
//!
//! Picks the named staffing profile an event will use, if any.

use crate::models::{EventType, StaffingProfile};

/// Finds the staffing profile for an event.
///
/// # Arguments
///
/// * `profiles` - The configured profiles, in configuration order
/// * `event_type` - The kind of event
/// * `guest_count` - Adults and children combined
/// * `staffing_profile_id` - An explicit profile chosen on the booking
///
/// # Returns
///
/// An explicitly chosen profile that exists is returned as-is, even when
/// the guest count lies outside its range. Otherwise the candidates are the
/// profiles covering the event type (directly or as `any`) and the guest
/// count; exact event-type matches beat `any`, then the narrowest guest
/// range wins, then configuration order. `None` means the hardcoded
/// thresholds apply.
///
/// An id that matches no profile falls through to automatic matching.
///
/// # Example
///
/// ```
/// use event_financials::calculation::find_matching_profile;
/// use event_financials::models::{EventType, ProfileEventType, StaffRole, StaffingProfile};
///
/// let profiles = vec![StaffingProfile {
///     id: "big".to_string(),
///     name: "Big party".to_string(),
///     event_type: ProfileEventType::Any,
///     min_guests: 50,
///     max_guests: 200,
///     roles: vec![StaffRole::Assistant],
/// }];
///
/// assert!(find_matching_profile(&profiles, EventType::Buffet, 10, None).is_none());
/// let forced = find_matching_profile(&profiles, EventType::Buffet, 10, Some("big"));
/// assert_eq!(forced.map(|p| p.id.as_str()), Some("big"));
/// ```
pub fn find_matching_profile<'a>(
    profiles: &'a [StaffingProfile],
    event_type: EventType,
    guest_count: u32,
    staffing_profile_id: Option<&str>,
) -> Option<&'a StaffingProfile> {
    if let Some(id) = staffing_profile_id {
        if let Some(profile) = profiles.iter().find(|p| p.id == id) {
            return Some(profile);
        }
    }

    // min_by_key returns the first minimum, so ties keep configuration order.
    profiles
        .iter()
        .filter(|p| p.event_type.covers(event_type) && p.covers_guest_count(guest_count))
        .min_by_key(|p| (!p.event_type.is_exact(event_type), p.range_width()))
}

//! Staffing plan construction.
//!
//! A plan comes from a matched staffing profile when one applies, and from
//! the guest-count thresholds in the staffing rules otherwise. Owners are
//! then placed on their configured roles.

use tracing::debug;

use crate::config::{MoneyRules, OwnerAssignment};
use crate::models::{
    AuditStep, ChefRole, EventType, StaffMember, StaffRole, StaffingPlan, StaffingProfile,
};

use super::profile_matching::find_matching_profile;

/// Decides which staff work an event.
///
/// # Arguments
///
/// * `guest_count` - Adults and children combined
/// * `event_type` - The kind of event
/// * `staffing_profile_id` - An explicit profile chosen on the booking
/// * `rules` - The money rules, supplying profiles, capacities and pay rules
///
/// Always produces exactly one plan. Slot order is the profile's role order,
/// or chefs then assistant for the fallback.
pub fn plan_staffing(
    guest_count: u32,
    event_type: EventType,
    staffing_profile_id: Option<&str>,
    rules: &MoneyRules,
) -> StaffingPlan {
    build_plan(guest_count, event_type, staffing_profile_id, rules).0
}

/// Builds the plan and also returns the profile it came from.
pub(crate) fn build_plan<'a>(
    guest_count: u32,
    event_type: EventType,
    staffing_profile_id: Option<&str>,
    rules: &'a MoneyRules,
) -> (StaffingPlan, Option<&'a StaffingProfile>) {
    let profile = find_matching_profile(
        &rules.staffing.profiles,
        event_type,
        guest_count,
        staffing_profile_id,
    );

    let roles = match profile {
        Some(p) => p.roles.clone(),
        None => fallback_roles(guest_count, event_type, rules),
    };

    let mut staff: Vec<StaffMember> = roles.into_iter().map(|role| slot(role, rules)).collect();
    assign_owners(&mut staff, &rules.staffing.owner_assignments);

    let plan = StaffingPlan::from_staff(staff, profile);
    debug!(
        guest_count,
        event_type = %event_type,
        profile = ?plan.matched_profile_id,
        staff = plan.total_staff_count,
        "Planned staffing"
    );
    (plan, profile)
}

/// Roles from the guest-count thresholds when no profile matches.
fn fallback_roles(guest_count: u32, event_type: EventType, rules: &MoneyRules) -> Vec<StaffRole> {
    let staffing = &rules.staffing;

    match event_type {
        EventType::Buffet => {
            let chefs = guest_count.div_ceil(staffing.buffet_chef_capacity());
            vec![StaffRole::Chef(ChefRole::Buffet); chefs as usize]
        }
        EventType::PrivateDinner => {
            let max = staffing.private_chef_capacity();
            let mut roles = if guest_count <= max {
                vec![StaffRole::Chef(ChefRole::Lead)]
            } else if guest_count <= max.saturating_mul(2) {
                vec![StaffRole::Chef(ChefRole::Overflow)]
            } else {
                let full_chefs = (guest_count - max).div_ceil(max) - 1;
                let mut roles = vec![StaffRole::Chef(ChefRole::Lead)];
                roles.extend(std::iter::repeat_n(
                    StaffRole::Chef(ChefRole::Full),
                    full_chefs as usize,
                ));
                roles
            };
            if staffing.assistant_required {
                roles.push(StaffRole::Assistant);
            }
            roles
        }
    }
}

/// A slot carrying the base pay and cap the labor rules give its role.
fn slot(role: StaffRole, rules: &MoneyRules) -> StaffMember {
    let private = &rules.private_labor;
    let (base_pay_percent, cap) = match role {
        StaffRole::Chef(ChefRole::Lead) => (private.lead_chef_base_percent, private.lead_chef_cap),
        StaffRole::Chef(ChefRole::Overflow) => {
            (private.overflow_chef_base_percent, private.overflow_chef_cap)
        }
        StaffRole::Chef(ChefRole::Full) => (private.full_chef_base_percent, private.full_chef_cap),
        StaffRole::Chef(ChefRole::Buffet) => {
            (rules.buffet_labor.chef_base_percent, rules.buffet_labor.chef_cap)
        }
        StaffRole::Assistant => (private.assistant_base_percent, private.assistant_cap),
    };

    StaffMember {
        role,
        base_pay_percent,
        cap,
        is_owner: false,
        owner_role: None,
    }
}

/// Places each owner on the first free slot of their role, once.
fn assign_owners(staff: &mut [StaffMember], assignments: &[OwnerAssignment]) {
    let mut placed = Vec::new();
    for assignment in assignments {
        if placed.contains(&assignment.owner) {
            continue;
        }
        if let Some(member) = staff
            .iter_mut()
            .find(|s| s.role == assignment.role && !s.is_owner)
        {
            member.is_owner = true;
            member.owner_role = Some(assignment.owner);
            placed.push(assignment.owner);
        }
    }
}

/// Records how the plan was chosen.
pub(crate) fn staffing_audit_step(
    plan: &StaffingPlan,
    guest_count: u32,
    event_type: EventType,
    profile: Option<&StaffingProfile>,
    step_number: u32,
) -> AuditStep {
    let roles: Vec<&str> = plan.staff.iter().map(|s| s.role.as_str()).collect();
    let owners: Vec<serde_json::Value> = plan
        .staff
        .iter()
        .enumerate()
        .filter_map(|(slot, s)| {
            s.owner_role
                .map(|owner| serde_json::json!({ "slot": slot, "owner": owner }))
        })
        .collect();

    let reasoning = match profile {
        Some(p) => format!(
            "Profile '{}' ({}-{} guests) staffs {} guests with {} slots",
            p.name,
            p.min_guests,
            p.max_guests,
            guest_count,
            plan.total_staff_count
        ),
        None => format!(
            "No profile matches {} guests for {}; guest-count thresholds give {} chefs{}",
            guest_count,
            event_type,
            plan.chef_count(),
            if plan.assistant_needed {
                " and an assistant"
            } else {
                ""
            }
        ),
    };

    AuditStep {
        step_number,
        rule_id: match profile {
            Some(_) => "staffing_profile".to_string(),
            None => "staffing_thresholds".to_string(),
        },
        rule_name: "Staffing Plan".to_string(),
        input: serde_json::json!({
            "guest_count": guest_count,
            "event_type": event_type.as_str()
        }),
        output: serde_json::json!({
            "matched_profile_id": plan.matched_profile_id,
            "roles": roles,
            "owners": owners
        }),
        reasoning,
    }
}

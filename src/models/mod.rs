//! Core data models for the event financials engine.
//!
//! This module contains all the domain models used throughout the engine.

mod event;
mod financials;
mod staffing;

pub use event::{EventInput, EventType, StaffPayOverride};
pub use financials::{
    AuditStep, BookingSnapshot, EventFinancials, GratuityShare, LaborCompensation, OwnerPayout,
    ProfitDistribution, SnapshotLaborLine, round_money,
};
pub use staffing::{
    ChefRole, OwnerRole, ProfileEventType, StaffMember, StaffRole, StaffingPlan, StaffingProfile,
    UNBOUNDED_MAX_GUESTS,
};

//! Core data models for the Timecard Processing & Compliance Engine.
//!
//! This module contains all the domain models used throughout the engine.

mod compliance;
mod pair;
mod punch;
mod timecard;
mod waiver;

pub use compliance::{
    BreakPeriod, BreakType, ComplianceResult, EarningsCode, ViolationReason,
};
pub use pair::{MissingPunch, PunchPair};
pub use punch::{EmployeeSettings, PunchType, RawPunch};
pub use timecard::{DailyTimecard, ScheduleVariance, ScheduledShift, TimecardFlag};
pub use waiver::{MealSlot, MealWaiver, WaiverType, active_waiver};

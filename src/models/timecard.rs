//! Daily timecard model and schedule types.
//!
//! The daily timecard is the terminal aggregate of the pipeline: one per
//! employee per local calendar day, carrying hour totals, structural flags,
//! schedule variance, and the merged compliance outcome. Re-deriving it from
//! the same raw punches, rules, policy, and waivers yields the same result.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::compliance::ComplianceResult;
use super::pair::PunchPair;

/// Machine-readable tags attached to a timecard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimecardFlag {
    /// A shift on this day has no captured clock-in.
    MissingClockIn,
    /// A shift on this day has no captured clock-out.
    MissingClockOut,
    /// Two shifts on this day overlap in time.
    OverlappingShifts,
    /// Premium-pay penalties were applied for compliance violations.
    ComplianceViolation,
}

impl std::fmt::Display for TimecardFlag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TimecardFlag::MissingClockIn => write!(f, "missing_clock_in"),
            TimecardFlag::MissingClockOut => write!(f, "missing_clock_out"),
            TimecardFlag::OverlappingShifts => write!(f, "overlapping_shifts"),
            TimecardFlag::ComplianceViolation => write!(f, "compliance_violation"),
        }
    }
}

/// A scheduled shift supplied by the external schedule source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduledShift {
    /// The employee the shift was scheduled for.
    pub employee_id: String,
    /// The employee-local calendar date of the shift.
    pub date: NaiveDate,
    /// Scheduled start, in UTC.
    pub start_time: DateTime<Utc>,
    /// Scheduled end, in UTC.
    pub end_time: DateTime<Utc>,
}

/// Signed lateness/earliness of actual punches against the schedule.
///
/// Positive minutes mean late. Absent entirely when no schedule exists for
/// the day; "no data" is never reported as zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleVariance {
    /// Actual clock-in minus scheduled start, in minutes.
    pub start_variance_minutes: i64,
    /// Actual clock-out minus scheduled end, in minutes; absent with no
    /// captured clock-out.
    #[serde(default)]
    pub end_variance_minutes: Option<i64>,
    /// Sum of start and end variance, when both exist.
    #[serde(default)]
    pub total_variance_minutes: Option<i64>,
}

/// One employee's processed timecard for one local calendar day.
///
/// Invariant: `total_hours == regular_hours + overtime_hours` at every point
/// in the timecard's life, including after compliance penalties are merged
/// in (a penalty raises both `overtime_hours` and `total_hours`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyTimecard {
    /// The employee this timecard belongs to.
    pub employee_id: String,
    /// The employee-local calendar day.
    pub date: NaiveDate,
    /// First captured clock-in of the day, if any.
    pub clock_in: Option<DateTime<Utc>>,
    /// Last captured clock-out of the day, if any.
    pub clock_out: Option<DateTime<Utc>>,
    /// Scheduled start, when a schedule existed for the day.
    pub scheduled_start: Option<DateTime<Utc>>,
    /// Scheduled end, when a schedule existed for the day.
    pub scheduled_end: Option<DateTime<Utc>>,
    /// Lateness/earliness against the schedule; advisory only.
    pub variance: Option<ScheduleVariance>,
    /// Total hours for the day, two decimal places.
    pub total_hours: Decimal,
    /// Hours up to the overtime threshold.
    pub regular_hours: Decimal,
    /// Hours beyond the threshold, plus any penalty hours.
    pub overtime_hours: Decimal,
    /// Meal minutes credited by the compliance engine.
    pub meal_minutes: i64,
    /// Rest-break minutes credited by the compliance engine.
    pub break_minutes: i64,
    /// False once any premium-pay penalty was applied.
    pub is_compliant: bool,
    /// Machine-readable tags (missing punches, overlaps, violations).
    pub flags: Vec<TimecardFlag>,
    /// Human-readable notes accumulated during processing.
    pub notes: Vec<String>,
    /// The underlying punch pairs the totals were derived from.
    pub shifts: Vec<PunchPair>,
    /// The merged compliance outcome for the day.
    pub compliance: Option<ComplianceResult>,
}

impl DailyTimecard {
    /// Creates an empty timecard for an employee-day, before any totals.
    pub fn new(employee_id: impl Into<String>, date: NaiveDate) -> Self {
        Self {
            employee_id: employee_id.into(),
            date,
            clock_in: None,
            clock_out: None,
            scheduled_start: None,
            scheduled_end: None,
            variance: None,
            total_hours: Decimal::ZERO,
            regular_hours: Decimal::ZERO,
            overtime_hours: Decimal::ZERO,
            meal_minutes: 0,
            break_minutes: 0,
            is_compliant: true,
            flags: Vec::new(),
            notes: Vec::new(),
            shifts: Vec::new(),
            compliance: None,
        }
    }

    /// Adds a flag unless it is already present.
    pub fn add_flag(&mut self, flag: TimecardFlag) {
        if !self.flags.contains(&flag) {
            self.flags.push(flag);
        }
    }

    /// Whether a specific flag is set.
    pub fn has_flag(&self, flag: TimecardFlag) -> bool {
        self.flags.contains(&flag)
    }
}

//! Timecard aggregation and batch orchestration.
//!
//! Assembles one [`DailyTimecard`] per (employee, date) unit from the
//! upstream pipeline stages, detects overlapping shifts, merges compliance,
//! and fans a batch of independent units out over a rayon worker pool.
//! Batches have partial-failure semantics: one employee's malformed data is
//! reported and skipped while every other employee's timecards are produced.

use std::collections::HashMap;

use chrono::NaiveDate;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::audit::{AuditEvent, AuditSink};
use crate::config::{ClientRules, CompliancePolicy};
use crate::models::{
    DailyTimecard, EmployeeSettings, MealWaiver, MissingPunch, RawPunch, ScheduledShift,
    TimecardFlag,
};

use super::ProcessingError;
use super::compliance::{apply_compliance, evaluate_compliance};
use super::grouping::group_punches;
use super::hours::calculate_hours;
use super::pairing::pair_punches;
use super::variance::calculate_variance;

/// Everything the engine consumes for one batch run.
///
/// All inputs are loaded once by the caller and treated as immutable for
/// the duration of the run; the engine performs no I/O of its own.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BatchInput {
    /// Raw punches for the batch window, any order.
    pub punches: Vec<RawPunch>,
    /// Settings for every employee expected in the punch data.
    pub employee_settings: Vec<EmployeeSettings>,
    /// Scheduled shifts, used only for variance.
    #[serde(default)]
    pub schedules: Vec<ScheduledShift>,
    /// Meal waivers in force during the batch window.
    #[serde(default)]
    pub waivers: Vec<MealWaiver>,
}

/// The result of a batch run: timecards plus per-employee failures.
#[derive(Debug)]
pub struct BatchOutcome {
    /// One timecard per (employee, date) unit, ordered by employee then date.
    pub timecards: Vec<DailyTimecard>,
    /// Employees that could not be processed, with the reason.
    pub errors: Vec<ProcessingError>,
}

/// Assembles the timecard for one (employee, date) unit.
///
/// Runs pairing, hours, variance, and compliance for the unit, flags
/// missing punch halves and overlapping shifts, and merges the compliance
/// result (including penalty hours) into the totals. The unit's punches
/// must already be deduplicated; [`group_punches`] hands them over sorted
/// ascending by capture timestamp, though streams whose devices disagree on
/// time can still pair into overlapping shifts, which is what the
/// `overlapping_shifts` flag surfaces.
pub fn assemble_timecard(
    employee_id: &str,
    date: NaiveDate,
    punches: &[RawPunch],
    rules: &ClientRules,
    policy: &CompliancePolicy,
    waivers: &[MealWaiver],
    schedule: Option<&ScheduledShift>,
    sink: &dyn AuditSink,
) -> DailyTimecard {
    let pairs = pair_punches(punches);
    let hours = calculate_hours(&pairs, rules);

    let mut timecard = DailyTimecard::new(employee_id, date);
    timecard.clock_in = pairs
        .iter()
        .find(|p| p.missing != Some(MissingPunch::ClockIn))
        .map(|p| p.clock_in.timestamp);
    timecard.clock_out = pairs
        .iter()
        .rev()
        .find_map(|p| p.clock_out.as_ref())
        .map(|out| out.timestamp);
    timecard.total_hours = hours.total_hours;
    timecard.regular_hours = hours.regular_hours;
    timecard.overtime_hours = hours.overtime_hours;

    if let Some(schedule) = schedule {
        timecard.scheduled_start = Some(schedule.start_time);
        timecard.scheduled_end = Some(schedule.end_time);
    }
    timecard.variance = calculate_variance(&pairs, schedule);

    for pair in &pairs {
        match pair.missing {
            Some(MissingPunch::ClockIn) => {
                timecard.add_flag(TimecardFlag::MissingClockIn);
                timecard.notes.push(format!(
                    "clock-out at {} has no matching clock-in",
                    pair.clock_in.timestamp
                ));
            }
            Some(MissingPunch::ClockOut) => {
                timecard.add_flag(TimecardFlag::MissingClockOut);
                timecard.notes.push(format!(
                    "clock-in at {} has no matching clock-out",
                    pair.clock_in.timestamp
                ));
            }
            None => {}
        }
    }

    // Overlap is a structural violation, never silently merged
    for window in pairs.windows(2) {
        if window[0].overlaps(&window[1]) {
            timecard.add_flag(TimecardFlag::OverlappingShifts);
            timecard.notes.push(format!(
                "shift ending {} overlaps shift starting {}",
                window[0]
                    .clock_out
                    .as_ref()
                    .map(|p| p.timestamp.to_string())
                    .unwrap_or_default(),
                window[1].clock_in.timestamp
            ));
        }
    }

    timecard.shifts = pairs;

    let compliance = evaluate_compliance(
        employee_id,
        date,
        &timecard.shifts,
        policy,
        waivers,
        sink,
    );
    apply_compliance(&mut timecard, compliance);

    sink.record(AuditEvent::UnitProcessed {
        employee_id: employee_id.to_string(),
        date,
        total_hours: timecard.total_hours,
        flag_count: timecard.flags.len(),
    });

    timecard
}

/// Processes a whole batch of punches into daily timecards.
///
/// Groups and deduplicates punches, then processes each (employee, date)
/// unit independently across the rayon worker pool. Units are pure and
/// share only read-only inputs, so re-running the same batch with the same
/// rules, policy, and waivers yields the same timecards, in the same order
/// (by employee, then date).
///
/// # Example
///
/// ```
/// use timecard_engine::audit::NullSink;
/// use timecard_engine::config::{ClientRules, CompliancePolicy};
/// use timecard_engine::models::{EmployeeSettings, PunchType, RawPunch};
/// use timecard_engine::processing::{BatchInput, process_batch};
/// use chrono::{DateTime, Utc};
///
/// let punch = |punch_type, ts: &str| RawPunch {
///     employee_id: "emp_001".to_string(),
///     punch_type,
///     timestamp: ts.parse::<DateTime<Utc>>().unwrap(),
///     device_id: None,
///     job_code: None,
///     location_id: None,
/// };
/// let input = BatchInput {
///     punches: vec![
///         punch(PunchType::ClockIn, "2026-03-02T09:00:00Z"),
///         punch(PunchType::ClockOut, "2026-03-02T17:00:00Z"),
///     ],
///     employee_settings: vec![EmployeeSettings {
///         employee_id: "emp_001".to_string(),
///         utc_offset_minutes: 0,
///         default_job_code: None,
///     }],
///     schedules: vec![],
///     waivers: vec![],
/// };
///
/// let outcome = process_batch(
///     &input,
///     &ClientRules::default(),
///     &CompliancePolicy::default(),
///     &NullSink,
/// );
/// assert_eq!(outcome.timecards.len(), 1);
/// assert!(outcome.errors.is_empty());
/// ```
pub fn process_batch(
    input: &BatchInput,
    rules: &ClientRules,
    policy: &CompliancePolicy,
    sink: &dyn AuditSink,
) -> BatchOutcome {
    let (grouped, errors) = group_punches(&input.punches, &input.employee_settings, sink);

    let schedules_by_unit: HashMap<(&str, NaiveDate), &ScheduledShift> = input
        .schedules
        .iter()
        .map(|s| ((s.employee_id.as_str(), s.date), s))
        .collect();

    let units: Vec<(&str, NaiveDate, &[RawPunch])> = grouped
        .iter()
        .flat_map(|(employee_id, days)| {
            days.iter()
                .map(move |(date, punches)| (employee_id.as_str(), *date, punches.as_slice()))
        })
        .collect();

    let timecards: Vec<DailyTimecard> = units
        .par_iter()
        .map(|(employee_id, date, punches)| {
            assemble_timecard(
                employee_id,
                *date,
                punches,
                rules,
                policy,
                &input.waivers,
                schedules_by_unit.get(&(*employee_id, *date)).copied(),
                sink,
            )
        })
        .collect();

    BatchOutcome { timecards, errors }
}

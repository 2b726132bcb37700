//! Schedule variance calculation.
//!
//! Compares paired actual times against an externally-supplied scheduled
//! shift and computes signed lateness/earliness. Advisory data only: it is
//! attached to the timecard, never blocks processing, and is separate from
//! compliance violations.

use crate::models::{PunchPair, ScheduleVariance, ScheduledShift};

/// Computes the variance between actual punches and the scheduled shift.
///
/// Returns `None` when no schedule exists for the day or when the first
/// pair is incomplete; "no data" is distinct from "on time". Positive
/// minutes mean late. The end variance uses the day's last captured
/// clock-out; when none exists, only the start variance is reported.
///
/// # Example
///
/// ```
/// use timecard_engine::models::{PunchPair, PunchType, RawPunch, ScheduledShift};
/// use timecard_engine::processing::calculate_variance;
/// use chrono::{DateTime, NaiveDate, Utc};
///
/// let punch = |punch_type, ts: &str| RawPunch {
///     employee_id: "emp_001".to_string(),
///     punch_type,
///     timestamp: ts.parse::<DateTime<Utc>>().unwrap(),
///     device_id: None,
///     job_code: None,
///     location_id: None,
/// };
/// let pairs = vec![PunchPair::complete(
///     punch(PunchType::ClockIn, "2026-03-02T09:10:00Z"),
///     punch(PunchType::ClockOut, "2026-03-02T17:05:00Z"),
/// )];
/// let schedule = ScheduledShift {
///     employee_id: "emp_001".to_string(),
///     date: NaiveDate::from_ymd_opt(2026, 3, 2).unwrap(),
///     start_time: "2026-03-02T09:00:00Z".parse::<DateTime<Utc>>().unwrap(),
///     end_time: "2026-03-02T17:00:00Z".parse::<DateTime<Utc>>().unwrap(),
/// };
///
/// let variance = calculate_variance(&pairs, Some(&schedule)).unwrap();
/// assert_eq!(variance.start_variance_minutes, 10);
/// assert_eq!(variance.end_variance_minutes, Some(5));
/// assert_eq!(variance.total_variance_minutes, Some(15));
/// ```
pub fn calculate_variance(
    pairs: &[PunchPair],
    schedule: Option<&ScheduledShift>,
) -> Option<ScheduleVariance> {
    let schedule = schedule?;
    let first = pairs.first()?;
    if !first.is_complete {
        return None;
    }

    let start_variance_minutes =
        (first.clock_in.timestamp - schedule.start_time).num_minutes();

    // Last captured clock-out of the day, if any
    let last_clock_out = pairs
        .iter()
        .rev()
        .find_map(|p| p.clock_out.as_ref().filter(|_| p.is_complete));

    let end_variance_minutes =
        last_clock_out.map(|out| (out.timestamp - schedule.end_time).num_minutes());
    let total_variance_minutes = end_variance_minutes.map(|end| start_variance_minutes + end);

    Some(ScheduleVariance {
        start_variance_minutes,
        end_variance_minutes,
        total_variance_minutes,
    })
}

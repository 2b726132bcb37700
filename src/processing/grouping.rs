//! Punch validation and grouping.
//!
//! The first pipeline stage: deduplicates raw punches and buckets them by
//! employee and the employee's local calendar day. Employees with punches
//! but no settings record are unprocessable and surfaced as errors, never
//! silently lost.

use std::collections::{BTreeMap, HashMap, HashSet};

use chrono::NaiveDate;

use crate::audit::{AuditEvent, AuditSink};
use crate::error::EngineError;
use crate::models::{EmployeeSettings, RawPunch};

use super::ProcessingError;

/// Punches bucketed by employee, then by local calendar date.
///
/// Buckets are ordered (BTreeMap) so batch output is deterministic, and each
/// bucket's punches are sorted ascending by timestamp, ready for pairing.
pub type GroupedPunches = BTreeMap<String, BTreeMap<NaiveDate, Vec<RawPunch>>>;

/// Deduplicates and groups raw punches by employee and local day.
///
/// - Exact duplicates (same employee, punch type, and timestamp) are dropped
///   and reported to the audit sink.
/// - Each surviving punch is bucketed by the employee's local calendar date,
///   derived from the punch timestamp and the employee's UTC offset.
/// - An employee with punches but no settings record produces one
///   [`EngineError::MissingEmployeeSettings`] entry in the error list; an
///   employee whose stored offset is unrepresentable produces a
///   [`EngineError::CalculationError`]. Neither stops the batch.
///
/// # Example
///
/// ```
/// use timecard_engine::audit::NullSink;
/// use timecard_engine::models::{EmployeeSettings, PunchType, RawPunch};
/// use timecard_engine::processing::group_punches;
/// use chrono::{DateTime, Utc};
///
/// let punches = vec![RawPunch {
///     employee_id: "emp_001".to_string(),
///     punch_type: PunchType::ClockIn,
///     timestamp: "2026-03-02T17:00:00Z".parse::<DateTime<Utc>>().unwrap(),
///     device_id: None,
///     job_code: None,
///     location_id: None,
/// }];
/// let settings = vec![EmployeeSettings {
///     employee_id: "emp_001".to_string(),
///     utc_offset_minutes: -480,
///     default_job_code: None,
/// }];
///
/// let (grouped, errors) = group_punches(&punches, &settings, &NullSink);
/// assert!(errors.is_empty());
/// assert_eq!(grouped["emp_001"].len(), 1);
/// ```
pub fn group_punches(
    punches: &[RawPunch],
    settings: &[EmployeeSettings],
    sink: &dyn AuditSink,
) -> (GroupedPunches, Vec<ProcessingError>) {
    let settings_by_employee: HashMap<&str, &EmployeeSettings> = settings
        .iter()
        .map(|s| (s.employee_id.as_str(), s))
        .collect();

    let mut grouped: GroupedPunches = BTreeMap::new();
    let mut errors: Vec<ProcessingError> = Vec::new();
    let mut seen_keys = HashSet::new();
    let mut failed_employees: HashSet<String> = HashSet::new();

    for punch in punches {
        if failed_employees.contains(&punch.employee_id) {
            continue;
        }

        let Some(employee_settings) = settings_by_employee.get(punch.employee_id.as_str()) else {
            sink.record(AuditEvent::EmployeeSkipped {
                employee_id: punch.employee_id.clone(),
                reason: "no employee settings record".to_string(),
            });
            errors.push(ProcessingError {
                employee_id: punch.employee_id.clone(),
                error: EngineError::MissingEmployeeSettings {
                    employee_id: punch.employee_id.clone(),
                },
            });
            failed_employees.insert(punch.employee_id.clone());
            continue;
        };

        let Some(offset) = employee_settings.timezone_offset() else {
            sink.record(AuditEvent::EmployeeSkipped {
                employee_id: punch.employee_id.clone(),
                reason: "unrepresentable UTC offset".to_string(),
            });
            errors.push(ProcessingError {
                employee_id: punch.employee_id.clone(),
                error: EngineError::CalculationError {
                    message: format!(
                        "UTC offset {} minutes for employee '{}' is out of range",
                        employee_settings.utc_offset_minutes, punch.employee_id
                    ),
                },
            });
            failed_employees.insert(punch.employee_id.clone());
            continue;
        };

        let key = (
            punch.employee_id.clone(),
            punch.punch_type,
            punch.timestamp,
        );
        if !seen_keys.insert(key) {
            sink.record(AuditEvent::DuplicatePunchDropped {
                employee_id: punch.employee_id.clone(),
                punch_type: punch.punch_type,
                timestamp: punch.timestamp,
            });
            continue;
        }

        let local_date = punch.local_date(offset);
        grouped
            .entry(punch.employee_id.clone())
            .or_default()
            .entry(local_date)
            .or_default()
            .push(punch.clone());
    }

    // Pairing requires ascending timestamp order within each bucket
    for days in grouped.values_mut() {
        for bucket in days.values_mut() {
            bucket.sort_by_key(|p| p.timestamp);
        }
    }

    (grouped, errors)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audit::CollectingSink;
    use crate::models::PunchType;
    use chrono::{DateTime, Utc};

    fn punch(employee_id: &str, punch_type: PunchType, ts: &str) -> RawPunch {
        RawPunch {
            employee_id: employee_id.to_string(),
            punch_type,
            timestamp: ts.parse::<DateTime<Utc>>().unwrap(),
            device_id: None,
            job_code: None,
            location_id: None,
        }
    }

    fn settings(employee_id: &str, offset_minutes: i32) -> EmployeeSettings {
        EmployeeSettings {
            employee_id: employee_id.to_string(),
            utc_offset_minutes: offset_minutes,
            default_job_code: None,
        }
    }

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    #[test]
    fn test_groups_by_employee_and_local_date() {
        // 17:00Z and 01:30Z next day are both 2026-03-02 in UTC-8
        let punches = vec![
            punch("emp_001", PunchType::ClockIn, "2026-03-02T17:00:00Z"),
            punch("emp_001", PunchType::ClockOut, "2026-03-03T01:30:00Z"),
        ];
        let settings = vec![settings("emp_001", -480)];

        let (grouped, errors) = group_punches(&punches, &settings, &crate::audit::NullSink);

        assert!(errors.is_empty());
        let days = &grouped["emp_001"];
        assert_eq!(days.len(), 1);
        assert_eq!(days[&date("2026-03-02")].len(), 2);
    }

    #[test]
    fn test_duplicates_dropped_and_counted() {
        let punches = vec![
            punch("emp_001", PunchType::ClockIn, "2026-03-02T09:00:00Z"),
            punch("emp_001", PunchType::ClockIn, "2026-03-02T09:00:00Z"),
            punch("emp_001", PunchType::ClockOut, "2026-03-02T17:00:00Z"),
        ];
        let settings = vec![settings("emp_001", 0)];
        let sink = CollectingSink::new();

        let (grouped, errors) = group_punches(&punches, &settings, &sink);

        assert!(errors.is_empty());
        assert_eq!(grouped["emp_001"][&date("2026-03-02")].len(), 2);

        let duplicates: Vec<_> = sink
            .events()
            .into_iter()
            .filter(|e| matches!(e, AuditEvent::DuplicatePunchDropped { .. }))
            .collect();
        assert_eq!(duplicates.len(), 1);
    }

    #[test]
    fn test_missing_settings_reported_once_per_employee() {
        let punches = vec![
            punch("emp_ghost", PunchType::ClockIn, "2026-03-02T09:00:00Z"),
            punch("emp_ghost", PunchType::ClockOut, "2026-03-02T17:00:00Z"),
            punch("emp_001", PunchType::ClockIn, "2026-03-02T09:00:00Z"),
        ];
        let settings = vec![settings("emp_001", 0)];

        let (grouped, errors) = group_punches(&punches, &settings, &crate::audit::NullSink);

        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].employee_id, "emp_ghost");
        assert!(matches!(
            errors[0].error,
            EngineError::MissingEmployeeSettings { .. }
        ));
        // Other employees are unaffected
        assert!(grouped.contains_key("emp_001"));
        assert!(!grouped.contains_key("emp_ghost"));
    }

    #[test]
    fn test_out_of_range_offset_reported() {
        let punches = vec![punch("emp_001", PunchType::ClockIn, "2026-03-02T09:00:00Z")];
        let settings = vec![settings("emp_001", 48 * 60)];

        let (grouped, errors) = group_punches(&punches, &settings, &crate::audit::NullSink);

        assert!(grouped.is_empty());
        assert_eq!(errors.len(), 1);
        assert!(matches!(
            errors[0].error,
            EngineError::CalculationError { .. }
        ));
    }

    #[test]
    fn test_buckets_sorted_ascending() {
        let punches = vec![
            punch("emp_001", PunchType::ClockOut, "2026-03-02T17:00:00Z"),
            punch("emp_001", PunchType::ClockIn, "2026-03-02T09:00:00Z"),
        ];
        let settings = vec![settings("emp_001", 0)];

        let (grouped, _) = group_punches(&punches, &settings, &crate::audit::NullSink);

        let bucket = &grouped["emp_001"][&date("2026-03-02")];
        assert_eq!(bucket[0].punch_type, PunchType::ClockIn);
        assert_eq!(bucket[1].punch_type, PunchType::ClockOut);
    }

    #[test]
    fn test_empty_input_is_empty_output() {
        let (grouped, errors) = group_punches(&[], &[], &crate::audit::NullSink);
        assert!(grouped.is_empty());
        assert!(errors.is_empty());
    }
}

//! Raw punch model and employee settings.
//!
//! This module defines the RawPunch struct and PunchType enum for
//! representing clock events captured by punch hardware, along with the
//! per-employee settings needed to interpret them.

use chrono::{DateTime, FixedOffset, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// The kind of clock event a punch represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PunchType {
    /// The employee started working.
    ClockIn,
    /// The employee stopped working.
    ClockOut,
}

impl std::fmt::Display for PunchType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PunchType::ClockIn => write!(f, "clock_in"),
            PunchType::ClockOut => write!(f, "clock_out"),
        }
    }
}

/// A single clock event captured at a point in time.
///
/// Punches are immutable once captured; the engine only reads them.
///
/// # Example
///
/// ```
/// use timecard_engine::models::{PunchType, RawPunch};
/// use chrono::{DateTime, Utc};
///
/// let punch = RawPunch {
///     employee_id: "emp_001".to_string(),
///     punch_type: PunchType::ClockIn,
///     timestamp: "2026-03-02T17:00:00Z".parse::<DateTime<Utc>>().unwrap(),
///     device_id: Some("kiosk_04".to_string()),
///     job_code: None,
///     location_id: None,
/// };
/// assert_eq!(punch.punch_type, PunchType::ClockIn);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawPunch {
    /// The employee who punched.
    pub employee_id: String,
    /// Whether this is a clock-in or clock-out event.
    pub punch_type: PunchType,
    /// The moment the punch was captured, in UTC.
    pub timestamp: DateTime<Utc>,
    /// The capture device, if known.
    #[serde(default)]
    pub device_id: Option<String>,
    /// The job code the employee punched against, if any.
    #[serde(default)]
    pub job_code: Option<String>,
    /// The location the punch was captured at, if known.
    #[serde(default)]
    pub location_id: Option<String>,
}

impl RawPunch {
    /// The exact-match key used for deduplication.
    ///
    /// Two punches with the same employee, type, and timestamp are the same
    /// event captured twice.
    pub fn dedup_key(&self) -> (&str, PunchType, DateTime<Utc>) {
        (&self.employee_id, self.punch_type, self.timestamp)
    }

    /// The local calendar date of this punch under the given UTC offset.
    pub fn local_date(&self, offset: FixedOffset) -> NaiveDate {
        self.timestamp.with_timezone(&offset).date_naive()
    }
}

/// Per-employee settings required to interpret punches.
///
/// The settings source resolves the employee's timezone to a fixed UTC
/// offset for the processing window; DST transitions are the source's
/// responsibility, not the engine's.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmployeeSettings {
    /// The employee these settings belong to.
    pub employee_id: String,
    /// Offset from UTC, in minutes (e.g. -480 for Pacific Standard Time).
    pub utc_offset_minutes: i32,
    /// The job code applied when a punch carries none.
    #[serde(default)]
    pub default_job_code: Option<String>,
}

impl EmployeeSettings {
    /// Returns the employee's timezone as a fixed offset.
    ///
    /// Returns `None` if the stored offset is outside the representable
    /// range (more than a day from UTC), which marks the employee
    /// unprocessable.
    pub fn timezone_offset(&self) -> Option<FixedOffset> {
        FixedOffset::east_opt(self.utc_offset_minutes * 60)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn utc(s: &str) -> DateTime<Utc> {
        s.parse().unwrap()
    }

    fn make_punch(employee_id: &str, punch_type: PunchType, ts: &str) -> RawPunch {
        RawPunch {
            employee_id: employee_id.to_string(),
            punch_type,
            timestamp: utc(ts),
            device_id: None,
            job_code: None,
            location_id: None,
        }
    }

    #[test]
    fn test_dedup_key_matches_for_identical_events() {
        let a = make_punch("emp_001", PunchType::ClockIn, "2026-03-02T17:00:00Z");
        let mut b = a.clone();
        b.device_id = Some("kiosk_09".to_string());

        // Device differences do not make a punch a distinct event
        assert_eq!(a.dedup_key(), b.dedup_key());
    }

    #[test]
    fn test_dedup_key_differs_by_punch_type() {
        let a = make_punch("emp_001", PunchType::ClockIn, "2026-03-02T17:00:00Z");
        let b = make_punch("emp_001", PunchType::ClockOut, "2026-03-02T17:00:00Z");
        assert_ne!(a.dedup_key(), b.dedup_key());
    }

    #[test]
    fn test_local_date_shifts_across_midnight() {
        // 01:30 UTC is still the previous day in UTC-8
        let punch = make_punch("emp_001", PunchType::ClockOut, "2026-03-03T01:30:00Z");
        let pacific = FixedOffset::west_opt(8 * 3600).unwrap();

        assert_eq!(
            punch.local_date(pacific),
            NaiveDate::from_ymd_opt(2026, 3, 2).unwrap()
        );
    }

    #[test]
    fn test_local_date_utc_employee() {
        let punch = make_punch("emp_001", PunchType::ClockIn, "2026-03-02T09:00:00Z");
        let offset = FixedOffset::east_opt(0).unwrap();
        assert_eq!(
            punch.local_date(offset),
            NaiveDate::from_ymd_opt(2026, 3, 2).unwrap()
        );
    }

    #[test]
    fn test_timezone_offset_negative_minutes() {
        let settings = EmployeeSettings {
            employee_id: "emp_001".to_string(),
            utc_offset_minutes: -480,
            default_job_code: None,
        };
        let offset = settings.timezone_offset().unwrap();
        assert_eq!(offset, FixedOffset::west_opt(8 * 3600).unwrap());
    }

    #[test]
    fn test_timezone_offset_out_of_range_is_none() {
        let settings = EmployeeSettings {
            employee_id: "emp_001".to_string(),
            utc_offset_minutes: 48 * 60,
            default_job_code: None,
        };
        assert!(settings.timezone_offset().is_none());
    }

    #[test]
    fn test_punch_type_serialization() {
        assert_eq!(
            serde_json::to_string(&PunchType::ClockIn).unwrap(),
            "\"clock_in\""
        );
        assert_eq!(
            serde_json::to_string(&PunchType::ClockOut).unwrap(),
            "\"clock_out\""
        );
    }

    #[test]
    fn test_punch_deserialization_with_optional_fields_absent() {
        let json = r#"{
            "employee_id": "emp_001",
            "punch_type": "clock_in",
            "timestamp": "2026-03-02T17:00:00Z"
        }"#;

        let punch: RawPunch = serde_json::from_str(json).unwrap();
        assert_eq!(punch.employee_id, "emp_001");
        assert!(punch.device_id.is_none());
        assert!(punch.job_code.is_none());
        assert!(punch.location_id.is_none());
    }

    #[test]
    fn test_punch_serialization_round_trip() {
        let punch = RawPunch {
            employee_id: "emp_001".to_string(),
            punch_type: PunchType::ClockOut,
            timestamp: utc("2026-03-02T17:00:00Z"),
            device_id: Some("kiosk_04".to_string()),
            job_code: Some("front_desk".to_string()),
            location_id: Some("store_12".to_string()),
        };

        let json = serde_json::to_string(&punch).unwrap();
        let deserialized: RawPunch = serde_json::from_str(&json).unwrap();
        assert_eq!(punch, deserialized);
    }
}

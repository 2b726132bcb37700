//! Hours calculation.
//!
//! Applies the client's rounding rule to each complete pair and derives
//! regular/overtime totals. This stage has no error states: a day with only
//! incomplete pairs degrades gracefully to zero hours.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::config::ClientRules;
use crate::models::PunchPair;

/// Hour totals derived from one employee-day's pairs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HoursResult {
    /// Sum of rounded minutes across all complete pairs.
    pub worked_minutes: i64,
    /// Worked minutes as hours, two decimal places.
    pub total_hours: Decimal,
    /// Hours up to the overtime threshold.
    pub regular_hours: Decimal,
    /// Hours beyond the overtime threshold.
    pub overtime_hours: Decimal,
}

/// Calculates rounded hour totals for one employee-day.
///
/// Each complete pair's duration is snapped per the client's
/// [`RoundingRule`](crate::config::RoundingRule); incomplete pairs
/// contribute zero minutes. `regular_hours` is capped at the overtime
/// threshold and `overtime_hours` is the excess, so
/// `total_hours == regular_hours + overtime_hours` holds exactly.
///
/// # Example
///
/// ```
/// use timecard_engine::config::{ClientRules, RoundingRule};
/// use timecard_engine::models::{PunchPair, PunchType, RawPunch};
/// use timecard_engine::processing::calculate_hours;
/// use chrono::{DateTime, Utc};
/// use rust_decimal::Decimal;
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
///     punch(PunchType::ClockIn, "2026-03-02T09:00:00Z"),
///     punch(PunchType::ClockOut, "2026-03-02T17:30:00Z"),
/// )];
/// let rules = ClientRules {
///     rounding: RoundingRule::FifteenMinute,
///     overtime_threshold_hours: Decimal::new(8, 0),
///     ..ClientRules::default()
/// };
///
/// let hours = calculate_hours(&pairs, &rules);
/// assert_eq!(hours.worked_minutes, 510);
/// assert_eq!(hours.total_hours, Decimal::new(850, 2));   // 8.50
/// assert_eq!(hours.regular_hours, Decimal::new(800, 2)); // 8.00
/// assert_eq!(hours.overtime_hours, Decimal::new(50, 2)); // 0.50
/// ```
pub fn calculate_hours(pairs: &[PunchPair], rules: &ClientRules) -> HoursResult {
    let worked_minutes: i64 = pairs
        .iter()
        .filter(|p| p.is_complete)
        .map(|p| rules.rounding.apply(p.shift_duration_minutes))
        .sum();

    let total_hours = (Decimal::new(worked_minutes, 0) / Decimal::new(60, 0)).round_dp(2);
    let regular_hours = total_hours.min(rules.overtime_threshold_hours);
    let overtime_hours = total_hours - regular_hours;

    HoursResult {
        worked_minutes,
        total_hours,
        regular_hours,
        overtime_hours,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::RoundingRule;
    use crate::models::{PunchType, RawPunch};
    use chrono::{DateTime, Utc};

    fn punch(punch_type: PunchType, ts: &str) -> RawPunch {
        RawPunch {
            employee_id: "emp_001".to_string(),
            punch_type,
            timestamp: ts.parse::<DateTime<Utc>>().unwrap(),
            device_id: None,
            job_code: None,
            location_id: None,
        }
    }

    fn complete_pair(start: &str, end: &str) -> PunchPair {
        PunchPair::complete(
            punch(PunchType::ClockIn, start),
            punch(PunchType::ClockOut, end),
        )
    }

    fn rules(rounding: RoundingRule, threshold: i64) -> ClientRules {
        ClientRules {
            rounding,
            overtime_threshold_hours: Decimal::new(threshold, 0),
            ..ClientRules::default()
        }
    }

    /// 09:00-17:30 with 15-minute rounding and an 8-hour threshold:
    /// 510 minutes, 8.5 total, 8 regular, 0.5 overtime.
    #[test]
    fn test_eight_and_a_half_hour_day_with_quarter_hour_rounding() {
        let pairs = vec![complete_pair("2026-03-02T09:00:00Z", "2026-03-02T17:30:00Z")];
        let result = calculate_hours(&pairs, &rules(RoundingRule::FifteenMinute, 8));

        assert_eq!(result.worked_minutes, 510);
        assert_eq!(result.total_hours, Decimal::new(850, 2));
        assert_eq!(result.regular_hours, Decimal::new(800, 2));
        assert_eq!(result.overtime_hours, Decimal::new(50, 2));
    }

    #[test]
    fn test_rounding_applied_per_pair() {
        // 247 minutes and 248 minutes: rounded separately to 245 + 250,
        // not 495 from a combined 495-minute sum
        let pairs = vec![
            complete_pair("2026-03-02T08:00:00Z", "2026-03-02T12:07:00Z"),
            complete_pair("2026-03-02T13:00:00Z", "2026-03-02T17:08:00Z"),
        ];
        let result = calculate_hours(&pairs, &rules(RoundingRule::FiveMinute, 8));

        assert_eq!(result.worked_minutes, 245 + 250);
    }

    #[test]
    fn test_incomplete_pairs_contribute_zero() {
        let pairs = vec![
            PunchPair::missing_clock_out(punch(PunchType::ClockIn, "2026-03-02T09:00:00Z")),
            PunchPair::missing_clock_in(punch(PunchType::ClockOut, "2026-03-02T17:00:00Z")),
        ];
        let result = calculate_hours(&pairs, &rules(RoundingRule::None, 8));

        assert_eq!(result.worked_minutes, 0);
        assert_eq!(result.total_hours, Decimal::ZERO);
        assert_eq!(result.regular_hours, Decimal::ZERO);
        assert_eq!(result.overtime_hours, Decimal::ZERO);
    }

    #[test]
    fn test_no_rounding_keeps_raw_minutes() {
        let pairs = vec![complete_pair("2026-03-02T09:00:00Z", "2026-03-02T17:23:00Z")];
        let result = calculate_hours(&pairs, &rules(RoundingRule::None, 8));

        assert_eq!(result.worked_minutes, 503);
        assert_eq!(result.total_hours, Decimal::new(838, 2)); // 503/60 = 8.3833... -> 8.38
    }

    #[test]
    fn test_under_threshold_all_regular() {
        let pairs = vec![complete_pair("2026-03-02T09:00:00Z", "2026-03-02T15:00:00Z")];
        let result = calculate_hours(&pairs, &rules(RoundingRule::None, 8));

        assert_eq!(result.total_hours, Decimal::new(600, 2));
        assert_eq!(result.regular_hours, Decimal::new(600, 2));
        assert_eq!(result.overtime_hours, Decimal::ZERO);
    }

    #[test]
    fn test_exactly_at_threshold_no_overtime() {
        let pairs = vec![complete_pair("2026-03-02T09:00:00Z", "2026-03-02T17:00:00Z")];
        let result = calculate_hours(&pairs, &rules(RoundingRule::None, 8));

        assert_eq!(result.total_hours, Decimal::new(800, 2));
        assert_eq!(result.overtime_hours, Decimal::ZERO);
    }

    #[test]
    fn test_total_equals_regular_plus_overtime() {
        let cases = vec![
            vec![complete_pair("2026-03-02T09:00:00Z", "2026-03-02T17:23:00Z")],
            vec![complete_pair("2026-03-02T06:00:00Z", "2026-03-02T19:37:00Z")],
            vec![
                complete_pair("2026-03-02T06:00:00Z", "2026-03-02T11:02:00Z"),
                complete_pair("2026-03-02T12:00:00Z", "2026-03-02T18:41:00Z"),
            ],
        ];

        for pairs in cases {
            for rounding in [
                RoundingRule::None,
                RoundingRule::FiveMinute,
                RoundingRule::TenMinute,
                RoundingRule::FifteenMinute,
            ] {
                let result = calculate_hours(&pairs, &rules(rounding, 8));
                assert_eq!(
                    result.total_hours,
                    result.regular_hours + result.overtime_hours
                );
            }
        }
    }

    #[test]
    fn test_empty_day_is_zero_hours() {
        let result = calculate_hours(&[], &rules(RoundingRule::FifteenMinute, 8));
        assert_eq!(result.total_hours, Decimal::ZERO);
    }
}

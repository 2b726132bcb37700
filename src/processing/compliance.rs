//! Meal and rest-break compliance evaluation.
//!
//! Evaluates one employee-day's shifts against the compliance policy and any
//! active waivers, producing violation records and premium-pay penalty
//! hours. A violation is a normal business outcome routed to human approval,
//! never an error.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;

use crate::audit::{AuditEvent, AuditSink};
use crate::config::{CompliancePolicy, RestBreakTracking};
use crate::models::{
    BreakPeriod, BreakType, ComplianceResult, DailyTimecard, EarningsCode, MealSlot, MealWaiver,
    PunchPair, TimecardFlag, ViolationReason, active_waiver,
};

fn slot_label(slot: MealSlot) -> &'static str {
    match slot {
        MealSlot::First => "first",
        MealSlot::Second => "second",
    }
}

/// Evaluates one meal slot against the policy and waivers.
///
/// Precedence: an active waiver of matching type satisfies the slot without
/// a break being taken; otherwise auto-deduction credits a full meal period
/// without punch evidence; otherwise the slot is a `missing` violation. The
/// `late` and `short` reasons become reachable once discrete meal punches
/// are captured.
fn evaluate_meal_slot(
    slot: MealSlot,
    employee_id: &str,
    date: NaiveDate,
    policy: &CompliancePolicy,
    waivers: &[MealWaiver],
    notes: &mut Vec<String>,
) -> BreakPeriod {
    if policy.honor_waivers {
        if let Some(waiver) = active_waiver(waivers, employee_id, date, slot) {
            notes.push(format!(
                "{} meal period waived ({:?} waiver)",
                slot_label(slot),
                waiver.waiver_type
            ));
            return BreakPeriod {
                break_type: BreakType::Meal,
                required_minutes: policy.meal_duration_minutes,
                actual_minutes: None,
                is_taken: false,
                is_compliant: true,
                waiver_applied: true,
                violation_reason: None,
            };
        }
    }

    if policy.auto_deduct_meals {
        return BreakPeriod {
            break_type: BreakType::Meal,
            required_minutes: policy.meal_duration_minutes,
            actual_minutes: Some(policy.meal_duration_minutes),
            is_taken: true,
            is_compliant: true,
            waiver_applied: false,
            violation_reason: None,
        };
    }

    notes.push(format!("{} meal period missing", slot_label(slot)));
    BreakPeriod {
        break_type: BreakType::Meal,
        required_minutes: policy.meal_duration_minutes,
        actual_minutes: None,
        is_taken: false,
        is_compliant: false,
        waiver_applied: false,
        violation_reason: Some(ViolationReason::Missing),
    }
}

/// Evaluates one required rest break under the configured tracking mode.
fn evaluate_rest_break(index: usize, policy: &CompliancePolicy, notes: &mut Vec<String>) -> BreakPeriod {
    match policy.rest_break_tracking {
        RestBreakTracking::Lenient => BreakPeriod {
            break_type: BreakType::Rest,
            required_minutes: policy.rest_break_minutes,
            actual_minutes: Some(policy.rest_break_minutes),
            is_taken: true,
            is_compliant: true,
            waiver_applied: false,
            violation_reason: None,
        },
        RestBreakTracking::Strict => {
            notes.push(format!("rest break {} missing", index + 1));
            BreakPeriod {
                break_type: BreakType::Rest,
                required_minutes: policy.rest_break_minutes,
                actual_minutes: None,
                is_taken: false,
                is_compliant: false,
                waiver_applied: false,
                violation_reason: Some(ViolationReason::Missing),
            }
        }
    }
}

/// Evaluates meal and rest compliance for one employee-day.
///
/// Shift duration is summed across every pair, complete and incomplete. A
/// first meal period is required above
/// [`first_meal_trigger_hours`](CompliancePolicy::first_meal_trigger_hours),
/// a second above
/// [`second_meal_trigger_hours`](CompliancePolicy::second_meal_trigger_hours).
/// Required rest breaks are `floor(total_hours / rest_break_frequency_hours)`.
/// When premium pay is enabled, every non-compliant period accrues a flat
/// [`premium_hours_per_violation`](CompliancePolicy::premium_hours_per_violation)
/// and one earnings code.
///
/// # Example
///
/// ```
/// use timecard_engine::audit::NullSink;
/// use timecard_engine::config::CompliancePolicy;
/// use timecard_engine::models::{PunchPair, PunchType, RawPunch};
/// use timecard_engine::processing::evaluate_compliance;
/// use chrono::{DateTime, NaiveDate, Utc};
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
/// // A six-hour shift with no waiver and no auto-deduction
/// let pairs = vec![PunchPair::complete(
///     punch(PunchType::ClockIn, "2026-03-02T09:00:00Z"),
///     punch(PunchType::ClockOut, "2026-03-02T15:00:00Z"),
/// )];
/// let date = NaiveDate::from_ymd_opt(2026, 3, 2).unwrap();
///
/// let result = evaluate_compliance(
///     "emp_001", date, &pairs, &CompliancePolicy::default(), &[], &NullSink,
/// );
/// assert!(!result.meal_compliant);
/// assert_eq!(result.penalty_hours, Decimal::ONE);
/// ```
pub fn evaluate_compliance(
    employee_id: &str,
    date: NaiveDate,
    pairs: &[PunchPair],
    policy: &CompliancePolicy,
    waivers: &[MealWaiver],
    sink: &dyn AuditSink,
) -> ComplianceResult {
    let total_minutes: i64 = pairs.iter().map(|p| p.shift_duration_minutes).sum();
    let total_hours = Decimal::new(total_minutes, 0) / Decimal::new(60, 0);

    let mut notes = Vec::new();
    let mut meal_periods = Vec::new();

    if total_hours > policy.first_meal_trigger_hours {
        meal_periods.push(evaluate_meal_slot(
            MealSlot::First,
            employee_id,
            date,
            policy,
            waivers,
            &mut notes,
        ));
    }
    if total_hours > policy.second_meal_trigger_hours {
        meal_periods.push(evaluate_meal_slot(
            MealSlot::Second,
            employee_id,
            date,
            policy,
            waivers,
            &mut notes,
        ));
    }

    let required_rest_breaks = (total_hours / policy.rest_break_frequency_hours)
        .floor()
        .to_usize()
        .unwrap_or(0);
    let rest_periods: Vec<BreakPeriod> = (0..required_rest_breaks)
        .map(|i| evaluate_rest_break(i, policy, &mut notes))
        .collect();

    let mut penalty_hours = Decimal::ZERO;
    let mut penalty_earnings_codes = Vec::new();
    let mut violation_reasons = Vec::new();

    for period in meal_periods.iter().chain(rest_periods.iter()) {
        let Some(reason) = period.violation_reason else {
            continue;
        };
        violation_reasons.push(reason);
        sink.record(AuditEvent::ViolationFound {
            employee_id: employee_id.to_string(),
            date,
            break_type: period.break_type,
            reason,
        });

        if policy.premium_pay_enabled {
            let code = match period.break_type {
                BreakType::Meal => EarningsCode::MealViolation,
                BreakType::Rest => EarningsCode::RestViolation,
            };
            penalty_hours += policy.premium_hours_per_violation;
            penalty_earnings_codes.push(code);
            sink.record(AuditEvent::PenaltyApplied {
                employee_id: employee_id.to_string(),
                date,
                hours: policy.premium_hours_per_violation,
                code,
            });
        }
    }

    let meal_compliant = meal_periods.iter().all(|p| p.is_compliant);
    let rest_compliant = rest_periods.iter().all(|p| p.is_compliant);
    let waiver_applied = meal_periods.iter().any(|p| p.waiver_applied);

    ComplianceResult {
        employee_id: employee_id.to_string(),
        date,
        meal_periods,
        rest_periods,
        meal_compliant,
        rest_compliant,
        approval_required: !meal_compliant || !rest_compliant,
        penalty_hours,
        penalty_earnings_codes,
        violation_reasons,
        waiver_applied,
        notes,
    }
}

/// Merges a compliance result into its timecard.
///
/// Penalty hours are added to both `overtime_hours` and `total_hours`, so
/// the `total == regular + overtime` invariant survives the injection. Notes
/// are appended, the `compliance_violation` flag is added when a penalty
/// accrued, and the timecard stops being compliant once any penalty was
/// applied. Credited meal and rest minutes are surfaced on the timecard.
pub fn apply_compliance(timecard: &mut DailyTimecard, result: ComplianceResult) {
    timecard.meal_minutes = result
        .meal_periods
        .iter()
        .filter(|p| p.is_taken)
        .filter_map(|p| p.actual_minutes)
        .sum();
    timecard.break_minutes = result
        .rest_periods
        .iter()
        .filter(|p| p.is_taken)
        .filter_map(|p| p.actual_minutes)
        .sum();

    if result.has_penalties() {
        timecard.overtime_hours += result.penalty_hours;
        timecard.total_hours += result.penalty_hours;
        timecard.add_flag(TimecardFlag::ComplianceViolation);
        timecard.is_compliant = false;
    }

    timecard.notes.extend(result.notes.iter().cloned());
    timecard.compliance = Some(result);
}

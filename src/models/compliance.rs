//! Compliance evaluation result models.
//!
//! These types capture the outcome of evaluating one employee-day against a
//! compliance policy: the individual break periods, the aggregate booleans,
//! and any premium-pay penalties owed. They are computed fresh each run and
//! never persisted independent of their parent result.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// The class of break being evaluated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BreakType {
    /// An unpaid meal period of defined minimum duration.
    Meal,
    /// A short paid rest break required at a fixed frequency.
    Rest,
}

/// Why a break period failed compliance.
///
/// `Late` and `Short` are only produced once punch-level meal tracking
/// exists; until then every violation is `Missing`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ViolationReason {
    /// No evidence the break was provided at all.
    Missing,
    /// The break started after the policy deadline into the shift.
    Late,
    /// The break was shorter than the required duration.
    Short,
}

impl std::fmt::Display for ViolationReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ViolationReason::Missing => write!(f, "missing"),
            ViolationReason::Late => write!(f, "late"),
            ViolationReason::Short => write!(f, "short"),
        }
    }
}

/// Earnings code attached to a premium-pay penalty.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EarningsCode {
    /// Penalty for a non-compliant meal period.
    MealViolation,
    /// Penalty for a non-compliant rest break.
    RestViolation,
}

impl std::fmt::Display for EarningsCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EarningsCode::MealViolation => write!(f, "MEAL_VIOLATION"),
            EarningsCode::RestViolation => write!(f, "REST_VIOLATION"),
        }
    }
}

/// The per-shift evaluation of one required break.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BreakPeriod {
    /// Whether this is a meal period or a rest break.
    pub break_type: BreakType,
    /// Minutes the policy requires for this break.
    pub required_minutes: i64,
    /// Minutes actually credited, when evidence (or auto-deduction) exists.
    #[serde(default)]
    pub actual_minutes: Option<i64>,
    /// Whether the break was taken (or credited as taken).
    pub is_taken: bool,
    /// Whether this break satisfies the policy.
    pub is_compliant: bool,
    /// Whether a waiver satisfied this break instead of an actual break.
    pub waiver_applied: bool,
    /// The reason for non-compliance, when not compliant.
    #[serde(default)]
    pub violation_reason: Option<ViolationReason>,
}

/// The compliance outcome for one employee on one day.
///
/// A violation here is a normal business outcome requiring downstream human
/// approval, never an error.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComplianceResult {
    /// The employee evaluated.
    pub employee_id: String,
    /// The local calendar day evaluated.
    pub date: NaiveDate,
    /// Every meal period that was required for the day.
    pub meal_periods: Vec<BreakPeriod>,
    /// Every rest break that was required for the day.
    pub rest_periods: Vec<BreakPeriod>,
    /// True only if every meal period is compliant.
    pub meal_compliant: bool,
    /// True only if every rest break is compliant.
    pub rest_compliant: bool,
    /// Whether the day needs human review before payroll export.
    pub approval_required: bool,
    /// Premium-pay hours owed for the day's violations.
    pub penalty_hours: Decimal,
    /// One earnings code per penalty occurrence.
    pub penalty_earnings_codes: Vec<EarningsCode>,
    /// Machine-readable reasons across all non-compliant periods.
    pub violation_reasons: Vec<ViolationReason>,
    /// Whether any waiver was applied for the day.
    pub waiver_applied: bool,
    /// Human-readable audit notes, one per waiver and per violation.
    pub notes: Vec<String>,
}

impl ComplianceResult {
    /// A fully-compliant result for a day that required no breaks.
    pub fn compliant(employee_id: impl Into<String>, date: NaiveDate) -> Self {
        Self {
            employee_id: employee_id.into(),
            date,
            meal_periods: Vec::new(),
            rest_periods: Vec::new(),
            meal_compliant: true,
            rest_compliant: true,
            approval_required: false,
            penalty_hours: Decimal::ZERO,
            penalty_earnings_codes: Vec::new(),
            violation_reasons: Vec::new(),
            waiver_applied: false,
            notes: Vec::new(),
        }
    }

    /// Whether any premium-pay penalty accrued.
    pub fn has_penalties(&self) -> bool {
        self.penalty_hours > Decimal::ZERO
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_earnings_code_serializes_screaming_snake() {
        assert_eq!(
            serde_json::to_string(&EarningsCode::MealViolation).unwrap(),
            "\"MEAL_VIOLATION\""
        );
        assert_eq!(
            serde_json::to_string(&EarningsCode::RestViolation).unwrap(),
            "\"REST_VIOLATION\""
        );
    }

    #[test]
    fn test_violation_reason_display() {
        assert_eq!(ViolationReason::Missing.to_string(), "missing");
        assert_eq!(ViolationReason::Late.to_string(), "late");
        assert_eq!(ViolationReason::Short.to_string(), "short");
    }

    #[test]
    fn test_compliant_result_has_no_penalties() {
        let result = ComplianceResult::compliant(
            "emp_001",
            NaiveDate::from_ymd_opt(2026, 3, 2).unwrap(),
        );

        assert!(result.meal_compliant);
        assert!(result.rest_compliant);
        assert!(!result.approval_required);
        assert!(!result.has_penalties());
        assert!(result.notes.is_empty());
    }

    #[test]
    fn test_has_penalties_when_hours_accrued() {
        let mut result = ComplianceResult::compliant(
            "emp_001",
            NaiveDate::from_ymd_opt(2026, 3, 2).unwrap(),
        );
        result.penalty_hours = Decimal::ONE;
        assert!(result.has_penalties());
    }

    #[test]
    fn test_break_period_serialization_round_trip() {
        let period = BreakPeriod {
            break_type: BreakType::Meal,
            required_minutes: 30,
            actual_minutes: None,
            is_taken: false,
            is_compliant: false,
            waiver_applied: false,
            violation_reason: Some(ViolationReason::Missing),
        };

        let json = serde_json::to_string(&period).unwrap();
        assert!(json.contains("\"break_type\":\"meal\""));
        assert!(json.contains("\"violation_reason\":\"missing\""));

        let deserialized: BreakPeriod = serde_json::from_str(&json).unwrap();
        assert_eq!(period, deserialized);
    }
}

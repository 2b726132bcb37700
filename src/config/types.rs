//! Configuration types for timecard processing.
//!
//! This module contains the per-company client rules applied by the hours
//! calculator and the compliance policy evaluated against each employee-day.
//! Every jurisdiction-dependent threshold is a named field rather than a
//! literal in the calculation code.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

/// Granularity a shift's raw minutes are snapped to.
///
/// Rounding is half-up to the nearest multiple and idempotent: applying a
/// rule to already-rounded minutes returns them unchanged.
///
/// # Example
///
/// ```
/// use timecard_engine::config::RoundingRule;
///
/// assert_eq!(RoundingRule::FifteenMinute.apply(503), 495);
/// assert_eq!(RoundingRule::FifteenMinute.apply(510), 510);
/// assert_eq!(RoundingRule::None.apply(503), 503);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RoundingRule {
    /// Raw minutes are kept unchanged.
    None,
    /// Snap to the nearest 5 minutes.
    #[serde(alias = "5min")]
    FiveMinute,
    /// Snap to the nearest 10 minutes.
    #[serde(alias = "10min")]
    TenMinute,
    /// Snap to the nearest 15 minutes.
    #[serde(alias = "15min")]
    FifteenMinute,
}

impl RoundingRule {
    /// The snapping granularity in minutes, or `None` for no rounding.
    pub fn granularity_minutes(&self) -> Option<i64> {
        match self {
            RoundingRule::None => None,
            RoundingRule::FiveMinute => Some(5),
            RoundingRule::TenMinute => Some(10),
            RoundingRule::FifteenMinute => Some(15),
        }
    }

    /// Snaps a non-negative minute count to this rule's granularity,
    /// rounding half up.
    pub fn apply(&self, minutes: i64) -> i64 {
        match self.granularity_minutes() {
            None => minutes,
            Some(granularity) => {
                let half = granularity / 2;
                ((minutes + half) / granularity) * granularity
            }
        }
    }
}

/// Per-company rules applied when deriving hour totals.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientRules {
    /// Granularity shift durations are rounded to.
    pub rounding: RoundingRule,
    /// Daily hours beyond which time counts as overtime.
    pub overtime_threshold_hours: Decimal,
    /// Minutes a meal period lasts under these rules.
    pub meal_duration_minutes: i64,
    /// Minutes a rest break lasts under these rules.
    pub rest_break_minutes: i64,
    /// Whether meal periods are required at all for this company.
    pub meals_required: bool,
    /// Whether rest breaks are required at all for this company.
    pub breaks_required: bool,
}

impl Default for ClientRules {
    fn default() -> Self {
        Self {
            rounding: RoundingRule::None,
            overtime_threshold_hours: Decimal::new(8, 0),
            meal_duration_minutes: 30,
            rest_break_minutes: 10,
            meals_required: true,
            breaks_required: true,
        }
    }
}

impl ClientRules {
    /// Validates the rules, rejecting misconfiguration before any
    /// per-unit computation runs.
    pub fn validate(&self) -> EngineResult<()> {
        if self.overtime_threshold_hours < Decimal::ZERO {
            return Err(EngineError::InvalidRules {
                field: "overtime_threshold_hours".to_string(),
                message: "cannot be negative".to_string(),
            });
        }
        if self.meal_duration_minutes <= 0 {
            return Err(EngineError::InvalidRules {
                field: "meal_duration_minutes".to_string(),
                message: "must be positive".to_string(),
            });
        }
        if self.rest_break_minutes <= 0 {
            return Err(EngineError::InvalidRules {
                field: "rest_break_minutes".to_string(),
                message: "must be positive".to_string(),
            });
        }
        Ok(())
    }
}

/// How rest-break compliance is judged when no punch evidence exists.
///
/// The lenient mode assumes required breaks were provided; the strict mode
/// requires punch evidence and therefore marks every required break missing
/// until rest punches are captured. Which default understates or overstates
/// violations is a jurisdictional policy decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RestBreakTracking {
    /// Assume required rest breaks were taken when no evidence exists.
    Lenient,
    /// Require punch evidence; no evidence means a violation.
    Strict,
}

/// Per-company/state meal and rest compliance policy.
///
/// The default policy is California-shaped: a first meal above five hours, a
/// second above ten, 30-minute meals with a 5-hour start deadline, a
/// 10-minute rest per 4 hours, premium pay on, auto-deduct off.
///
/// # Example
///
/// ```
/// use timecard_engine::config::CompliancePolicy;
/// use rust_decimal::Decimal;
///
/// let policy = CompliancePolicy::default();
/// assert_eq!(policy.meal_duration_minutes, 30);
/// assert_eq!(policy.first_meal_trigger_hours, Decimal::new(5, 0));
/// assert!(policy.premium_pay_enabled);
/// assert!(policy.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CompliancePolicy {
    /// Minimum minutes a meal period must last.
    pub meal_duration_minutes: i64,
    /// Hours into the shift by which a meal must start.
    ///
    /// Only enforceable once discrete meal punches are captured; reserved
    /// for the `late` violation reason.
    pub meal_deadline_hours: Decimal,
    /// Shift hours above which a first meal period is required.
    pub first_meal_trigger_hours: Decimal,
    /// Shift hours above which a second meal period is required.
    pub second_meal_trigger_hours: Decimal,
    /// Minutes each rest break must last.
    pub rest_break_minutes: i64,
    /// One rest break is required per this many hours worked.
    pub rest_break_frequency_hours: Decimal,
    /// Whether violations accrue premium pay.
    pub premium_pay_enabled: bool,
    /// Whether meal periods are credited without punch evidence.
    pub auto_deduct_meals: bool,
    /// Whether signed meal waivers are honored.
    pub honor_waivers: bool,
    /// How rest breaks are judged absent punch evidence.
    pub rest_break_tracking: RestBreakTracking,
    /// Premium hours owed per violation occurrence (flat, not prorated).
    pub premium_hours_per_violation: Decimal,
}

impl Default for CompliancePolicy {
    fn default() -> Self {
        Self {
            meal_duration_minutes: 30,
            meal_deadline_hours: Decimal::new(5, 0),
            first_meal_trigger_hours: Decimal::new(5, 0),
            second_meal_trigger_hours: Decimal::new(10, 0),
            rest_break_minutes: 10,
            rest_break_frequency_hours: Decimal::new(4, 0),
            premium_pay_enabled: true,
            auto_deduct_meals: false,
            honor_waivers: true,
            rest_break_tracking: RestBreakTracking::Lenient,
            premium_hours_per_violation: Decimal::ONE,
        }
    }
}

impl CompliancePolicy {
    /// Validates the policy, rejecting misconfiguration at load time; the
    /// per-unit computation assumes validated input.
    pub fn validate(&self) -> EngineResult<()> {
        if self.meal_duration_minutes <= 0 {
            return Err(EngineError::InvalidPolicy {
                field: "meal_duration_minutes".to_string(),
                message: "must be positive".to_string(),
            });
        }
        if self.meal_deadline_hours <= Decimal::ZERO {
            return Err(EngineError::InvalidPolicy {
                field: "meal_deadline_hours".to_string(),
                message: "must be positive".to_string(),
            });
        }
        if self.first_meal_trigger_hours <= Decimal::ZERO {
            return Err(EngineError::InvalidPolicy {
                field: "first_meal_trigger_hours".to_string(),
                message: "must be positive".to_string(),
            });
        }
        if self.second_meal_trigger_hours <= self.first_meal_trigger_hours {
            return Err(EngineError::InvalidPolicy {
                field: "second_meal_trigger_hours".to_string(),
                message: "must exceed first_meal_trigger_hours".to_string(),
            });
        }
        if self.rest_break_minutes <= 0 {
            return Err(EngineError::InvalidPolicy {
                field: "rest_break_minutes".to_string(),
                message: "must be positive".to_string(),
            });
        }
        if self.rest_break_frequency_hours <= Decimal::ZERO {
            return Err(EngineError::InvalidPolicy {
                field: "rest_break_frequency_hours".to_string(),
                message: "must be positive".to_string(),
            });
        }
        if self.premium_hours_per_violation < Decimal::ZERO {
            return Err(EngineError::InvalidPolicy {
                field: "premium_hours_per_violation".to_string(),
                message: "cannot be negative".to_string(),
            });
        }
        Ok(())
    }
}

//! Meal waiver model and waiver selection.
//!
//! A waiver is an employee's voluntary, time-bounded opt-out of a specific
//! meal-period requirement. Selection is a temporal range-containment query
//! over a small in-memory list.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Which meal requirement a waiver opts out of.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WaiverType {
    /// Waives only the first meal period of a shift.
    FirstMeal,
    /// Waives only the second meal period of a shift.
    SecondMeal,
    /// Waives every meal period.
    AllMeals,
}

/// Which meal slot of a day is being evaluated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MealSlot {
    /// The first meal period, triggered by the first-meal hours threshold.
    First,
    /// The second meal period, triggered by the second-meal hours threshold.
    Second,
}

impl WaiverType {
    /// Whether this waiver type applies to the given meal slot.
    pub fn covers(&self, slot: MealSlot) -> bool {
        match (self, slot) {
            (WaiverType::AllMeals, _) => true,
            (WaiverType::FirstMeal, MealSlot::First) => true,
            (WaiverType::SecondMeal, MealSlot::Second) => true,
            _ => false,
        }
    }
}

/// An employee's signed meal-period waiver.
///
/// # Example
///
/// ```
/// use timecard_engine::models::{MealWaiver, WaiverType};
/// use chrono::NaiveDate;
///
/// let waiver = MealWaiver {
///     employee_id: "emp_001".to_string(),
///     waiver_type: WaiverType::FirstMeal,
///     effective_date: NaiveDate::from_ymd_opt(2026, 1, 1).unwrap(),
///     expiry_date: None,
///     is_active: true,
/// };
/// assert!(waiver.covers_date(NaiveDate::from_ymd_opt(2026, 3, 2).unwrap()));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MealWaiver {
    /// The employee who signed the waiver.
    pub employee_id: String,
    /// Which meal requirement is waived.
    pub waiver_type: WaiverType,
    /// First date the waiver applies (inclusive).
    pub effective_date: NaiveDate,
    /// Last date the waiver applies (inclusive); open-ended when unset.
    #[serde(default)]
    pub expiry_date: Option<NaiveDate>,
    /// Whether the waiver is currently in force at all.
    pub is_active: bool,
}

impl MealWaiver {
    /// Whether the waiver's date range contains the given date.
    pub fn covers_date(&self, date: NaiveDate) -> bool {
        if date < self.effective_date {
            return false;
        }
        match self.expiry_date {
            Some(expiry) => date <= expiry,
            None => true,
        }
    }
}

/// Finds the active waiver for an employee, date, and meal slot.
///
/// Linear scan over the waiver list; waiver sets are small, so no index is
/// warranted. At most one waiver is active per employee/date/slot by
/// upstream guarantee; the first match wins.
///
/// # Example
///
/// ```
/// use timecard_engine::models::{MealSlot, MealWaiver, WaiverType, active_waiver};
/// use chrono::NaiveDate;
///
/// let waivers = vec![MealWaiver {
///     employee_id: "emp_001".to_string(),
///     waiver_type: WaiverType::AllMeals,
///     effective_date: NaiveDate::from_ymd_opt(2026, 1, 1).unwrap(),
///     expiry_date: None,
///     is_active: true,
/// }];
///
/// let date = NaiveDate::from_ymd_opt(2026, 3, 2).unwrap();
/// assert!(active_waiver(&waivers, "emp_001", date, MealSlot::First).is_some());
/// assert!(active_waiver(&waivers, "emp_002", date, MealSlot::First).is_none());
/// ```
pub fn active_waiver<'a>(
    waivers: &'a [MealWaiver],
    employee_id: &str,
    date: NaiveDate,
    slot: MealSlot,
) -> Option<&'a MealWaiver> {
    waivers.iter().find(|w| {
        w.is_active
            && w.employee_id == employee_id
            && w.waiver_type.covers(slot)
            && w.covers_date(date)
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn waiver(waiver_type: WaiverType, effective: &str, expiry: Option<&str>) -> MealWaiver {
        MealWaiver {
            employee_id: "emp_001".to_string(),
            waiver_type,
            effective_date: date(effective),
            expiry_date: expiry.map(date),
            is_active: true,
        }
    }

    #[test]
    fn test_first_meal_waiver_covers_first_slot_only() {
        let w = WaiverType::FirstMeal;
        assert!(w.covers(MealSlot::First));
        assert!(!w.covers(MealSlot::Second));
    }

    #[test]
    fn test_second_meal_waiver_covers_second_slot_only() {
        let w = WaiverType::SecondMeal;
        assert!(!w.covers(MealSlot::First));
        assert!(w.covers(MealSlot::Second));
    }

    #[test]
    fn test_all_meals_waiver_covers_both_slots() {
        assert!(WaiverType::AllMeals.covers(MealSlot::First));
        assert!(WaiverType::AllMeals.covers(MealSlot::Second));
    }

    #[test]
    fn test_covers_date_inclusive_boundaries() {
        let w = waiver(WaiverType::FirstMeal, "2026-03-01", Some("2026-03-31"));

        assert!(w.covers_date(date("2026-03-01")));
        assert!(w.covers_date(date("2026-03-31")));
        assert!(!w.covers_date(date("2026-02-28")));
        assert!(!w.covers_date(date("2026-04-01")));
    }

    #[test]
    fn test_covers_date_open_ended() {
        let w = waiver(WaiverType::FirstMeal, "2026-03-01", None);
        assert!(w.covers_date(date("2030-12-31")));
    }

    #[test]
    fn test_active_waiver_finds_match() {
        let waivers = vec![
            waiver(WaiverType::SecondMeal, "2026-01-01", None),
            waiver(WaiverType::FirstMeal, "2026-01-01", None),
        ];

        let found = active_waiver(&waivers, "emp_001", date("2026-03-02"), MealSlot::First);
        assert_eq!(found.map(|w| w.waiver_type), Some(WaiverType::FirstMeal));
    }

    #[test]
    fn test_active_waiver_ignores_inactive() {
        let mut w = waiver(WaiverType::AllMeals, "2026-01-01", None);
        w.is_active = false;
        let waivers = vec![w];

        assert!(active_waiver(&waivers, "emp_001", date("2026-03-02"), MealSlot::First).is_none());
    }

    #[test]
    fn test_active_waiver_ignores_other_employee() {
        let waivers = vec![waiver(WaiverType::AllMeals, "2026-01-01", None)];
        assert!(active_waiver(&waivers, "emp_002", date("2026-03-02"), MealSlot::First).is_none());
    }

    #[test]
    fn test_active_waiver_ignores_expired() {
        let waivers = vec![waiver(WaiverType::AllMeals, "2026-01-01", Some("2026-02-01"))];
        assert!(active_waiver(&waivers, "emp_001", date("2026-03-02"), MealSlot::First).is_none());
    }

    #[test]
    fn test_waiver_type_serialization() {
        assert_eq!(
            serde_json::to_string(&WaiverType::FirstMeal).unwrap(),
            "\"first_meal\""
        );
        assert_eq!(
            serde_json::to_string(&WaiverType::AllMeals).unwrap(),
            "\"all_meals\""
        );
    }

    #[test]
    fn test_waiver_deserialization_without_expiry() {
        let json = r#"{
            "employee_id": "emp_001",
            "waiver_type": "second_meal",
            "effective_date": "2026-01-01",
            "is_active": true
        }"#;

        let w: MealWaiver = serde_json::from_str(json).unwrap();
        assert_eq!(w.waiver_type, WaiverType::SecondMeal);
        assert!(w.expiry_date.is_none());
    }
}

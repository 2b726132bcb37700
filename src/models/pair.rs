//! Punch pair model.
//!
//! A punch pair is one clock-in matched with its corresponding clock-out,
//! or flagged incomplete when one half is missing. Pairs are derived by the
//! pairer; they are never persisted input.

use serde::{Deserialize, Serialize};

use super::punch::{PunchType, RawPunch};

/// Which half of an incomplete pair is missing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MissingPunch {
    /// The clock-in was never captured; a placeholder was synthesized.
    ClockIn,
    /// The clock-out was never captured (forgotten punch or open shift).
    ClockOut,
}

/// One clock-in matched with its clock-out, or flagged incomplete.
///
/// Incomplete pairs carry a duration of zero so they degrade gracefully in
/// hour totals while still surfacing as flags on the timecard.
///
/// # Example
///
/// ```
/// use timecard_engine::models::{PunchPair, PunchType, RawPunch};
/// use chrono::{DateTime, Utc};
///
/// let clock_in = RawPunch {
///     employee_id: "emp_001".to_string(),
///     punch_type: PunchType::ClockIn,
///     timestamp: "2026-03-02T17:00:00Z".parse::<DateTime<Utc>>().unwrap(),
///     device_id: None,
///     job_code: None,
///     location_id: None,
/// };
/// let clock_out = RawPunch {
///     punch_type: PunchType::ClockOut,
///     timestamp: "2026-03-03T01:00:00Z".parse::<DateTime<Utc>>().unwrap(),
///     ..clock_in.clone()
/// };
///
/// let pair = PunchPair::complete(clock_in, clock_out);
/// assert!(pair.is_complete);
/// assert_eq!(pair.shift_duration_minutes, 480);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PunchPair {
    /// The clock-in punch. Synthesized when the real one is missing.
    pub clock_in: RawPunch,
    /// The matching clock-out punch, if one was captured.
    pub clock_out: Option<RawPunch>,
    /// Whether both halves of the pair were actually captured.
    pub is_complete: bool,
    /// Whole minutes between clock-in and clock-out; zero when incomplete.
    pub shift_duration_minutes: i64,
    /// Which half is missing, for incomplete pairs.
    #[serde(default)]
    pub missing: Option<MissingPunch>,
}

impl PunchPair {
    /// Builds a complete pair from a captured clock-in and clock-out.
    pub fn complete(clock_in: RawPunch, clock_out: RawPunch) -> Self {
        let duration = (clock_out.timestamp - clock_in.timestamp).num_minutes();
        Self {
            clock_in,
            clock_out: Some(clock_out),
            is_complete: true,
            shift_duration_minutes: duration,
            missing: None,
        }
    }

    /// Builds an incomplete pair for a clock-in with no matching clock-out.
    pub fn missing_clock_out(clock_in: RawPunch) -> Self {
        Self {
            clock_in,
            clock_out: None,
            is_complete: false,
            shift_duration_minutes: 0,
            missing: Some(MissingPunch::ClockOut),
        }
    }

    /// Builds an incomplete pair for a clock-out with no preceding clock-in.
    ///
    /// A placeholder clock-in sharing the clock-out's timestamp is
    /// synthesized so the pair still has a start.
    pub fn missing_clock_in(clock_out: RawPunch) -> Self {
        let placeholder = RawPunch {
            punch_type: PunchType::ClockIn,
            ..clock_out.clone()
        };
        Self {
            clock_in: placeholder,
            clock_out: Some(clock_out),
            is_complete: false,
            shift_duration_minutes: 0,
            missing: Some(MissingPunch::ClockIn),
        }
    }

    /// Whether this pair's clock-out lands after the next pair's clock-in.
    ///
    /// Overlap is a structural violation detected by the aggregator, never
    /// silently merged away.
    pub fn overlaps(&self, next: &PunchPair) -> bool {
        match &self.clock_out {
            Some(out) => out.timestamp > next.clock_in.timestamp,
            None => false,
        }
    }
}

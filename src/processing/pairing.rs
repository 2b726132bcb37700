//! Punch pairing state machine.
//!
//! Turns one employee-day's ordered punch stream into clock-in/clock-out
//! pairs. The pairer is an explicit two-state machine (idle, or holding a
//! pending clock-in) with a transition per punch type, so the "two
//! clock-ins in a row" and "clock-out with no clock-in" edge cases are
//! exhaustively testable.

use crate::models::{PunchPair, PunchType, RawPunch};

/// The pairer's state between punches.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PairerState {
    /// No clock-in is waiting for its clock-out.
    Idle,
    /// A clock-in has been seen and awaits a matching clock-out.
    Pending(RawPunch),
}

impl PairerState {
    /// Consumes one punch, returning the next state and any pair the
    /// transition closed.
    fn transition(self, punch: &RawPunch) -> (PairerState, Option<PunchPair>) {
        match (self, punch.punch_type) {
            (PairerState::Idle, PunchType::ClockIn) => {
                (PairerState::Pending(punch.clone()), None)
            }
            // Two clock-ins with no intervening clock-out: the earlier one
            // is a forgotten clock-out
            (PairerState::Pending(pending), PunchType::ClockIn) => (
                PairerState::Pending(punch.clone()),
                Some(PunchPair::missing_clock_out(pending)),
            ),
            (PairerState::Pending(pending), PunchType::ClockOut) => (
                PairerState::Idle,
                Some(PunchPair::complete(pending, punch.clone())),
            ),
            // Clock-out with no clock-in: a forgotten clock-in
            (PairerState::Idle, PunchType::ClockOut) => (
                PairerState::Idle,
                Some(PunchPair::missing_clock_in(punch.clone())),
            ),
        }
    }

    /// Ends the stream, closing any still-pending clock-in as incomplete.
    fn finish(self) -> Option<PunchPair> {
        match self {
            PairerState::Idle => None,
            PairerState::Pending(pending) => Some(PunchPair::missing_clock_out(pending)),
        }
    }
}

/// Pairs an employee-day's punches, oldest first.
///
/// The input must already be validated, deduplicated, and sorted ascending
/// by timestamp (the grouper guarantees this). Overlapping pairs are left
/// for the aggregator to flag, never merged here.
///
/// # Example
///
/// ```
/// use timecard_engine::models::{PunchType, RawPunch};
/// use timecard_engine::processing::pair_punches;
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
///
/// let pairs = pair_punches(&[
///     punch(PunchType::ClockIn, "2026-03-02T09:00:00Z"),
///     punch(PunchType::ClockOut, "2026-03-02T17:30:00Z"),
/// ]);
/// assert_eq!(pairs.len(), 1);
/// assert!(pairs[0].is_complete);
/// assert_eq!(pairs[0].shift_duration_minutes, 510);
/// ```
pub fn pair_punches(punches: &[RawPunch]) -> Vec<PunchPair> {
    let mut pairs = Vec::new();
    let mut state = PairerState::Idle;

    for punch in punches {
        let (next_state, closed) = state.transition(punch);
        if let Some(pair) = closed {
            pairs.push(pair);
        }
        state = next_state;
    }

    if let Some(pair) = state.finish() {
        pairs.push(pair);
    }

    pairs
}

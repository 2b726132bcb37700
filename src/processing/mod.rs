//! Processing pipeline for the Timecard Processing & Compliance Engine.
//!
//! This module contains the forward-flowing pipeline stages: punch
//! validation and grouping, pairing, hours calculation, schedule variance,
//! meal/rest compliance evaluation, and the aggregator that assembles one
//! daily timecard per employee per day.

mod aggregator;
mod compliance;
mod grouping;
mod hours;
mod pairing;
mod variance;

pub use aggregator::{BatchInput, BatchOutcome, assemble_timecard, process_batch};
pub use compliance::{apply_compliance, evaluate_compliance};
pub use grouping::{GroupedPunches, group_punches};
pub use hours::{HoursResult, calculate_hours};
pub use pairing::{PairerState, pair_punches};
pub use variance::calculate_variance;

use crate::error::EngineError;

/// A per-employee failure collected during a batch run.
///
/// Batch processing has partial-failure semantics: one employee's malformed
/// data never aborts the run, it becomes one of these alongside the other
/// employees' successful timecards.
#[derive(Debug)]
pub struct ProcessingError {
    /// The employee whose data could not be processed.
    pub employee_id: String,
    /// What went wrong.
    pub error: EngineError,
}

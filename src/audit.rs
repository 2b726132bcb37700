//! Structured audit events and the injected audit sink.
//!
//! The engine never writes to a fixed output stream. Audit-relevant moments
//! (a duplicate punch dropped, an employee skipped, a unit processed, a
//! violation found, a penalty applied) are emitted as structured events to
//! an injected [`AuditSink`], so hosts can route them anywhere. The default
//! sink logs through the `tracing` crate.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::Serialize;
use std::sync::Mutex;
use tracing::{info, warn};

use crate::models::{BreakType, EarningsCode, PunchType, ViolationReason};

/// A structured audit event emitted during batch processing.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum AuditEvent {
    /// An exact-duplicate punch was dropped before pairing.
    DuplicatePunchDropped {
        /// The employee the duplicate belonged to.
        employee_id: String,
        /// The duplicate's punch type.
        punch_type: PunchType,
        /// The duplicate's capture time.
        timestamp: DateTime<Utc>,
    },
    /// An employee could not be processed and was skipped.
    EmployeeSkipped {
        /// The employee that was skipped.
        employee_id: String,
        /// Why the employee was unprocessable.
        reason: String,
    },
    /// One (employee, date) unit finished processing.
    UnitProcessed {
        /// The employee processed.
        employee_id: String,
        /// The local calendar day processed.
        date: NaiveDate,
        /// Total hours on the finished timecard.
        total_hours: Decimal,
        /// Number of flags raised on the timecard.
        flag_count: usize,
    },
    /// A break period failed compliance.
    ViolationFound {
        /// The employee with the violation.
        employee_id: String,
        /// The day the violation occurred.
        date: NaiveDate,
        /// Whether a meal or rest break was violated.
        break_type: BreakType,
        /// Why the break was non-compliant.
        reason: ViolationReason,
    },
    /// Premium pay was applied for a violation.
    PenaltyApplied {
        /// The employee owed the premium.
        employee_id: String,
        /// The day the premium accrued for.
        date: NaiveDate,
        /// Penalty hours added.
        hours: Decimal,
        /// The earnings code for the penalty.
        code: EarningsCode,
    },
}

/// Receives structured audit events from the engine.
///
/// Implementations must be shareable across the batch worker pool.
pub trait AuditSink: Send + Sync {
    /// Records one audit event.
    fn record(&self, event: AuditEvent);
}

/// Audit sink that logs every event through `tracing`.
///
/// Violations and skipped employees log at WARN; the rest at INFO.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl AuditSink for TracingSink {
    fn record(&self, event: AuditEvent) {
        match &event {
            AuditEvent::DuplicatePunchDropped {
                employee_id,
                punch_type,
                timestamp,
            } => info!(
                employee_id = %employee_id,
                punch_type = %punch_type,
                timestamp = %timestamp,
                "Duplicate punch dropped"
            ),
            AuditEvent::EmployeeSkipped {
                employee_id,
                reason,
            } => warn!(
                employee_id = %employee_id,
                reason = %reason,
                "Employee skipped"
            ),
            AuditEvent::UnitProcessed {
                employee_id,
                date,
                total_hours,
                flag_count,
            } => info!(
                employee_id = %employee_id,
                date = %date,
                total_hours = %total_hours,
                flag_count = flag_count,
                "Unit processed"
            ),
            AuditEvent::ViolationFound {
                employee_id,
                date,
                break_type,
                reason,
            } => warn!(
                employee_id = %employee_id,
                date = %date,
                break_type = ?break_type,
                reason = %reason,
                "Compliance violation found"
            ),
            AuditEvent::PenaltyApplied {
                employee_id,
                date,
                hours,
                code,
            } => info!(
                employee_id = %employee_id,
                date = %date,
                hours = %hours,
                code = %code,
                "Premium pay penalty applied"
            ),
        }
    }
}

/// Audit sink that discards every event.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullSink;

impl AuditSink for NullSink {
    fn record(&self, _event: AuditEvent) {}
}

/// Audit sink that collects events in memory.
///
/// Intended for tests and hosts that post-process the event stream.
#[derive(Debug, Default)]
pub struct CollectingSink {
    events: Mutex<Vec<AuditEvent>>,
}

impl CollectingSink {
    /// Creates an empty collecting sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a copy of every event recorded so far.
    pub fn events(&self) -> Vec<AuditEvent> {
        self.events.lock().map(|e| e.clone()).unwrap_or_default()
    }
}

impl AuditSink for CollectingSink {
    fn record(&self, event: AuditEvent) {
        if let Ok(mut events) = self.events.lock() {
            events.push(event);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collecting_sink_accumulates_events() {
        let sink = CollectingSink::new();
        sink.record(AuditEvent::EmployeeSkipped {
            employee_id: "emp_001".to_string(),
            reason: "no settings".to_string(),
        });
        sink.record(AuditEvent::UnitProcessed {
            employee_id: "emp_002".to_string(),
            date: NaiveDate::from_ymd_opt(2026, 3, 2).unwrap(),
            total_hours: Decimal::new(85, 1),
            flag_count: 0,
        });

        let events = sink.events();
        assert_eq!(events.len(), 2);
        assert!(matches!(events[0], AuditEvent::EmployeeSkipped { .. }));
    }

    #[test]
    fn test_event_serializes_with_tag() {
        let event = AuditEvent::PenaltyApplied {
            employee_id: "emp_001".to_string(),
            date: NaiveDate::from_ymd_opt(2026, 3, 2).unwrap(),
            hours: Decimal::ONE,
            code: EarningsCode::MealViolation,
        };

        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["event"], "penalty_applied");
        assert_eq!(json["code"], "MEAL_VIOLATION");
    }

    #[test]
    fn test_sinks_are_object_safe() {
        fn takes_sink(_sink: &dyn AuditSink) {}
        takes_sink(&TracingSink);
        takes_sink(&NullSink);
        takes_sink(&CollectingSink::new());
    }
}

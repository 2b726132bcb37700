//! Configuration for the Timecard Processing & Compliance Engine.
//!
//! Client rules and compliance policy are strongly-typed, validated at load
//! time, and treated as immutable for the duration of a batch run.

mod loader;
mod types;

pub use loader::ConfigLoader;
pub use types::{ClientRules, CompliancePolicy, RestBreakTracking, RoundingRule};

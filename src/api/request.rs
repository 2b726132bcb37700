//! Request types for the Timecard Processing & Compliance Engine API.
//!
//! This module defines the JSON request structure for the `/process`
//! endpoint.

use serde::{Deserialize, Serialize};

use crate::config::{ClientRules, CompliancePolicy};
use crate::models::{EmployeeSettings, MealWaiver, RawPunch, ScheduledShift};
use crate::processing::BatchInput;

/// Request body for the `/process` endpoint.
///
/// Carries one batch of punches plus the collaborator data needed to
/// interpret them. Rules and policy may be supplied per request; when
/// absent, the server's loaded defaults apply.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProcessRequest {
    /// Raw punches for the batch window, any order.
    pub punches: Vec<RawPunch>,
    /// Settings for the employees appearing in the punch data.
    pub employee_settings: Vec<EmployeeSettings>,
    /// Scheduled shifts for variance reporting.
    #[serde(default)]
    pub schedules: Vec<ScheduledShift>,
    /// Meal waivers in force during the batch window.
    #[serde(default)]
    pub waivers: Vec<MealWaiver>,
    /// Per-request client rules override.
    #[serde(default)]
    pub client_rules: Option<ClientRules>,
    /// Per-request compliance policy override.
    #[serde(default)]
    pub compliance_policy: Option<CompliancePolicy>,
}

impl From<ProcessRequest> for BatchInput {
    fn from(req: ProcessRequest) -> Self {
        BatchInput {
            punches: req.punches,
            employee_settings: req.employee_settings,
            schedules: req.schedules,
            waivers: req.waivers,
        }
    }
}

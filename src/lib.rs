//! Timecard Processing & Compliance Engine
//!
//! This crate converts raw, possibly malformed clock-in/clock-out events into
//! structured, rule-compliant daily timecards, and layers meal/rest-break
//! compliance analysis and premium-pay penalty calculation on top.

#![warn(missing_docs)]

pub mod api;
pub mod audit;
pub mod config;
pub mod error;
pub mod models;
pub mod processing;

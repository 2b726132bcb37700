//! Error types for the Timecard Processing & Compliance Engine.
//!
//! This module provides strongly-typed errors using the `thiserror` crate
//! for all error conditions that can occur during timecard processing.

use thiserror::Error;

/// The main error type for the Timecard Processing & Compliance Engine.
///
/// All operations in the engine return this error type, making it easy
/// to handle errors consistently throughout the application.
///
/// # Example
///
/// ```
/// use timecard_engine::error::EngineError;
///
/// let error = EngineError::ConfigNotFound {
///     path: "/missing/file.yaml".to_string(),
/// };
/// assert_eq!(error.to_string(), "Configuration file not found: /missing/file.yaml");
/// ```
#[derive(Debug, Error)]
pub enum EngineError {
    /// Configuration file was not found at the specified path.
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Configuration file could not be parsed.
    #[error("Failed to parse configuration file '{path}': {message}")]
    ConfigParseError {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },

    /// A compliance policy field failed validation at load time.
    #[error("Invalid compliance policy field '{field}': {message}")]
    InvalidPolicy {
        /// The policy field that was invalid.
        field: String,
        /// A description of what made the field invalid.
        message: String,
    },

    /// A client rules field failed validation at load time.
    #[error("Invalid client rules field '{field}': {message}")]
    InvalidRules {
        /// The rules field that was invalid.
        field: String,
        /// A description of what made the field invalid.
        message: String,
    },

    /// Punches exist for an employee with no settings record.
    ///
    /// The employee cannot be processed because their local calendar day
    /// cannot be determined without a timezone offset.
    #[error("No employee settings found for employee '{employee_id}'")]
    MissingEmployeeSettings {
        /// The employee whose settings record is absent.
        employee_id: String,
    },

    /// A general calculation error occurred.
    #[error("Calculation error: {message}")]
    CalculationError {
        /// A description of the calculation error.
        message: String,
    },
}

/// A type alias for Results that return EngineError.
pub type EngineResult<T> = Result<T, EngineError>;

//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading client rules
//! and compliance policy from YAML files.

use std::fs;
use std::path::Path;

use crate::error::{EngineError, EngineResult};

use super::types::{ClientRules, CompliancePolicy};

/// Loads and provides access to client rules and compliance policy.
///
/// The `ConfigLoader` reads YAML configuration files from a directory. A
/// missing file falls back to the documented defaults; a file that exists
/// but fails to parse or validate is an error.
///
/// # Directory Structure
///
/// ```text
/// config/default/
/// ├── client_rules.yaml       # Rounding and overtime rules
/// └── compliance_policy.yaml  # Meal/rest thresholds and premium pay
/// ```
///
/// # Example
///
/// ```no_run
/// use timecard_engine::config::ConfigLoader;
///
/// let loader = ConfigLoader::load("./config/default").unwrap();
/// println!("rounding: {:?}", loader.rules().rounding);
/// println!("premium pay: {}", loader.policy().premium_pay_enabled);
/// ```
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    rules: ClientRules,
    policy: CompliancePolicy,
}

impl ConfigLoader {
    /// Loads configuration from the specified directory.
    ///
    /// # Arguments
    ///
    /// * `path` - Path to the configuration directory (e.g., "./config/default")
    ///
    /// # Returns
    ///
    /// Returns a `ConfigLoader` on success, or an error if a present file
    /// contains invalid YAML or fails validation. Absent files fall back to
    /// defaults, so an empty directory yields the default configuration.
    pub fn load<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let path = path.as_ref();

        let rules: ClientRules = Self::load_yaml_or_default(&path.join("client_rules.yaml"))?;
        let policy: CompliancePolicy =
            Self::load_yaml_or_default(&path.join("compliance_policy.yaml"))?;

        rules.validate()?;
        policy.validate()?;

        Ok(Self { rules, policy })
    }

    /// Builds a loader from already-constructed configuration, validating it.
    ///
    /// Useful for hosts that source configuration from somewhere other than
    /// the filesystem.
    pub fn from_parts(rules: ClientRules, policy: CompliancePolicy) -> EngineResult<Self> {
        rules.validate()?;
        policy.validate()?;
        Ok(Self { rules, policy })
    }

    /// Returns the loaded client rules.
    pub fn rules(&self) -> &ClientRules {
        &self.rules
    }

    /// Returns the loaded compliance policy.
    pub fn policy(&self) -> &CompliancePolicy {
        &self.policy
    }

    /// Loads and parses a YAML file, defaulting when the file is absent.
    fn load_yaml_or_default<T>(path: &Path) -> EngineResult<T>
    where
        T: serde::de::DeserializeOwned + Default,
    {
        if !path.exists() {
            return Ok(T::default());
        }

        let path_str = path.display().to_string();
        let content = fs::read_to_string(path).map_err(|_| EngineError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        serde_yaml::from_str(&content).map_err(|e| EngineError::ConfigParseError {
            path: path_str,
            message: e.to_string(),
        })
    }
}

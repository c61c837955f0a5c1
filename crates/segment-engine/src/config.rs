//! Engine configuration with JSON persistence.

use anyhow::{Result, bail};
use serde::{Deserialize, Serialize};

use segment_analysis::AnalysisOptions;
use segment_calibration::CalibrationOptions;
use segment_core::ValidatorOptions;

/// Current configuration schema version.
pub const CONFIG_SCHEMA_VERSION: u32 = 1;

/// All tunables of a [`SegmentEngine`](crate::SegmentEngine).
///
/// `validator` gates analysis frames and `validate_pose`; the reference
/// pose given to `calibrate` is checked with `calibration.validator`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub schema_version: u32,
    pub validator: ValidatorOptions,
    pub calibration: CalibrationOptions,
    pub analysis: AnalysisOptions,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            schema_version: CONFIG_SCHEMA_VERSION,
            validator: ValidatorOptions::default(),
            calibration: CalibrationOptions::default(),
            analysis: AnalysisOptions::default(),
        }
    }
}

impl EngineConfig {
    /// Validate every section.
    ///
    /// # Errors
    ///
    /// Returns the first failing section's error, prefixed with its name.
    pub fn validate(&self) -> Result<()> {
        self.validator
            .validate()
            .map_err(|e| e.context("validator"))?;
        self.calibration
            .validate()
            .map_err(|e| e.context("calibration"))?;
        self.analysis
            .validate()
            .map_err(|e| e.context("analysis"))?;
        Ok(())
    }

    /// Serialize to pretty JSON.
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).map_err(Into::into)
    }

    /// Parse and validate a JSON configuration.
    ///
    /// Missing fields take their defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if parsing fails, the schema version is newer than
    /// supported, or validation fails.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        if config.schema_version > CONFIG_SCHEMA_VERSION {
            bail!(
                "config schema version {} is newer than supported version {}",
                config.schema_version,
                CONFIG_SCHEMA_VERSION
            );
        }
        config.validate()?;
        Ok(config)
    }
}

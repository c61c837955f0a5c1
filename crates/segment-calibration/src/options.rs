//! Configuration for calibration and calibration validation.

use anyhow::{Result, ensure};
use serde::{Deserialize, Serialize};
use segment_core::{Real, ValidatorOptions};

/// Calibration thresholds.
///
/// The defaults put the canonical shoulder span at 40 units, so a subject
/// measured at 40 units calibrates to a scale factor of exactly 1.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CalibrationOptions {
    /// Validator applied to the reference pose.
    pub validator: ValidatorOptions,
    /// Shoulder span of the canonical body, in normalized units.
    pub reference_shoulder_width: Real,
    /// Measured lengths at or below this are treated as degenerate.
    pub min_reference_length: Real,
    /// Smallest plausible scale factor.
    pub min_scale: Real,
    /// Largest plausible scale factor.
    pub max_scale: Real,
    /// Minimum acceptable calibration quality.
    pub min_quality: Real,
    /// Largest plausible magnitude of the center offset.
    pub max_center_offset: Real,
}

impl Default for CalibrationOptions {
    fn default() -> Self {
        Self {
            validator: ValidatorOptions::default(),
            reference_shoulder_width: 40.0,
            min_reference_length: 1e-6,
            min_scale: 0.01,
            max_scale: 100.0,
            min_quality: 0.6,
            max_center_offset: 10_000.0,
        }
    }
}

impl CalibrationOptions {
    /// Check that thresholds are internally consistent.
    ///
    /// # Errors
    ///
    /// Returns an error describing the first offending field.
    pub fn validate(&self) -> Result<()> {
        self.validator.validate()?;
        ensure!(
            self.reference_shoulder_width > 0.0,
            "reference_shoulder_width must be positive"
        );
        ensure!(
            self.min_reference_length >= 0.0,
            "min_reference_length must be non-negative"
        );
        ensure!(
            self.min_scale > 0.0 && self.min_scale < self.max_scale,
            "scale range must satisfy 0 < min_scale < max_scale, got [{}, {}]",
            self.min_scale,
            self.max_scale
        );
        ensure!(
            (0.0..=1.0).contains(&self.min_quality),
            "min_quality must be in [0, 1], got {}",
            self.min_quality
        );
        ensure!(
            self.max_center_offset > 0.0,
            "max_center_offset must be positive"
        );
        Ok(())
    }

    #[inline]
    pub(crate) fn scale_in_range(&self, scale: Real) -> bool {
        scale.is_finite() && scale >= self.min_scale && scale <= self.max_scale
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        assert!(CalibrationOptions::default().validate().is_ok());
    }

    #[test]
    fn inverted_scale_range_is_rejected() {
        let opts = CalibrationOptions {
            min_scale: 5.0,
            max_scale: 2.0,
            ..Default::default()
        };
        assert!(opts.validate().is_err());
    }

    #[test]
    fn scale_range_is_inclusive() {
        let opts = CalibrationOptions::default();
        assert!(opts.scale_in_range(0.01));
        assert!(opts.scale_in_range(100.0));
        assert!(!opts.scale_in_range(100.5));
        assert!(!opts.scale_in_range(Real::NAN));
    }
}

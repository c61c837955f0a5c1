use anyhow::{Result, ensure};
use serde::{Deserialize, Serialize};
use segment_core::Real;

/// Tuning for progress, similarity and completion.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisOptions {
    /// Joints below this confidence get zero weight.
    pub confidence_floor: Real,
    /// Mean distance (canonical units) at which similarity drops to 0.5.
    pub similarity_scale: Real,
    /// Progress at or above this value marks the segment completed.
    pub completion_threshold: Real,
}

impl Default for AnalysisOptions {
    fn default() -> Self {
        Self {
            confidence_floor: 0.1,
            similarity_scale: 10.0,
            completion_threshold: 0.95,
        }
    }
}

impl AnalysisOptions {
    /// Check that thresholds are usable.
    pub fn validate(&self) -> Result<()> {
        ensure!(
            (0.0..=1.0).contains(&self.confidence_floor),
            "confidence_floor must be in [0, 1], got {}",
            self.confidence_floor
        );
        ensure!(
            self.similarity_scale.is_finite() && self.similarity_scale > 0.0,
            "similarity_scale must be positive, got {}",
            self.similarity_scale
        );
        ensure!(
            self.completion_threshold > 0.0 && self.completion_threshold <= 1.0,
            "completion_threshold must be in (0, 1], got {}",
            self.completion_threshold
        );
        Ok(())
    }

    /// Weight of a joint with confidence `c`.
    #[inline]
    pub(crate) fn weight(&self, c: Real) -> Real {
        if c.is_finite() && c >= self.confidence_floor {
            c
        } else {
            0.0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_validate() {
        assert!(AnalysisOptions::default().validate().is_ok());
    }

    #[test]
    fn floor_zeroes_weights() {
        let opts = AnalysisOptions::default();
        assert_eq!(opts.weight(0.05), 0.0);
        assert_eq!(opts.weight(0.1), 0.1);
        assert_eq!(opts.weight(Real::NAN), 0.0);
    }

    #[test]
    fn zero_threshold_is_rejected() {
        let opts = AnalysisOptions {
            completion_threshold: 0.0,
            ..Default::default()
        };
        assert!(opts.validate().is_err());
    }
}

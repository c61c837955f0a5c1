//! Configuration options for pose validation.

use serde::{Deserialize, Serialize};

use crate::Real;

/// Thresholds used by [`PoseValidator`](crate::PoseValidator).
///
/// # Example
///
/// ```
/// use segment_core::ValidatorOptions;
///
/// // Accept lower-confidence detections, keep everything else.
/// let opts = ValidatorOptions {
///     min_confidence: 0.3,
///     ..Default::default()
/// };
/// assert_eq!(opts.min_essential_joints, 3);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ValidatorOptions {
    /// Confidence a joint needs to count as usable.
    pub min_confidence: Real,
    /// Minimum number of usable joints (default: strict majority of 13).
    pub min_usable_joints: usize,
    /// Minimum number of usable shoulders/hips (out of 4).
    pub min_essential_joints: usize,
    /// Largest accepted absolute coordinate value.
    pub max_abs_coordinate: Real,
    /// A pose whose joints all lie within this distance of the first joint
    /// carries no shape information and is rejected.
    pub min_spread: Real,
}

impl Default for ValidatorOptions {
    fn default() -> Self {
        Self {
            min_confidence: 0.5,
            min_usable_joints: 7,
            min_essential_joints: 3,
            max_abs_coordinate: 10_000.0,
            min_spread: 1e-6,
        }
    }
}

impl ValidatorOptions {
    /// Check that thresholds are internally consistent.
    ///
    /// # Errors
    ///
    /// Returns an error describing the first offending field.
    pub fn validate(&self) -> anyhow::Result<()> {
        anyhow::ensure!(
            (0.0..=1.0).contains(&self.min_confidence),
            "min_confidence must be in [0, 1], got {}",
            self.min_confidence
        );
        anyhow::ensure!(
            self.min_usable_joints <= crate::JOINT_COUNT,
            "min_usable_joints must be <= {}, got {}",
            crate::JOINT_COUNT,
            self.min_usable_joints
        );
        anyhow::ensure!(
            self.min_essential_joints <= 4,
            "min_essential_joints must be <= 4, got {}",
            self.min_essential_joints
        );
        anyhow::ensure!(
            self.max_abs_coordinate > 0.0,
            "max_abs_coordinate must be positive"
        );
        anyhow::ensure!(self.min_spread >= 0.0, "min_spread must be non-negative");
        Ok(())
    }
}

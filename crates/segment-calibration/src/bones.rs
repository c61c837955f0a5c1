//! Bone-length measurements taken from a reference pose.

use serde::{Deserialize, Serialize};
use segment_core::{BONES, Bone, Pose, Real, distance};

/// Length of one bone of the reference pose.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct BoneLength {
    /// Length in raw input units.
    pub raw: Real,
    /// Length after applying the calibration scale factor.
    pub normalized: Real,
    /// Both endpoints were confidently detected and the length is positive.
    pub valid: bool,
}

/// One [`BoneLength`] per entry of [`BONES`], in the same order.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct BoneLengthTable {
    pub entries: [BoneLength; BONES.len()],
}

impl BoneLengthTable {
    /// Measure every bone of `pose`.
    ///
    /// A bone is valid when both endpoints reach `min_confidence` and the
    /// measured length exceeds `min_length`.
    pub fn measure(pose: &Pose, scale: Real, min_confidence: Real, min_length: Real) -> Self {
        let entries = std::array::from_fn(|i| {
            let bone = &BONES[i];
            let raw = distance(pose.joint(bone.from), pose.joint(bone.to));
            let confident = pose.confidence_of(bone.from) >= min_confidence
                && pose.confidence_of(bone.to) >= min_confidence;
            BoneLength {
                raw,
                normalized: raw * scale,
                valid: confident && raw.is_finite() && raw > min_length,
            }
        });
        Self { entries }
    }

    /// Look up a bone by its name, e.g. `"left_thigh"`.
    pub fn get(&self, name: &str) -> Option<&BoneLength> {
        BONES
            .iter()
            .position(|b| b.name == name)
            .map(|i| &self.entries[i])
    }

    /// Iterate bones paired with their measurements.
    pub fn iter(&self) -> impl Iterator<Item = (Bone, &BoneLength)> + '_ {
        self.entries.iter().enumerate().map(|(i, len)| (BONES[i], len))
    }

    /// Number of valid measurements.
    pub fn valid_count(&self) -> usize {
        self.entries.iter().filter(|b| b.valid).count()
    }

    /// Left/right agreement in `[0, 1]`.
    ///
    /// Mean of `min / max` over every lateral pair where both sides are valid.
    /// `1.0` when no pair can be compared.
    pub fn symmetry(&self) -> Real {
        let mut sum = 0.0;
        let mut n = 0usize;
        for (i, bone) in BONES.iter().enumerate() {
            let Some(mirror) = bone.mirror() else {
                continue;
            };
            let Some(k) = BONES.iter().position(|b| *b == mirror) else {
                continue;
            };
            if k <= i {
                continue;
            }
            let (a, b) = (&self.entries[i], &self.entries[k]);
            if !(a.valid && b.valid) {
                continue;
            }
            let (lo, hi) = (a.raw.min(b.raw), a.raw.max(b.raw));
            sum += lo / hi;
            n += 1;
        }
        if n == 0 { 1.0 } else { sum / n as Real }
    }
}

//! Closed-form body calibration for `exercise-segment`.
//!
//! A calibration maps a subject's raw tracked geometry into a canonical frame:
//!
//! ```text
//! normalized = (raw - center_offset) * scale_factor
//! ```
//!
//! It is derived once from a reference pose (the subject standing naturally)
//! and reused for every later frame until the subject recalibrates.
//!
//! - [`calibrate`] measures the shoulder span, the torso center and the bone
//!   lengths, and scores the result.
//! - [`normalize`] applies a calibration to any pose.
//! - [`validate_calibration`] checks a (possibly caller-supplied) calibration
//!   for plausibility.
//!
//! # Example
//!
//! ```
//! use segment_calibration::{CalibrationOptions, calibrate, normalize, validate_calibration};
//! use segment_core::synthetic;
//!
//! let opts = CalibrationOptions::default();
//! let calib = calibrate(&synthetic::sample_pose(1), &opts).unwrap();
//! assert!(validate_calibration(&calib, &opts));
//!
//! let normalized = normalize(&synthetic::squat_end_pose(2), &calib);
//! assert_eq!(normalized.timestamp, 2);
//! ```

mod bones;
mod calibration;
mod options;

pub use bones::{BoneLength, BoneLengthTable};
pub use calibration::{Calibration, CalibrationError, calibrate, normalize, validate_calibration};
pub use options::CalibrationOptions;

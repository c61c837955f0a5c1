//! Stateful façade over calibration and segment analysis.
//!
//! [`SegmentEngine`] owns one calibration, one active segment and the frame
//! analyzer, and exposes them through the [`SegmentApi`] trait. Failures are
//! returned as [`SegmentApiError`] values carrying a stable [`ErrorCode`].
//!
//! ```no_run
//! use segment_engine::{SegmentApi, SegmentEngine};
//! use segment_core::synthetic::{sample_pose, squat_end_pose};
//! # fn main() -> anyhow::Result<()> {
//!
//! let mut engine = SegmentEngine::new();
//! engine.initialize()?;
//! let calib = engine.calibrate(&sample_pose(0))?;
//! engine.create_segment(&sample_pose(0), &squat_end_pose(0), &calib, &[7, 8, 9, 10])?;
//!
//! let out = engine.analyze(&squat_end_pose(16).into())?;
//! println!("progress {:.2}, similarity {:.2}", out.progress, out.similarity);
//! # Ok(())
//! # }
//! ```

mod api;
mod config;
mod engine;
mod error;

pub use api::SegmentApi;
pub use config::{CONFIG_SCHEMA_VERSION, EngineConfig};
pub use engine::{EngineState, SegmentEngine};
pub use error::{ErrorCode, SegmentApiError, error_message};

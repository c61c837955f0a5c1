//! Movement-segment analysis for `exercise-segment`.
//!
//! A [`Segment`] is a straight path in normalized pose space between a start
//! and an end keypose, restricted to a set of care joints. Each incoming frame
//! is projected onto that path by [`SegmentAnalyzer`], which reports:
//!
//! - **progress**: the least-squares position `t*` along the path,
//! - **similarity**: how closely the care joints match the target at `t*`,
//! - **completed**: whether `t*` reached the completion threshold,
//! - **corrections**: per-joint displacement toward the target.
//!
//! [`calculate_similarity`] scores two arbitrary poses without any segment.

mod analyzer;
mod options;
mod output;
mod segment;
mod similarity;

pub use analyzer::SegmentAnalyzer;
pub use options::AnalysisOptions;
pub use output::{FrameStatus, SegmentInput, SegmentOutput};
pub use segment::{CareJoints, Segment, SegmentBuildError};
pub use similarity::{calculate_similarity, similarity_from_distance};

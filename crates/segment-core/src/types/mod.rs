//! Common types shared across the workspace.
//!
//! This module provides the canonical skeleton description, the pose
//! container and the validator configuration.

mod joint;
mod options;
mod pose;

pub use joint::*;
pub use options::*;
pub use pose::*;

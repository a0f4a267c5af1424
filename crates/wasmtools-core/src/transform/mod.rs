//! Geometry transforms: rotation and flipping.
//!
//! These are the only transforms whose output dimensions may differ from the
//! input (rotation in expand mode).
//!
//! # Coordinate System
//!
//! - Rotation angles are in degrees, positive = clockwise on screen
//! - Origin is the top-left corner, y grows downward

mod flip;
mod rotation;

pub use flip::{apply_flip, FlipParams};
pub use rotation::{apply_rotation, compute_rotated_bounds, Interpolation, RotateParams};

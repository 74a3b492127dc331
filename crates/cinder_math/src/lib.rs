//! # cinder_math - 2D Math Primitives
//!
//! Plain-data vector and transform types used on both sides of the physics
//! boundary. World-space and simulation-space values share these types; the
//! unit conversion between the two lives in `cinder_physics::units`.

pub mod vector;
pub mod transform;

pub use vector::*;
pub use transform::*;

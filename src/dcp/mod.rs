//! DCP (Disciplined Convex Programming) analysis.
//!
//! - Curvature tracking (constant, affine, convex, concave)
//! - Sign tracking (non-negative, non-positive, zero, unknown)

pub mod curvature;
pub mod sign;

pub use curvature::{affine_curvature, Curvature};
pub use sign::Sign;

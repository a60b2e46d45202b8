//! Vela Core
//!
//! Foundational value types shared by the Vela crates:
//!
//! - **Geometry**: points, sizes and 2D affine transforms
//! - **Transformation**: the matrix + alpha accumulator an animation writes
//!   into for a single frame
//!
//! # Example
//!
//! ```rust
//! use vela_core::{Affine2D, Point, Transformation};
//!
//! let mut t = Transformation::identity();
//! t.post_compose(&Transformation::from_matrix(Affine2D::translation(10.0, 0.0)));
//! assert_eq!(t.matrix.transform_point(Point::ZERO), Point::new(10.0, 0.0));
//! ```

pub mod geometry;
pub mod transformation;

pub use geometry::{Affine2D, Point, Size};
pub use transformation::Transformation;

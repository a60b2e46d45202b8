//! Per-frame transformation accumulator

use crate::geometry::Affine2D;
use serde::{Deserialize, Serialize};

/// The transform and alpha an animation produces for one frame.
///
/// Animations write into a caller-owned `Transformation` rather than
/// returning a fresh one, so composite animations can reuse scratch values
/// across frames.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Transformation {
    pub matrix: Affine2D,
    /// Opacity multiplier (0.0 to 1.0)
    pub alpha: f32,
}

impl Default for Transformation {
    fn default() -> Self {
        Self::identity()
    }
}

impl Transformation {
    pub const fn identity() -> Self {
        Self {
            matrix: Affine2D::IDENTITY,
            alpha: 1.0,
        }
    }

    pub fn from_matrix(matrix: Affine2D) -> Self {
        Self { matrix, alpha: 1.0 }
    }

    pub fn from_alpha(alpha: f32) -> Self {
        Self {
            matrix: Affine2D::IDENTITY,
            alpha,
        }
    }

    /// Reset to the identity transform with full opacity
    pub fn clear(&mut self) {
        *self = Self::identity();
    }

    pub fn set(&mut self, other: &Transformation) {
        *self = *other;
    }

    pub fn is_identity(&self) -> bool {
        self.matrix.is_identity() && self.alpha == 1.0
    }

    /// `self = self * other`: `other` is applied to geometry before the
    /// transform accumulated so far.
    pub fn compose(&mut self, other: &Transformation) {
        self.alpha *= other.alpha;
        self.matrix = self.matrix.then(&other.matrix);
    }

    /// `self = other * self`: `other` is applied to geometry after the
    /// transform accumulated so far.
    pub fn post_compose(&mut self, other: &Transformation) {
        self.alpha *= other.alpha;
        self.post_compose_matrix(other);
    }

    /// Like [`post_compose`](Self::post_compose) but leaves alpha untouched.
    pub fn post_compose_matrix(&mut self, other: &Transformation) {
        self.matrix = other.matrix.then(&self.matrix);
    }

    pub fn approx_eq(&self, other: &Transformation, epsilon: f32) -> bool {
        self.matrix.approx_eq(&other.matrix, epsilon) && (self.alpha - other.alpha).abs() <= epsilon
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Point;

    #[test]
    fn test_clear() {
        let mut t = Transformation {
            matrix: Affine2D::translation(5.0, 5.0),
            alpha: 0.25,
        };
        t.clear();
        assert!(t.is_identity());
    }

    #[test]
    fn test_compose_vs_post_compose() {
        let scale = Transformation::from_matrix(Affine2D::scale(2.0, 2.0));
        let shift = Transformation::from_matrix(Affine2D::translation(3.0, 0.0));

        let mut pre = scale;
        pre.compose(&shift);
        // shift, then scale
        assert_eq!(pre.matrix.transform_point(Point::ZERO), Point::new(6.0, 0.0));

        let mut post = scale;
        post.post_compose(&shift);
        // scale, then shift
        assert_eq!(post.matrix.transform_point(Point::ZERO), Point::new(3.0, 0.0));
    }

    #[test]
    fn test_alpha_handling() {
        let mut t = Transformation::from_alpha(0.5);
        t.post_compose(&Transformation::from_alpha(0.5));
        assert_eq!(t.alpha, 0.25);

        t.post_compose_matrix(&Transformation::from_alpha(0.0));
        assert_eq!(t.alpha, 0.25);
    }
}

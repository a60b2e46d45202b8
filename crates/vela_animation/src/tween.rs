//! Tween animations
//!
//! Single-property leaf animations (translate, scale, rotate, alpha) driven by
//! an [`AnimationTiming`]. Size-relative values are described with
//! [`Dimension`] and resolved in [`Animation::initialize`].

use std::str::FromStr;

use serde::Deserialize;
use vela_core::{Affine2D, Point, Transformation};

use crate::animation::{Animation, Millis, RepeatCount, RepeatMode};
use crate::easing::Easing;
use crate::error::AnimationError;
use crate::timing::AnimationTiming;

/// A length that may depend on the animated element or its parent
#[derive(Clone, Copy, Debug, PartialEq, Deserialize)]
#[serde(try_from = "DimensionValue")]
pub enum Dimension {
    /// Pixels
    Absolute(f32),
    /// Fraction of the element's own width or height
    RelativeToSelf(f32),
    /// Fraction of the parent's width or height
    RelativeToParent(f32),
}

impl Default for Dimension {
    fn default() -> Self {
        Dimension::Absolute(0.0)
    }
}

impl Dimension {
    /// Resolve against the matching axis of the element and parent sizes
    pub fn resolve(&self, size: f32, parent_size: f32) -> f32 {
        match *self {
            Dimension::Absolute(px) => px,
            Dimension::RelativeToSelf(fraction) => fraction * size,
            Dimension::RelativeToParent(fraction) => fraction * parent_size,
        }
    }
}

impl FromStr for Dimension {
    type Err = AnimationError;

    /// `"12"` is absolute, `"50%"` relative to self, `"50%p"` relative to
    /// the parent
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let text = s.trim();
        let invalid = || AnimationError::InvalidDimension(s.to_string());

        if let Some(percent) = text.strip_suffix("%p") {
            let value: f32 = percent.trim().parse().map_err(|_| invalid())?;
            return Ok(Dimension::RelativeToParent(value / 100.0));
        }
        if let Some(percent) = text.strip_suffix('%') {
            let value: f32 = percent.trim().parse().map_err(|_| invalid())?;
            return Ok(Dimension::RelativeToSelf(value / 100.0));
        }
        text.parse().map(Dimension::Absolute).map_err(|_| invalid())
    }
}

/// Accepts both bare numbers and strings in descriptions
#[derive(Deserialize)]
#[serde(untagged)]
enum DimensionValue {
    Number(f64),
    Text(String),
}

impl TryFrom<DimensionValue> for Dimension {
    type Error = AnimationError;

    fn try_from(value: DimensionValue) -> Result<Self, Self::Error> {
        match value {
            DimensionValue::Number(px) => Ok(Dimension::Absolute(px as f32)),
            DimensionValue::Text(text) => text.parse(),
        }
    }
}

/// The property a tween animates
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Tween {
    Translate {
        from_x: Dimension,
        to_x: Dimension,
        from_y: Dimension,
        to_y: Dimension,
    },
    Scale {
        from_x: f32,
        to_x: f32,
        from_y: f32,
        to_y: f32,
        pivot_x: Dimension,
        pivot_y: Dimension,
    },
    Rotate {
        from_degrees: f32,
        to_degrees: f32,
        pivot_x: Dimension,
        pivot_y: Dimension,
    },
    Alpha {
        from: f32,
        to: f32,
    },
}

/// A [`Tween`] with all dimensions resolved to pixels
#[derive(Clone, Copy, Debug, PartialEq)]
enum Resolved {
    Translate { from: Point, to: Point },
    Scale { from: Point, to: Point, pivot: Point },
    Rotate { from: f32, to: f32, pivot: Point },
    Alpha { from: f32, to: f32 },
}

impl Tween {
    fn resolve(&self, width: f32, height: f32, parent_width: f32, parent_height: f32) -> Resolved {
        let x = |d: &Dimension| d.resolve(width, parent_width);
        let y = |d: &Dimension| d.resolve(height, parent_height);

        match self {
            Tween::Translate {
                from_x,
                to_x,
                from_y,
                to_y,
            } => Resolved::Translate {
                from: Point::new(x(from_x), y(from_y)),
                to: Point::new(x(to_x), y(to_y)),
            },
            Tween::Scale {
                from_x,
                to_x,
                from_y,
                to_y,
                pivot_x,
                pivot_y,
            } => Resolved::Scale {
                from: Point::new(*from_x, *from_y),
                to: Point::new(*to_x, *to_y),
                pivot: Point::new(x(pivot_x), y(pivot_y)),
            },
            Tween::Rotate {
                from_degrees,
                to_degrees,
                pivot_x,
                pivot_y,
            } => Resolved::Rotate {
                from: *from_degrees,
                to: *to_degrees,
                pivot: Point::new(x(pivot_x), y(pivot_y)),
            },
            Tween::Alpha { from, to } => Resolved::Alpha {
                from: *from,
                to: *to,
            },
        }
    }
}

impl Resolved {
    fn apply(&self, progress: f32, out: &mut Transformation) {
        match *self {
            Resolved::Translate { from, to } => {
                out.matrix = Affine2D::translation(
                    lerp(from.x, to.x, progress),
                    lerp(from.y, to.y, progress),
                );
            }
            Resolved::Scale { from, to, pivot } => {
                out.matrix = Affine2D::scale_about(
                    lerp(from.x, to.x, progress),
                    lerp(from.y, to.y, progress),
                    pivot,
                );
            }
            Resolved::Rotate { from, to, pivot } => {
                out.matrix = Affine2D::rotation_about(lerp(from, to, progress).to_radians(), pivot);
            }
            Resolved::Alpha { from, to } => {
                out.alpha = lerp(from, to, progress);
            }
        }
    }
}

fn lerp(from: f32, to: f32, t: f32) -> f32 {
    from + (to - from) * t
}

/// A leaf animation interpolating one [`Tween`] over time
#[derive(Clone, Debug)]
pub struct TweenAnimation {
    timing: AnimationTiming,
    tween: Tween,
    resolved: Resolved,
}

impl TweenAnimation {
    pub fn new(tween: Tween, duration_ms: u64) -> Self {
        Self {
            timing: AnimationTiming::new(duration_ms),
            resolved: tween.resolve(0.0, 0.0, 0.0, 0.0),
            tween,
        }
    }

    /// Translate between two pixel offsets
    pub fn translate(from: (f32, f32), to: (f32, f32), duration_ms: u64) -> Self {
        Self::new(
            Tween::Translate {
                from_x: Dimension::Absolute(from.0),
                to_x: Dimension::Absolute(to.0),
                from_y: Dimension::Absolute(from.1),
                to_y: Dimension::Absolute(to.1),
            },
            duration_ms,
        )
    }

    /// Uniform scale around the origin
    pub fn scale(from: f32, to: f32, duration_ms: u64) -> Self {
        Self::new(
            Tween::Scale {
                from_x: from,
                to_x: to,
                from_y: from,
                to_y: to,
                pivot_x: Dimension::default(),
                pivot_y: Dimension::default(),
            },
            duration_ms,
        )
    }

    /// Rotation around the origin, in degrees
    pub fn rotate(from_degrees: f32, to_degrees: f32, duration_ms: u64) -> Self {
        Self::new(
            Tween::Rotate {
                from_degrees,
                to_degrees,
                pivot_x: Dimension::default(),
                pivot_y: Dimension::default(),
            },
            duration_ms,
        )
    }

    pub fn alpha(from: f32, to: f32, duration_ms: u64) -> Self {
        Self::new(Tween::Alpha { from, to }, duration_ms)
    }

    /// Builder: set start offset
    pub fn with_start_offset(mut self, offset_ms: Millis) -> Self {
        self.timing.set_start_offset(offset_ms);
        self
    }

    /// Builder: set interpolator
    pub fn with_interpolator(mut self, interpolator: Easing) -> Self {
        self.timing.set_interpolator(interpolator);
        self
    }

    /// Builder: hold the final pose after the end
    pub fn with_fill_after(mut self, fill_after: bool) -> Self {
        self.timing.set_fill_after(fill_after);
        self
    }

    /// Builder: set repeat count and mode
    pub fn with_repeat(mut self, count: RepeatCount, mode: RepeatMode) -> Self {
        self.timing.set_repeat_count(count);
        self.timing.set_repeat_mode(mode);
        self
    }

    pub fn tween(&self) -> &Tween {
        &self.tween
    }

    pub fn timing(&self) -> &AnimationTiming {
        &self.timing
    }

    pub fn timing_mut(&mut self) -> &mut AnimationTiming {
        &mut self.timing
    }
}

impl Animation for TweenAnimation {
    fn get_transformation(&mut self, current_time: Millis, out: &mut Transformation) -> bool {
        let frame = self.timing.advance(current_time);
        if let Some(progress) = frame.progress {
            self.resolved.apply(progress, out);
        }
        frame.more
    }

    fn duration(&self) -> u64 {
        self.timing.duration_ms()
    }

    fn set_duration(&mut self, duration_ms: u64) {
        self.timing.set_duration_ms(duration_ms);
    }

    fn start_offset(&self) -> Millis {
        self.timing.start_offset()
    }

    fn set_start_offset(&mut self, offset_ms: Millis) {
        self.timing.set_start_offset(offset_ms);
    }

    fn start_time(&self) -> Option<Millis> {
        self.timing.start_time()
    }

    fn set_start_time(&mut self, start_time: Millis) {
        self.timing.set_start_time(start_time);
    }

    fn fill_before(&self) -> bool {
        self.timing.fill_before()
    }

    fn set_fill_before(&mut self, fill_before: bool) {
        self.timing.set_fill_before(fill_before);
    }

    fn fill_after(&self) -> bool {
        self.timing.fill_after()
    }

    fn set_fill_after(&mut self, fill_after: bool) {
        self.timing.set_fill_after(fill_after);
    }

    fn repeat_mode(&self) -> RepeatMode {
        self.timing.repeat_mode()
    }

    fn set_repeat_mode(&mut self, repeat_mode: RepeatMode) {
        self.timing.set_repeat_mode(repeat_mode);
    }

    fn set_repeat_count(&mut self, repeat_count: RepeatCount) {
        self.timing.set_repeat_count(repeat_count);
    }

    fn set_interpolator(&mut self, interpolator: Easing) {
        self.timing.set_interpolator(interpolator);
    }

    fn initialize(&mut self, width: f32, height: f32, parent_width: f32, parent_height: f32) {
        self.resolved = self.tween.resolve(width, height, parent_width, parent_height);
    }

    fn compute_duration_hint(&self) -> Option<u64> {
        self.timing.duration_hint()
    }

    fn scale_current_duration(&mut self, scale: f32) {
        self.timing.scale(scale);
    }

    fn has_alpha(&self) -> bool {
        matches!(self.tween, Tween::Alpha { .. })
    }

    fn will_change_transformation_matrix(&self) -> bool {
        !self.has_alpha()
    }

    fn has_started(&self) -> bool {
        self.timing.has_started()
    }

    fn has_ended(&self) -> bool {
        self.timing.has_ended()
    }

    fn reset(&mut self) {
        self.timing.reset();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dimension_parse() {
        assert_eq!("12".parse::<Dimension>().ok(), Some(Dimension::Absolute(12.0)));
        assert_eq!(
            "50%".parse::<Dimension>().ok(),
            Some(Dimension::RelativeToSelf(0.5))
        );
        assert_eq!(
            " -25%p ".parse::<Dimension>().ok(),
            Some(Dimension::RelativeToParent(-0.25))
        );
        assert!(matches!(
            "wide".parse::<Dimension>(),
            Err(AnimationError::InvalidDimension(text)) if text == "wide"
        ));
        assert!("%p".parse::<Dimension>().is_err());
    }

    #[test]
    fn test_translate_midpoint() {
        let mut anim = TweenAnimation::translate((0.0, 0.0), (100.0, 40.0), 200);
        anim.set_start_time(0);

        let mut t = Transformation::identity();
        assert!(anim.get_transformation(100, &mut t));
        assert_eq!(t.matrix.transform_point(Point::ZERO), Point::new(50.0, 20.0));
        assert_eq!(t.alpha, 1.0);
    }

    #[test]
    fn test_initialize_resolves_relative_values() {
        let mut anim = TweenAnimation::new(
            Tween::Translate {
                from_x: Dimension::RelativeToSelf(0.0),
                to_x: Dimension::RelativeToSelf(1.0),
                from_y: Dimension::default(),
                to_y: Dimension::RelativeToParent(0.5),
            },
            100,
        );
        anim.set_start_time(0);

        anim.initialize(40.0, 10.0, 400.0, 300.0);
        let mut t = Transformation::identity();
        anim.get_transformation(100, &mut t);
        assert_eq!(t.matrix.transform_point(Point::ZERO), Point::new(40.0, 150.0));

        // re-initializing derives from the description, not the previous bounds
        anim.initialize(80.0, 10.0, 400.0, 100.0);
        anim.set_start_time(0);
        anim.get_transformation(100, &mut t);
        assert_eq!(t.matrix.transform_point(Point::ZERO), Point::new(80.0, 50.0));
    }

    #[test]
    fn test_alpha_tween() {
        let mut anim = TweenAnimation::alpha(0.0, 1.0, 100);
        assert!(anim.has_alpha());
        assert!(!anim.will_change_transformation_matrix());

        anim.set_start_time(0);
        let mut t = Transformation::identity();
        anim.get_transformation(25, &mut t);
        assert_eq!(t.alpha, 0.25);
        assert!(t.matrix.is_identity());
    }

    #[test]
    fn test_no_pose_after_end_without_fill() {
        let mut anim = TweenAnimation::rotate(0.0, 90.0, 100);
        anim.set_start_time(0);

        let mut t = Transformation::identity();
        assert!(!anim.get_transformation(500, &mut t));
        assert!(t.is_identity());

        let mut held = TweenAnimation::rotate(0.0, 90.0, 100).with_fill_after(true);
        held.set_start_time(0);
        held.get_transformation(500, &mut t);
        assert!(t
            .matrix
            .transform_point(Point::new(1.0, 0.0))
            .approx_eq(Point::new(0.0, 1.0), 1e-5));
    }
}

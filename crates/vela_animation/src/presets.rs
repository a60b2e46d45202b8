//! Animation presets for common entry/exit animations

use crate::animation::Animation;
use crate::easing::Easing;
use crate::set::AnimationSet;
use crate::tween::{Dimension, Tween, TweenAnimation};

/// Edge an element slides in from or out to
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SlideEdge {
    Left,
    Right,
    Top,
    Bottom,
}

/// Pre-built animation presets for common patterns
pub struct AnimationPreset;

impl AnimationPreset {
    // ========================================================================
    // Fade animations
    // ========================================================================

    /// Fade in from transparent to opaque
    pub fn fade_in(duration_ms: u64) -> TweenAnimation {
        TweenAnimation::alpha(0.0, 1.0, duration_ms).with_interpolator(Easing::Decelerate)
    }

    /// Fade out from opaque to transparent
    pub fn fade_out(duration_ms: u64) -> TweenAnimation {
        TweenAnimation::alpha(1.0, 0.0, duration_ms)
            .with_interpolator(Easing::Accelerate)
            .with_fill_after(true)
    }

    // ========================================================================
    // Scale animations
    // ========================================================================

    /// Grow from nothing around the element center while fading in
    pub fn scale_in(duration_ms: u64) -> AnimationSet {
        Self::scale_fade(0.0, 1.0, 0.0, 1.0, duration_ms, Easing::EaseOutCubic)
    }

    /// Shrink to nothing around the element center while fading out
    pub fn scale_out(duration_ms: u64) -> AnimationSet {
        let mut set = Self::scale_fade(1.0, 0.0, 1.0, 0.0, duration_ms, Easing::EaseInCubic);
        set.set_fill_after(true);
        set
    }

    fn scale_fade(
        from_scale: f32,
        to_scale: f32,
        from_alpha: f32,
        to_alpha: f32,
        duration_ms: u64,
        easing: Easing,
    ) -> AnimationSet {
        let mut set = AnimationSet::new(true);
        set.set_interpolator(easing);
        set.add(TweenAnimation::new(
            Tween::Scale {
                from_x: from_scale,
                to_x: to_scale,
                from_y: from_scale,
                to_y: to_scale,
                pivot_x: Dimension::RelativeToSelf(0.5),
                pivot_y: Dimension::RelativeToSelf(0.5),
            },
            duration_ms,
        ));
        set.add(TweenAnimation::alpha(from_alpha, to_alpha, duration_ms));
        set
    }

    // ========================================================================
    // Slide animations
    // ========================================================================

    /// Slide in from outside the element's own bounds on `edge`
    pub fn slide_in(edge: SlideEdge, duration_ms: u64) -> TweenAnimation {
        let (x, y) = Self::offscreen(edge);
        TweenAnimation::new(
            Tween::Translate {
                from_x: x,
                to_x: Dimension::default(),
                from_y: y,
                to_y: Dimension::default(),
            },
            duration_ms,
        )
        .with_interpolator(Easing::EaseOutCubic)
    }

    /// Slide out past `edge`, holding the final position
    pub fn slide_out(edge: SlideEdge, duration_ms: u64) -> TweenAnimation {
        let (x, y) = Self::offscreen(edge);
        TweenAnimation::new(
            Tween::Translate {
                from_x: Dimension::default(),
                to_x: x,
                from_y: Dimension::default(),
                to_y: y,
            },
            duration_ms,
        )
        .with_interpolator(Easing::EaseInCubic)
        .with_fill_after(true)
    }

    fn offscreen(edge: SlideEdge) -> (Dimension, Dimension) {
        match edge {
            SlideEdge::Left => (Dimension::RelativeToSelf(-1.0), Dimension::default()),
            SlideEdge::Right => (Dimension::RelativeToSelf(1.0), Dimension::default()),
            SlideEdge::Top => (Dimension::default(), Dimension::RelativeToSelf(-1.0)),
            SlideEdge::Bottom => (Dimension::default(), Dimension::RelativeToSelf(1.0)),
        }
    }
}

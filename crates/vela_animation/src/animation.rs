//! The animation capability shared by leaf animations and sets

use std::cell::RefCell;
use std::rc::Rc;
use std::str::FromStr;

use vela_core::Transformation;

use crate::easing::Easing;
use crate::error::AnimationError;

/// Timestamps and offsets, in milliseconds
pub type Millis = i64;

/// An animation shared between owners (one animation may belong to
/// several sets, or outlive the set that played it)
pub type SharedAnimation = Rc<RefCell<dyn Animation>>;

/// Wrap an animation for shared ownership
pub fn share<A: Animation + 'static>(animation: A) -> SharedAnimation {
    Rc::new(RefCell::new(animation))
}

/// What happens when a repeating animation reaches the end of a cycle
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum RepeatMode {
    /// Start the next cycle from the beginning
    #[default]
    Restart,
    /// Play the next cycle backwards
    Reverse,
}

impl FromStr for RepeatMode {
    type Err = AnimationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "restart" => Ok(RepeatMode::Restart),
            "reverse" => Ok(RepeatMode::Reverse),
            other => Err(AnimationError::UnknownRepeatMode(other.to_string())),
        }
    }
}

/// How many times an animation repeats after its first cycle
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RepeatCount {
    Finite(u32),
    Infinite,
}

impl Default for RepeatCount {
    fn default() -> Self {
        RepeatCount::Finite(0)
    }
}

impl From<i32> for RepeatCount {
    /// Negative counts mean "repeat forever"
    fn from(count: i32) -> Self {
        if count < 0 {
            RepeatCount::Infinite
        } else {
            RepeatCount::Finite(count as u32)
        }
    }
}

/// A time-based animation producing one [`Transformation`] per frame.
///
/// Implemented by leaf animations ([`TweenAnimation`]) and by
/// [`AnimationSet`], so callers drive one animation or many the same way.
///
/// [`TweenAnimation`]: crate::tween::TweenAnimation
/// [`AnimationSet`]: crate::set::AnimationSet
pub trait Animation {
    /// Write the transformation for `current_time` into `out`.
    ///
    /// Returns `true` while the animation is still running.
    fn get_transformation(&mut self, current_time: Millis, out: &mut Transformation) -> bool;

    /// Length of one cycle in milliseconds
    fn duration(&self) -> u64;
    fn set_duration(&mut self, duration_ms: u64);

    /// Delay between the start time and the first frame
    fn start_offset(&self) -> Millis;
    fn set_start_offset(&mut self, offset_ms: Millis);

    /// Resolved start time, `None` until the first frame (or an explicit
    /// [`set_start_time`](Animation::set_start_time))
    fn start_time(&self) -> Option<Millis>;
    fn set_start_time(&mut self, start_time: Millis);

    fn fill_before(&self) -> bool;
    fn set_fill_before(&mut self, fill_before: bool);

    fn fill_after(&self) -> bool;
    fn set_fill_after(&mut self, fill_after: bool);

    fn repeat_mode(&self) -> RepeatMode;
    fn set_repeat_mode(&mut self, repeat_mode: RepeatMode);

    fn set_repeat_count(&mut self, repeat_count: RepeatCount);

    fn set_interpolator(&mut self, interpolator: Easing);

    /// Resolve size-relative values against the animated element and its
    /// parent. May be called again whenever the bounds change.
    fn initialize(&mut self, width: f32, height: f32, parent_width: f32, parent_height: f32);

    /// Estimated total running time, `None` if it never ends
    fn compute_duration_hint(&self) -> Option<u64>;

    /// Multiply the current duration by `scale`. Leaf animations scale
    /// their start offset too.
    fn scale_current_duration(&mut self, scale: f32);

    /// Whether `target` is nested anywhere inside this animation
    fn contains(&self, _target: &dyn Animation) -> bool {
        false
    }

    /// Whether this animation can affect alpha
    fn has_alpha(&self) -> bool {
        false
    }

    fn will_change_transformation_matrix(&self) -> bool {
        true
    }

    fn will_change_bounds(&self) -> bool {
        false
    }

    fn has_started(&self) -> bool;
    fn has_ended(&self) -> bool;

    /// Forget the resolved start time and run state
    fn reset(&mut self);
}

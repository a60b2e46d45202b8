//! Timing state machine for leaf animations
//!
//! [`AnimationTiming`] turns wall-clock frame times into eased progress,
//! handling start offsets, fill before/after, repeats and reverse cycles. Leaf
//! animations embed one and only map the resulting progress to a transform.

use crate::animation::{Millis, RepeatCount, RepeatMode};
use crate::easing::Easing;

/// Result of advancing the timing to a frame time
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Frame {
    /// Eased progress to apply, or `None` when no pose should be shown
    pub progress: Option<f32>,
    /// Whether the animation is still running after this frame
    pub more: bool,
}

/// Per-animation timing configuration and playback state
#[derive(Clone, Debug)]
pub struct AnimationTiming {
    start_time: Option<Millis>,
    start_offset: Millis,
    duration_ms: u64,
    fill_before: bool,
    fill_after: bool,
    repeat_count: RepeatCount,
    repeat_mode: RepeatMode,
    interpolator: Easing,
    /// Completed repeats
    repeated: u32,
    /// Playing a reversed cycle
    cycle_flip: bool,
    started: bool,
    ended: bool,
}

impl AnimationTiming {
    pub fn new(duration_ms: u64) -> Self {
        Self {
            start_time: None,
            start_offset: 0,
            duration_ms,
            fill_before: true,
            fill_after: false,
            repeat_count: RepeatCount::default(),
            repeat_mode: RepeatMode::default(),
            interpolator: Easing::Linear,
            repeated: 0,
            cycle_flip: false,
            started: false,
            ended: false,
        }
    }

    pub fn duration_ms(&self) -> u64 {
        self.duration_ms
    }

    pub fn set_duration_ms(&mut self, duration_ms: u64) {
        self.duration_ms = duration_ms;
    }

    pub fn start_offset(&self) -> Millis {
        self.start_offset
    }

    pub fn set_start_offset(&mut self, offset_ms: Millis) {
        self.start_offset = offset_ms;
    }

    pub fn start_time(&self) -> Option<Millis> {
        self.start_time
    }

    /// Fix the start time and restart playback state
    pub fn set_start_time(&mut self, start_time: Millis) {
        self.start_time = Some(start_time);
        self.repeated = 0;
        self.cycle_flip = false;
        self.started = false;
        self.ended = false;
    }

    pub fn fill_before(&self) -> bool {
        self.fill_before
    }

    pub fn set_fill_before(&mut self, fill_before: bool) {
        self.fill_before = fill_before;
    }

    pub fn fill_after(&self) -> bool {
        self.fill_after
    }

    pub fn set_fill_after(&mut self, fill_after: bool) {
        self.fill_after = fill_after;
    }

    pub fn repeat_count(&self) -> RepeatCount {
        self.repeat_count
    }

    pub fn set_repeat_count(&mut self, repeat_count: RepeatCount) {
        self.repeat_count = repeat_count;
    }

    pub fn repeat_mode(&self) -> RepeatMode {
        self.repeat_mode
    }

    pub fn set_repeat_mode(&mut self, repeat_mode: RepeatMode) {
        self.repeat_mode = repeat_mode;
    }

    pub fn interpolator(&self) -> Easing {
        self.interpolator
    }

    pub fn set_interpolator(&mut self, interpolator: Easing) {
        self.interpolator = interpolator;
    }

    pub fn has_started(&self) -> bool {
        self.started
    }

    pub fn has_ended(&self) -> bool {
        self.ended
    }

    pub fn reset(&mut self) {
        self.start_time = None;
        self.repeated = 0;
        self.cycle_flip = false;
        self.started = false;
        self.ended = false;
    }

    pub fn scale(&mut self, scale: f32) {
        self.duration_ms = (self.duration_ms as f64 * scale as f64) as u64;
        self.start_offset = (self.start_offset as f64 * scale as f64) as Millis;
    }

    /// `(offset + duration) * (repeats + 1)`, or `None` when repeating forever
    pub fn duration_hint(&self) -> Option<u64> {
        let cycle = (self.start_offset.max(0) as u64).saturating_add(self.duration_ms);
        match self.repeat_count {
            RepeatCount::Infinite => None,
            RepeatCount::Finite(n) => Some(cycle.saturating_mul(n as u64 + 1)),
        }
    }

    /// Advance to `now`.
    ///
    /// The first call resolves the start time when none was set. A pose is
    /// produced inside the active interval, and outside it only when the
    /// matching fill flag holds it.
    pub fn advance(&mut self, now: Millis) -> Frame {
        let start = *self.start_time.get_or_insert(now);
        let begin = start + self.start_offset;

        let normalized = if self.duration_ms != 0 {
            (now - begin) as f32 / self.duration_ms as f32
        } else if now < begin {
            0.0
        } else {
            1.0
        };

        let expired = normalized >= 1.0;
        let mut more = !expired;
        let mut progress = None;

        if (normalized >= 0.0 || self.fill_before) && (normalized <= 1.0 || self.fill_after) {
            self.started = true;
            let mut t = normalized.clamp(0.0, 1.0);
            if self.cycle_flip {
                t = 1.0 - t;
            }
            progress = Some(self.interpolator.apply(t));
        }

        if expired && !self.ended {
            let exhausted = match self.repeat_count {
                RepeatCount::Infinite => false,
                RepeatCount::Finite(n) => self.repeated >= n,
            };
            if exhausted {
                self.ended = true;
            } else {
                self.repeated += 1;
                if self.repeat_mode == RepeatMode::Reverse {
                    self.cycle_flip = !self.cycle_flip;
                }
                // next cycle begins at the next frame
                self.start_time = None;
                more = true;
            }
        }

        Frame { progress, more }
    }
}

impl Default for AnimationTiming {
    fn default() -> Self {
        Self::new(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_progress_within_interval() {
        let mut timing = AnimationTiming::new(100);
        timing.set_start_time(0);

        assert_eq!(timing.advance(0).progress, Some(0.0));
        assert_eq!(timing.advance(50).progress, Some(0.5));

        let end = timing.advance(100);
        assert_eq!(end.progress, Some(1.0));
        assert!(!end.more);
        assert!(timing.has_ended());
    }

    #[test]
    fn test_fill_flags_outside_interval() {
        let mut timing = AnimationTiming::new(100);
        timing.set_start_offset(50);
        timing.set_start_time(0);

        // fill_before defaults to true
        assert_eq!(timing.advance(10).progress, Some(0.0));
        timing.set_fill_before(false);
        assert_eq!(timing.advance(10).progress, None);

        // fill_after defaults to false
        let after = timing.advance(200);
        assert_eq!(after.progress, None);
        assert!(!after.more);

        timing.set_fill_after(true);
        assert_eq!(timing.advance(300).progress, Some(1.0));
    }

    #[test]
    fn test_lazy_start_time() {
        let mut timing = AnimationTiming::new(100);
        assert_eq!(timing.start_time(), None);
        assert_eq!(timing.advance(1_000).progress, Some(0.0));
        assert_eq!(timing.start_time(), Some(1_000));
        assert_eq!(timing.advance(1_025).progress, Some(0.25));
    }

    #[test]
    fn test_reverse_repeat() {
        let mut timing = AnimationTiming::new(100);
        timing.set_repeat_count(RepeatCount::Finite(1));
        timing.set_repeat_mode(RepeatMode::Reverse);
        timing.set_start_time(0);

        let first_end = timing.advance(100);
        assert!(first_end.more);
        assert!(!timing.has_ended());

        // second cycle starts at the next frame and runs backwards
        assert_eq!(timing.advance(200).progress, Some(1.0));
        assert_eq!(timing.advance(225).progress, Some(0.75));

        let last = timing.advance(300);
        assert_eq!(last.progress, Some(0.0));
        assert!(!last.more);
        assert!(timing.has_ended());
    }

    #[test]
    fn test_zero_duration() {
        let mut timing = AnimationTiming::new(0);
        timing.set_start_offset(10);
        timing.set_start_time(0);

        let before = timing.advance(5);
        assert_eq!(before.progress, Some(0.0));
        assert!(before.more);

        let at = timing.advance(10);
        assert_eq!(at.progress, Some(1.0));
        assert!(!at.more);
    }

    #[test]
    fn test_duration_hint_and_scale() {
        let mut timing = AnimationTiming::new(200);
        timing.set_start_offset(100);
        timing.set_repeat_count(RepeatCount::Finite(2));
        assert_eq!(timing.duration_hint(), Some(900));

        timing.scale(0.5);
        assert_eq!(timing.duration_ms(), 100);
        assert_eq!(timing.start_offset(), 50);

        timing.set_repeat_count(RepeatCount::Infinite);
        assert_eq!(timing.duration_hint(), None);
    }
}

//! Animation sets
//!
//! An [`AnimationSet`] plays a group of animations together and composes
//! their transformations into one. It implements [`Animation`] itself, so a
//! caller drives a set exactly like a single animation, and sets nest.
//!
//! Properties set on the set relate to its members as follows:
//!
//! - duration, repeat mode, fill before, fill after: pushed down to every
//!   member, including members added later
//! - repeat count: ignored
//! - start offset, share interpolator: apply to the set itself
//!
//! Member transforms are applied in the order members were added: the
//! first-added member's transform is applied to geometry first.

use std::cell::RefCell;
use std::rc::Rc;

use smallvec::SmallVec;
use tracing::{debug, trace, warn};
use vela_core::Transformation;

use crate::animation::{Animation, Millis, RepeatCount, RepeatMode, SharedAnimation};
use crate::easing::Easing;
use crate::error::{AnimationError, Result};
use crate::flags::PropertyFlags;

/// Playback state of a set across one run
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum SetState {
    NotStarted,
    Running,
    /// Every member reported inactive; `terminal` is replayed on later frames
    Finished { terminal: Transformation },
}

/// A group of animations played together
pub struct AnimationSet {
    members: SmallVec<[SharedAnimation; 4]>,
    flags: PropertyFlags,
    state: SetState,
    /// Membership or timing changed since the last frame
    dirty: bool,
    has_alpha: bool,
    /// Members that already received the resolved start time
    synced: usize,
    start_time: Option<Millis>,
    start_offset: Millis,
    /// Longest `member.start_offset + member.duration`, kept unrounded so
    /// repeated scaling composes
    duration: f64,
    /// Value last passed to `set_duration`
    explicit_duration: u64,
    last_end: Millis,
    fill_before: bool,
    fill_after: bool,
    repeat_mode: RepeatMode,
    interpolator: Easing,
    scratch: Transformation,
}

impl AnimationSet {
    /// Create an empty set.
    ///
    /// With `share_interpolator`, every member uses the set's interpolator
    /// instead of its own.
    pub fn new(share_interpolator: bool) -> Self {
        let mut flags = PropertyFlags::empty();
        flags.set(PropertyFlags::SHARE_INTERPOLATOR, share_interpolator);

        Self {
            members: SmallVec::new(),
            flags,
            state: SetState::NotStarted,
            dirty: true,
            has_alpha: false,
            synced: 0,
            start_time: None,
            start_offset: 0,
            duration: 0.0,
            explicit_duration: 0,
            last_end: 0,
            fill_before: true,
            fill_after: false,
            repeat_mode: RepeatMode::Restart,
            interpolator: Easing::Linear,
            scratch: Transformation::identity(),
        }
    }

    /// Add a shared member animation.
    ///
    /// Properties already set explicitly on the set are applied to the new
    /// member before it joins. Fails with [`AnimationError::MemberBusy`] if
    /// the animation is currently borrowed (for example a set adding
    /// itself), and with [`AnimationError::Cycle`] if the animation already
    /// contains this set.
    pub fn add_animation(&mut self, animation: SharedAnimation) -> Result<()> {
        {
            let mut member = animation
                .try_borrow_mut()
                .map_err(|_| AnimationError::MemberBusy)?;
            if member.contains(&*self) {
                return Err(AnimationError::Cycle);
            }
            self.adopt(&mut *member);
        }
        self.members.push(animation);
        Ok(())
    }

    /// Add an owned animation, returning a handle to it.
    ///
    /// An animation that already contains this set is not added; use
    /// [`add_animation`](Self::add_animation) to observe the error.
    pub fn add<A: Animation + 'static>(&mut self, animation: A) -> Rc<RefCell<A>> {
        let handle = Rc::new(RefCell::new(animation));
        if handle.borrow().contains(&*self) {
            warn!("animation containing this set was not added");
            return handle;
        }
        self.adopt(&mut *handle.borrow_mut());
        self.members.push(handle.clone());
        handle
    }

    /// Bookkeeping for a member about to be appended
    fn adopt(&mut self, member: &mut dyn Animation) {
        if self.flags.duration() {
            member.set_duration(self.explicit_duration);
        }
        if self.flags.fill_after() {
            member.set_fill_after(self.fill_after);
        }
        if self.flags.fill_before() {
            member.set_fill_before(self.fill_before);
        }
        if self.flags.repeat_mode() {
            member.set_repeat_mode(self.repeat_mode);
        }
        if self.flags.share_interpolator() {
            member.set_interpolator(self.interpolator);
        }

        let end = member_end(member) as f64;
        self.duration = if self.members.is_empty() {
            end
        } else {
            self.duration.max(end)
        };
        self.last_end = self.start_offset + self.duration() as Millis;

        self.has_alpha |= member.has_alpha();
        if member.will_change_transformation_matrix() {
            self.flags.insert(PropertyFlags::MORPH_MATRIX);
        }
        if member.will_change_bounds() {
            self.flags.insert(PropertyFlags::CHANGE_BOUNDS);
        }
        self.dirty = true;

        debug!(
            members = self.members.len() + 1,
            duration = self.duration(),
            "animation added to set"
        );
    }

    /// Members in insertion (and composition) order
    pub fn animations(&self) -> &[SharedAnimation] {
        &self.members
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    pub fn flags(&self) -> PropertyFlags {
        self.flags
    }

    pub fn state(&self) -> SetState {
        self.state
    }

    pub fn share_interpolator(&self) -> bool {
        self.flags.share_interpolator()
    }

    pub fn interpolator(&self) -> Easing {
        self.interpolator
    }

    /// End of the set's timeline relative to its start time
    pub fn last_end(&self) -> Millis {
        self.last_end
    }

    /// Start-of-run setup: resolve the start time, hand it to members that
    /// have not seen it yet and refresh the alpha cache.
    fn begin_run(&mut self, now: Millis) {
        let start = *self.start_time.get_or_insert(now);
        let member_start = start + self.start_offset;

        for member in &self.members[self.synced..] {
            member.borrow_mut().set_start_time(member_start);
        }
        self.synced = self.members.len();
        self.has_alpha = self.members.iter().any(|m| m.borrow().has_alpha());
        self.dirty = false;

        if self.state != SetState::Running {
            debug!(start, members = self.members.len(), "animation set running");
            self.state = SetState::Running;
        }
    }

    fn recompute_duration(&mut self) {
        self.duration = self
            .members
            .iter()
            .map(|m| member_end(&*m.borrow()))
            .max()
            .unwrap_or(self.explicit_duration) as f64;
        self.last_end = self.start_offset + self.duration() as Millis;
    }
}

impl Default for AnimationSet {
    fn default() -> Self {
        Self::new(false)
    }
}

/// `start_offset + duration`, clamped at zero
fn member_end(member: &dyn Animation) -> u64 {
    (member.start_offset() + member.duration() as Millis).max(0) as u64
}

impl Animation for AnimationSet {
    /// Compose the members' transformations for `current_time`.
    ///
    /// Members whose start lies in the future contribute nothing and keep the
    /// set running. Once every member reports inactive the set finishes and
    /// replays that final transformation on later frames.
    fn get_transformation(&mut self, current_time: Millis, out: &mut Transformation) -> bool {
        if self.dirty || self.state == SetState::NotStarted {
            self.begin_run(current_time);
        }

        if let SetState::Finished { terminal } = &self.state {
            out.set(terminal);
            return false;
        }

        out.clear();
        let begin = self.start_time.unwrap_or(current_time) + self.start_offset;
        let mut more = false;

        for member in &self.members {
            let mut member = member.borrow_mut();
            if current_time < begin + member.start_offset() {
                more = true;
                continue;
            }

            self.scratch.clear();
            more |= member.get_transformation(current_time, &mut self.scratch);

            if self.has_alpha {
                out.post_compose(&self.scratch);
            } else {
                out.post_compose_matrix(&self.scratch);
            }
        }

        trace!(current_time, more, "animation set frame");

        if !more {
            debug!(current_time, "animation set finished");
            self.state = SetState::Finished { terminal: *out };
        }
        more
    }

    /// Duration of the longest member, including that member's start offset
    fn duration(&self) -> u64 {
        self.duration.round() as u64
    }

    /// Set the duration of every member
    fn set_duration(&mut self, duration_ms: u64) {
        self.flags.insert(PropertyFlags::DURATION);
        self.explicit_duration = duration_ms;
        for member in &self.members {
            member.borrow_mut().set_duration(duration_ms);
        }
        self.recompute_duration();
        self.dirty = true;
    }

    fn start_offset(&self) -> Millis {
        self.start_offset
    }

    fn set_start_offset(&mut self, offset_ms: Millis) {
        self.start_offset = offset_ms;
        self.last_end = self.start_offset + self.duration() as Millis;
        self.synced = 0;
        self.dirty = true;
    }

    fn start_time(&self) -> Option<Millis> {
        self.start_time
    }

    fn set_start_time(&mut self, start_time: Millis) {
        self.start_time = Some(start_time);
        self.synced = 0;
        self.state = SetState::NotStarted;
        self.dirty = true;
    }

    fn fill_before(&self) -> bool {
        self.fill_before
    }

    fn set_fill_before(&mut self, fill_before: bool) {
        self.flags.insert(PropertyFlags::FILL_BEFORE);
        self.fill_before = fill_before;
        for member in &self.members {
            member.borrow_mut().set_fill_before(fill_before);
        }
    }

    fn fill_after(&self) -> bool {
        self.fill_after
    }

    fn set_fill_after(&mut self, fill_after: bool) {
        self.flags.insert(PropertyFlags::FILL_AFTER);
        self.fill_after = fill_after;
        for member in &self.members {
            member.borrow_mut().set_fill_after(fill_after);
        }
    }

    fn repeat_mode(&self) -> RepeatMode {
        self.repeat_mode
    }

    fn set_repeat_mode(&mut self, repeat_mode: RepeatMode) {
        self.flags.insert(PropertyFlags::REPEAT_MODE);
        self.repeat_mode = repeat_mode;
        for member in &self.members {
            member.borrow_mut().set_repeat_mode(repeat_mode);
        }
    }

    /// Sets have no repeat count of their own
    fn set_repeat_count(&mut self, repeat_count: RepeatCount) {
        trace!(?repeat_count, "repeat count ignored on animation set");
    }

    fn set_interpolator(&mut self, interpolator: Easing) {
        self.interpolator = interpolator;
        if self.flags.share_interpolator() {
            for member in &self.members {
                member.borrow_mut().set_interpolator(interpolator);
            }
        }
    }

    fn initialize(&mut self, width: f32, height: f32, parent_width: f32, parent_height: f32) {
        let share = self.flags.share_interpolator();
        for member in &self.members {
            let mut member = member.borrow_mut();
            if share {
                member.set_interpolator(self.interpolator);
            }
            member.initialize(width, height, parent_width, parent_height);
        }
        self.dirty = true;

        debug!(width, height, parent_width, parent_height, "animation set initialized");
    }

    /// Maximum of the members' hints; `None` if any member never ends
    fn compute_duration_hint(&self) -> Option<u64> {
        self.members
            .iter()
            .try_fold(0u64, |hint, m| m.borrow().compute_duration_hint().map(|h| hint.max(h)))
    }

    /// Scale every member and the cached duration. The set's own start
    /// offset is left alone.
    fn scale_current_duration(&mut self, scale: f32) {
        for member in &self.members {
            member.borrow_mut().scale_current_duration(scale);
        }
        let scale = scale as f64;
        self.duration *= scale;
        self.explicit_duration = (self.explicit_duration as f64 * scale) as u64;
        self.last_end = self.start_offset + self.duration() as Millis;
    }

    /// True if `target` is a member here or inside any nested member. A
    /// member that cannot be borrowed counts as a match.
    fn contains(&self, target: &dyn Animation) -> bool {
        let address = target as *const _ as *const ();
        self.members.iter().any(|member| {
            member.as_ptr() as *const () == address
                || member
                    .try_borrow()
                    .map_or(true, |member| member.contains(target))
        })
    }

    fn has_alpha(&self) -> bool {
        self.has_alpha
    }

    fn will_change_transformation_matrix(&self) -> bool {
        self.flags.morph_matrix()
    }

    fn will_change_bounds(&self) -> bool {
        self.flags.change_bounds()
    }

    fn has_started(&self) -> bool {
        self.state != SetState::NotStarted
    }

    fn has_ended(&self) -> bool {
        matches!(self.state, SetState::Finished { .. })
    }

    fn reset(&mut self) {
        for member in &self.members {
            member.borrow_mut().reset();
        }
        self.start_time = None;
        self.synced = 0;
        self.state = SetState::NotStarted;
        self.dirty = true;
    }
}

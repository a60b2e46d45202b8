//! Animation scheduler
//!
//! Holds the top-level animations currently attached to elements and samples
//! all of them once per frame.

use slotmap::{new_key_type, SecondaryMap, SlotMap};
use tracing::trace;
use vela_core::Transformation;

use crate::animation::{Millis, SharedAnimation};

new_key_type! {
    pub struct AnimationId;
}

/// Result of sampling one animation
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FrameSample {
    pub transformation: Transformation,
    pub running: bool,
}

/// The animation scheduler that samples all attached animations each frame
pub struct AnimationScheduler {
    animations: SlotMap<AnimationId, SharedAnimation>,
    samples: SecondaryMap<AnimationId, FrameSample>,
}

impl AnimationScheduler {
    pub fn new() -> Self {
        Self {
            animations: SlotMap::with_key(),
            samples: SecondaryMap::new(),
        }
    }

    pub fn add(&mut self, animation: SharedAnimation) -> AnimationId {
        self.animations.insert(animation)
    }

    pub fn get(&self, id: AnimationId) -> Option<&SharedAnimation> {
        self.animations.get(id)
    }

    pub fn remove(&mut self, id: AnimationId) -> Option<SharedAnimation> {
        self.samples.remove(id);
        self.animations.remove(id)
    }

    /// Sample every animation at `now`
    pub fn tick(&mut self, now: Millis) {
        for (id, animation) in self.animations.iter() {
            let mut transformation = Transformation::identity();
            let running = animation
                .borrow_mut()
                .get_transformation(now, &mut transformation);
            self.samples.insert(
                id,
                FrameSample {
                    transformation,
                    running,
                },
            );
        }
        trace!(now, animations = self.animations.len(), "scheduler tick");
    }

    /// Latest sample for an animation, `None` before its first tick
    pub fn sample(&self, id: AnimationId) -> Option<&FrameSample> {
        self.samples.get(id)
    }

    /// Check if any animations are still running (or not yet sampled)
    pub fn has_active_animations(&self) -> bool {
        self.animations
            .keys()
            .any(|id| self.samples.get(id).map_or(true, |s| s.running))
    }

    /// Drop animations that finished on the last tick
    pub fn remove_finished(&mut self) -> usize {
        let finished: Vec<AnimationId> = self
            .samples
            .iter()
            .filter(|(_, s)| !s.running)
            .map(|(id, _)| id)
            .collect();
        for id in &finished {
            self.remove(*id);
        }
        finished.len()
    }

    pub fn len(&self) -> usize {
        self.animations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.animations.is_empty()
    }
}

impl Default for AnimationScheduler {
    fn default() -> Self {
        Self::new()
    }
}

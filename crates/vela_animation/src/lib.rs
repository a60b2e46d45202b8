//! Vela Animation System
//!
//! Tween animations, animation sets and declarative set descriptions.
//!
//! # Features
//!
//! - **Tweens**: translate, scale, rotate and alpha animations with fill,
//!   repeat and easing control
//! - **Animation sets**: play many animations as one, pushing shared timing
//!   down to members and composing their transforms in insertion order
//! - **Descriptions**: build sets from TOML using the animation attribute
//!   names
//! - **Scheduler**: sample every attached animation once per frame
//!
//! # Example
//!
//! ```rust
//! use vela_animation::{Animation, AnimationSet, TweenAnimation};
//! use vela_core::Transformation;
//!
//! let mut set = AnimationSet::new(false);
//! set.add(TweenAnimation::translate((0.0, 0.0), (100.0, 0.0), 300));
//! set.add(TweenAnimation::alpha(0.0, 1.0, 500).with_start_offset(100));
//! assert_eq!(set.duration(), 600);
//!
//! set.initialize(100.0, 100.0, 400.0, 400.0);
//! let mut frame = Transformation::identity();
//! assert!(set.get_transformation(0, &mut frame));
//! ```

pub mod animation;
pub mod config;
pub mod easing;
pub mod error;
pub mod flags;
pub mod presets;
pub mod scheduler;
pub mod set;
pub mod timing;
pub mod tween;

pub use animation::{share, Animation, Millis, RepeatCount, RepeatMode, SharedAnimation};
pub use config::{AnimationConfig, AnimationKind, SetConfig};
pub use easing::Easing;
pub use error::{AnimationError, Result};
pub use flags::PropertyFlags;
pub use presets::{AnimationPreset, SlideEdge};
pub use scheduler::{AnimationId, AnimationScheduler, FrameSample};
pub use set::{AnimationSet, SetState};
pub use timing::{AnimationTiming, Frame};
pub use tween::{Dimension, Tween, TweenAnimation};

//! Declarative animation descriptions
//!
//! Sets can be described in TOML using the same attribute names as the
//! animation API:
//!
//! ```toml
//! shareInterpolator = false
//! duration = 400
//! fillAfter = true
//!
//! [[animation]]
//! type = "translate"
//! fromXDelta = "-100%"
//! toXDelta = 0
//!
//! [[animation]]
//! type = "alpha"
//! fromAlpha = 0.0
//! toAlpha = 1.0
//! startOffset = 100
//! ```
//!
//! `duration`, `fillBefore`, `fillAfter` and `repeatMode` on a set are pushed
//! down to its members; `startOffset` and `shareInterpolator` apply to the set
//! itself. Nested sets use `type = "set"` with their own `[[animation]]`
//! tables.

use std::fs;
use std::path::Path;

use serde::Deserialize;
use tracing::debug;

use crate::animation::{Animation, Millis, RepeatCount, RepeatMode};
use crate::easing::Easing;
use crate::error::Result;
use crate::set::AnimationSet;
use crate::tween::{Dimension, Tween, TweenAnimation};

/// A set description (also the root of a description file)
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SetConfig {
    #[serde(default)]
    pub share_interpolator: bool,
    #[serde(default)]
    pub interpolator: Option<String>,
    #[serde(default)]
    pub duration: Option<u64>,
    #[serde(default)]
    pub fill_before: Option<bool>,
    #[serde(default)]
    pub fill_after: Option<bool>,
    #[serde(default)]
    pub repeat_mode: Option<String>,
    #[serde(default)]
    pub start_offset: Option<Millis>,
    #[serde(default, rename = "animation")]
    pub animations: Vec<AnimationConfig>,
}

/// Kind of a member description
#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AnimationKind {
    Translate,
    Scale,
    Rotate,
    Alpha,
    Set,
}

/// A member description. Which fields apply depends on `type`; unset
/// fields fall back to the neutral value for that kind.
#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnimationConfig {
    #[serde(rename = "type")]
    pub kind: AnimationKind,

    // timing
    #[serde(default)]
    pub duration: Option<u64>,
    #[serde(default)]
    pub start_offset: Option<Millis>,
    #[serde(default)]
    pub fill_before: Option<bool>,
    #[serde(default)]
    pub fill_after: Option<bool>,
    #[serde(default)]
    pub repeat_mode: Option<String>,
    /// Negative repeats forever
    #[serde(default)]
    pub repeat_count: Option<i32>,
    #[serde(default)]
    pub interpolator: Option<String>,

    // translate
    #[serde(default)]
    pub from_x_delta: Dimension,
    #[serde(default)]
    pub to_x_delta: Dimension,
    #[serde(default)]
    pub from_y_delta: Dimension,
    #[serde(default)]
    pub to_y_delta: Dimension,

    // scale
    #[serde(default = "default_one")]
    pub from_x_scale: f32,
    #[serde(default = "default_one")]
    pub to_x_scale: f32,
    #[serde(default = "default_one")]
    pub from_y_scale: f32,
    #[serde(default = "default_one")]
    pub to_y_scale: f32,

    // scale, rotate
    #[serde(default)]
    pub pivot_x: Dimension,
    #[serde(default)]
    pub pivot_y: Dimension,

    // rotate
    #[serde(default)]
    pub from_degrees: f32,
    #[serde(default)]
    pub to_degrees: f32,

    // alpha
    #[serde(default = "default_one")]
    pub from_alpha: f32,
    #[serde(default = "default_one")]
    pub to_alpha: f32,

    // set
    #[serde(default)]
    pub share_interpolator: bool,
    #[serde(default, rename = "animation")]
    pub animations: Vec<AnimationConfig>,
}

fn default_one() -> f32 {
    1.0
}

impl SetConfig {
    /// Parse a description from TOML text
    pub fn from_toml_str(text: &str) -> Result<Self> {
        Ok(toml::from_str(text)?)
    }

    /// Load a description file
    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)?;
        let config = Self::from_toml_str(&text)?;
        debug!(path = %path.display(), members = config.animations.len(), "loaded set description");
        Ok(config)
    }

    /// Build the described set.
    ///
    /// Members are added first, then the pushed-down properties are set so
    /// they win over member values regardless of declaration order.
    pub fn build(&self) -> Result<AnimationSet> {
        let mut set = AnimationSet::new(self.share_interpolator);

        if let Some(name) = &self.interpolator {
            set.set_interpolator(name.parse()?);
        }
        if let Some(offset) = self.start_offset {
            set.set_start_offset(offset);
        }

        for member in &self.animations {
            member.add_to(&mut set)?;
        }

        if let Some(duration) = self.duration {
            set.set_duration(duration);
        }
        if let Some(fill_before) = self.fill_before {
            set.set_fill_before(fill_before);
        }
        if let Some(fill_after) = self.fill_after {
            set.set_fill_after(fill_after);
        }
        if let Some(mode) = &self.repeat_mode {
            set.set_repeat_mode(mode.parse()?);
        }

        Ok(set)
    }
}

impl AnimationConfig {
    fn add_to(&self, set: &mut AnimationSet) -> Result<()> {
        match self.tween() {
            Some(tween) => {
                let anim = self.build_tween(tween)?;
                set.add(anim);
            }
            None => {
                let nested = self.as_set_config().build()?;
                set.add(nested);
            }
        }
        Ok(())
    }

    /// `None` for nested sets
    fn tween(&self) -> Option<Tween> {
        let tween = match self.kind {
            AnimationKind::Translate => Tween::Translate {
                from_x: self.from_x_delta,
                to_x: self.to_x_delta,
                from_y: self.from_y_delta,
                to_y: self.to_y_delta,
            },
            AnimationKind::Scale => Tween::Scale {
                from_x: self.from_x_scale,
                to_x: self.to_x_scale,
                from_y: self.from_y_scale,
                to_y: self.to_y_scale,
                pivot_x: self.pivot_x,
                pivot_y: self.pivot_y,
            },
            AnimationKind::Rotate => Tween::Rotate {
                from_degrees: self.from_degrees,
                to_degrees: self.to_degrees,
                pivot_x: self.pivot_x,
                pivot_y: self.pivot_y,
            },
            AnimationKind::Alpha => Tween::Alpha {
                from: self.from_alpha,
                to: self.to_alpha,
            },
            AnimationKind::Set => return None,
        };
        Some(tween)
    }

    fn build_tween(&self, tween: Tween) -> Result<TweenAnimation> {
        let mut anim = TweenAnimation::new(tween, self.duration.unwrap_or(0));

        if let Some(offset) = self.start_offset {
            anim.set_start_offset(offset);
        }
        if let Some(fill_before) = self.fill_before {
            anim.set_fill_before(fill_before);
        }
        if let Some(fill_after) = self.fill_after {
            anim.set_fill_after(fill_after);
        }
        if let Some(mode) = &self.repeat_mode {
            anim.set_repeat_mode(mode.parse::<RepeatMode>()?);
        }
        if let Some(count) = self.repeat_count {
            anim.set_repeat_count(RepeatCount::from(count));
        }
        if let Some(name) = &self.interpolator {
            anim.set_interpolator(name.parse::<Easing>()?);
        }

        Ok(anim)
    }

    fn as_set_config(&self) -> SetConfig {
        SetConfig {
            share_interpolator: self.share_interpolator,
            interpolator: self.interpolator.clone(),
            duration: self.duration,
            fill_before: self.fill_before,
            fill_after: self.fill_after,
            repeat_mode: self.repeat_mode.clone(),
            start_offset: self.start_offset,
            animations: self.animations.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AnimationError;

    #[test]
    fn test_parse_attributes() {
        let config = SetConfig::from_toml_str(
            r#"
            shareInterpolator = true
            duration = 400
            fillBefore = false
            fillAfter = true
            repeatMode = "reverse"
            startOffset = 25

            [[animation]]
            type = "scale"
            fromXScale = 0.5
            pivotX = "50%"
            pivotY = "50%p"
            "#,
        )
        .unwrap();

        assert!(config.share_interpolator);
        assert_eq!(config.duration, Some(400));
        assert_eq!(config.fill_before, Some(false));
        assert_eq!(config.fill_after, Some(true));
        assert_eq!(config.repeat_mode.as_deref(), Some("reverse"));
        assert_eq!(config.start_offset, Some(25));

        let member = &config.animations[0];
        assert_eq!(member.kind, AnimationKind::Scale);
        assert_eq!(member.from_x_scale, 0.5);
        assert_eq!(member.to_x_scale, 1.0);
        assert_eq!(member.pivot_x, Dimension::RelativeToSelf(0.5));
        assert_eq!(member.pivot_y, Dimension::RelativeToParent(0.5));
    }

    #[test]
    fn test_defaults() {
        let config = SetConfig::from_toml_str("").unwrap();
        assert!(!config.share_interpolator);
        assert!(config.animations.is_empty());

        let set = config.build().unwrap();
        assert!(!set.share_interpolator());
        assert!(set.flags().is_empty());
    }

    #[test]
    fn test_build_pushes_set_properties() {
        let set = SetConfig::from_toml_str(
            r#"
            duration = 250
            fillAfter = true
            repeatMode = "reverse"
            startOffset = 40

            [[animation]]
            type = "alpha"
            fromAlpha = 0.0
            duration = 900
            startOffset = 10

            [[animation]]
            type = "rotate"
            toDegrees = 45
            duration = 100
            "#,
        )
        .unwrap()
        .build()
        .unwrap();

        assert_eq!(set.len(), 2);
        assert_eq!(set.start_offset(), 40);
        assert_eq!(set.duration(), 260);
        for member in set.animations() {
            let member = member.borrow();
            assert_eq!(member.duration(), 250);
            assert!(member.fill_after());
            assert_eq!(member.repeat_mode(), RepeatMode::Reverse);
        }
        // start offsets stay on their owners
        assert_eq!(set.animations()[0].borrow().start_offset(), 10);
    }

    #[test]
    fn test_nested_set() {
        let set = SetConfig::from_toml_str(
            r#"
            [[animation]]
            type = "translate"
            toXDelta = 10
            duration = 100

            [[animation]]
            type = "set"
            startOffset = 100

            [[animation.animation]]
            type = "alpha"
            duration = 300
            "#,
        )
        .unwrap()
        .build()
        .unwrap();

        assert_eq!(set.len(), 2);
        assert_eq!(set.duration(), 400);
        assert!(set.has_alpha());
    }

    #[test]
    fn test_errors() {
        let bad_dimension = SetConfig::from_toml_str(
            r#"
            [[animation]]
            type = "translate"
            toXDelta = "far"
            "#,
        );
        assert!(matches!(bad_dimension, Err(AnimationError::Config(_))));

        let bad_kind = SetConfig::from_toml_str(
            r#"
            [[animation]]
            type = "wobble"
            "#,
        );
        assert!(matches!(bad_kind, Err(AnimationError::Config(_))));

        let bad_mode = SetConfig::from_toml_str(r#"repeatMode = "sideways""#)
            .unwrap()
            .build();
        assert!(matches!(bad_mode, Err(AnimationError::UnknownRepeatMode(_))));

        let bad_easing = SetConfig::from_toml_str(
            r#"
            [[animation]]
            type = "alpha"
            interpolator = "springy"
            "#,
        )
        .unwrap()
        .build();
        assert!(matches!(bad_easing, Err(AnimationError::UnknownInterpolator(_))));
    }
}

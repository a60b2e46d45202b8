//! Easing functions for animations

use std::str::FromStr;

use crate::error::AnimationError;

/// Easing function type
///
/// Maps linear progress (0.0 to 1.0) to eased progress. Used as the
/// interpolator of every timed animation.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub enum Easing {
    #[default]
    Linear,
    /// Starts slow and speeds up (quadratic)
    Accelerate,
    /// Starts fast and slows down (quadratic)
    Decelerate,
    /// Cosine curve, slow at both ends
    AccelerateDecelerate,
    EaseInCubic,
    EaseOutCubic,
    EaseInOutCubic,
    EaseInQuart,
    EaseOutQuart,
    CubicBezier(f32, f32, f32, f32),
}

impl Easing {
    /// Apply the easing function to a progress value (0.0 to 1.0)
    pub fn apply(&self, t: f32) -> f32 {
        match self {
            Easing::Linear => t,
            Easing::Accelerate => t * t,
            Easing::Decelerate => 1.0 - (1.0 - t) * (1.0 - t),
            Easing::AccelerateDecelerate => ((t + 1.0) * std::f32::consts::PI).cos() / 2.0 + 0.5,
            Easing::EaseInCubic => t * t * t,
            Easing::EaseOutCubic => 1.0 - (1.0 - t).powi(3),
            Easing::EaseInOutCubic => {
                if t < 0.5 {
                    4.0 * t * t * t
                } else {
                    1.0 - (-2.0 * t + 2.0).powi(3) / 2.0
                }
            }
            Easing::EaseInQuart => t.powi(4),
            Easing::EaseOutQuart => 1.0 - (1.0 - t).powi(4),
            Easing::CubicBezier(x1, y1, x2, y2) => cubic_bezier_ease(t, *x1, *y1, *x2, *y2),
        }
    }
}

impl FromStr for Easing {
    type Err = AnimationError;

    /// Parse an interpolator name as used in animation descriptions
    fn from_str(name: &str) -> Result<Self, Self::Err> {
        let easing = match name {
            "linear" => Easing::Linear,
            "accelerate" | "easeIn" => Easing::Accelerate,
            "decelerate" | "easeOut" => Easing::Decelerate,
            "accelerateDecelerate" | "easeInOut" => Easing::AccelerateDecelerate,
            "easeInCubic" => Easing::EaseInCubic,
            "easeOutCubic" => Easing::EaseOutCubic,
            "easeInOutCubic" => Easing::EaseInOutCubic,
            "easeInQuart" => Easing::EaseInQuart,
            "easeOutQuart" => Easing::EaseOutQuart,
            other => return parse_cubic_bezier(other),
        };
        Ok(easing)
    }
}

/// `cubicBezier(x1, y1, x2, y2)`
fn parse_cubic_bezier(text: &str) -> Result<Easing, AnimationError> {
    let unknown = || AnimationError::UnknownInterpolator(text.to_string());

    let args = text
        .strip_prefix("cubicBezier(")
        .and_then(|rest| rest.strip_suffix(')'))
        .ok_or_else(unknown)?;

    let values = args
        .split(',')
        .map(|v| v.trim().parse::<f32>())
        .collect::<Result<Vec<_>, _>>()
        .map_err(|_| unknown())?;

    match values.as_slice() {
        [x1, y1, x2, y2] => Ok(Easing::CubicBezier(*x1, *y1, *x2, *y2)),
        _ => Err(unknown()),
    }
}

/// Cubic bezier easing (CSS `cubic-bezier()` semantics).
///
/// Bisection narrows the curve parameter, Newton steps refine it. Computed
/// in f64 to keep adjacent frames monotonic.
fn cubic_bezier_ease(t: f32, x1: f32, y1: f32, x2: f32, y2: f32) -> f32 {
    if t <= 0.0 {
        return 0.0;
    }
    if t >= 1.0 {
        return 1.0;
    }

    let target = t as f64;
    let (x1, y1, x2, y2) = (x1 as f64, y1 as f64, x2 as f64, y2 as f64);

    let mut lo = 0.0_f64;
    let mut hi = 1.0_f64;
    let mut p = target;
    for _ in 0..12 {
        let x = bezier_sample(p, x1, x2);
        if x < target {
            lo = p;
        } else {
            hi = p;
        }
        p = (lo + hi) * 0.5;
    }

    for _ in 0..4 {
        let err = bezier_sample(p, x1, x2) - target;
        let slope = bezier_slope(p, x1, x2);
        if err.abs() < 1e-7 || slope.abs() < 1e-7 {
            break;
        }
        p = (p - err / slope).clamp(0.0, 1.0);
    }

    bezier_sample(p, y1, y2) as f32
}

/// B(t) = 3(1-t)²t·p1 + 3(1-t)t²·p2 + t³ in Horner form
#[inline]
fn bezier_sample(t: f64, p1: f64, p2: f64) -> f64 {
    let a = 1.0 - 3.0 * p2 + 3.0 * p1;
    let b = 3.0 * p2 - 6.0 * p1;
    let c = 3.0 * p1;
    ((a * t + b) * t + c) * t
}

#[inline]
fn bezier_slope(t: f64, p1: f64, p2: f64) -> f64 {
    let a = 1.0 - 3.0 * p2 + 3.0 * p1;
    let b = 3.0 * p2 - 6.0 * p1;
    let c = 3.0 * p1;
    (3.0 * a * t + 2.0 * b) * t + c
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoints() {
        for easing in [
            Easing::Linear,
            Easing::Accelerate,
            Easing::Decelerate,
            Easing::AccelerateDecelerate,
            Easing::EaseInOutCubic,
            Easing::EaseOutQuart,
            Easing::CubicBezier(0.25, 0.1, 0.25, 1.0),
        ] {
            assert!(easing.apply(0.0).abs() < 1e-5, "{easing:?} at 0");
            assert!((easing.apply(1.0) - 1.0).abs() < 1e-5, "{easing:?} at 1");
        }
    }

    #[test]
    fn test_linear_bezier_matches_linear() {
        let bezier = Easing::CubicBezier(0.0, 0.0, 1.0, 1.0);
        for i in 1..10 {
            let t = i as f32 / 10.0;
            assert!((bezier.apply(t) - t).abs() < 1e-3);
        }
    }

    #[test]
    fn test_parse_names() {
        assert_eq!("linear".parse::<Easing>().ok(), Some(Easing::Linear));
        assert_eq!("easeIn".parse::<Easing>().ok(), Some(Easing::Accelerate));
        assert_eq!(
            "cubicBezier(0.4, 0, 0.2, 1)".parse::<Easing>().ok(),
            Some(Easing::CubicBezier(0.4, 0.0, 0.2, 1.0))
        );
        assert!(matches!(
            "bouncy".parse::<Easing>(),
            Err(AnimationError::UnknownInterpolator(name)) if name == "bouncy"
        ));
        assert!("cubicBezier(1, 2)".parse::<Easing>().is_err());
    }
}

//! Frame sampling for the `sample` command

use std::io::Write;

use anyhow::Result;
use serde::Serialize;
use vela_animation::{share, AnimationScheduler, AnimationSet, Millis};

use crate::Bounds;

pub struct SampleOptions {
    pub bounds: Bounds,
    pub step_ms: Millis,
    pub max_frames: usize,
}

/// One sampled frame
#[derive(Debug, Serialize)]
pub struct FrameRecord {
    pub time: Millis,
    pub matrix: [f32; 6],
    pub alpha: f32,
    pub running: bool,
}

/// Play `set` from t=0 until it finishes or `max_frames` is reached
pub fn sample(mut set: AnimationSet, options: &SampleOptions) -> Vec<FrameRecord> {
    use vela_animation::Animation;

    let Bounds {
        width,
        height,
        parent_width,
        parent_height,
    } = options.bounds;
    set.initialize(width, height, parent_width, parent_height);
    set.set_start_time(0);

    let mut scheduler = AnimationScheduler::new();
    let id = scheduler.add(share(set));

    let mut frames = Vec::new();
    let mut now = 0;
    while frames.len() < options.max_frames {
        scheduler.tick(now);
        let Some(sample) = scheduler.sample(id) else {
            break;
        };
        frames.push(FrameRecord {
            time: now,
            matrix: sample.transformation.matrix.elements,
            alpha: sample.transformation.alpha,
            running: sample.running,
        });
        if !sample.running {
            break;
        }
        now += options.step_ms;
    }

    if frames.last().is_some_and(|f| f.running) {
        tracing::warn!(frames = frames.len(), "frame limit reached before the set finished");
    }
    frames
}

pub fn print_frames(out: &mut impl Write, frames: &[FrameRecord], json: bool) -> Result<()> {
    for frame in frames {
        if json {
            serde_json::to_writer(&mut *out, frame)?;
            writeln!(out)?;
        } else {
            let [a, b, c, d, tx, ty] = frame.matrix;
            writeln!(
                out,
                "{:>6} ms  [{a:8.3} {b:8.3} {c:8.3} {d:8.3} {tx:9.3} {ty:9.3}]  alpha {:.3}{}",
                frame.time,
                frame.alpha,
                if frame.running { "" } else { "  (finished)" },
            )?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use vela_animation::TweenAnimation;

    fn options() -> SampleOptions {
        SampleOptions {
            bounds: Bounds {
                width: 100.0,
                height: 100.0,
                parent_width: 400.0,
                parent_height: 400.0,
            },
            step_ms: 50,
            max_frames: 100,
        }
    }

    #[test]
    fn test_sample_until_finished() {
        let mut set = AnimationSet::new(false);
        set.add(TweenAnimation::translate((0.0, 0.0), (100.0, 0.0), 100));

        let frames = sample(set, &options());
        assert_eq!(frames.len(), 3);
        assert_eq!(frames[1].matrix[4], 50.0);
        assert!(!frames[2].running);
    }

    #[test]
    fn test_json_lines() {
        let frames = vec![FrameRecord {
            time: 0,
            matrix: [1.0, 0.0, 0.0, 1.0, 0.0, 0.0],
            alpha: 1.0,
            running: true,
        }];
        let mut out = Vec::new();
        print_frames(&mut out, &frames, true).unwrap();
        let line = String::from_utf8(out).unwrap();
        let value: serde_json::Value = serde_json::from_str(line.trim()).unwrap();
        assert_eq!(value["running"], serde_json::Value::Bool(true));
        assert_eq!(value["time"], 0);
    }
}

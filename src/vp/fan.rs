use super::{Direction, VanishingPoint};
use crate::plan::{Segment, SegmentKind};
use crate::types::Canvas;

/// `count` evenly spaced samples over `[start, end]`, endpoints included.
///
/// A single sample yields `start`; zero samples yield nothing.
pub fn linspace(start: f32, end: f32, count: usize) -> Vec<f32> {
    match count {
        0 => Vec::new(),
        1 => vec![start],
        n => {
            let step = (end - start) / (n - 1) as f32;
            (0..n)
                .map(|i| if i == n - 1 { end } else { start + step * i as f32 })
                .collect()
        }
    }
}

/// Converging lines of one vanishing point, ordered by boundary sample.
///
/// `vp_index` is recorded on each segment so callers can tell fans apart.
pub fn compute_lines(vp: &VanishingPoint, vp_index: usize, canvas: &Canvas) -> Vec<Segment> {
    if !vp.visible {
        return Vec::new();
    }
    let (w, h) = (canvas.width_f(), canvas.height_f());
    let kind = SegmentKind::Converging { vp: vp_index };
    let edge = |t: f32| match vp.direction {
        Direction::Up => [t, h],
        Direction::Down => [t, 0.0],
        Direction::Left => [w, t],
        Direction::Right => [0.0, t],
    };
    let span = match vp.direction {
        Direction::Up | Direction::Down => w,
        Direction::Left | Direction::Right => h,
    };
    linspace(0.0, span, vp.line_count)
        .into_iter()
        .map(|t| Segment::new(edge(t), vp.position, vp.stroke, kind))
        .collect()
}

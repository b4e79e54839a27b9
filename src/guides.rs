//! Horizontal reference lines: evenly spaced guides across the whole
//! canvas, the horizon, and proportion guides below the horizon.
use crate::plan::{Segment, SegmentKind};
use crate::types::{Canvas, Stroke};
use serde::{Deserialize, Serialize};

/// Horizon line with optional depth-proportion guides beneath it.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Horizon {
    /// Horizon height in pixels from the top edge.
    pub y: f32,
    pub proportion_guides: usize,
    pub stroke: Stroke,
}

fn full_width(y: f32, width: f32, stroke: Stroke, kind: SegmentKind) -> Segment {
    Segment::new([0.0, y], [width, y], stroke, kind)
}

/// `count` full-width lines evenly spaced from the top edge to the bottom
/// edge. One guide is placed at mid-height.
pub fn compute_horizontal_guides(count: usize, canvas: &Canvas, stroke: Stroke) -> Vec<Segment> {
    let (w, h) = (canvas.width_f(), canvas.height_f());
    match count {
        0 => Vec::new(),
        1 => vec![full_width(h * 0.5, w, stroke, SegmentKind::Horizontal)],
        n => (0..n)
            .map(|i| {
                let y = i as f32 * h / (n - 1) as f32;
                full_width(y, w, stroke, SegmentKind::Horizontal)
            })
            .collect(),
    }
}

/// `count - 1` lines splitting the band between the horizon and the bottom
/// edge into `count` equal slices.
pub fn compute_proportion_guides(
    horizon_y: f32,
    canvas_height: f32,
    canvas_width: f32,
    count: usize,
    stroke: Stroke,
) -> Vec<Segment> {
    if count <= 1 {
        return Vec::new();
    }
    let step = (canvas_height - horizon_y) / count as f32;
    (1..count)
        .map(|i| {
            full_width(
                horizon_y + i as f32 * step,
                canvas_width,
                stroke,
                SegmentKind::Proportion,
            )
        })
        .collect()
}

/// Horizon segment followed by its proportion guides.
pub fn compute_horizon(horizon: &Horizon, canvas: &Canvas) -> Vec<Segment> {
    let w = canvas.width_f();
    let mut out = Vec::with_capacity(horizon.proportion_guides.max(1));
    out.push(full_width(horizon.y, w, horizon.stroke, SegmentKind::Horizon));
    out.extend(compute_proportion_guides(
        horizon.y,
        canvas.height_f(),
        w,
        horizon.proportion_guides,
        horizon.stroke,
    ));
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_guide_sits_at_mid_height() {
        let canvas = Canvas::new(1200, 800);
        let guides = compute_horizontal_guides(1, &canvas, Stroke::default());
        assert_eq!(guides.len(), 1);
        assert_eq!(guides[0].start, [0.0, 400.0]);
        assert_eq!(guides[0].end, [1200.0, 400.0]);
    }

    #[test]
    fn guides_span_top_to_bottom() {
        let canvas = Canvas::new(1200, 800);
        let guides = compute_horizontal_guides(5, &canvas, Stroke::default());
        let ys: Vec<f32> = guides.iter().map(|s| s.start[1]).collect();
        assert_eq!(ys, vec![0.0, 200.0, 400.0, 600.0, 800.0]);
        assert!(guides.iter().all(|s| s.start[0] == 0.0 && s.end[0] == 1200.0));
        assert!(compute_horizontal_guides(0, &canvas, Stroke::default()).is_empty());
    }

    #[test]
    fn proportion_guides_fill_band_below_horizon() {
        let guides = compute_proportion_guides(400.0, 800.0, 1000.0, 4, Stroke::default());
        let ys: Vec<f32> = guides.iter().map(|s| s.start[1]).collect();
        assert_eq!(ys, vec![500.0, 600.0, 700.0]);
        assert!(guides.iter().all(|s| s.kind == SegmentKind::Proportion));
        assert!(compute_proportion_guides(400.0, 800.0, 1000.0, 1, Stroke::default()).is_empty());
        assert!(compute_proportion_guides(400.0, 800.0, 1000.0, 0, Stroke::default()).is_empty());
    }

    #[test]
    fn horizon_leads_its_guides() {
        let horizon = Horizon {
            y: 360.0,
            proportion_guides: 3,
            stroke: Stroke::default(),
        };
        let segs = compute_horizon(&horizon, &Canvas::new(1200, 800));
        assert_eq!(segs.len(), 3);
        assert_eq!(segs[0].kind, SegmentKind::Horizon);
        assert_eq!(segs[0].start[1], 360.0);
    }
}

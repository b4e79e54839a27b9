//! Render plan: the drawable primitives produced by the engine.
//!
//! A plan is backend-agnostic. Coordinates are pixels on `canvas`; the
//! stroke and color fields are carried through untouched for the rasterizer.
use crate::types::{Canvas, Color, Point, Stroke};
use nalgebra::{Matrix3, Vector3};
use serde::{Deserialize, Serialize};

/// Which generator produced a segment.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", tag = "type")]
pub enum SegmentKind {
    /// Fan line of the vanishing point at index `vp`.
    Converging { vp: usize },
    Horizontal,
    Horizon,
    Proportion,
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Segment {
    pub start: Point,
    pub end: Point,
    pub stroke: Stroke,
    pub kind: SegmentKind,
    /// Arc length already covered by earlier pieces of the same line. The
    /// dash pattern of the piece starts at this phase.
    #[serde(default)]
    pub dash_offset: f32,
}

impl Segment {
    pub fn new(start: Point, end: Point, stroke: Stroke, kind: SegmentKind) -> Self {
        Self {
            start,
            end,
            stroke,
            kind,
            dash_offset: 0.0,
        }
    }

    pub fn length(&self) -> f32 {
        let dx = self.end[0] - self.start[0];
        let dy = self.end[1] - self.start[1];
        (dx * dx + dy * dy).sqrt()
    }

    /// Point at parameter `t` in [0,1] along the segment.
    pub fn lerp(&self, t: f32) -> Point {
        [
            self.start[0] + (self.end[0] - self.start[0]) * t,
            self.start[1] + (self.end[1] - self.start[1]) * t,
        ]
    }

    /// Split into `pieces` equal consecutive segments sharing stroke and kind.
    pub fn subdivide(&self, pieces: usize) -> Vec<Segment> {
        if pieces <= 1 {
            return vec![*self];
        }
        let n = pieces as f32;
        let mut parts: Vec<Segment> = (0..pieces)
            .map(|i| {
                let a = if i == 0 { self.start } else { self.lerp(i as f32 / n) };
                let b = if i + 1 == pieces {
                    self.end
                } else {
                    self.lerp((i + 1) as f32 / n)
                };
                Segment::new(a, b, self.stroke, self.kind)
            })
            .collect();
        chain_dash_offsets(&mut parts, self.dash_offset);
        parts
    }

    pub fn map_points(&self, f: impl Fn(Point) -> Point) -> Segment {
        Segment {
            start: f(self.start),
            end: f(self.end),
            ..*self
        }
    }

    /// Whether `next` continues this line: same stroke and kind, sharing the
    /// joint, with a dash phase carried over.
    pub fn continues_into(&self, next: &Segment) -> bool {
        next.dash_offset > 0.0
            && next.start == self.end
            && next.stroke == self.stroke
            && next.kind == self.kind
    }
}

/// Set each piece's dash phase to `start` plus the lengths of the pieces
/// before it.
pub fn chain_dash_offsets(pieces: &mut [Segment], start: f32) {
    let mut offset = start;
    for piece in pieces {
        piece.dash_offset = offset;
        offset += piece.length();
    }
}

/// Labelled point drawn as a filled disc.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Marker {
    pub position: Point,
    pub label: String,
    pub color: Color,
    pub radius: f32,
}

/// Ordered drawable primitives for one render.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RenderPlan {
    pub canvas: Canvas,
    pub background: Color,
    /// Multiplier applied to the alpha of every line and marker.
    pub opacity: f32,
    pub segments: Vec<Segment>,
    pub markers: Vec<Marker>,
}

impl RenderPlan {
    pub fn new(canvas: Canvas, background: Color, opacity: f32) -> Self {
        Self {
            canvas,
            background,
            opacity,
            segments: Vec::new(),
            markers: Vec::new(),
        }
    }

    pub fn count_kind(&self, pred: impl Fn(&SegmentKind) -> bool) -> usize {
        self.segments.iter().filter(|s| pred(&s.kind)).count()
    }

    /// Map this plan onto a canvas of a different size. Stroke widths and
    /// marker radii scale with the mean of the two axis factors.
    pub fn rescaled(&self, dst: Canvas) -> RenderPlan {
        let m = self.canvas.rescale_to(&dst);
        let width_scale = 0.5 * (m[(0, 0)] + m[(1, 1)]);
        let map = |p: Point| transform_point(&m, p);
        let segments = self
            .segments
            .iter()
            .map(|s| {
                let mut out = s.map_points(map);
                out.stroke.width *= width_scale;
                out.dash_offset *= width_scale;
                out
            })
            .collect();
        let markers = self
            .markers
            .iter()
            .map(|mk| Marker {
                position: map(mk.position),
                label: mk.label.clone(),
                color: mk.color,
                radius: mk.radius * width_scale,
            })
            .collect();
        RenderPlan {
            canvas: dst,
            background: self.background,
            opacity: self.opacity,
            segments,
            markers,
        }
    }
}

fn transform_point(m: &Matrix3<f32>, p: Point) -> Point {
    let v = m * Vector3::new(p[0], p[1], 1.0);
    [v[0] / v[2], v[1] / v[2]]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seg(a: Point, b: Point) -> Segment {
        Segment::new(a, b, Stroke::default(), SegmentKind::Horizontal)
    }

    #[test]
    fn subdivide_chains_pieces() {
        let s = seg([0.0, 0.0], [90.0, 30.0]);
        let parts = s.subdivide(3);
        assert_eq!(parts.len(), 3);
        assert_eq!(parts[0].start, s.start);
        assert_eq!(parts[2].end, s.end);
        for w in parts.windows(2) {
            assert_eq!(w[0].end, w[1].start);
        }
        assert!((parts[1].start[0] - 30.0).abs() < 1e-4);
        assert_eq!(s.subdivide(0), vec![s]);
    }

    #[test]
    fn subdivided_pieces_carry_dash_phase() {
        let parts = seg([0.0, 0.0], [90.0, 0.0]).subdivide(3);
        assert_eq!(parts[0].dash_offset, 0.0);
        assert!((parts[1].dash_offset - 30.0).abs() < 1e-4);
        assert!((parts[2].dash_offset - 60.0).abs() < 1e-4);
        assert!(!parts[0].continues_into(&parts[0]));
        assert!(parts[0].continues_into(&parts[1]));
        assert!(parts[1].continues_into(&parts[2]));

        let other = seg([0.0, 0.0], [0.0, 90.0]).subdivide(3);
        assert!(!parts[2].continues_into(&other[1]));
    }

    #[test]
    fn dash_offset_defaults_when_absent_from_json() {
        let json = r##"{"start":[0,0],"end":[4,0],"stroke":{"color":"#000000","style":"dash","width":1.0},"kind":{"type":"horizontal"}}"##;
        let s: Segment = serde_json::from_str(json).unwrap();
        assert_eq!(s.dash_offset, 0.0);
    }

    #[test]
    fn rescaled_doubles_coordinates_and_widths() {
        let mut plan = RenderPlan::new(Canvas::new(100, 50), Color::WHITE, 1.0);
        plan.segments.push(seg([10.0, 5.0], [100.0, 50.0]));
        plan.markers.push(Marker {
            position: [50.0, 25.0],
            label: "VP1".into(),
            color: Color::BLACK,
            radius: 3.0,
        });
        let big = plan.rescaled(Canvas::new(200, 100));
        assert_eq!(big.canvas, Canvas::new(200, 100));
        assert_eq!(big.segments[0].start, [20.0, 10.0]);
        assert_eq!(big.segments[0].end, [200.0, 100.0]);
        assert!((big.segments[0].stroke.width - 2.4).abs() < 1e-5);
        assert_eq!(big.markers[0].position, [100.0, 50.0]);
        assert_eq!(big.markers[0].radius, 6.0);
    }
}

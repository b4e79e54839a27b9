//! Geometry engine: `GridConfig` in, `RenderPlan` out.
//!
//! The engine is a pure function of its configuration. Geometry is built in
//! undistorted pixel space first (guides, horizon, converging fans, markers)
//! and the distortion warp is applied afterwards to every endpoint and
//! marker position.
//!
//! Emission order is fixed: horizontal guides, horizon and proportion
//! guides, then fans in vanishing-point order; VP markers precede plane
//! markers.

use crate::distortion::{apply_distortion, Distortion};
use crate::guides::{compute_horizon, compute_horizontal_guides, Horizon};
use crate::markers::{plane_markers, vp_markers, PlaneMarker};
use crate::plan::{chain_dash_offsets, Marker, RenderPlan, Segment};
use crate::presets::Preset;
use crate::types::{Canvas, Color, Stroke};
use crate::vp::{compute_lines, VanishingPoint};
use log::debug;
use std::borrow::Cow;

/// Full render request, in pixel coordinates.
#[derive(Clone, Debug, PartialEq)]
pub struct GridConfig {
    pub canvas: Canvas,
    /// Manually configured vanishing points (1–5). Replaced by the preset
    /// when one is selected.
    pub vanishing_points: Vec<VanishingPoint>,
    pub horizontal_guides: usize,
    /// Stroke of the horizontal guides.
    pub grid_stroke: Stroke,
    pub background: Color,
    /// Alpha multiplier for all lines and markers, in [0,1].
    pub grid_opacity: f32,
    pub distortion: Distortion,
    pub preset: Option<Preset>,
    /// Stroke given to preset fans.
    pub preset_stroke: Stroke,
    pub horizon: Option<Horizon>,
    pub plane_markers: Vec<PlaneMarker>,
    pub show_vp_markers: bool,
    /// Pieces each segment is split into before warping (>=1).
    pub subdivisions: usize,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            canvas: Canvas::default(),
            vanishing_points: Vec::new(),
            horizontal_guides: 0,
            grid_stroke: Stroke::default(),
            background: Color::WHITE,
            grid_opacity: 1.0,
            distortion: Distortion::None,
            preset: None,
            preset_stroke: Stroke::default(),
            horizon: None,
            plane_markers: Vec::new(),
            show_vp_markers: false,
            subdivisions: 1,
        }
    }
}

impl GridConfig {
    /// Vanishing points in effect: the preset's templates resolved against
    /// the canvas, or the manual list.
    pub fn effective_vanishing_points(&self) -> Cow<'_, [VanishingPoint]> {
        match self.preset {
            Some(preset) => {
                let resolved = preset
                    .templates()
                    .iter()
                    .map(|t| t.resolve(&self.canvas, self.preset_stroke))
                    .collect::<Vec<_>>();
                debug!(
                    "engine: preset {} replaces {} manual vanishing points with {}",
                    preset,
                    self.vanishing_points.len(),
                    resolved.len()
                );
                Cow::Owned(resolved)
            }
            None => Cow::Borrowed(&self.vanishing_points),
        }
    }
}

/// Compute the complete render plan for `config`.
pub fn compute_render_plan(config: &GridConfig) -> RenderPlan {
    let canvas = config.canvas;
    let mut plan = RenderPlan::new(canvas, config.background, config.grid_opacity);

    let mut raw: Vec<Segment> =
        compute_horizontal_guides(config.horizontal_guides, &canvas, config.grid_stroke);
    if let Some(horizon) = &config.horizon {
        raw.extend(compute_horizon(horizon, &canvas));
    }
    let vps = config.effective_vanishing_points();
    for (i, vp) in vps.iter().enumerate() {
        raw.extend(compute_lines(vp, i, &canvas));
    }

    let mut markers: Vec<Marker> = Vec::new();
    if config.show_vp_markers {
        markers.extend(vp_markers(&vps));
    }
    markers.extend(plane_markers(&config.plane_markers));

    if config.distortion.is_identity() {
        plan.segments = raw;
        plan.markers = markers;
    } else {
        let center = canvas.center();
        let warp = |p| apply_distortion(p, center, config.distortion, &canvas);
        let pieces = config.subdivisions.max(1);
        for s in &raw {
            let mut warped: Vec<Segment> = s
                .subdivide(pieces)
                .iter()
                .map(|p| p.map_points(warp))
                .collect();
            chain_dash_offsets(&mut warped, s.dash_offset);
            plan.segments.extend(warped);
        }
        plan.markers = markers
            .into_iter()
            .map(|mut m| {
                m.position = warp(m.position);
                m
            })
            .collect();
    }

    debug!(
        "engine: {}x{} -> {} segments, {} markers ({} vanishing points, distortion={:?})",
        canvas.width,
        canvas.height,
        plan.segments.len(),
        plan.markers.len(),
        vps.len(),
        config.distortion
    );
    plan
}

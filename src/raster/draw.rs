//! Rasterization of a [`RenderPlan`] into an RGBA buffer with AGG.
//!
//! Consecutive segments that continue one another (pieces of a subdivided
//! line) are joined into one polyline, so the dash pattern and the stroke
//! joins run across the pieces. Paths go through `conv_dash` and
//! `conv_stroke` and are filled by the anti-aliased scanline rasterizer,
//! clipped to the canvas.
use crate::plan::{Marker, RenderPlan, Segment};
use crate::types::{Color, LineStyle, Point, Stroke};
use agg_rust::basics::VertexSource;
use agg_rust::color::Rgba8;
use agg_rust::conv_dash::ConvDash;
use agg_rust::conv_stroke::ConvStroke;
use agg_rust::ellipse::Ellipse;
use agg_rust::math_stroke::LineCap;
use agg_rust::path_storage::PathStorage;
use agg_rust::pixfmt_rgba::PixfmtRgba32;
use agg_rust::rasterizer_scanline_aa::RasterizerScanlineAa;
use agg_rust::renderer_base::RendererBase;
use agg_rust::renderer_scanline::render_scanlines_aa_solid;
use agg_rust::rendering_buffer::RowAccessor;
use agg_rust::scanline_u::ScanlineU8;
use image::{Rgba, RgbaImage};
use log::debug;

const DEGENERATE_LEN: f32 = 1e-4;
/// Shortest dash that still reads as a dot after anti-aliasing.
const MIN_DASH_PX: f64 = 1.5;

/// Draws a plan onto a fresh image filled with the plan background.
pub fn rasterize(plan: &RenderPlan) -> RgbaImage {
    let mut canvas = Rasterizer::new(plan.canvas.width, plan.canvas.height, plan.background);
    canvas.opacity = plan.opacity.clamp(0.0, 1.0);
    let lines = canvas.draw_segments(&plan.segments);
    for marker in &plan.markers {
        canvas.draw_marker(marker);
    }
    debug!(
        "raster: drew {} segments as {} polylines and {} markers on {}x{}",
        plan.segments.len(),
        lines,
        plan.markers.len(),
        plan.canvas.width,
        plan.canvas.height
    );
    canvas.into_image()
}

/// `(dash, gap)` lengths for a stroke, `None` for solid lines. Lengths scale
/// with the stroke width.
pub fn dash_lengths(stroke: &Stroke) -> Option<(f64, f64)> {
    let w = f64::from(stroke.width.max(1.0));
    match stroke.style {
        LineStyle::Solid => None,
        LineStyle::Dot => Some((w.max(MIN_DASH_PX), 2.0 * w.max(MIN_DASH_PX))),
        LineStyle::Dash => Some(((3.7 * w).max(MIN_DASH_PX), 1.6 * w)),
    }
}

pub struct Rasterizer {
    img: RgbaImage,
    ras: RasterizerScanlineAa,
    sl: ScanlineU8,
    /// Alpha multiplier for everything drawn.
    pub opacity: f32,
}

impl Rasterizer {
    pub fn new(width: u32, height: u32, background: Color) -> Self {
        let mut ras = RasterizerScanlineAa::new();
        ras.clip_box(0.0, 0.0, f64::from(width), f64::from(height));
        Self {
            img: RgbaImage::from_pixel(width, height, Rgba(background.to_array())),
            ras,
            sl: ScanlineU8::new(),
            opacity: 1.0,
        }
    }

    pub fn image(&self) -> &RgbaImage {
        &self.img
    }

    pub fn into_image(self) -> RgbaImage {
        self.img
    }

    fn agg_color(&self, color: Color) -> Rgba8 {
        let alpha = (f32::from(color.a) * self.opacity).round().clamp(0.0, 255.0);
        Rgba8::new(
            u32::from(color.r),
            u32::from(color.g),
            u32::from(color.b),
            alpha as u32,
        )
    }

    /// Fill the outline produced by `vs` with `color` (non-zero winding).
    fn fill_path(&mut self, vs: &mut dyn VertexSource, color: Color) {
        let (width, height) = self.img.dimensions();
        if width == 0 || height == 0 {
            return;
        }
        let rgba = self.agg_color(color);
        if rgba.a == 0 {
            return;
        }
        let mut rows = RowAccessor::new();
        // The accessor writes into `self.img`, which is not touched again
        // until `rows` is dropped at the end of this call.
        unsafe { rows.attach(self.img.as_mut_ptr(), width, height, (width * 4) as i32) };
        let mut ren = RendererBase::new(PixfmtRgba32::new(&mut rows));
        self.ras.reset();
        self.ras.add_path(vs, 0);
        render_scanlines_aa_solid(&mut self.ras, &mut self.sl, &mut ren, &rgba);
    }

    /// Draw all segments, joining chains of continuing pieces. Returns the
    /// number of polylines drawn.
    pub fn draw_segments(&mut self, segments: &[Segment]) -> usize {
        let mut lines = 0;
        for chain in segments.chunk_by(|a, b| a.continues_into(b)) {
            self.draw_polyline(chain);
            lines += 1;
        }
        lines
    }

    /// Stroke a chain of segments where each one starts at the previous end.
    /// Stroke and dash phase come from the first piece.
    pub fn draw_polyline(&mut self, chain: &[Segment]) {
        let Some(first) = chain.first() else {
            return;
        };
        let finite = |p: Point| p[0].is_finite() && p[1].is_finite();
        if !chain.iter().all(|s| finite(s.start) && finite(s.end)) {
            debug!("raster: skipping non-finite line of {} pieces", chain.len());
            return;
        }
        let stroke = first.stroke;
        let total: f32 = chain.iter().map(Segment::length).sum();
        if total < DEGENERATE_LEN {
            self.fill_disc(first.start, 0.5 * stroke.width.max(1.0), stroke.color);
            return;
        }

        let mut path = PathStorage::new();
        path.move_to(f64::from(first.start[0]), f64::from(first.start[1]));
        for s in chain {
            path.line_to(f64::from(s.end[0]), f64::from(s.end[1]));
        }
        let width = f64::from(stroke.width.max(1.0));

        match dash_lengths(&stroke) {
            None => {
                let mut outline = ConvStroke::new(&mut path);
                outline.set_width(width);
                outline.set_line_cap(LineCap::Butt);
                self.fill_path(&mut outline, stroke.color);
            }
            Some((dash, gap)) => {
                let mut dashed = ConvDash::new(&mut path);
                dashed.add_dash(dash, gap);
                dashed.dash_start(f64::from(first.dash_offset).rem_euclid(dash + gap));
                let mut outline = ConvStroke::new(dashed);
                outline.set_width(width);
                outline.set_line_cap(LineCap::Butt);
                self.fill_path(&mut outline, stroke.color);
            }
        }
    }

    pub fn draw_marker(&mut self, marker: &Marker) {
        self.fill_disc(marker.position, marker.radius, marker.color);
    }

    /// Anti-aliased filled disc.
    pub fn fill_disc(&mut self, center: Point, radius: f32, color: Color) {
        let finite = center[0].is_finite() && center[1].is_finite();
        if !finite || radius.is_nan() || radius <= 0.0 {
            return;
        }
        let r = f64::from(radius);
        let mut disc = Ellipse::new(f64::from(center[0]), f64::from(center[1]), r, r, 0, false);
        self.fill_path(&mut disc, color);
    }
}

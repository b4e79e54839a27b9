#![doc = include_str!("../README.md")]

// Geometry engine
pub mod distortion;
pub mod engine;
pub mod guides;
pub mod markers;
pub mod plan;
pub mod presets;
pub mod types;
pub mod vp;

// Caller side: configuration, rasterization, reporting.
pub mod config;
pub mod diagnostics;
pub mod ffi;
pub mod raster;

// --- High-level re-exports -------------------------------------------------

pub use crate::distortion::{apply_distortion, Distortion};
pub use crate::engine::{compute_render_plan, GridConfig};
pub use crate::guides::{compute_horizontal_guides, compute_proportion_guides, Horizon};
pub use crate::plan::{Marker, RenderPlan, Segment, SegmentKind};
pub use crate::presets::{resolve_preset, Preset};
pub use crate::types::{Canvas, Color, LineStyle, Point, Stroke};
pub use crate::vp::{compute_lines, Direction, VanishingPoint, VanishingPointTemplate};

// --- Prelude ---------------------------------------------------------------

/// Small prelude for quick experiments.
///
/// ```no_run
/// use perspective_grid::prelude::*;
///
/// let config = GridConfig {
///     canvas: Canvas::new(1200, 800),
///     vanishing_points: vec![VanishingPoint::new([600.0, 360.0], Direction::Up, 24)],
///     horizontal_guides: 10,
///     ..Default::default()
/// };
/// let plan = compute_render_plan(&config);
/// let image = rasterize(&plan);
/// image.save("grid.png").unwrap();
/// ```
pub mod prelude {
    pub use crate::raster::rasterize;
    pub use crate::{
        compute_render_plan, Canvas, Direction, Distortion, GridConfig, Preset, RenderPlan,
        VanishingPoint,
    };
}

use crate::distortion::Distortion;
use crate::engine::GridConfig;
use crate::guides::Horizon;
use crate::markers::{Plane, PlaneMarker};
use crate::presets::{Preset, NO_PRESET};
use crate::types::{Canvas, Color, LineStyle, Point, Stroke};
use crate::vp::{Direction, VanishingPoint};
use log::warn;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

pub const MAX_VANISHING_POINTS: usize = 5;
pub const MAX_CANVAS_SIDE: u32 = 3000;
pub const MAX_EXPORT_SCALE: f32 = 4.0;
pub const MAX_EXPORT_SIDE: u32 = 8000;
pub const MAX_LINE_COUNT: usize = 80;
pub const MAX_HORIZONTAL_GUIDES: usize = 50;
pub const MAX_PROPORTION_GUIDES: usize = 50;
pub const MAX_SUBDIVISIONS: usize = 256;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderToolConfig {
    #[serde(default)]
    pub grid: GridSettings,
    pub output: RenderOutputConfig,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderOutputConfig {
    pub image: PathBuf,
    #[serde(default)]
    pub plan_json: Option<PathBuf>,
    #[serde(default)]
    pub report_json: Option<PathBuf>,
}

/// Canvas-relative grid description, as read from JSON.
#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GridSettings {
    pub canvas: Canvas,
    pub vanishing_points: Vec<VanishingPointSettings>,
    /// Display name of a preset, or `"None"`.
    pub preset: Option<String>,
    pub horizontal_guides: usize,
    pub grid_color: Color,
    pub grid_style: LineStyle,
    pub grid_width: f32,
    pub background: Color,
    pub grid_opacity: f32,
    pub distortion: Distortion,
    pub subdivisions: usize,
    pub horizon: Option<HorizonSettings>,
    pub plane_markers: Vec<PlaneMarkerSettings>,
    pub show_vp_markers: bool,
    /// Output resolution multiplier applied after planning.
    pub export_scale: f32,
}

impl Default for GridSettings {
    fn default() -> Self {
        Self {
            canvas: Canvas::default(),
            vanishing_points: vec![VanishingPointSettings::default()],
            preset: None,
            horizontal_guides: 10,
            grid_color: Stroke::default().color,
            grid_style: LineStyle::Solid,
            grid_width: Stroke::default().width,
            background: Color::WHITE,
            grid_opacity: 1.0,
            distortion: Distortion::None,
            subdivisions: 1,
            horizon: None,
            plane_markers: Vec::new(),
            show_vp_markers: false,
            export_scale: 1.0,
        }
    }
}

#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct VanishingPointSettings {
    /// Fraction of canvas width.
    pub x: f32,
    /// Fraction of canvas height, measured from the top edge.
    pub y: f32,
    pub direction: Direction,
    pub line_count: usize,
    pub color: Color,
    pub style: LineStyle,
    pub width: f32,
    pub visible: bool,
}

impl Default for VanishingPointSettings {
    fn default() -> Self {
        let stroke = Stroke::default();
        Self {
            x: 0.5,
            y: 0.45,
            direction: Direction::Up,
            line_count: 24,
            color: stroke.color,
            style: stroke.style,
            width: stroke.width,
            visible: true,
        }
    }
}

impl VanishingPointSettings {
    fn resolve(&self, canvas: &Canvas) -> VanishingPoint {
        let vp = VanishingPoint::new(canvas.resolve([self.x, self.y]), self.direction, self.line_count)
            .with_stroke(Stroke::new(self.color, self.style, self.width));
        if self.visible {
            vp
        } else {
            vp.hidden()
        }
    }
}

#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct HorizonSettings {
    /// Fraction of canvas height, measured from the top edge.
    pub y: f32,
    pub proportion_guides: usize,
    /// Defaults to the grid stroke.
    pub color: Option<Color>,
    pub style: Option<LineStyle>,
    pub width: Option<f32>,
}

impl Default for HorizonSettings {
    fn default() -> Self {
        Self {
            y: 0.45,
            proportion_guides: 0,
            color: None,
            style: None,
            width: None,
        }
    }
}

#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaneMarkerSettings {
    pub plane: Plane,
    /// Fractional position; the plane's default placement when absent.
    #[serde(default)]
    pub position: Option<Point>,
    #[serde(default = "default_true")]
    pub visible: bool,
    #[serde(default)]
    pub color: Option<Color>,
}

fn default_true() -> bool {
    true
}

fn check_at_most(label: &str, v: usize, max: usize) -> Result<(), String> {
    if v <= max {
        Ok(())
    } else {
        Err(format!("{label} must be at most {max}, got {v}"))
    }
}

fn check_finite(label: &str, v: f32) -> Result<(), String> {
    if v.is_finite() {
        Ok(())
    } else {
        Err(format!("{label} must be finite, got {v}"))
    }
}

impl GridSettings {
    pub fn grid_stroke(&self) -> Stroke {
        Stroke::new(self.grid_color, self.grid_style, self.grid_width)
    }

    /// Preset selected by name. `"None"` and unknown names select nothing.
    pub fn selected_preset(&self) -> Option<Preset> {
        let name = self.preset.as_deref()?;
        if name == NO_PRESET {
            return None;
        }
        let preset = Preset::from_name(name);
        if preset.is_none() {
            warn!("unknown preset {name:?}, using manual vanishing points");
        }
        preset
    }

    pub fn validate(&self) -> Result<(), String> {
        self.validate_with(self.selected_preset())
    }

    fn validate_with(&self, preset: Option<Preset>) -> Result<(), String> {
        let Canvas { width, height } = self.canvas;
        if width == 0 || height == 0 {
            return Err(format!("canvas must be positive, got {width}x{height}"));
        }
        if width > MAX_CANVAS_SIDE || height > MAX_CANVAS_SIDE {
            return Err(format!(
                "canvas sides must be at most {MAX_CANVAS_SIDE}, got {width}x{height}"
            ));
        }
        if self.vanishing_points.len() > MAX_VANISHING_POINTS {
            return Err(format!(
                "at most {MAX_VANISHING_POINTS} vanishing points are supported, got {}",
                self.vanishing_points.len()
            ));
        }
        if self.vanishing_points.is_empty() && preset.is_none() {
            return Err("at least one vanishing point or a preset is required".to_string());
        }
        for (i, vp) in self.vanishing_points.iter().enumerate() {
            check_finite(&format!("vanishingPoints[{i}].x"), vp.x)?;
            check_finite(&format!("vanishingPoints[{i}].y"), vp.y)?;
            if vp.line_count == 0 {
                return Err(format!("vanishingPoints[{i}].lineCount must be >= 1"));
            }
            check_at_most(
                &format!("vanishingPoints[{i}].lineCount"),
                vp.line_count,
                MAX_LINE_COUNT,
            )?;
            if !(vp.width.is_finite() && vp.width > 0.0) {
                return Err(format!("vanishingPoints[{i}].width must be positive"));
            }
        }
        check_at_most("horizontalGuides", self.horizontal_guides, MAX_HORIZONTAL_GUIDES)?;
        if !(self.grid_width.is_finite() && self.grid_width > 0.0) {
            return Err(format!("gridWidth must be positive, got {}", self.grid_width));
        }
        if !(0.0..=1.0).contains(&self.grid_opacity) {
            return Err(format!("gridOpacity {} outside [0, 1]", self.grid_opacity));
        }
        self.distortion.validate()?;
        if self.subdivisions == 0 {
            return Err("subdivisions must be >= 1".to_string());
        }
        check_at_most("subdivisions", self.subdivisions, MAX_SUBDIVISIONS)?;
        if !(self.export_scale.is_finite() && self.export_scale > 0.0) {
            return Err(format!("exportScale must be positive, got {}", self.export_scale));
        }
        if self.export_scale > MAX_EXPORT_SCALE {
            return Err(format!(
                "exportScale must be at most {MAX_EXPORT_SCALE}, got {}",
                self.export_scale
            ));
        }
        let export = self.export_canvas();
        if export.width > MAX_EXPORT_SIDE || export.height > MAX_EXPORT_SIDE {
            return Err(format!(
                "exported image sides must be at most {MAX_EXPORT_SIDE}, got {}x{}",
                export.width, export.height
            ));
        }
        if let Some(h) = &self.horizon {
            check_finite("horizon.y", h.y)?;
            check_at_most("horizon.proportionGuides", h.proportion_guides, MAX_PROPORTION_GUIDES)?;
        }
        for (i, m) in self.plane_markers.iter().enumerate() {
            if let Some(p) = m.position {
                check_finite(&format!("planeMarkers[{i}].position.x"), p[0])?;
                check_finite(&format!("planeMarkers[{i}].position.y"), p[1])?;
            }
        }
        Ok(())
    }

    /// Resolve fractions to pixels and build the engine configuration.
    pub fn to_grid_config(&self) -> Result<GridConfig, String> {
        let preset = self.selected_preset();
        self.validate_with(preset)?;
        let canvas = self.canvas;
        let grid_stroke = self.grid_stroke();
        let vanishing_points = self
            .vanishing_points
            .iter()
            .map(|vp| vp.resolve(&canvas))
            .collect();
        let preset_stroke = self
            .vanishing_points
            .first()
            .map(|vp| Stroke::new(vp.color, vp.style, vp.width))
            .unwrap_or(grid_stroke);
        let horizon = self.horizon.as_ref().map(|h| Horizon {
            y: h.y * canvas.height_f(),
            proportion_guides: h.proportion_guides,
            stroke: Stroke::new(
                h.color.unwrap_or(grid_stroke.color),
                h.style.unwrap_or(grid_stroke.style),
                h.width.unwrap_or(grid_stroke.width),
            ),
        });
        let plane_markers = self
            .plane_markers
            .iter()
            .map(|m| {
                let fraction = m.position.unwrap_or_else(|| m.plane.default_fraction());
                PlaneMarker {
                    plane: m.plane,
                    position: canvas.resolve(fraction),
                    visible: m.visible,
                    color: m.color.unwrap_or_else(|| m.plane.default_color()),
                }
            })
            .collect();
        Ok(GridConfig {
            canvas,
            vanishing_points,
            horizontal_guides: self.horizontal_guides,
            grid_stroke,
            background: self.background,
            grid_opacity: self.grid_opacity,
            distortion: self.distortion,
            preset,
            preset_stroke,
            horizon,
            plane_markers,
            show_vp_markers: self.show_vp_markers,
            subdivisions: self.subdivisions,
        })
    }

    /// Canvas of the exported image.
    pub fn export_canvas(&self) -> Canvas {
        let scale = |v: u32| ((v as f32 * self.export_scale).round() as u32).max(1);
        Canvas::new(scale(self.canvas.width), scale(self.canvas.height))
    }
}

pub fn load_config(path: &Path) -> Result<RenderToolConfig, String> {
    let data = fs::read_to_string(path)
        .map_err(|e| format!("Failed to read config {}: {e}", path.display()))?;
    parse_config(&data).map_err(|e| format!("Failed to parse config {}: {e}", path.display()))
}

pub fn parse_config(json: &str) -> Result<RenderToolConfig, String> {
    serde_json::from_str(json).map_err(|e| e.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::compute_render_plan;
    use crate::plan::SegmentKind;

    #[test]
    fn defaults_reproduce_one_point_grid() {
        let cfg = parse_config(r#"{ "output": { "image": "grid.png" } }"#).unwrap();
        let grid = cfg.grid.to_grid_config().unwrap();
        assert_eq!(grid.canvas, Canvas::new(1200, 800));
        assert_eq!(grid.vanishing_points.len(), 1);
        let vp = grid.vanishing_points[0];
        assert!((vp.position[0] - 600.0).abs() < 1e-3);
        assert!((vp.position[1] - 360.0).abs() < 1e-3);
        assert_eq!(vp.line_count, 24);
        let plan = compute_render_plan(&grid);
        assert_eq!(plan.count_kind(|k| *k == SegmentKind::Horizontal), 10);
        assert_eq!(plan.segments.len(), 34);
        assert!(cfg.output.plan_json.is_none());
    }

    #[test]
    fn full_document_parses() {
        let cfg = parse_config(
            r##"{
                "grid": {
                    "canvas": { "width": 800, "height": 600 },
                    "vanishingPoints": [
                        { "x": 0.1, "y": 0.5, "direction": "right", "lineCount": 12,
                          "color": "#ff0000", "style": "dash", "width": 2.0 },
                        { "x": 1.3, "y": 0.5, "direction": "left", "visible": false }
                    ],
                    "preset": "None",
                    "distortion": { "kind": "curvature", "strength": 0.3 },
                    "subdivisions": 6,
                    "horizon": { "y": 0.5, "proportionGuides": 5 },
                    "planeMarkers": [ { "plane": "ceiling" }, { "plane": "wall", "position": [0.9, 0.5] } ],
                    "showVpMarkers": true,
                    "exportScale": 2.0
                },
                "output": { "image": "out/a.png", "planJson": "out/a.json" }
            }"##,
        )
        .unwrap();
        let grid = cfg.grid.to_grid_config().unwrap();
        assert!(grid.preset.is_none());
        assert_eq!(grid.vanishing_points[0].stroke.style, LineStyle::Dash);
        assert!(!grid.vanishing_points[1].visible);
        assert!((grid.vanishing_points[1].position[0] - 1040.0).abs() < 1e-3);
        let horizon = grid.horizon.expect("horizon");
        assert_eq!(horizon.y, 300.0);
        let ceiling = grid.plane_markers[0].position;
        assert!((ceiling[0] - 400.0).abs() < 1e-3 && (ceiling[1] - 60.0).abs() < 1e-3);
        assert_eq!(grid.plane_markers[1].color, Plane::Wall.default_color());
        assert_eq!(cfg.grid.export_canvas(), Canvas::new(1600, 1200));
    }

    #[test]
    fn preset_names_are_lenient_and_unknown_falls_back() {
        let mut settings = GridSettings {
            preset: Some("interior room".into()),
            ..Default::default()
        };
        assert_eq!(settings.selected_preset(), Some(Preset::InteriorRoom));
        settings.preset = Some("Nonexistent".into());
        let grid = settings.to_grid_config().unwrap();
        assert!(grid.preset.is_none());
        assert_eq!(grid.vanishing_points.len(), 1);
    }

    #[test]
    fn invalid_ranges_are_rejected() {
        let bad = |f: fn(&mut GridSettings)| {
            let mut s = GridSettings::default();
            f(&mut s);
            s.validate().unwrap_err()
        };
        assert!(bad(|s| s.canvas.width = 0).contains("canvas"));
        assert!(bad(|s| s.vanishing_points = vec![VanishingPointSettings::default(); 6]).contains("at most"));
        assert!(bad(|s| s.vanishing_points.clear()).contains("preset"));
        assert!(bad(|s| s.vanishing_points[0].line_count = 0).contains("lineCount"));
        assert!(bad(|s| s.vanishing_points[0].x = f32::NAN).contains("finite"));
        assert!(bad(|s| s.grid_opacity = 1.5).contains("gridOpacity"));
        assert!(bad(|s| s.distortion = Distortion::Fisheye { strength: 3.0 }).contains("fisheye"));
        assert!(bad(|s| s.subdivisions = 0).contains("subdivisions"));
        assert!(bad(|s| s.export_scale = 0.0).contains("exportScale"));
    }

    #[test]
    fn oversized_inputs_are_rejected() {
        let bad = |f: fn(&mut GridSettings)| {
            let mut s = GridSettings::default();
            f(&mut s);
            s.validate().unwrap_err()
        };
        assert!(bad(|s| s.canvas = Canvas::new(200_000, 200_000)).contains("canvas"));
        assert!(bad(|s| s.canvas.height = MAX_CANVAS_SIDE + 1).contains("canvas"));
        assert!(bad(|s| s.vanishing_points[0].line_count = 4_000_000_000).contains("lineCount"));
        assert!(bad(|s| s.horizontal_guides = 4_000_000_000).contains("horizontalGuides"));
        assert!(bad(|s| s.subdivisions = 4_000_000_000).contains("subdivisions"));
        assert!(bad(|s| s.export_scale = 1e9).contains("exportScale"));
        assert!(bad(|s| {
            s.canvas = Canvas::new(MAX_CANVAS_SIDE, 100);
            s.export_scale = MAX_EXPORT_SCALE;
        })
        .contains("exported image"));
        assert!(bad(|s| {
            s.horizon = Some(HorizonSettings {
                proportion_guides: MAX_PROPORTION_GUIDES + 1,
                ..Default::default()
            })
        })
        .contains("proportionGuides"));

        let mut limits = GridSettings {
            canvas: Canvas::new(MAX_CANVAS_SIDE, MAX_CANVAS_SIDE),
            horizontal_guides: MAX_HORIZONTAL_GUIDES,
            subdivisions: MAX_SUBDIVISIONS,
            export_scale: 2.0,
            ..Default::default()
        };
        limits.vanishing_points[0].line_count = MAX_LINE_COUNT;
        assert!(limits.validate().is_ok());
    }

    #[test]
    fn unknown_preset_is_reported_once_per_conversion() {
        use log::{Level, LevelFilter, Log, Metadata, Record};
        use std::sync::atomic::{AtomicUsize, Ordering};

        const NAME: &str = "Bauhaus Stairwell";
        static WARNINGS: AtomicUsize = AtomicUsize::new(0);

        struct Counter;
        impl Log for Counter {
            fn enabled(&self, metadata: &Metadata) -> bool {
                metadata.level() <= Level::Warn
            }
            fn log(&self, record: &Record) {
                if record.args().to_string().contains(NAME) {
                    WARNINGS.fetch_add(1, Ordering::SeqCst);
                }
            }
            fn flush(&self) {}
        }
        static COUNTER: Counter = Counter;

        if log::set_logger(&COUNTER).is_err() {
            return;
        }
        log::set_max_level(LevelFilter::Warn);

        let settings = GridSettings {
            vanishing_points: Vec::new(),
            preset: Some(NAME.into()),
            ..Default::default()
        };
        assert!(settings.to_grid_config().is_err());
        assert_eq!(WARNINGS.load(Ordering::SeqCst), 1);

        let settings = GridSettings {
            preset: Some(NAME.into()),
            ..Default::default()
        };
        assert!(settings.to_grid_config().unwrap().preset.is_none());
        assert_eq!(WARNINGS.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn empty_manual_list_is_fine_with_preset() {
        let settings = GridSettings {
            vanishing_points: Vec::new(),
            preset: Some("Storyboard".into()),
            ..Default::default()
        };
        let grid = settings.to_grid_config().unwrap();
        assert_eq!(grid.preset, Some(Preset::Storyboard));
        assert_eq!(grid.preset_stroke, settings.grid_stroke());
    }
}

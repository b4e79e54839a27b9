//! Overlay markers: vanishing-point dots and named plane markers.
use crate::plan::Marker;
use crate::types::{Color, Point};
use crate::vp::VanishingPoint;
use serde::{Deserialize, Serialize};

pub const VP_MARKER_RADIUS: f32 = 5.0;
pub const PLANE_MARKER_RADIUS: f32 = 7.0;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Plane {
    Floor,
    Wall,
    Ceiling,
}

impl Plane {
    pub fn label(self) -> &'static str {
        match self {
            Plane::Floor => "Floor",
            Plane::Wall => "Wall",
            Plane::Ceiling => "Ceiling",
        }
    }

    /// Default placement as a fraction of the canvas.
    pub fn default_fraction(self) -> Point {
        match self {
            Plane::Floor => [0.5, 0.9],
            Plane::Wall => [0.1, 0.5],
            Plane::Ceiling => [0.5, 0.1],
        }
    }

    pub fn default_color(self) -> Color {
        match self {
            Plane::Floor => Color::rgb(0x2e, 0x8b, 0x57),
            Plane::Wall => Color::rgb(0x1e, 0x90, 0xff),
            Plane::Ceiling => Color::rgb(0xff, 0x8c, 0x00),
        }
    }
}

/// Named point in pixels with a visibility toggle.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct PlaneMarker {
    pub plane: Plane,
    pub position: Point,
    pub visible: bool,
    pub color: Color,
}

impl PlaneMarker {
    pub fn new(plane: Plane, position: Point) -> Self {
        Self {
            plane,
            position,
            visible: true,
            color: plane.default_color(),
        }
    }
}

/// One marker per visible vanishing point, labelled `VP1`, `VP2`, ...
/// after the point's position in the list.
pub fn vp_markers(vps: &[VanishingPoint]) -> Vec<Marker> {
    vps.iter()
        .enumerate()
        .filter(|(_, vp)| vp.visible)
        .map(|(i, vp)| Marker {
            position: vp.position,
            label: format!("VP{}", i + 1),
            color: vp.stroke.color,
            radius: VP_MARKER_RADIUS,
        })
        .collect()
}

pub fn plane_markers(markers: &[PlaneMarker]) -> Vec<Marker> {
    markers
        .iter()
        .filter(|m| m.visible)
        .map(|m| Marker {
            position: m.position,
            label: m.plane.label().to_string(),
            color: m.color,
            radius: PLANE_MARKER_RADIUS,
        })
        .collect()
}

//! Vanishing points and the converging-line fans drawn towards them.
//!
//! A vanishing point owns a fan of `line_count` lines. Each line starts on
//! the canvas edge selected by [`Direction`] and ends at the point itself.
//! Positions are always in pixels here; fractional positions are resolved
//! by the caller (see [`VanishingPointTemplate::resolve`]).

mod fan;

pub use fan::{compute_lines, linspace};

use crate::types::{Canvas, Point, Stroke};
use serde::{Deserialize, Serialize};

/// Canvas edge a fan originates from, named after the direction the lines
/// travel towards the vanishing point.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    /// Lines start on the bottom edge.
    Up,
    /// Lines start on the top edge.
    Down,
    /// Lines start on the right edge.
    Left,
    /// Lines start on the left edge.
    Right,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Direction::Up => "Up",
            Direction::Down => "Down",
            Direction::Left => "Left",
            Direction::Right => "Right",
        }
    }
}

/// One control point of the grid, resolved to pixel coordinates.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VanishingPoint {
    pub position: Point,
    pub direction: Direction,
    pub line_count: usize,
    pub stroke: Stroke,
    pub visible: bool,
}

impl VanishingPoint {
    pub fn new(position: Point, direction: Direction, line_count: usize) -> Self {
        Self {
            position,
            direction,
            line_count,
            stroke: Stroke::default(),
            visible: true,
        }
    }

    pub fn with_stroke(mut self, stroke: Stroke) -> Self {
        self.stroke = stroke;
        self
    }

    pub fn hidden(mut self) -> Self {
        self.visible = false;
        self
    }
}

/// Canvas-relative vanishing point used by presets.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VanishingPointTemplate {
    /// Position as a fraction of canvas width/height.
    pub position: Point,
    pub line_count: usize,
    pub direction: Direction,
}

impl VanishingPointTemplate {
    pub const fn new(x: f32, y: f32, line_count: usize, direction: Direction) -> Self {
        Self {
            position: [x, y],
            line_count,
            direction,
        }
    }

    /// Resolve against a canvas, attaching the stroke used for preset fans.
    pub fn resolve(&self, canvas: &Canvas, stroke: Stroke) -> VanishingPoint {
        VanishingPoint::new(canvas.resolve(self.position), self.direction, self.line_count)
            .with_stroke(stroke)
    }
}

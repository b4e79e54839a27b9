//! Shared value types: canvas geometry and the stroke attributes carried
//! through the engine as pass-through metadata.
use nalgebra::{Matrix3, Vector3};
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// Pixel-space point, origin top-left, y pointing down.
pub type Point = [f32; 2];

/// Drawing surface in pixels. Defines the coordinate space of a render.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Canvas {
    pub width: u32,
    pub height: u32,
}

impl Canvas {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    #[inline]
    pub fn width_f(&self) -> f32 {
        self.width as f32
    }

    #[inline]
    pub fn height_f(&self) -> f32 {
        self.height as f32
    }

    /// Canvas midpoint, the center of every distortion warp.
    pub fn center(&self) -> Point {
        [self.width_f() * 0.5, self.height_f() * 0.5]
    }

    /// Larger of the two dimensions, used to normalize radial distances.
    pub fn max_dim(&self) -> f32 {
        self.width.max(self.height) as f32
    }

    /// Homogeneous transform mapping fractional coordinates in [0,1]² to pixels.
    pub fn fraction_transform(&self) -> Matrix3<f32> {
        Matrix3::new(
            self.width_f(),
            0.0,
            0.0,
            0.0,
            self.height_f(),
            0.0,
            0.0,
            0.0,
            1.0,
        )
    }

    /// Resolve a fractional position to pixels. Values outside [0,1] land
    /// off-canvas and are kept as-is.
    pub fn resolve(&self, fraction: Point) -> Point {
        let v = self.fraction_transform() * Vector3::new(fraction[0], fraction[1], 1.0);
        [v[0], v[1]]
    }

    /// Transform taking pixel coordinates on `self` to pixel coordinates on `dst`.
    pub fn rescale_to(&self, dst: &Canvas) -> Matrix3<f32> {
        if self.width == 0 || self.height == 0 {
            return Matrix3::identity();
        }
        let sx = dst.width_f() / self.width_f();
        let sy = dst.height_f() / self.height_f();
        Matrix3::new(sx, 0.0, 0.0, 0.0, sy, 0.0, 0.0, 0.0, 1.0)
    }
}

impl Default for Canvas {
    fn default() -> Self {
        Self::new(1200, 800)
    }
}

/// 8-bit RGBA color. Serialized as a `#rrggbb` or `#rrggbbaa` hex string.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const BLACK: Color = Color::rgb(0, 0, 0);
    pub const WHITE: Color = Color::rgb(255, 255, 255);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub fn with_alpha(self, a: u8) -> Self {
        Self { a, ..self }
    }

    pub fn to_array(self) -> [u8; 4] {
        [self.r, self.g, self.b, self.a]
    }
}

impl FromStr for Color {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let hex = s.trim().trim_start_matches('#');
        let channel = |i: usize| {
            u8::from_str_radix(&hex[i..i + 2], 16)
                .map_err(|e| format!("Invalid color {s:?}: {e}"))
        };
        match hex.len() {
            6 if hex.is_ascii() => Ok(Color::rgb(channel(0)?, channel(2)?, channel(4)?)),
            8 if hex.is_ascii() => Ok(Color::rgba(
                channel(0)?,
                channel(2)?,
                channel(4)?,
                channel(6)?,
            )),
            _ => Err(format!(
                "Invalid color {s:?}: expected #rrggbb or #rrggbbaa"
            )),
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.a == 255 {
            write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
        } else {
            write!(
                f,
                "#{:02x}{:02x}{:02x}{:02x}",
                self.r, self.g, self.b, self.a
            )
        }
    }
}

impl Serialize for Color {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Color {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(de::Error::custom)
    }
}

/// Dash pattern of a stroked line.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LineStyle {
    #[default]
    Solid,
    Dot,
    Dash,
}

/// Rendering attributes of a line. Opaque to the geometry engine.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Stroke {
    pub color: Color,
    pub style: LineStyle,
    pub width: f32,
}

impl Stroke {
    pub fn new(color: Color, style: LineStyle, width: f32) -> Self {
        Self {
            color,
            style,
            width,
        }
    }
}

impl Default for Stroke {
    fn default() -> Self {
        Self {
            color: Color::rgb(0x22, 0x22, 0x22),
            style: LineStyle::Solid,
            width: 1.2,
        }
    }
}

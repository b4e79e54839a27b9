//! Empirical 2D warps applied to generated geometry.
//!
//! Both warps are centered on the canvas midpoint and act pointwise. They
//! are not camera models: the fisheye pushes points outward quadratically in
//! normalized distance, the curvature warp bends x along a sine.
use crate::types::{Canvas, Point};
use nalgebra::Vector2;
use serde::{Deserialize, Serialize};

pub const FISHEYE_MAX_STRENGTH: f32 = 2.0;
pub const CURVATURE_MAX_STRENGTH: f32 = 1.0;

#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", tag = "kind")]
pub enum Distortion {
    #[default]
    None,
    Fisheye {
        strength: f32,
    },
    Curvature {
        strength: f32,
    },
}

impl Distortion {
    pub fn is_identity(&self) -> bool {
        match *self {
            Distortion::None => true,
            Distortion::Fisheye { strength } | Distortion::Curvature { strength } => {
                strength == 0.0
            }
        }
    }

    /// Checks the strength against the accepted range of the warp.
    pub fn validate(&self) -> Result<(), String> {
        let (name, strength, max) = match *self {
            Distortion::None => return Ok(()),
            Distortion::Fisheye { strength } => ("fisheye", strength, FISHEYE_MAX_STRENGTH),
            Distortion::Curvature { strength } => ("curvature", strength, CURVATURE_MAX_STRENGTH),
        };
        if !strength.is_finite() || !(0.0..=max).contains(&strength) {
            return Err(format!(
                "{name} strength {strength} outside [0, {max}]"
            ));
        }
        Ok(())
    }
}

/// Warp `point` around `center`. The canvas supplies the normalization
/// lengths; a zero-sized canvas leaves points untouched.
pub fn apply_distortion(point: Point, center: Point, distortion: Distortion, canvas: &Canvas) -> Point {
    match distortion {
        Distortion::None => point,
        Distortion::Fisheye { strength } => {
            let max_dim = canvas.max_dim();
            if max_dim <= 0.0 {
                return point;
            }
            let c = Vector2::new(center[0], center[1]);
            let d = Vector2::new(point[0], point[1]) - c;
            let r = d.norm() / max_dim;
            let out = c + d * (1.0 + strength * r * r);
            [out.x, out.y]
        }
        Distortion::Curvature { strength } => {
            let width = canvas.width_f();
            if width <= 0.0 {
                return point;
            }
            let dx = point[0] - center[0];
            let factor = 1.0 + strength * (std::f32::consts::PI * dx / width).sin();
            [center[0] + dx * factor, point[1]]
        }
    }
}

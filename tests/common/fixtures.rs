use perspective_grid::{Canvas, Direction, GridConfig, Point, VanishingPoint};

/// One vanishing point at (0.5, 0.45) of a 1200x800 canvas, fanning up from
/// the bottom edge with 24 lines.
pub fn one_point_config() -> GridConfig {
    let canvas = Canvas::new(1200, 800);
    GridConfig {
        canvas,
        vanishing_points: vec![VanishingPoint::new(
            canvas.resolve([0.5, 0.45]),
            Direction::Up,
            24,
        )],
        ..Default::default()
    }
}

pub fn approx_pt(a: Point, b: Point, tol: f32) -> bool {
    (a[0] - b[0]).abs() <= tol && (a[1] - b[1]).abs() <= tol
}

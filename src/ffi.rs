//! C ABI helpers for front ends that only need the warps.
use crate::distortion::{apply_distortion, Distortion};
use crate::types::Canvas;

/// `kind`: 0 = none, 1 = fisheye, 2 = curvature.
fn distortion_from_raw(kind: u32, strength: f32) -> Option<Distortion> {
    match kind {
        0 => Some(Distortion::None),
        1 => Some(Distortion::Fisheye { strength }),
        2 => Some(Distortion::Curvature { strength }),
        _ => None,
    }
}

/// Warps `point_count` interleaved `x, y` pairs in place around the center
/// of a `width × height` canvas. Returns the number of points written or -1
/// on invalid arguments, including counts that do not fit the return type.
///
/// # Safety
/// Dereferences raw pointers
#[no_mangle]
pub unsafe extern "C" fn pgrid_apply_distortion_points(
    width: u32,
    height: u32,
    kind: u32,
    strength: f32,
    pts_ptr: *mut f32,
    point_count: usize,
) -> i32 {
    if pts_ptr.is_null() {
        return -1;
    }
    let Ok(written) = i32::try_from(point_count) else {
        return -1;
    };
    let Some(float_count) = point_count.checked_mul(2) else {
        return -1;
    };
    let Some(distortion) = distortion_from_raw(kind, strength) else {
        return -1;
    };
    if distortion.validate().is_err() {
        return -1;
    }
    let canvas = Canvas::new(width, height);
    let center = canvas.center();
    let pts = unsafe { std::slice::from_raw_parts_mut(pts_ptr, float_count) };
    for pair in pts.chunks_exact_mut(2) {
        let out = apply_distortion([pair[0], pair[1]], center, distortion, &canvas);
        pair[0] = out[0];
        pair[1] = out[1];
    }
    written
}

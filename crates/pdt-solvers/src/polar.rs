//! Distance at angle placement.

use glam::DVec3;
use pdt_core::{ViewOrientation, WorkingPlane};

/// Folds an angle into the opposite half-plane.
pub fn flip_angle(angle: f64) -> f64 {
    if angle > 0.0 {
        angle - 180.0
    } else {
        angle + 180.0
    }
}

/// Returns the offset of length `distance` at `angle` degrees in `plane`.
///
/// The angle is measured from the plane's first axis towards its second.
/// The height axis component is always zero: polar placement is a purely
/// in-plane operation.
pub fn polar_offset(
    distance: f64,
    angle: f64,
    plane: WorkingPlane,
    flip: bool,
    view: &ViewOrientation,
) -> DVec3 {
    let angle = if flip { flip_angle(angle) } else { angle };
    let (sin, cos) = angle.to_radians().sin_cos();
    let planar = glam::DVec2::new(distance * cos, distance * sin);
    let local = plane.axes().lift(planar, 0.0);
    plane.from_plane_frame(local, view)
}

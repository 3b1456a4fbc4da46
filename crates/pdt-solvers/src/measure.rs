//! Distance and angle measurement between selected points.

use glam::DVec3;
use pdt_core::{PdtError, Result, ViewOrientation, WorkingPlane, EPSILON};

/// A measured distance and angle in degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Measurement {
    pub distance: f64,
    pub angle: f64,
}

/// Measures from `p1` to `p2`: the 3D distance and the direction angle in the
/// working plane, counter-clockwise from the plane's first axis.
pub fn distance_angle(
    p1: DVec3,
    p2: DVec3,
    plane: WorkingPlane,
    view: &ViewOrientation,
) -> Measurement {
    let delta = p2 - p1;
    let planar = plane.axes().project(plane.to_plane_frame(delta, view));
    Measurement {
        distance: delta.length(),
        angle: planar.y.atan2(planar.x).to_degrees(),
    }
}

/// Measures the angle at `vertex` between `a` and `c`, and the distance from
/// `vertex` to `c`.
pub fn angle_at_vertex(a: DVec3, vertex: DVec3, c: DVec3) -> Result<Measurement> {
    let arm_a = a - vertex;
    let arm_c = c - vertex;
    if arm_a.length() <= EPSILON || arm_c.length() <= EPSILON {
        return Err(PdtError::CoincidentPoints);
    }
    Ok(Measurement {
        distance: arm_c.length(),
        angle: arm_a.angle_between(arm_c).to_degrees(),
    })
}

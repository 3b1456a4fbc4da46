//! Intersection of two lines in the working plane.
//!
//! Both lines are projected into the plane and written in homogeneous form.
//! The cross product of two homogeneous lines is their homogeneous
//! intersection point; a zero `w` component means the lines are parallel.

use glam::{DVec2, DVec3};
use pdt_core::{PdtError, Result, ViewOrientation, WorkingPlane, EPSILON};

/// Intersects line A (`active`, `other`) with line B (`last`, `first`).
///
/// The intersection is found in 2D and lifted back to 3D at the height of
/// `active`. On the view plane the points are taken relative to `active`,
/// the height is zero in the view frame and the result is offset back by
/// `active`.
pub fn intersection(
    active: DVec3,
    other: DVec3,
    last: DVec3,
    first: DVec3,
    plane: WorkingPlane,
    view: &ViewOrientation,
) -> Result<DVec3> {
    let axes = plane.axes();
    let (line_a, line_b) = if plane.is_view() {
        let to_view = |p: DVec3| axes.project(view.to_local(p - active));
        (
            (to_view(last), to_view(first)),
            (to_view(other), DVec2::ZERO),
        )
    } else {
        (
            (axes.project(last), axes.project(first)),
            (axes.project(active), axes.project(other)),
        )
    };

    let planar = intersect_2d(line_a, line_b).ok_or_else(|| {
        log::debug!("no intersection on {plane}: {line_a:?} / {line_b:?}");
        PdtError::NoIntersection
    })?;

    if plane.is_view() {
        Ok(view.to_world(axes.lift(planar, 0.0)) + active)
    } else {
        Ok(axes.lift(planar, active[axes.a3]))
    }
}

/// Intersects two infinite 2D lines given by point pairs.
fn intersect_2d(a: (DVec2, DVec2), b: (DVec2, DVec2)) -> Option<DVec2> {
    let line_a = a.0.extend(1.0).cross(a.1.extend(1.0));
    let line_b = b.0.extend(1.0).cross(b.1.extend(1.0));
    let hit = line_a.cross(line_b);

    // `hit.z` is the 2D cross product of the line normals, so compare it
    // against their lengths to get a scale-free parallelism test.
    let scale = line_a.truncate().length() * line_b.truncate().length();
    if scale <= EPSILON * EPSILON || hit.z.abs() <= EPSILON * scale {
        return None;
    }
    Some(DVec2::new(hit.x / hit.z, hit.y / hit.z))
}

/// Returns the index of the candidate closest to `target`.
///
/// Ties go to the earlier candidate.
pub fn nearest(target: DVec3, candidates: &[DVec3]) -> Option<usize> {
    candidates
        .iter()
        .enumerate()
        .min_by(|(_, a), (_, b)| {
            a.distance_squared(target)
                .total_cmp(&b.distance_squared(target))
        })
        .map(|(i, _)| i)
}

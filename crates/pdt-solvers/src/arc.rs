//! Centre of the circle through three points.

use glam::DVec3;
use pdt_core::{PdtError, Result, EPSILON};

/// A circle through three points.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Arc {
    pub centre: DVec3,
    pub radius: f64,
}

/// Returns the circumcentre and circumradius of the triangle `a`, `b`, `c`.
///
/// Collinear or coincident points have no finite circumcircle and are
/// reported as [`PdtError::CollinearPoints`].
pub fn arc_centre(a: DVec3, b: DVec3, c: DVec3) -> Result<Arc> {
    let len_a = c.distance(b);
    let len_b = c.distance(a);
    let len_c = b.distance(a);
    let longest = len_a.max(len_b).max(len_c);

    // Heron's formula loses all precision for slivers, so degeneracy is
    // judged on the cross product instead.
    let twice_area = (b - a).cross(c - a).length();
    if longest <= EPSILON || twice_area <= 2.0 * EPSILON * longest * longest {
        log::debug!("collinear arc points {a} {b} {c}");
        return Err(PdtError::CollinearPoints);
    }

    let s = (len_a + len_b + len_c) / 2.0;
    let heron = (s * (s - len_a) * (s - len_b) * (s - len_c)).max(0.0).sqrt();
    let area = if heron > 0.0 { heron } else { twice_area / 2.0 };
    let radius = len_a * len_b * len_c / (4.0 * area);

    let (a2, b2, c2) = (len_a * len_a, len_b * len_b, len_c * len_c);
    let w1 = a2 * (b2 + c2 - a2);
    let w2 = b2 * (a2 + c2 - b2);
    let w3 = c2 * (a2 + b2 - c2);
    let centre = (a * w1 + b * w2 + c * w3) / (w1 + w2 + w3);

    Ok(Arc { centre, radius })
}

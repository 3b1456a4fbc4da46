//! Perpendicular placement on a line.

use glam::DVec3;
use pdt_core::{PdtError, Result, EPSILON};

/// Returns the foot of the perpendicular from `point` to the line `a`-`b`.
///
/// The line is infinite; the foot may lie outside the segment.
pub fn perpendicular_foot(point: DVec3, a: DVec3, b: DVec3) -> Result<DVec3> {
    let dir = b - a;
    let len_sq = dir.length_squared();
    if len_sq <= EPSILON * EPSILON {
        return Err(PdtError::CoincidentPoints);
    }
    let t = (point - a).dot(dir) / len_sq;
    Ok(a + dir * t)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_foot() {
        let foot = perpendicular_foot(
            DVec3::new(1.0, 5.0, 0.0),
            DVec3::new(0.0, 0.0, 0.0),
            DVec3::new(4.0, 0.0, 0.0),
        )
        .unwrap();
        assert_eq!(foot, DVec3::new(1.0, 0.0, 0.0));
    }

    #[test]
    fn test_foot_beyond_segment() {
        let foot = perpendicular_foot(
            DVec3::new(-3.0, 1.0, 1.0),
            DVec3::new(0.0, 0.0, 0.0),
            DVec3::new(1.0, 0.0, 0.0),
        )
        .unwrap();
        assert_eq!(foot, DVec3::new(-3.0, 0.0, 0.0));
    }

    #[test]
    fn test_coincident() {
        let p = DVec3::ONE;
        assert!(matches!(
            perpendicular_foot(DVec3::ZERO, p, p),
            Err(PdtError::CoincidentPoints)
        ));
    }
}

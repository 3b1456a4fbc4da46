//! Percentage of the way between two points.

use glam::DVec3;
use pdt_core::{PdtError, Result};

/// Returns the percentage actually applied.
///
/// Moves always measure from the far point; other operations only do so when
/// `flip` is set.
pub fn effective_percent(percent: f64, flip: bool, is_move: bool) -> f64 {
    if flip || is_move {
        100.0 - percent
    } else {
        percent
    }
}

/// Returns `p1 + (p2 - p1) * percent / 100` after flip handling.
pub fn percent_point(p1: DVec3, p2: DVec3, percent: f64, flip: bool, is_move: bool) -> DVec3 {
    let fraction = effective_percent(percent, flip, is_move) / 100.0;
    p1 + (p2 - p1) * fraction
}

/// Percentage solver over a selection.
///
/// Fails unless exactly two points are given.
pub fn percent_between(points: &[DVec3], percent: f64, flip: bool, is_move: bool) -> Result<DVec3> {
    match points {
        [p1, p2] => Ok(percent_point(*p1, *p2, percent, flip, is_move)),
        _ => Err(PdtError::SelectionCount {
            expected: "exactly 2 vertices or objects",
            found: points.len(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const P1: DVec3 = DVec3::new(0.0, 0.0, 0.0);
    const P2: DVec3 = DVec3::new(2.0, 4.0, -6.0);

    #[test]
    fn test_endpoints_and_midpoint() {
        assert_eq!(percent_point(P1, P2, 0.0, false, false), P1);
        assert_eq!(percent_point(P1, P2, 100.0, false, false), P2);
        assert_eq!(percent_point(P1, P2, 50.0, false, false), DVec3::new(1.0, 2.0, -3.0));
    }

    #[test]
    fn test_flip_and_move() {
        assert_eq!(effective_percent(25.0, true, false), 75.0);
        assert_eq!(effective_percent(25.0, false, true), 75.0);
        assert_eq!(effective_percent(25.0, true, true), 75.0);
        assert_eq!(effective_percent(25.0, false, false), 25.0);
        assert_eq!(percent_point(P1, P2, 0.0, true, false), P2);
    }

    #[test]
    fn test_selection_count() {
        let err = percent_between(&[P1], 50.0, false, false).unwrap_err();
        assert!(matches!(err, PdtError::SelectionCount { found: 1, .. }));
        let err = percent_between(&[P1, P2, P1], 50.0, false, false).unwrap_err();
        assert!(matches!(err, PdtError::SelectionCount { found: 3, .. }));
    }
}

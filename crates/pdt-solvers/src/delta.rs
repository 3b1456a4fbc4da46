//! Absolute and relative coordinates.

use glam::DVec3;

/// Builds a vector from three typed values.
pub fn vector_from_values(values: [f64; 3]) -> DVec3 {
    DVec3::from_array(values)
}

/// Absolute placement: the typed values are the point.
pub fn absolute(values: [f64; 3]) -> DVec3 {
    vector_from_values(values)
}

/// Relative placement: `base` offset by the typed values.
pub fn delta(base: DVec3, offset: DVec3) -> DVec3 {
    base + offset
}

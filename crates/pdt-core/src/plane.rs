//! Working planes and the axes they select.
//!
//! Two-dimensional operations (angles, intersections, measurements) work on
//! two "active" axes of the current working plane. The remaining axis is the
//! height axis and is carried through unchanged.

use std::fmt;
use std::str::FromStr;

use glam::{DVec2, DVec3};
use serde::{Deserialize, Serialize};

use crate::error::{PdtError, Result};
use crate::view::ViewOrientation;

/// The plane that constrains 2D operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum WorkingPlane {
    /// Front view plane, height along Z.
    #[default]
    XY,
    /// Side plane, height along Y.
    XZ,
    /// Side plane, height along X.
    YZ,
    /// Plane of the active viewport. Points are rotated into the view frame
    /// first, where the plane behaves like `XY`.
    #[serde(rename = "LO")]
    View,
}

/// Axis indices selected by a working plane.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlaneAxes {
    /// First in-plane axis (the angle's zero direction).
    pub a1: usize,
    /// Second in-plane axis.
    pub a2: usize,
    /// Height axis, perpendicular to the plane.
    pub a3: usize,
}

impl PlaneAxes {
    /// Projects a point onto the two in-plane axes.
    pub fn project(&self, point: DVec3) -> DVec2 {
        DVec2::new(point[self.a1], point[self.a2])
    }

    /// Builds a point from in-plane coordinates and a height.
    pub fn lift(&self, planar: DVec2, height: f64) -> DVec3 {
        let mut out = DVec3::ZERO;
        out[self.a1] = planar.x;
        out[self.a2] = planar.y;
        out[self.a3] = height;
        out
    }
}

impl WorkingPlane {
    /// All planes, in panel order.
    pub const ALL: [WorkingPlane; 4] = [Self::XY, Self::XZ, Self::YZ, Self::View];

    /// Returns the active and height axes for this plane.
    ///
    /// For [`WorkingPlane::View`] the indices refer to the view-local frame.
    pub fn axes(self) -> PlaneAxes {
        match self {
            Self::XY | Self::View => PlaneAxes { a1: 0, a2: 1, a3: 2 },
            Self::XZ => PlaneAxes { a1: 0, a2: 2, a3: 1 },
            Self::YZ => PlaneAxes { a1: 1, a2: 2, a3: 0 },
        }
    }

    /// Returns whether points must be rotated into the view frame.
    pub fn is_view(self) -> bool {
        matches!(self, Self::View)
    }

    /// Maps a world-space vector into the frame where [`Self::axes`] apply.
    pub fn to_plane_frame(self, vector: DVec3, view: &ViewOrientation) -> DVec3 {
        if self.is_view() {
            view.to_local(vector)
        } else {
            vector
        }
    }

    /// Inverse of [`Self::to_plane_frame`].
    pub fn from_plane_frame(self, vector: DVec3, view: &ViewOrientation) -> DVec3 {
        if self.is_view() {
            view.to_world(vector)
        } else {
            vector
        }
    }

    /// Short name as typed by users.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::XY => "XY",
            Self::XZ => "XZ",
            Self::YZ => "YZ",
            Self::View => "LO",
        }
    }
}

impl FromStr for WorkingPlane {
    type Err = PdtError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_uppercase().as_str() {
            "XY" => Ok(Self::XY),
            "XZ" => Ok(Self::XZ),
            "YZ" => Ok(Self::YZ),
            "LO" | "VIEW" => Ok(Self::View),
            _ => Err(PdtError::InvalidPlane(s.to_string())),
        }
    }
}

impl fmt::Display for WorkingPlane {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Resolves a plane name to its axes.
///
/// Unknown names are rejected with [`PdtError::InvalidPlane`].
pub fn resolve_axes(name: &str) -> Result<(WorkingPlane, PlaneAxes)> {
    let plane: WorkingPlane = name.parse()?;
    Ok((plane, plane.axes()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_axes() {
        assert_eq!(WorkingPlane::XY.axes(), PlaneAxes { a1: 0, a2: 1, a3: 2 });
        assert_eq!(WorkingPlane::XZ.axes(), PlaneAxes { a1: 0, a2: 2, a3: 1 });
        assert_eq!(WorkingPlane::YZ.axes(), PlaneAxes { a1: 1, a2: 2, a3: 0 });
        assert_eq!(WorkingPlane::View.axes(), WorkingPlane::XY.axes());
    }

    #[test]
    fn test_parse() {
        assert_eq!("xz".parse::<WorkingPlane>().unwrap(), WorkingPlane::XZ);
        assert_eq!("LO".parse::<WorkingPlane>().unwrap(), WorkingPlane::View);
        assert_eq!(" view ".parse::<WorkingPlane>().unwrap(), WorkingPlane::View);
        for plane in WorkingPlane::ALL {
            assert_eq!(plane.as_str().parse::<WorkingPlane>().unwrap(), plane);
        }
    }

    #[test]
    fn test_invalid_plane() {
        let err = resolve_axes("XX").unwrap_err();
        assert!(matches!(err, PdtError::InvalidPlane(ref s) if s == "XX"));
    }

    #[test]
    fn test_project_lift() {
        let axes = WorkingPlane::YZ.axes();
        let p = DVec3::new(1.0, 2.0, 3.0);
        let planar = axes.project(p);
        assert_eq!(planar, DVec2::new(2.0, 3.0));
        assert_eq!(axes.lift(planar, p.x), p);
    }

    #[test]
    fn test_serde_names() {
        let json = serde_json::to_string(&WorkingPlane::View).unwrap();
        assert_eq!(json, "\"LO\"");
        let plane: WorkingPlane = serde_json::from_str("\"XZ\"").unwrap();
        assert_eq!(plane, WorkingPlane::XZ);
    }
}

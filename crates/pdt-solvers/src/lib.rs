//! Coordinate solvers for pdt-rs.
//!
//! Every solver is a pure function of points, values and the working plane.
//! Geometric failures (parallel lines, collinear arc points) come back as
//! [`PdtError`](pdt_core::PdtError) values; nothing here touches a mesh.

#![allow(clippy::missing_errors_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::many_single_char_names)]

pub mod arc;
pub mod delta;
pub mod intersect;
pub mod measure;
pub mod normal;
pub mod percent;
pub mod polar;

pub use arc::{arc_centre, Arc};
pub use delta::{absolute, delta, vector_from_values};
pub use intersect::{intersection, nearest};
pub use measure::{angle_at_vertex, distance_angle, Measurement};
pub use normal::perpendicular_foot;
pub use percent::{effective_percent, percent_between, percent_point};
pub use polar::{flip_angle, polar_offset};

//! Core abstractions for pdt-rs.
//!
//! This crate provides the fundamental types shared by the solvers and the
//! command router:
//! - [`WorkingPlane`] and its axis resolver
//! - [`ViewOrientation`] for view-relative placement
//! - [`PdtOptions`], the explicit configuration read by every command
//! - [`SelectionProvider`] for read-only access to the host selection
//! - [`PdtError`], the error taxonomy for rejected commands

// Documentation lints - internal functions don't need exhaustive panic/error docs
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::missing_errors_doc)]
// Builder patterns return Self which doesn't need must_use
#![allow(clippy::must_use_candidate)]

pub mod error;
pub mod options;
pub mod plane;
pub mod selection;
pub mod view;

pub use error::{PdtError, Result};
pub use options::{PdtOptions, SelectMode};
pub use plane::{resolve_axes, PlaneAxes, WorkingPlane};
pub use selection::{
    ActiveObject, Edge, EdgeId, ObjectId, ObjectMode, SceneObject, SelectionProvider, Vertex,
    VertexId,
};
pub use view::ViewOrientation;

// Re-export glam types for convenience
pub use glam::{DMat3, DQuat, DVec2, DVec3};

/// Absolute tolerance for lengths treated as zero.
pub const EPSILON: f64 = 1e-9;

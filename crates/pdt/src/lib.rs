//! pdt-rs: precision drawing tools for CAD-style point placement.
//!
//! PDT reads short typed commands such as `CA1,2,3` or `GD0,0,5` and turns
//! them into exact edits: cursor and pivot placement, vertex moves, new
//! vertices, edge splits, duplication, extrusion and fillets. Points can be
//! given absolutely, as offsets, as distance and angle in a working plane,
//! or as a percentage between two selected points. Placement commands put
//! the target on the intersection of two lines, the centre of an arc through
//! three points, or the foot of a perpendicular.
//!
//! # Quick Start
//!
//! ```
//! use pdt::*;
//!
//! fn main() -> Result<()> {
//!     let mut scene = MemoryScene::with_mesh("Plane", DVec3::ZERO);
//!     let v = scene.add_vertex(DVec3::new(1.0, 0.0, 0.0));
//!     scene.select_vertex(v)?;
//!
//!     let mut session = Session::new(PdtOptions::default());
//!     session.run_on("GD0,0,5", &mut scene)?;
//!     assert_eq!(scene.vertex(v), Some(DVec3::new(1.0, 0.0, 5.0)));
//!     Ok(())
//! }
//! ```
//!
//! # Architecture
//!
//! - `pdt-core`: planes, view orientation, options, selection access, errors
//! - `pdt-solvers`: pure coordinate solvers
//! - `pdt-command`: the parser, the router and the [`Mutation`] it produces
//! - this crate: [`Session`] and the [`MemoryScene`] reference host
//!
//! A host embeds PDT by implementing [`SelectionProvider`] and
//! [`MutationSink`] for its own scene.

#![allow(clippy::missing_errors_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::module_name_repetitions)]

mod scene;
mod session;

pub use scene::{MemoryObject, MemoryScene};
pub use session::{Registers, Session};

pub use pdt_core::{
    resolve_axes, ActiveObject, DMat3, DQuat, DVec2, DVec3, Edge, EdgeId, ObjectId, ObjectMode,
    PdtError, PdtOptions, PlaneAxes, Result, SceneObject, SelectMode, SelectionProvider, Vertex,
    VertexId, ViewOrientation, WorkingPlane, EPSILON,
};

pub use pdt_command::{
    commit, execute, parse, Action, Command, Fillet, FilletMode, FilletTarget, MathsTarget, Mode,
    Mutation, MutationSink, Operation, Parsed, PlacementKind, Router, Special, SplitPlacement,
    HELP,
};

pub use pdt_solvers as solvers;

/// Initializes logging from `RUST_LOG`. Safe to call more than once.
pub fn init_logging() {
    let _ = env_logger::try_init();
    log::debug!("pdt-rs logging initialized");
}

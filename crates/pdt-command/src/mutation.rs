//! The changes a command asks the host to make.
//!
//! The router never edits geometry itself. It computes exactly one
//! [`Mutation`] per command and hands it to a [`MutationSink`] after every
//! solver has succeeded.

use glam::DVec3;
use pdt_core::{EdgeId, ObjectId, Result, VertexId};

use crate::operation::FilletMode;

/// Where the new vertex of a split edge goes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SplitPlacement {
    /// At this object-local point.
    At(DVec3),
    /// At each edge's midpoint plus this offset.
    MidpointOffset(DVec3),
}

/// What a fillet is applied to.
#[derive(Debug, Clone, PartialEq)]
pub enum FilletTarget {
    Vertices(Vec<VertexId>),
    Edges(Vec<EdgeId>),
    /// Merge the two vertices at `corner`, then fillet that vertex.
    Intersection {
        corner: DVec3,
        merge: [VertexId; 2],
    },
}

/// Parameters of a fillet.
#[derive(Debug, Clone, PartialEq)]
pub struct Fillet {
    pub mode: FilletMode,
    pub radius: f64,
    /// At least one.
    pub segments: u32,
    /// Profile shape in `[0, 1]`; 0.5 is circular.
    pub profile: f64,
    pub target: FilletTarget,
}

impl Fillet {
    /// Upper bound for `segments`.
    pub const MAX_SEGMENTS: u32 = 1000;
}

/// A single change to the scene.
///
/// Vertex coordinates are object-local; cursor, pivot and object locations
/// are world coordinates.
#[derive(Debug, Clone, PartialEq)]
pub enum Mutation {
    SetCursor(DVec3),
    SetPivot(DVec3),
    /// Move each vertex to its point.
    MoveVertices(Vec<(VertexId, DVec3)>),
    TranslateVertices {
        vertices: Vec<VertexId>,
        offset: DVec3,
    },
    /// Move each object to its location.
    MoveObjects(Vec<(ObjectId, DVec3)>),
    TranslateObjects {
        objects: Vec<ObjectId>,
        offset: DVec3,
    },
    /// Add a vertex and connect it with an edge to each listed vertex. The
    /// new vertex becomes the only selected one.
    AddVertex {
        at: DVec3,
        connect: Vec<VertexId>,
    },
    SplitEdges {
        edges: Vec<EdgeId>,
        placement: SplitPlacement,
    },
    /// Copy the selected geometry, offset by `offset`.
    Duplicate {
        vertices: Vec<VertexId>,
        edges: Vec<EdgeId>,
        offset: DVec3,
    },
    /// As [`Mutation::Duplicate`], also bridging each copy to its original.
    Extrude {
        vertices: Vec<VertexId>,
        edges: Vec<EdgeId>,
        offset: DVec3,
    },
    Fillet(Fillet),
    JoinVertices(VertexId, VertexId),
    OriginToCursor(ObjectId),
}

impl Mutation {
    /// Short description for logs.
    pub fn describe(&self) -> String {
        match self {
            Self::SetCursor(p) => format!("cursor to {p}"),
            Self::SetPivot(p) => format!("pivot to {p}"),
            Self::MoveVertices(moves) => format!("move {} vertices", moves.len()),
            Self::TranslateVertices { vertices, offset } => {
                format!("translate {} vertices by {offset}", vertices.len())
            }
            Self::MoveObjects(moves) => format!("move {} objects", moves.len()),
            Self::TranslateObjects { objects, offset } => {
                format!("translate {} objects by {offset}", objects.len())
            }
            Self::AddVertex { at, connect } => {
                format!("add vertex at {at} with {} edges", connect.len())
            }
            Self::SplitEdges { edges, .. } => format!("split {} edges", edges.len()),
            Self::Duplicate { vertices, offset, .. } => {
                format!("duplicate {} vertices by {offset}", vertices.len())
            }
            Self::Extrude { vertices, offset, .. } => {
                format!("extrude {} vertices by {offset}", vertices.len())
            }
            Self::Fillet(fillet) => format!(
                "fillet radius {} segments {} profile {}",
                fillet.radius, fillet.segments, fillet.profile
            ),
            Self::JoinVertices(a, b) => format!("join vertices {} and {}", a.0, b.0),
            Self::OriginToCursor(obj) => format!("origin of object {} to cursor", obj.0),
        }
    }
}

/// Receives computed mutations. Implemented by the host.
pub trait MutationSink {
    /// Applies one mutation as a single step.
    fn apply(&mut self, mutation: Mutation) -> Result<()>;
}

/// Records mutations without applying them.
impl MutationSink for Vec<Mutation> {
    fn apply(&mut self, mutation: Mutation) -> Result<()> {
        self.push(mutation);
        Ok(())
    }
}

//! Read-only access to the host's selection and scene context.
//!
//! The host owns the mesh, its select history and the viewport. Commands only
//! see it through [`SelectionProvider`], which answers ordered point queries.

use std::fmt;

use glam::DVec3;

use crate::view::ViewOrientation;

/// Opaque handle to a mesh vertex owned by the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct VertexId(pub usize);

/// Opaque handle to a mesh edge owned by the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EdgeId(pub usize);

/// Opaque handle to a scene object owned by the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ObjectId(pub usize);

/// A selected vertex and its object-local coordinate.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Vertex {
    pub id: VertexId,
    pub co: DVec3,
}

impl Vertex {
    pub fn new(id: usize, co: DVec3) -> Self {
        Self {
            id: VertexId(id),
            co,
        }
    }
}

/// A selected edge: an ordered pair of endpoints.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Edge {
    pub id: EdgeId,
    pub a: Vertex,
    pub b: Vertex,
}

impl Edge {
    /// Returns the midpoint of the edge.
    pub fn midpoint(&self) -> DVec3 {
        (self.a.co + self.b.co) * 0.5
    }
}

/// A selected object and its world location.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SceneObject {
    pub id: ObjectId,
    pub location: DVec3,
}

/// Interaction mode of the active object.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ObjectMode {
    /// Mesh editing; vertex coordinates are object-local.
    Edit,
    /// Object level; locations are world coordinates.
    Object,
}

impl fmt::Display for ObjectMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Edit => f.write_str("edit"),
            Self::Object => f.write_str("object"),
        }
    }
}

/// The active object as seen by commands.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ActiveObject {
    pub id: ObjectId,
    pub mode: ObjectMode,
    /// World translation of the object's matrix.
    pub location: DVec3,
}

/// Supplies the selection and context a command reads.
///
/// All sequences are in select-history order: the first element is the
/// earliest selected, the last element is the active one.
pub trait SelectionProvider {
    /// Returns the active object, if any.
    fn active_object(&self) -> Option<ActiveObject>;

    /// Returns the selected vertices of the active mesh.
    fn selected_vertices(&self) -> Vec<Vertex>;

    /// Returns the selected edges of the active mesh.
    fn selected_edges(&self) -> Vec<Edge>;

    /// Returns the selected objects.
    fn selected_objects(&self) -> Vec<SceneObject>;

    /// Returns the 3D cursor location.
    fn cursor(&self) -> DVec3;

    /// Returns the pivot point location.
    fn pivot(&self) -> DVec3;

    /// Returns the orientation of the active viewport.
    fn view_orientation(&self) -> ViewOrientation {
        ViewOrientation::default()
    }

    /// Returns the world location of the active object, or the origin.
    fn object_location(&self) -> DVec3 {
        self.active_object().map_or(DVec3::ZERO, |obj| obj.location)
    }
}

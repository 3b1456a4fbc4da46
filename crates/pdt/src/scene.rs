//! An in-memory scene.
//!
//! [`MemoryScene`] is a small host with one editable mesh and a list of
//! objects. It implements both [`SelectionProvider`] and [`MutationSink`], so
//! commands can be run end to end without a modelling application.
//!
//! The mesh belongs to the active object and its coordinates are local to it.
//! Fillets are recorded in the history but not built.

use std::collections::HashMap;

use glam::DVec3;
use serde::Serialize;

use pdt_command::{FilletTarget, Mutation, MutationSink, SplitPlacement};
use pdt_core::{
    ActiveObject, Edge, EdgeId, ObjectId, ObjectMode, PdtError, Result, SceneObject,
    SelectionProvider, Vertex, VertexId, ViewOrientation,
};

/// A named object with a world location.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MemoryObject {
    pub name: String,
    pub location: DVec3,
}

#[derive(Debug, Clone)]
pub struct MemoryScene {
    vertices: Vec<DVec3>,
    edges: Vec<[usize; 2]>,
    /// Vertex select history, oldest first.
    vertex_selection: Vec<usize>,
    edge_selection: Vec<usize>,
    objects: Vec<MemoryObject>,
    object_selection: Vec<usize>,
    active: Option<usize>,
    mode: ObjectMode,
    cursor: DVec3,
    pivot: DVec3,
    view: ViewOrientation,
    history: Vec<Mutation>,
}

impl Default for MemoryScene {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryScene {
    /// Creates an empty scene with no objects.
    pub fn new() -> Self {
        Self {
            vertices: Vec::new(),
            edges: Vec::new(),
            vertex_selection: Vec::new(),
            edge_selection: Vec::new(),
            objects: Vec::new(),
            object_selection: Vec::new(),
            active: None,
            mode: ObjectMode::Object,
            cursor: DVec3::ZERO,
            pivot: DVec3::ZERO,
            view: ViewOrientation::default(),
            history: Vec::new(),
        }
    }

    /// Creates a scene with one active mesh object at `location`, in edit mode.
    pub fn with_mesh(name: impl Into<String>, location: DVec3) -> Self {
        let mut scene = Self::new();
        let id = scene.add_object(name, location);
        scene.set_active(id, ObjectMode::Edit);
        scene
    }

    // --- building ---

    pub fn add_object(&mut self, name: impl Into<String>, location: DVec3) -> ObjectId {
        self.objects.push(MemoryObject {
            name: name.into(),
            location,
        });
        ObjectId(self.objects.len() - 1)
    }

    /// Makes `id` the active object. Unknown ids clear the active object.
    pub fn set_active(&mut self, id: ObjectId, mode: ObjectMode) {
        self.active = (id.0 < self.objects.len()).then_some(id.0);
        self.mode = mode;
    }

    pub fn set_mode(&mut self, mode: ObjectMode) {
        self.mode = mode;
    }

    /// Adds a vertex at an object-local coordinate.
    pub fn add_vertex(&mut self, co: DVec3) -> VertexId {
        self.vertices.push(co);
        VertexId(self.vertices.len() - 1)
    }

    pub fn add_edge(&mut self, a: VertexId, b: VertexId) -> Result<EdgeId> {
        let a = self.vertex_index(a)?;
        let b = self.vertex_index(b)?;
        Ok(EdgeId(self.push_edge(a, b)))
    }

    pub fn set_cursor(&mut self, location: DVec3) {
        self.cursor = location;
    }

    pub fn set_pivot(&mut self, location: DVec3) {
        self.pivot = location;
    }

    pub fn set_view(&mut self, view: ViewOrientation) {
        self.view = view;
    }

    // --- selection ---

    /// Appends a vertex to the select history, making it the active one.
    pub fn select_vertex(&mut self, id: VertexId) -> Result<()> {
        let index = self.vertex_index(id)?;
        self.vertex_selection.retain(|&v| v != index);
        self.vertex_selection.push(index);
        Ok(())
    }

    /// Selects an edge and both of its endpoints.
    pub fn select_edge(&mut self, id: EdgeId) -> Result<()> {
        let [a, b] = *self
            .edges
            .get(id.0)
            .ok_or_else(|| PdtError::Sink(format!("no edge {}", id.0)))?;
        if !self.edge_selection.contains(&id.0) {
            self.edge_selection.push(id.0);
        }
        for v in [a, b] {
            if !self.vertex_selection.contains(&v) {
                self.vertex_selection.push(v);
            }
        }
        Ok(())
    }

    pub fn select_object(&mut self, id: ObjectId) -> Result<()> {
        let index = self.object_index(id)?;
        self.object_selection.retain(|&o| o != index);
        self.object_selection.push(index);
        Ok(())
    }

    pub fn deselect_all(&mut self) {
        self.vertex_selection.clear();
        self.edge_selection.clear();
        self.object_selection.clear();
    }

    // --- queries ---

    /// Object-local coordinate of a vertex.
    pub fn vertex(&self, id: VertexId) -> Option<DVec3> {
        self.vertices.get(id.0).copied()
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    pub fn edges(&self) -> impl Iterator<Item = (EdgeId, VertexId, VertexId)> + '_ {
        self.edges
            .iter()
            .enumerate()
            .map(|(i, &[a, b])| (EdgeId(i), VertexId(a), VertexId(b)))
    }

    /// Returns whether an edge joins `a` and `b`, in either direction.
    pub fn has_edge(&self, a: VertexId, b: VertexId) -> bool {
        self.find_edge(a.0, b.0).is_some()
    }

    pub fn object(&self, id: ObjectId) -> Option<&MemoryObject> {
        self.objects.get(id.0)
    }

    pub fn cursor_location(&self) -> DVec3 {
        self.cursor
    }

    pub fn pivot_location(&self) -> DVec3 {
        self.pivot
    }

    /// Vertex ids in select-history order.
    pub fn vertex_selection(&self) -> Vec<VertexId> {
        self.vertex_selection.iter().map(|&v| VertexId(v)).collect()
    }

    /// Every mutation applied so far, oldest first.
    pub fn history(&self) -> &[Mutation] {
        &self.history
    }

    // --- internals ---

    fn vertex_index(&self, id: VertexId) -> Result<usize> {
        if id.0 < self.vertices.len() {
            Ok(id.0)
        } else {
            Err(PdtError::Sink(format!("no vertex {}", id.0)))
        }
    }

    fn edge_index(&self, id: EdgeId) -> Result<usize> {
        if id.0 < self.edges.len() {
            Ok(id.0)
        } else {
            Err(PdtError::Sink(format!("no edge {}", id.0)))
        }
    }

    fn object_index(&self, id: ObjectId) -> Result<usize> {
        if id.0 < self.objects.len() {
            Ok(id.0)
        } else {
            Err(PdtError::Sink(format!("no object {}", id.0)))
        }
    }

    fn find_edge(&self, a: usize, b: usize) -> Option<usize> {
        self.edges
            .iter()
            .position(|&[x, y]| (x == a && y == b) || (x == b && y == a))
    }

    fn push_edge(&mut self, a: usize, b: usize) -> usize {
        if let Some(existing) = self.find_edge(a, b) {
            return existing;
        }
        self.edges.push([a, b]);
        self.edges.len() - 1
    }

    fn check_vertices(&self, ids: &[VertexId]) -> Result<()> {
        ids.iter().try_for_each(|&id| self.vertex_index(id).map(|_| ()))
    }

    fn check_edges(&self, ids: &[EdgeId]) -> Result<()> {
        ids.iter().try_for_each(|&id| self.edge_index(id).map(|_| ()))
    }

    fn check_objects(&self, ids: &[ObjectId]) -> Result<()> {
        ids.iter().try_for_each(|&id| self.object_index(id).map(|_| ()))
    }

    /// Ids are checked up front so a rejected mutation leaves the scene as
    /// it was.
    fn validate(&self, mutation: &Mutation) -> Result<()> {
        match mutation {
            Mutation::SetCursor(_) | Mutation::SetPivot(_) => Ok(()),
            Mutation::MoveVertices(moves) => {
                moves.iter().try_for_each(|&(id, _)| self.vertex_index(id).map(|_| ()))
            }
            Mutation::TranslateVertices { vertices, .. } => self.check_vertices(vertices),
            Mutation::MoveObjects(moves) => {
                moves.iter().try_for_each(|&(id, _)| self.object_index(id).map(|_| ()))
            }
            Mutation::TranslateObjects { objects, .. } => self.check_objects(objects),
            Mutation::AddVertex { connect, .. } => self.check_vertices(connect),
            Mutation::SplitEdges { edges, .. } => self.check_edges(edges),
            Mutation::Duplicate {
                vertices, edges, ..
            }
            | Mutation::Extrude {
                vertices, edges, ..
            } => {
                self.check_vertices(vertices)?;
                self.check_edges(edges)
            }
            Mutation::Fillet(fillet) => match &fillet.target {
                FilletTarget::Vertices(ids) => self.check_vertices(ids),
                FilletTarget::Edges(ids) => self.check_edges(ids),
                FilletTarget::Intersection { merge, .. } => self.check_vertices(merge),
            },
            Mutation::JoinVertices(a, b) => {
                if a == b {
                    return Err(PdtError::Sink("cannot join a vertex to itself".to_string()));
                }
                self.check_vertices(&[*a, *b])
            }
            Mutation::OriginToCursor(id) => self.object_index(*id).map(|_| ()),
        }
    }

    fn split_edges(&mut self, edges: &[EdgeId], placement: SplitPlacement) {
        let mut created = Vec::with_capacity(edges.len());
        for edge in edges {
            let [a, b] = self.edges[edge.0];
            let co = match placement {
                SplitPlacement::At(p) => p,
                SplitPlacement::MidpointOffset(offset) => {
                    (self.vertices[a] + self.vertices[b]) * 0.5 + offset
                }
            };
            self.vertices.push(co);
            let new = self.vertices.len() - 1;
            self.edges[edge.0] = [a, new];
            self.edges.push([new, b]);
            created.push(new);
        }
        self.edge_selection.clear();
        self.vertex_selection = created;
    }

    /// Copies `vertices` and the `edges` between them, returning a map from
    /// original to copy. The copies become the selection.
    fn copy_geometry(
        &mut self,
        vertices: &[VertexId],
        edges: &[EdgeId],
        offset: DVec3,
    ) -> HashMap<usize, usize> {
        let mut copies = HashMap::with_capacity(vertices.len());
        for v in vertices {
            if copies.contains_key(&v.0) {
                continue;
            }
            self.vertices.push(self.vertices[v.0] + offset);
            copies.insert(v.0, self.vertices.len() - 1);
        }

        let mut new_edges = Vec::new();
        for e in edges {
            let [a, b] = self.edges[e.0];
            if let (Some(&ca), Some(&cb)) = (copies.get(&a), copies.get(&b)) {
                new_edges.push(self.push_edge(ca, cb));
            }
        }

        self.vertex_selection = vertices.iter().filter_map(|v| copies.get(&v.0).copied()).collect();
        self.vertex_selection.dedup();
        self.edge_selection = new_edges;
        copies
    }

    fn origin_to_cursor(&mut self, id: ObjectId) {
        let shift = self.cursor - self.objects[id.0].location;
        self.objects[id.0].location = self.cursor;
        // The mesh keeps its world position.
        if self.active == Some(id.0) {
            for co in &mut self.vertices {
                *co -= shift;
            }
        }
    }
}

impl SelectionProvider for MemoryScene {
    fn active_object(&self) -> Option<ActiveObject> {
        self.active.map(|i| ActiveObject {
            id: ObjectId(i),
            mode: self.mode,
            location: self.objects[i].location,
        })
    }

    fn selected_vertices(&self) -> Vec<Vertex> {
        if self.mode != ObjectMode::Edit {
            return Vec::new();
        }
        self.vertex_selection
            .iter()
            .map(|&i| Vertex::new(i, self.vertices[i]))
            .collect()
    }

    fn selected_edges(&self) -> Vec<Edge> {
        if self.mode != ObjectMode::Edit {
            return Vec::new();
        }
        self.edge_selection
            .iter()
            .map(|&i| {
                let [a, b] = self.edges[i];
                Edge {
                    id: EdgeId(i),
                    a: Vertex::new(a, self.vertices[a]),
                    b: Vertex::new(b, self.vertices[b]),
                }
            })
            .collect()
    }

    fn selected_objects(&self) -> Vec<SceneObject> {
        self.object_selection
            .iter()
            .map(|&i| SceneObject {
                id: ObjectId(i),
                location: self.objects[i].location,
            })
            .collect()
    }

    fn cursor(&self) -> DVec3 {
        self.cursor
    }

    fn pivot(&self) -> DVec3 {
        self.pivot
    }

    fn view_orientation(&self) -> ViewOrientation {
        self.view
    }
}

impl MutationSink for MemoryScene {
    fn apply(&mut self, mutation: Mutation) -> Result<()> {
        self.validate(&mutation)?;
        match &mutation {
            Mutation::SetCursor(p) => self.cursor = *p,
            Mutation::SetPivot(p) => self.pivot = *p,
            Mutation::MoveVertices(moves) => {
                for &(id, co) in moves {
                    self.vertices[id.0] = co;
                }
            }
            Mutation::TranslateVertices { vertices, offset } => {
                for id in vertices {
                    self.vertices[id.0] += *offset;
                }
            }
            Mutation::MoveObjects(moves) => {
                for &(id, location) in moves {
                    self.objects[id.0].location = location;
                }
            }
            Mutation::TranslateObjects { objects, offset } => {
                for id in objects {
                    self.objects[id.0].location += *offset;
                }
            }
            Mutation::AddVertex { at, connect } => {
                let new = self.add_vertex(*at).0;
                for id in connect {
                    self.push_edge(id.0, new);
                }
                self.edge_selection.clear();
                self.vertex_selection = vec![new];
            }
            Mutation::SplitEdges { edges, placement } => self.split_edges(edges, *placement),
            Mutation::Duplicate {
                vertices,
                edges,
                offset,
            } => {
                self.copy_geometry(vertices, edges, *offset);
            }
            Mutation::Extrude {
                vertices,
                edges,
                offset,
            } => {
                let copies = self.copy_geometry(vertices, edges, *offset);
                for (original, copy) in copies {
                    self.push_edge(original, copy);
                }
            }
            Mutation::Fillet(fillet) => {
                log::debug!("fillet recorded, not built: {:?}", fillet.target);
            }
            Mutation::JoinVertices(a, b) => {
                let edge = self.push_edge(a.0, b.0);
                self.edge_selection = vec![edge];
            }
            Mutation::OriginToCursor(id) => self.origin_to_cursor(*id),
        }
        self.history.push(mutation);
        Ok(())
    }
}

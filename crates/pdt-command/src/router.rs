//! Command routing: validation, solving and mutation building.
//!
//! A command runs in three steps. The parser rejects malformed input, the
//! router checks the selection and runs the solvers, and only then is the
//! resulting [`Mutation`] handed to the sink. Any failure before the last
//! step leaves the scene untouched.

use glam::DVec3;
use pdt_core::{
    ActiveObject, ObjectId, ObjectMode, PdtError, PdtOptions, Result, SelectMode,
    SelectionProvider, Vertex, VertexId, ViewOrientation,
};
use pdt_solvers::{
    absolute, angle_at_vertex, arc_centre, delta, distance_angle, intersection, nearest,
    percent_between, percent_point, perpendicular_foot, polar_offset, Measurement,
};

use crate::maths;
use crate::mutation::{Fillet, FilletTarget, Mutation, MutationSink, SplitPlacement};
use crate::operation::{FilletMode, MathsTarget, Mode, Operation, PlacementKind};
use crate::parser::{parse, Command, Parsed, Special};

/// Command reference shown for `?` and `HELP`.
pub const HELP: &str = "\
Format: <operation><mode><values>, values comma separated, blanks read as 0.

Operations:
  C cursor      P pivot       G grab (move)   N new vertex   V extrude vertex
  S split edges D duplicate   E extrude       F fillet       M maths

Modes (C P G N V S):
  A absolute x,y,z    D delta x,y,z    I distance,angle    P percent
Modes (D E): D, I
Modes (F): V vertex, E edge, I intersect; values radius,segments,profile
Modes (M): X Y Z D A P O; value is an expression, e.g. MX sqrt(2.0)*3.0

Placement (target C P G N V):
  <T>INT intersection of two lines   <T>CEN arc centre   <T>NML perpendicular

Other: J2V join two vertices, AD2 / AD3 measure, OTC origin to cursor

Examples: CA0,0,0  GD0,0,5  NI1.5,45  PP25  FE0.1,4,0.5  CCEN";

/// What a command resolved to.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// Help was requested.
    Help(&'static str),
    /// A change for the sink. `radius` is set by arc centre placements.
    Mutate {
        mutation: Mutation,
        radius: Option<f64>,
    },
    /// Result of `AD2` / `AD3`.
    Measure(Measurement),
    /// Result of a maths command.
    Maths { target: MathsTarget, value: f64 },
}

impl From<Mutation> for Action {
    fn from(mutation: Mutation) -> Self {
        Self::Mutate {
            mutation,
            radius: None,
        }
    }
}

/// A selected element that placement commands can move or connect to.
#[derive(Debug, Clone, Copy)]
enum AnchorId {
    Vertex(VertexId),
    Object(ObjectId),
}

#[derive(Debug, Clone, Copy)]
struct Anchor {
    id: AnchorId,
    co: DVec3,
}

impl From<Vertex> for Anchor {
    fn from(v: Vertex) -> Self {
        Self {
            id: AnchorId::Vertex(v.id),
            co: v.co,
        }
    }
}

/// Resolves commands against a selection snapshot and options.
pub struct Router<'a> {
    options: &'a PdtOptions,
    provider: &'a dyn SelectionProvider,
}

impl<'a> Router<'a> {
    pub fn new(options: &'a PdtOptions, provider: &'a dyn SelectionProvider) -> Self {
        Self { options, provider }
    }

    /// Parses and resolves a command line without applying it.
    pub fn plan(&self, input: &str) -> Result<Action> {
        let parsed = parse(input)?;
        log::debug!("parsed '{}' as {parsed:?}", input.trim());
        self.plan_parsed(parsed)
    }

    /// Resolves an already parsed command.
    pub fn plan_parsed(&self, parsed: Parsed) -> Result<Action> {
        match parsed {
            Parsed::Help => Ok(Action::Help(HELP)),
            Parsed::Special(special) => self.special(special),
            Parsed::Placement { target, kind } => self.placement(target, kind),
            Parsed::Coordinates(command) => self.coordinates(&command).map(Action::from),
            Parsed::Fillet { mode, values } => self.fillet(mode, values).map(Action::from),
            Parsed::Maths { target, expression } => Ok(Action::Maths {
                target,
                value: maths::evaluate(&expression)?,
            }),
        }
    }

    fn view(&self) -> ViewOrientation {
        self.provider.view_orientation()
    }

    fn active_object(&self) -> Result<ActiveObject> {
        self.provider.active_object().ok_or(PdtError::NoActiveObject)
    }

    fn edit_object(&self) -> Result<ActiveObject> {
        let obj = self.active_object()?;
        if obj.mode == ObjectMode::Edit {
            Ok(obj)
        } else {
            Err(PdtError::WrongObjectMode {
                required: ObjectMode::Edit,
            })
        }
    }

    fn active_vertex(&self) -> Result<Vertex> {
        self.provider
            .selected_vertices()
            .last()
            .copied()
            .ok_or(PdtError::SelectionCount {
                expected: "at least 1 vertex",
                found: 0,
            })
    }

    fn some_vertices(&self) -> Result<Vec<Vertex>> {
        let vertices = self.provider.selected_vertices();
        if vertices.is_empty() {
            return Err(PdtError::SelectionCount {
                expected: "at least 1 vertex",
                found: 0,
            });
        }
        Ok(vertices)
    }

    /// Selected vertices (edit mode) or objects (object mode), requiring
    /// exactly `count` of them.
    fn anchors(
        &self,
        obj: &ActiveObject,
        count: usize,
        expected: &'static str,
    ) -> Result<Vec<Anchor>> {
        let anchors: Vec<Anchor> = match obj.mode {
            ObjectMode::Edit => self
                .provider
                .selected_vertices()
                .into_iter()
                .map(Anchor::from)
                .collect(),
            ObjectMode::Object => self
                .provider
                .selected_objects()
                .into_iter()
                .map(|o| Anchor {
                    id: AnchorId::Object(o.id),
                    co: o.location,
                })
                .collect(),
        };
        if anchors.len() == count {
            Ok(anchors)
        } else {
            Err(PdtError::SelectionCount {
                expected,
                found: anchors.len(),
            })
        }
    }

    // --- coordinate commands ---

    fn coordinates(&self, command: &Command) -> Result<Mutation> {
        let operation = command.operation;
        if !operation.coordinate_modes().contains(&command.mode) {
            return Err(PdtError::UnknownMode {
                operation: operation.letter(),
                mode: command.mode.letter(),
            });
        }
        if command.values.len() != command.mode.value_count() {
            return Err(PdtError::WrongValueCount {
                expected: command.mode.value_count(),
                found: command.values.len(),
            });
        }

        match operation {
            Operation::Cursor | Operation::Pivot => self.place_reference(command),
            Operation::Grab => self.grab(command),
            Operation::NewVertex | Operation::ExtrudeVertex => self.add_vertex(command),
            Operation::Split => self.split(command),
            Operation::Duplicate | Operation::ExtrudeGeometry => self.duplicate(command),
            Operation::Fillet | Operation::Maths => Err(PdtError::UnknownMode {
                operation: operation.letter(),
                mode: command.mode.letter(),
            }),
        }
    }

    /// Turns the command's values into a point or offset.
    fn vector(&self, command: &Command) -> Result<DVec3> {
        let [v0, v1, _] = command.xyz();
        match command.mode {
            Mode::Absolute | Mode::Delta => Ok(absolute(command.xyz())),
            Mode::Direction => Ok(polar_offset(
                v0,
                v1,
                self.options.plane,
                self.options.flip_angle,
                &self.view(),
            )),
            Mode::Percent => self.percent(v0, command.operation == Operation::Grab),
        }
    }

    fn percent(&self, percent: f64, is_move: bool) -> Result<DVec3> {
        let obj = self.active_object()?;
        let points: Vec<DVec3> = match obj.mode {
            ObjectMode::Edit => self
                .provider
                .selected_vertices()
                .iter()
                .map(|v| v.co)
                .collect(),
            ObjectMode::Object => self
                .provider
                .selected_objects()
                .iter()
                .map(|o| o.location)
                .collect(),
        };
        percent_between(&points, percent, self.options.flip_percent, is_move)
    }

    fn place_reference(&self, command: &Command) -> Result<Mutation> {
        let vector = self.vector(command)?;
        let point = match command.mode {
            Mode::Absolute => vector,
            Mode::Delta | Mode::Direction => match self.options.select {
                SelectMode::Current => {
                    let current = if command.operation == Operation::Cursor {
                        self.provider.cursor()
                    } else {
                        self.provider.pivot()
                    };
                    delta(current, vector)
                }
                SelectMode::Selected => {
                    let obj = self.active_object()?;
                    match obj.mode {
                        ObjectMode::Edit => delta(self.active_vertex()?.co + obj.location, vector),
                        ObjectMode::Object => delta(obj.location, vector),
                    }
                }
            },
            Mode::Percent => to_world(&self.active_object()?, vector),
        };
        Ok(reference_mutation(command.operation, point))
    }

    fn grab(&self, command: &Command) -> Result<Mutation> {
        let obj = self.active_object()?;
        match obj.mode {
            ObjectMode::Edit => {
                let vertices = self.some_vertices()?;
                let vector = self.vector(command)?;
                Ok(match command.mode {
                    Mode::Absolute => Mutation::MoveVertices(
                        vertices.iter().map(|v| (v.id, vector - obj.location)).collect(),
                    ),
                    Mode::Delta | Mode::Direction => Mutation::TranslateVertices {
                        vertices: vertices.iter().map(|v| v.id).collect(),
                        offset: vector,
                    },
                    Mode::Percent => {
                        Mutation::MoveVertices(vec![(self.active_vertex()?.id, vector)])
                    }
                })
            }
            ObjectMode::Object => {
                let objects = self.provider.selected_objects();
                let Some(active) = objects.last().copied() else {
                    return Err(PdtError::SelectionCount {
                        expected: "at least 1 object",
                        found: 0,
                    });
                };
                let vector = self.vector(command)?;
                Ok(match command.mode {
                    Mode::Absolute => {
                        Mutation::MoveObjects(objects.iter().map(|o| (o.id, vector)).collect())
                    }
                    Mode::Delta | Mode::Direction => Mutation::TranslateObjects {
                        objects: objects.iter().map(|o| o.id).collect(),
                        offset: vector,
                    },
                    Mode::Percent => Mutation::MoveObjects(vec![(active.id, vector)]),
                })
            }
        }
    }

    fn add_vertex(&self, command: &Command) -> Result<Mutation> {
        let obj = self.edit_object()?;
        let connect = if command.operation == Operation::ExtrudeVertex {
            vec![self.active_vertex()?.id]
        } else {
            Vec::new()
        };
        let at = match command.mode {
            Mode::Absolute => self.vector(command)? - obj.location,
            Mode::Delta | Mode::Direction => {
                let base = self.active_vertex()?.co;
                delta(base, self.vector(command)?)
            }
            Mode::Percent => self.vector(command)?,
        };
        Ok(Mutation::AddVertex { at, connect })
    }

    fn split(&self, command: &Command) -> Result<Mutation> {
        let obj = self.edit_object()?;
        let edges = self.provider.selected_edges();
        let placement = match command.mode {
            Mode::Absolute | Mode::Percent => {
                let [edge] = edges.as_slice() else {
                    return Err(PdtError::SelectionCount {
                        expected: "exactly 1 edge",
                        found: edges.len(),
                    });
                };
                if command.mode == Mode::Absolute {
                    SplitPlacement::At(self.vector(command)? - obj.location)
                } else {
                    let [percent, _, _] = command.xyz();
                    SplitPlacement::At(percent_point(
                        edge.a.co,
                        edge.b.co,
                        percent,
                        self.options.flip_percent,
                        false,
                    ))
                }
            }
            Mode::Delta | Mode::Direction => {
                if edges.is_empty() {
                    return Err(PdtError::SelectionCount {
                        expected: "at least 1 edge",
                        found: 0,
                    });
                }
                SplitPlacement::MidpointOffset(self.vector(command)?)
            }
        };
        Ok(Mutation::SplitEdges {
            edges: edges.iter().map(|e| e.id).collect(),
            placement,
        })
    }

    fn duplicate(&self, command: &Command) -> Result<Mutation> {
        self.edit_object()?;
        let vertices: Vec<VertexId> = self.some_vertices()?.iter().map(|v| v.id).collect();
        let edges = self.provider.selected_edges().iter().map(|e| e.id).collect();
        let offset = self.vector(command)?;
        Ok(if command.operation == Operation::ExtrudeGeometry {
            Mutation::Extrude {
                vertices,
                edges,
                offset,
            }
        } else {
            Mutation::Duplicate {
                vertices,
                edges,
                offset,
            }
        })
    }

    // --- fillet ---

    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    fn fillet(&self, mode: FilletMode, values: [f64; 3]) -> Result<Mutation> {
        self.edit_object()?;
        let [radius, segments, profile] = values;
        let segments = segments
            .round()
            .clamp(1.0, f64::from(Fillet::MAX_SEGMENTS)) as u32;
        let profile = profile.clamp(0.0, 1.0);

        let target = match mode {
            FilletMode::Vertex => {
                FilletTarget::Vertices(self.some_vertices()?.iter().map(|v| v.id).collect())
            }
            FilletMode::Edge => {
                let edges = self.provider.selected_edges();
                if edges.is_empty() {
                    return Err(PdtError::SelectionCount {
                        expected: "at least 1 edge",
                        found: 0,
                    });
                }
                FilletTarget::Edges(edges.iter().map(|e| e.id).collect())
            }
            FilletMode::Intersect => {
                let edges = self.provider.selected_edges();
                let [first, second] = edges.as_slice() else {
                    return Err(PdtError::SelectionCount {
                        expected: "exactly 2 edges",
                        found: edges.len(),
                    });
                };
                let corner = intersection(
                    first.a.co,
                    first.b.co,
                    second.a.co,
                    second.b.co,
                    self.options.plane,
                    &self.view(),
                )?;
                let nearer = |a: Vertex, b: Vertex| {
                    if nearest(corner, &[a.co, b.co]) == Some(1) {
                        b.id
                    } else {
                        a.id
                    }
                };
                FilletTarget::Intersection {
                    corner,
                    merge: [nearer(first.a, first.b), nearer(second.a, second.b)],
                }
            }
        };

        Ok(Mutation::Fillet(Fillet {
            mode,
            radius,
            segments,
            profile,
            target,
        }))
    }

    // --- placement commands ---

    fn placement(&self, target: Operation, kind: PlacementKind) -> Result<Action> {
        if !target.is_placement_target() {
            return Err(PdtError::UnknownOperation(target.letter()));
        }
        let obj = self.active_object()?;
        if target.needs_edit_mode() && obj.mode != ObjectMode::Edit {
            return Err(PdtError::WrongObjectMode {
                required: ObjectMode::Edit,
            });
        }

        match kind {
            PlacementKind::Intersect => {
                let ([active, other], [last, first]) = self.intersection_lines(&obj)?;
                let point = intersection(
                    active.co,
                    other.co,
                    last.co,
                    first.co,
                    self.options.plane,
                    &self.view(),
                )?;
                // Each line contributes the endpoint closer to the crossing.
                let closer = |a: Anchor, b: Anchor| {
                    if nearest(point, &[a.co, b.co]) == Some(1) {
                        b
                    } else {
                        a
                    }
                };
                let movers = [closer(active, other), closer(last, first)];
                place_at(target, &obj, point, &movers).map(Action::from)
            }
            PlacementKind::ArcCentre => {
                let anchors = self.anchors(&obj, 3, "exactly 3 vertices or objects")?;
                let arc = arc_centre(anchors[0].co, anchors[1].co, anchors[2].co)?;
                let mutation = place_at(target, &obj, arc.centre, &anchors[2..])?;
                Ok(Action::Mutate {
                    mutation,
                    radius: Some(arc.radius),
                })
            }
            PlacementKind::Normal => {
                let anchors = self.anchors(&obj, 3, "exactly 3 vertices or objects")?;
                let foot = perpendicular_foot(anchors[2].co, anchors[0].co, anchors[1].co)?;
                place_at(target, &obj, foot, &anchors[2..]).map(Action::from)
            }
        }
    }

    /// Line A is (active, other) and line B is (last, first) in select
    /// history order, or the two selected edges.
    fn intersection_lines(&self, obj: &ActiveObject) -> Result<([Anchor; 2], [Anchor; 2])> {
        if obj.mode == ObjectMode::Edit {
            if let [e1, e2] = self.provider.selected_edges().as_slice() {
                return Ok((
                    [e1.a.into(), e1.b.into()],
                    [e2.a.into(), e2.b.into()],
                ));
            }
        }
        let expected = match obj.mode {
            ObjectMode::Edit => "exactly 4 vertices or 2 edges",
            ObjectMode::Object => "exactly 4 objects",
        };
        let history = self.anchors(obj, 4, expected)?;
        Ok(([history[3], history[2]], [history[1], history[0]]))
    }

    // --- whole-word commands ---

    fn special(&self, special: Special) -> Result<Action> {
        match special {
            Special::JoinVertices => {
                self.edit_object()?;
                match self.provider.selected_vertices().as_slice() {
                    [a, b] => Ok(Mutation::JoinVertices(a.id, b.id).into()),
                    other => Err(PdtError::SelectionCount {
                        expected: "exactly 2 vertices",
                        found: other.len(),
                    }),
                }
            }
            Special::Measure2d => {
                let obj = self.active_object()?;
                let points = self.anchors(&obj, 2, "exactly 2 vertices or objects")?;
                Ok(Action::Measure(distance_angle(
                    points[0].co,
                    points[1].co,
                    self.options.plane,
                    &self.view(),
                )))
            }
            Special::Measure3d => {
                let obj = self.active_object()?;
                let points = self.anchors(&obj, 3, "exactly 3 vertices or objects")?;
                Ok(Action::Measure(angle_at_vertex(
                    points[0].co,
                    points[1].co,
                    points[2].co,
                )?))
            }
            Special::OriginToCursor => {
                let obj = self.active_object()?;
                Ok(Mutation::OriginToCursor(obj.id).into())
            }
        }
    }
}

/// Converts an object-local point to world space in edit mode.
fn to_world(obj: &ActiveObject, point: DVec3) -> DVec3 {
    match obj.mode {
        ObjectMode::Edit => point + obj.location,
        ObjectMode::Object => point,
    }
}

fn reference_mutation(operation: Operation, point: DVec3) -> Mutation {
    if operation == Operation::Cursor {
        Mutation::SetCursor(point)
    } else {
        Mutation::SetPivot(point)
    }
}

/// Builds the mutation that puts `target` at a constructed point.
///
/// `movers` are the elements a grab moves and an extrusion connects to.
fn place_at(
    target: Operation,
    obj: &ActiveObject,
    point: DVec3,
    movers: &[Anchor],
) -> Result<Mutation> {
    Ok(match target {
        Operation::Cursor => Mutation::SetCursor(to_world(obj, point)),
        Operation::Pivot => Mutation::SetPivot(to_world(obj, point)),
        Operation::Grab => {
            let mut vertices = Vec::new();
            let mut objects = Vec::new();
            for anchor in movers {
                match anchor.id {
                    AnchorId::Vertex(id) => vertices.push((id, point)),
                    AnchorId::Object(id) => objects.push((id, point)),
                }
            }
            if objects.is_empty() {
                Mutation::MoveVertices(vertices)
            } else {
                Mutation::MoveObjects(objects)
            }
        }
        Operation::NewVertex => Mutation::AddVertex {
            at: point,
            connect: Vec::new(),
        },
        Operation::ExtrudeVertex => Mutation::AddVertex {
            at: point,
            connect: movers
                .iter()
                .filter_map(|anchor| match anchor.id {
                    AnchorId::Vertex(id) => Some(id),
                    AnchorId::Object(_) => None,
                })
                .collect(),
        },
        other => return Err(PdtError::UnknownOperation(other.letter())),
    })
}

/// Plans a command and, if it produced a mutation, applies it to `sink`.
///
/// The sink is only called once every check and solver has succeeded.
pub fn execute(
    input: &str,
    options: &PdtOptions,
    provider: &dyn SelectionProvider,
    sink: &mut dyn MutationSink,
) -> Result<Action> {
    let planned = Router::new(options, provider).plan(input);
    commit(input, planned, sink)
}

/// Applies the mutation of a planned command to `sink` and logs the outcome.
///
/// Use this when the provider and the sink are the same value, so that
/// planning (which borrows the provider) has to finish first.
pub fn commit(input: &str, planned: Result<Action>, sink: &mut dyn MutationSink) -> Result<Action> {
    let result = planned.and_then(|action| {
        if let Action::Mutate { mutation, .. } = &action {
            sink.apply(mutation.clone())?;
            log::info!("{}: {}", input.trim(), mutation.describe());
        }
        Ok(action)
    });
    if let Err(e) = &result {
        log::warn!("command '{}' rejected: {e}", input.trim());
    }
    result
}

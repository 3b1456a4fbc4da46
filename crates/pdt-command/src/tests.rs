//! Router tests against a fixed selection snapshot.

use glam::DVec3;
use pdt_core::{
    ActiveObject, Edge, EdgeId, ObjectId, ObjectMode, PdtError, PdtOptions, SceneObject,
    SelectMode, SelectionProvider, Vertex, VertexId, ViewOrientation, WorkingPlane,
};

use crate::{
    commit, execute, Action, Fillet, FilletMode, FilletTarget, MathsTarget, Mutation,
    MutationSink, Router, SplitPlacement,
};

#[derive(Default)]
struct Snapshot {
    object: Option<ActiveObject>,
    vertices: Vec<Vertex>,
    edges: Vec<Edge>,
    objects: Vec<SceneObject>,
    cursor: DVec3,
    pivot: DVec3,
    view: ViewOrientation,
}

impl Snapshot {
    fn edit(location: DVec3, points: &[DVec3]) -> Self {
        Self {
            object: Some(ActiveObject {
                id: ObjectId(0),
                mode: ObjectMode::Edit,
                location,
            }),
            vertices: points
                .iter()
                .enumerate()
                .map(|(i, p)| Vertex::new(i, *p))
                .collect(),
            ..Default::default()
        }
    }

    fn with_edges(mut self, pairs: &[(usize, usize)]) -> Self {
        self.edges = pairs
            .iter()
            .enumerate()
            .map(|(i, &(a, b))| Edge {
                id: EdgeId(i),
                a: self.vertices[a],
                b: self.vertices[b],
            })
            .collect();
        self
    }
}

impl SelectionProvider for Snapshot {
    fn active_object(&self) -> Option<ActiveObject> {
        self.object
    }
    fn selected_vertices(&self) -> Vec<Vertex> {
        self.vertices.clone()
    }
    fn selected_edges(&self) -> Vec<Edge> {
        self.edges.clone()
    }
    fn selected_objects(&self) -> Vec<SceneObject> {
        self.objects.clone()
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

fn plan(snapshot: &Snapshot, options: &PdtOptions, input: &str) -> Result<Mutation, PdtError> {
    match Router::new(options, snapshot).plan(input)? {
        Action::Mutate { mutation, .. } => Ok(mutation),
        other => panic!("expected a mutation, got {other:?}"),
    }
}

fn close(a: DVec3, b: DVec3) -> bool {
    (a - b).length() < 1e-9
}

#[test]
fn test_cursor_absolute_without_object() {
    let snapshot = Snapshot::default();
    let mutation = plan(&snapshot, &PdtOptions::default(), "CA1,2,3").unwrap();
    assert_eq!(mutation, Mutation::SetCursor(DVec3::new(1.0, 2.0, 3.0)));
}

#[test]
fn test_cursor_delta_current_and_selected() {
    let mut snapshot = Snapshot::edit(DVec3::new(10.0, 0.0, 0.0), &[DVec3::new(1.0, 1.0, 1.0)]);
    snapshot.cursor = DVec3::new(0.0, 0.0, 1.0);

    let current = PdtOptions::default();
    let mutation = plan(&snapshot, &current, "CD1,0,0").unwrap();
    assert_eq!(mutation, Mutation::SetCursor(DVec3::new(1.0, 0.0, 1.0)));

    let selected = PdtOptions::default().with_select(SelectMode::Selected);
    let mutation = plan(&snapshot, &selected, "PD0,0,1").unwrap();
    assert_eq!(mutation, Mutation::SetPivot(DVec3::new(11.0, 1.0, 2.0)));
}

#[test]
fn test_cursor_polar_uses_plane() {
    let snapshot = Snapshot::default();
    let options = PdtOptions::default().with_plane(WorkingPlane::XZ);
    let Mutation::SetCursor(p) = plan(&snapshot, &options, "CI2,90").unwrap() else {
        panic!("expected cursor placement");
    };
    assert!(close(p, DVec3::new(0.0, 0.0, 2.0)));
}

#[test]
fn test_cursor_percent_adds_object_location() {
    let snapshot = Snapshot::edit(
        DVec3::new(0.0, 0.0, 5.0),
        &[DVec3::ZERO, DVec3::new(4.0, 0.0, 0.0)],
    );
    let mutation = plan(&snapshot, &PdtOptions::default(), "CP25").unwrap();
    assert_eq!(mutation, Mutation::SetCursor(DVec3::new(1.0, 0.0, 5.0)));

    let flipped = PdtOptions::default().with_flip_percent(true);
    let mutation = plan(&snapshot, &flipped, "CP25").unwrap();
    assert_eq!(mutation, Mutation::SetCursor(DVec3::new(3.0, 0.0, 5.0)));
}

#[test]
fn test_percent_needs_two_points() {
    let snapshot = Snapshot::edit(DVec3::ZERO, &[DVec3::ZERO]);
    let err = plan(&snapshot, &PdtOptions::default(), "CP50").unwrap_err();
    assert!(matches!(err, PdtError::SelectionCount { found: 1, .. }));
}

#[test]
fn test_grab_delta_translates_selection() {
    let snapshot = Snapshot::edit(DVec3::ZERO, &[DVec3::ZERO, DVec3::X]);
    let mutation = plan(&snapshot, &PdtOptions::default(), "GD0,0,5").unwrap();
    assert_eq!(
        mutation,
        Mutation::TranslateVertices {
            vertices: vec![VertexId(0), VertexId(1)],
            offset: DVec3::new(0.0, 0.0, 5.0),
        }
    );
}

#[test]
fn test_grab_absolute_is_object_local() {
    let snapshot = Snapshot::edit(DVec3::new(1.0, 1.0, 1.0), &[DVec3::ZERO]);
    let mutation = plan(&snapshot, &PdtOptions::default(), "GA2,2,2").unwrap();
    assert_eq!(mutation, Mutation::MoveVertices(vec![(VertexId(0), DVec3::ONE)]));
}

#[test]
fn test_grab_percent_always_measures_from_far_point() {
    let snapshot = Snapshot::edit(DVec3::ZERO, &[DVec3::ZERO, DVec3::new(10.0, 0.0, 0.0)]);
    let mutation = plan(&snapshot, &PdtOptions::default(), "GP20").unwrap();
    assert_eq!(
        mutation,
        Mutation::MoveVertices(vec![(VertexId(1), DVec3::new(8.0, 0.0, 0.0))])
    );
}

#[test]
fn test_grab_objects() {
    let snapshot = Snapshot {
        object: Some(ActiveObject {
            id: ObjectId(1),
            mode: ObjectMode::Object,
            location: DVec3::X,
        }),
        objects: vec![
            SceneObject {
                id: ObjectId(0),
                location: DVec3::ZERO,
            },
            SceneObject {
                id: ObjectId(1),
                location: DVec3::X,
            },
        ],
        ..Default::default()
    };
    let mutation = plan(&snapshot, &PdtOptions::default(), "GD0,1,0").unwrap();
    assert_eq!(
        mutation,
        Mutation::TranslateObjects {
            objects: vec![ObjectId(0), ObjectId(1)],
            offset: DVec3::Y,
        }
    );
}

#[test]
fn test_new_and_extruded_vertex() {
    let snapshot = Snapshot::edit(DVec3::new(5.0, 0.0, 0.0), &[DVec3::new(1.0, 0.0, 0.0)]);
    let options = PdtOptions::default();

    let mutation = plan(&snapshot, &options, "NA5,0,1").unwrap();
    assert_eq!(
        mutation,
        Mutation::AddVertex {
            at: DVec3::new(0.0, 0.0, 1.0),
            connect: vec![],
        }
    );

    let mutation = plan(&snapshot, &options, "VD0,2,0").unwrap();
    assert_eq!(
        mutation,
        Mutation::AddVertex {
            at: DVec3::new(1.0, 2.0, 0.0),
            connect: vec![VertexId(0)],
        }
    );
}

#[test]
fn test_mesh_operations_need_edit_mode() {
    let snapshot = Snapshot {
        object: Some(ActiveObject {
            id: ObjectId(0),
            mode: ObjectMode::Object,
            location: DVec3::ZERO,
        }),
        ..Default::default()
    };
    for input in ["NA0,0,0", "VD1,0,0", "SD0,0,1", "DD1,0,0", "ED0,0,1", "FV0.1,2,0.5"] {
        let err = plan(&snapshot, &PdtOptions::default(), input).unwrap_err();
        assert!(matches!(err, PdtError::WrongObjectMode { .. }), "{input}");
    }
    let err = plan(&Snapshot::default(), &PdtOptions::default(), "GD0,0,1").unwrap_err();
    assert!(matches!(err, PdtError::NoActiveObject));
}

#[test]
fn test_split_edges() {
    let snapshot = Snapshot::edit(DVec3::ZERO, &[DVec3::ZERO, DVec3::new(4.0, 0.0, 0.0)])
        .with_edges(&[(0, 1)]);
    let options = PdtOptions::default();

    let mutation = plan(&snapshot, &options, "SP25").unwrap();
    assert_eq!(
        mutation,
        Mutation::SplitEdges {
            edges: vec![EdgeId(0)],
            placement: SplitPlacement::At(DVec3::new(1.0, 0.0, 0.0)),
        }
    );

    let mutation = plan(&snapshot, &options, "SD0,0,1").unwrap();
    assert_eq!(
        mutation,
        Mutation::SplitEdges {
            edges: vec![EdgeId(0)],
            placement: SplitPlacement::MidpointOffset(DVec3::Z),
        }
    );

    let none = Snapshot::edit(DVec3::ZERO, &[DVec3::ZERO]);
    assert!(matches!(
        plan(&none, &options, "SA1,1,1"),
        Err(PdtError::SelectionCount { found: 0, .. })
    ));
}

#[test]
fn test_duplicate_and_extrude() {
    let snapshot = Snapshot::edit(DVec3::ZERO, &[DVec3::ZERO, DVec3::X]).with_edges(&[(0, 1)]);
    let mutation = plan(&snapshot, &PdtOptions::default(), "ED0,0,2").unwrap();
    assert_eq!(
        mutation,
        Mutation::Extrude {
            vertices: vec![VertexId(0), VertexId(1)],
            edges: vec![EdgeId(0)],
            offset: DVec3::new(0.0, 0.0, 2.0),
        }
    );
    assert!(matches!(
        plan(&snapshot, &PdtOptions::default(), "DA1,1,1"),
        Err(PdtError::UnknownMode { .. })
    ));
}

#[test]
fn test_fillet_parameters_are_clamped() {
    let snapshot = Snapshot::edit(DVec3::ZERO, &[DVec3::ZERO, DVec3::X]).with_edges(&[(0, 1)]);
    let Mutation::Fillet(fillet) = plan(&snapshot, &PdtOptions::default(), "FE0.1,0,2").unwrap()
    else {
        panic!("expected fillet");
    };
    assert_eq!(fillet.mode, FilletMode::Edge);
    assert_eq!(fillet.segments, 1);
    assert_eq!(fillet.profile, 1.0);
    assert_eq!(fillet.target, FilletTarget::Edges(vec![EdgeId(0)]));
}

#[test]
fn test_fillet_segments_have_upper_bound() {
    let snapshot = Snapshot::edit(DVec3::ZERO, &[DVec3::ZERO]);
    let Mutation::Fillet(fillet) = plan(&snapshot, &PdtOptions::default(), "FV1,1e30,-2").unwrap()
    else {
        panic!("expected fillet");
    };
    assert_eq!(fillet.segments, Fillet::MAX_SEGMENTS);
    assert_eq!(fillet.profile, 0.0);
    assert_eq!(fillet.target, FilletTarget::Vertices(vec![VertexId(0)]));
}

#[test]
fn test_fillet_intersect() {
    let snapshot = Snapshot::edit(
        DVec3::ZERO,
        &[
            DVec3::new(-2.0, 0.0, 0.0),
            DVec3::new(-1.0, 0.0, 0.0),
            DVec3::new(0.0, 3.0, 0.0),
            DVec3::new(0.0, 1.0, 0.0),
        ],
    )
    .with_edges(&[(0, 1), (2, 3)]);
    let Mutation::Fillet(fillet) = plan(&snapshot, &PdtOptions::default(), "FI0.5,4,0.5").unwrap()
    else {
        panic!("expected fillet");
    };
    let FilletTarget::Intersection { corner, merge } = fillet.target else {
        panic!("expected intersection target");
    };
    assert!(close(corner, DVec3::ZERO));
    assert_eq!(merge, [VertexId(1), VertexId(3)]);
}

#[test]
fn test_intersection_placement() {
    // Select history: first, last, other, active.
    let snapshot = Snapshot::edit(
        DVec3::new(0.0, 0.0, 1.0),
        &[
            DVec3::new(0.5, 2.0, 0.0),
            DVec3::new(0.5, -1.0, 0.0),
            DVec3::new(3.0, 0.0, 0.0),
            DVec3::new(-1.0, 0.0, 0.0),
        ],
    );
    let options = PdtOptions::default();
    let Mutation::SetCursor(p) = plan(&snapshot, &options, "CINT").unwrap() else {
        panic!("expected cursor placement");
    };
    assert!(close(p, DVec3::new(0.5, 0.0, 1.0)));

    let Mutation::MoveVertices(moves) = plan(&snapshot, &options, "GINT").unwrap() else {
        panic!("expected vertex moves");
    };
    let ids: Vec<VertexId> = moves.iter().map(|(id, _)| *id).collect();
    assert_eq!(ids, vec![VertexId(3), VertexId(1)]);
    assert!(moves.iter().all(|(_, p)| close(*p, DVec3::new(0.5, 0.0, 0.0))));
}

#[test]
fn test_intersection_parallel() {
    let snapshot = Snapshot::edit(
        DVec3::ZERO,
        &[
            DVec3::new(0.0, 1.0, 0.0),
            DVec3::new(1.0, 1.0, 0.0),
            DVec3::new(1.0, 0.0, 0.0),
            DVec3::new(0.0, 0.0, 0.0),
        ],
    );
    let err = plan(&snapshot, &PdtOptions::default(), "CINT").unwrap_err();
    assert!(matches!(err, PdtError::NoIntersection));
}

#[test]
fn test_arc_centre_placement_reports_radius() {
    let snapshot = Snapshot::edit(
        DVec3::ZERO,
        &[DVec3::ZERO, DVec3::new(1.0, 1.0, 0.0), DVec3::new(2.0, 0.0, 0.0)],
    );
    let action = Router::new(&PdtOptions::default(), &snapshot)
        .plan("CCEN")
        .unwrap();
    let Action::Mutate {
        mutation: Mutation::SetCursor(centre),
        radius: Some(radius),
    } = action
    else {
        panic!("expected cursor placement with radius, got {action:?}");
    };
    assert!(close(centre, DVec3::X));
    assert!((radius - 1.0).abs() < 1e-9);

    let collinear = Snapshot::edit(DVec3::ZERO, &[DVec3::ZERO, DVec3::X, DVec3::X * 2.0]);
    assert!(matches!(
        Router::new(&PdtOptions::default(), &collinear).plan("PCEN"),
        Err(PdtError::CollinearPoints)
    ));
}

#[test]
fn test_normal_placement_extrudes_from_active() {
    let snapshot = Snapshot::edit(
        DVec3::ZERO,
        &[DVec3::ZERO, DVec3::new(4.0, 0.0, 0.0), DVec3::new(1.0, 3.0, 0.0)],
    );
    let mutation = plan(&snapshot, &PdtOptions::default(), "VNML").unwrap();
    assert_eq!(
        mutation,
        Mutation::AddVertex {
            at: DVec3::new(1.0, 0.0, 0.0),
            connect: vec![VertexId(2)],
        }
    );
}

#[test]
fn test_specials() {
    let snapshot = Snapshot::edit(DVec3::ZERO, &[DVec3::ZERO, DVec3::new(0.0, 2.0, 0.0)]);
    let options = PdtOptions::default();
    let router = Router::new(&options, &snapshot);

    assert_eq!(
        router.plan("J2V").unwrap(),
        Action::from(Mutation::JoinVertices(VertexId(0), VertexId(1)))
    );
    let Action::Measure(m) = router.plan("AD2").unwrap() else {
        panic!("expected measurement");
    };
    assert!((m.distance - 2.0).abs() < 1e-12);
    assert!((m.angle - 90.0).abs() < 1e-9);
    assert!(matches!(
        router.plan("AD3"),
        Err(PdtError::SelectionCount { found: 2, .. })
    ));
    assert_eq!(
        router.plan("otc").unwrap(),
        Action::from(Mutation::OriginToCursor(ObjectId(0)))
    );
    assert!(matches!(router.plan("?").unwrap(), Action::Help(_)));
    assert!(matches!(router.plan(""), Err(PdtError::TooShortCommand)));
}

#[test]
fn test_maths() {
    let snapshot = Snapshot::default();
    let options = PdtOptions::default();
    let action = Router::new(&options, &snapshot).plan("MD 3.0 * 4.0").unwrap();
    assert_eq!(
        action,
        Action::Maths {
            target: MathsTarget::Distance,
            value: 12.0
        }
    );
}

#[test]
fn test_execute_applies_once_and_only_on_success() {
    let snapshot = Snapshot::edit(DVec3::ZERO, &[DVec3::ZERO]);
    let options = PdtOptions::default();
    let mut sink: Vec<Mutation> = Vec::new();

    execute("CA1,2,3", &options, &snapshot, &mut sink).unwrap();
    assert_eq!(sink, vec![Mutation::SetCursor(DVec3::new(1.0, 2.0, 3.0))]);

    for bad in ["CA1,2", "XA1,2,3", "CP50", "CCEN", "MX 1 +"] {
        assert!(execute(bad, &options, &snapshot, &mut sink).is_err(), "{bad}");
    }
    assert_eq!(sink.len(), 1);
}

/// A host that refuses every change.
struct ReadOnlySink;

impl MutationSink for ReadOnlySink {
    fn apply(&mut self, _mutation: Mutation) -> pdt_core::Result<()> {
        Err(PdtError::Sink("scene is read-only".to_string()))
    }
}

#[test]
fn test_commit_reports_sink_rejection() {
    let snapshot = Snapshot::edit(DVec3::ZERO, &[DVec3::ZERO]);
    let options = PdtOptions::default();

    let err = execute("CA1,2,3", &options, &snapshot, &mut ReadOnlySink).unwrap_err();
    assert!(matches!(err, PdtError::Sink(_)));

    // Planning errors pass through without reaching the sink.
    let planned = Router::new(&options, &snapshot).plan("CA1");
    let err = commit("CA1", planned, &mut ReadOnlySink).unwrap_err();
    assert!(matches!(err, PdtError::WrongValueCount { .. }));

    // Actions without a mutation never touch the sink.
    let planned = Router::new(&options, &snapshot).plan("MX 2.0");
    let action = commit("MX 2.0", planned, &mut ReadOnlySink).unwrap();
    assert_eq!(
        action,
        Action::Maths {
            target: MathsTarget::X,
            value: 2.0
        }
    );
}

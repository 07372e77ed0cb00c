use igraph::{EdgeKind, NodeId, Position};
use pretty_assertions::assert_eq;
use std::collections::BTreeSet;
use ra_lib::{
    interchange::{Document, InterchangeError, RecordId},
    Session,
};

fn sample_session() -> Session {
    let mut session = Session::new(3);
    let a = session.add_node(Position::new(-40.5, 12.0));
    let b = session.add_node(Position::new(3.0, 8.25));
    let c = session.add_node(Position::default());
    session.add_precoloured_nodes(2);
    session.add_interference_edge(a, b).unwrap();
    session.add_interference_edge(b, c).unwrap();
    session.add_move_edge(a, c).unwrap();
    session.add_move_edge(b, c).unwrap();
    session
}

#[test]
fn round_trips_through_a_file() {
    let session = sample_session();
    let file = temp_file::empty();
    session.export().save(file.path()).unwrap();

    let mut imported = Session::new(7);
    imported.import(&Document::load(file.path()).unwrap()).unwrap();

    assert_eq!(imported.graph(), session.graph());
    assert_eq!(imported.k(), 3);
    assert_eq!(imported.export(), session.export());
}

#[test]
fn exports_the_browser_format() {
    let mut session = Session::new(2);
    let a = session.add_node(Position::new(1.0, 2.0));
    let b = session.add_node(Position::new(3.0, 4.0));
    session.add_move_edge(b, a).unwrap();

    let json: serde_json::Value = serde_json::from_str(&session.export().to_json()).unwrap();
    assert_eq!(
        json,
        serde_json::json!({
            "nodes": [
                { "id": 0, "label": "a", "x": 1.0, "y": 2.0 },
                { "id": 1, "label": "b", "x": 3.0, "y": 4.0 },
            ],
            "edges": [{ "from": 0, "to": 1, "dashes": true }],
            "K": 2,
        })
    );
}

#[test]
fn accepts_string_ids_and_k() {
    let json = r#"{
        "nodes": [
            { "id": "5f0c", "label": "a", "x": 0, "y": 0 },
            { "id": "3", "label": "b", "x": 10, "y": 0 },
            { "id": "e1d2", "label": "1", "x": 0, "y": 10 }
        ],
        "edges": [
            { "from": "5f0c", "to": 3, "dashes": false },
            { "from": "3", "to": "5f0c", "dashes": false },
            { "from": "e1d2", "to": "3" }
        ],
        "K": "4"
    }"#;
    let document = Document::from_json(json).unwrap();
    let mut session = Session::new(2);
    session.import(&document).unwrap();

    assert_eq!(session.k(), 4);
    let ids: Vec<_> = session.graph().node_ids().collect();
    assert_eq!(ids, vec![NodeId(3), NodeId(4), NodeId(5)]);
    assert_eq!(session.graph().edge_count(), 2);
    assert!(session.graph().interfere(NodeId(4), NodeId(3)));
    assert_eq!(
        session.graph().neighbours(NodeId(5), EdgeKind::Interference),
        BTreeSet::from([NodeId(3)])
    );

    // New nodes continue after the imported ids and labels.
    let id = session.add_node(Position::default());
    assert_eq!(id, NodeId(6));
    assert_eq!(session.graph().node(id).unwrap().label.as_str(), "c");
}

#[test]
fn rejects_broken_documents_without_changing_the_session() {
    let mut session = sample_session();
    let before = session.graph().clone();

    let unknown = Document::from_json(
        r#"{"nodes": [{"id": 0, "label": "a"}], "edges": [{"from": 0, "to": 9}], "K": 2}"#,
    )
    .unwrap();
    assert!(matches!(
        session.import(&unknown),
        Err(InterchangeError::UnknownEndpoint(RecordId::Number(9)))
    ));

    let self_loop = Document::from_json(
        r#"{"nodes": [{"id": 0, "label": "a"}], "edges": [{"from": 0, "to": "0"}], "K": 2}"#,
    )
    .unwrap();
    assert!(matches!(
        session.import(&self_loop),
        Err(InterchangeError::SelfLoop(_))
    ));

    let duplicate = Document::from_json(
        r#"{"nodes": [{"id": 0, "label": "a"}, {"id": "0", "label": "b"}], "edges": [], "K": 2}"#,
    )
    .unwrap();
    assert!(matches!(
        session.import(&duplicate),
        Err(InterchangeError::DuplicateNode(_))
    ));

    assert!(matches!(
        Document::from_json(r#"{"nodes": [], "edges": [], "K": "many"}"#),
        Err(InterchangeError::Json(_))
    ));
    assert_eq!(session.graph(), &before);
    assert_eq!(session.k(), 3);
}

#[test]
fn import_empties_the_stack() {
    let mut session = sample_session();
    session.delete(&[NodeId(3), NodeId(4)]);
    session.freeze(&[NodeId(0)]).unwrap();
    session.simplify(&[NodeId(0)]).unwrap();
    assert_eq!(session.stack().len(), 1);

    let document = session.export();
    session.import(&document).unwrap();
    assert!(session.stack().is_empty());
    assert!(session.graph().nodes().all(|node| node.colour.is_none()));
}

#[test]
fn rejects_ids_beyond_the_limit() {
    let mut session = sample_session();
    let before = session.graph().clone();

    let largest = Document::from_json(
        r#"{"nodes": [{"id": 4294967295, "label": "a"}], "edges": [], "K": 2}"#,
    )
    .unwrap();
    assert!(matches!(
        session.import(&largest),
        Err(InterchangeError::IdOutOfRange(RecordId::Number(4294967295)))
    ));

    let no_room = Document::from_json(
        r#"{"nodes": [{"id": 2147483647, "label": "a"}, {"id": "x", "label": "b"}],
            "edges": [], "K": 2}"#,
    )
    .unwrap();
    assert!(matches!(
        session.import(&no_room),
        Err(InterchangeError::IdOutOfRange(RecordId::Text(_)))
    ));
    assert_eq!(session.graph(), &before);

    let top = Document::from_json(
        r#"{"nodes": [{"id": 2147483647, "label": "a"}], "edges": [], "K": 2}"#,
    )
    .unwrap();
    session.import(&top).unwrap();
    let fresh = session.add_node(Position::default());
    assert_eq!(fresh, NodeId(2147483648));
}

#[test]
fn non_finite_positions_export_as_the_origin() {
    let mut session = Session::new(2);
    session.add_node(Position::new(f64::NAN, 5.0));
    session.add_node(Position::new(1.0, f64::INFINITY));

    let document = Document::from_json(&session.export().to_json()).unwrap();
    let positions: Vec<_> = document.nodes.iter().map(|node| (node.x, node.y)).collect();
    assert_eq!(positions, [(0.0, 5.0), (1.0, 0.0)]);
    session.import(&document).unwrap();
    assert_eq!(session.graph().len(), 2);
}

use super::*;
use igraph::{EdgeKind, Position};
use pretty_assertions::assert_eq;

#[test]
fn draws_move_edges_dashed_and_colours_filled() {
    let mut graph = Graph::new();
    let a = graph.add_node("a".into(), Position::new(0.0, 10.0));
    let b = graph.add_node("b".into(), Position::new(5.0, 0.0));
    let c = graph.add_node("c".into(), Position::default());
    graph.add_edge(a, b, EdgeKind::Interference).unwrap();
    graph.add_edge(a, c, EdgeKind::Move).unwrap();
    graph.colour_node(a, 2).unwrap();

    assert_eq!(
        inspect_graph(&graph),
        "graph interference {\n \
         node [shape=\"circle\", style=\"filled\"];\n \
         \"n0\" [label=\"a\", fillcolor=\"lightblue\", pos=\"0,-10!\"];\n \
         \"n1\" [label=\"b\", fillcolor=\"white\", pos=\"5,0!\"];\n \
         \"n2\" [label=\"c\", fillcolor=\"white\", pos=\"0,0!\"];\n \
         \"n0\" -- \"n1\";\n \
         \"n0\" -- \"n2\" [style=\"dashed\"];\n\
         }\n"
    );
}

#[test]
fn captions_sessions_with_k_and_stack() {
    let mut session = Session::new(3);
    session.add_node(Position::default());
    session.add_node(Position::default());
    session.simplify(&[igraph::NodeId(0)]).unwrap();

    let dot = inspect_session(&session);
    assert!(dot.contains(" label=\"K = 3, stack: a\";\n"));
    assert!(!dot.contains("\"n0\""));
}

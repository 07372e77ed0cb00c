use super::*;
use crate::diagnostic::{Code, DiagnosticKind};
use crate::session::Session;
use pretty_assertions::assert_eq;

fn codes<T>(res: &crate::diagnostic::AggregateResult<T>) -> Vec<(DiagnosticKind, Code)> {
    res.diagnostics().map(|(kind, d)| (kind, *d.code())).collect()
}

fn run(source: &str, k: u32) -> (Session, crate::diagnostic::AggregateResult<Transcript>) {
    let commands = parse(source).into_value().unwrap();
    let mut session = Session::new(k);
    let res = execute(&mut session, &commands, source, None);
    (session, res)
}

#[test]
fn parses_commands_and_skips_comments() {
    let source = "# set up\nk 2\n\nnode 1.5 -2\ninterfere a @1   # edge\nbriggs a b\n";
    let commands = parse(source).into_value().unwrap();
    let kinds: Vec<_> = commands.iter().map(|c| c.kind.clone()).collect();

    assert_eq!(
        kinds,
        vec![
            CommandKind::SetK(2),
            CommandKind::Node(Some(Position::new(1.5, -2.0))),
            CommandKind::Interfere(
                NodeRef {
                    target: Target::Label("a".to_owned()),
                    span: Span::from(36..37),
                },
                NodeRef {
                    target: Target::Id(NodeId(1)),
                    span: Span::from(38..40),
                },
            ),
            CommandKind::Coalesce(
                Heuristic::Briggs,
                vec![
                    NodeRef {
                        target: Target::Label("a".to_owned()),
                        span: Span::from(57..58),
                    },
                    NodeRef {
                        target: Target::Label("b".to_owned()),
                        span: Span::from(59..60),
                    },
                ],
            ),
        ]
    );
    assert_eq!(commands[2].span, Span::from(26..40));
}

#[test]
fn import_paths_may_contain_spaces() {
    let commands = parse("import  my graphs/a b.json # saved\n")
        .into_value()
        .unwrap();
    assert_eq!(
        commands[0].kind,
        CommandKind::Import("my graphs/a b.json".to_owned())
    );
}

#[test]
fn reports_every_malformed_line() {
    let res = parse("frob a\nk\nk x\nnode 1\ninterfere a @b\nselect a\nimport\n");
    assert!(res.is_err());
    assert_eq!(
        codes(&res),
        vec![
            (DiagnosticKind::Err, Code::UnknownCommand),
            (DiagnosticKind::Err, Code::WrongArity),
            (DiagnosticKind::Err, Code::InvalidNumber),
            (DiagnosticKind::Err, Code::WrongArity),
            (DiagnosticKind::Err, Code::InvalidNumber),
            (DiagnosticKind::Err, Code::WrongArity),
            (DiagnosticKind::Err, Code::WrongArity),
        ]
    );
    let (_, first) = res.diagnostics().next().unwrap();
    assert_eq!(first.main_span(), &Span::from(0..4));
    assert_eq!(first.message(), "unknown command: frob");
}

#[test]
fn writes_a_transcript() {
    let source = "k 2\nnode\nnode\ninterfere a b\nsimplify a\nspill a\nselect\n";
    let (_, res) = run(source, 3);

    assert!(res.is_rec());
    assert_eq!(codes(&res), vec![(DiagnosticKind::Rec, Code::UnknownNode)]);
    assert_eq!(
        res.value().unwrap().to_string(),
        "k 2 => K = 2\n\
         node => added node a (@0)\n\
         node => added node b (@1)\n\
         interfere a b => added interference edge a -- b\n\
         simplify a => simplified a: degree 1 < K (2)\n\
         spill a => error: there is no node a\n\
         select => selected a: coloured lightblue\n\
         K = 2, 2 nodes, 1 edges, stack: empty\n"
    );
}

#[test]
fn refused_commands_carry_their_code() {
    let source = "node\nnode\nnode\ninterfere a b\ninterfere a c\nsimplify a\nmove b c\nbriggs b c\n";
    let (session, res) = run(source, 2);

    assert_eq!(
        codes(&res),
        vec![(DiagnosticKind::Rec, Code::SignificantDegree)]
    );
    let entries = &res.value().unwrap().entries;
    assert_eq!(
        entries[5].outcome,
        Outcome::Refused(
            Code::SignificantDegree,
            "cannot simplify node a of significant degree: 2 >= K (2)".to_owned()
        )
    );
    assert_eq!(
        entries[7].outcome,
        Outcome::Done(
            "coalesced b and c into bc (Briggs: 0 < K (2) neighbours of significant degree: none)"
                .to_owned()
        )
    );
    assert_eq!(session.graph().len(), 2);
}

#[test]
fn refusals_underline_the_nodes_at_fault() {
    let source = "node\nnode\nnode\ninterfere a b\ninterfere a c\nsimplify a\nspill @1\n";
    let (_, res) = run(source, 2);

    let spans: Vec<Vec<_>> = res
        .diagnostics()
        .map(|(_, d)| {
            d.additional_spans()
                .map(|(span, message)| (*span, message.cloned()))
                .collect()
        })
        .collect();
    assert_eq!(
        spans,
        vec![
            vec![(Span::from(52..53), None)],
            vec![(Span::from(60..62), Some("this is b".to_owned()))],
        ]
    );
}

#[test]
fn coordinates_must_be_finite() {
    let res = parse("node nan 0\nnode 1 inf\nnode -infinity 2\nnode 1e400 0\n");
    assert_eq!(codes(&res), vec![(DiagnosticKind::Err, Code::InvalidNumber); 4]);
    let (_, first) = res.diagnostics().next().unwrap();
    assert_eq!(first.main_span(), &Span::from(5..8));
}

#[test]
fn labels_shared_by_several_nodes_are_ambiguous() {
    let document = crate::interchange::Document::from_json(
        r#"{"nodes": [{"id": 0, "label": "a"}, {"id": 1, "label": "a"}], "edges": [], "K": 2}"#,
    )
    .unwrap();
    let mut session = Session::new(2);
    session.import(&document).unwrap();

    let source = "simplify a\nsimplify @1\n";
    let commands = parse(source).into_value().unwrap();
    let res = execute(&mut session, &commands, source, None);

    assert_eq!(codes(&res), vec![(DiagnosticKind::Rec, Code::AmbiguousNode)]);
    assert_eq!(session.stack().len(), 1);
}

#[test]
fn missing_import_is_recoverable() {
    let (session, res) = run("node\nimport does/not/exist.json\n", 2);
    assert_eq!(codes(&res), vec![(DiagnosticKind::Rec, Code::ImportFailed)]);
    assert_eq!(session.graph().len(), 1);
}

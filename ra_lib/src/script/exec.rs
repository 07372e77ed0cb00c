use super::{Command, CommandKind, NodeRef, Target};
use crate::{
    diagnostic::{AggregateResult, Code, Diagnostic, DiagnosticBuilder},
    error::AllocError,
    interchange::Document,
    session::Session,
    util::label_of,
};
use igraph::{Label, NodeId};
use log::debug;
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Done(String),
    Refused(Code, String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    /// The command as written in the script.
    pub command: String,
    pub outcome: Outcome,
}

/// What every command of a script did, followed by the final state of the session.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Transcript {
    pub entries: Vec<Entry>,
    pub summary: String,
}

impl std::fmt::Display for Transcript {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for entry in &self.entries {
            match &entry.outcome {
                Outcome::Done(report) => writeln!(f, "{} => {report}", entry.command)?,
                Outcome::Refused(_, message) => {
                    writeln!(f, "{} => error: {message}", entry.command)?
                }
            }
        }
        writeln!(f, "{}", self.summary)
    }
}

/// Runs `commands` (parsed from `source`) against `session`.
///
/// A refused command adds a recoverable diagnostic and leaves the session as it was, so the
/// result always has a value. Relative import paths are resolved against `import_root`.
pub fn execute(
    session: &mut Session,
    commands: &[Command],
    source: &str,
    import_root: Option<&Path>,
) -> AggregateResult<Transcript> {
    let mut res = AggregateResult::new_ok(Transcript::default());
    for command in commands {
        let text = &source[std::ops::Range::from(command.span)];
        debug!("running `{text}`");

        let outcome = match run_command(session, command, import_root) {
            Ok(report) => Outcome::Done(report),
            Err(diagnostic) => {
                let outcome = Outcome::Refused(*diagnostic.code(), diagnostic.message().clone());
                res.add_rec_diagnostic(diagnostic);
                outcome
            }
        };
        if let Some(transcript) = res.value_mut() {
            transcript.entries.push(Entry {
                command: text.to_owned(),
                outcome,
            });
        }
    }
    if let Some(transcript) = res.value_mut() {
        transcript.summary = session.to_string();
    }
    res
}

fn resolve(session: &Session, node: &NodeRef) -> Result<NodeId, Diagnostic> {
    match &node.target {
        Target::Id(id) => Ok(*id),
        Target::Label(label) => {
            let found: Vec<_> = session.graph().find_by_label(label).collect();
            match found.as_slice() {
                [id] => Ok(*id),
                [] => Err(DiagnosticBuilder::new(node.span).build_unknown_node(label)),
                _ => Err(DiagnosticBuilder::new(node.span).build_ambiguous_node(label, found.len())),
            }
        }
    }
}

fn resolve_all(session: &Session, nodes: &[NodeRef]) -> Result<Vec<NodeId>, Diagnostic> {
    nodes.iter().map(|node| resolve(session, node)).collect()
}

fn label(session: &Session, id: NodeId) -> Label {
    label_of(session.graph(), id)
}

fn join(labels: &[Label]) -> String {
    labels
        .iter()
        .map(Label::as_str)
        .collect::<Vec<_>>()
        .join(", ")
}

fn node_refs(kind: &CommandKind) -> Vec<&NodeRef> {
    match kind {
        CommandKind::Interfere(a, b) | CommandKind::Move(a, b) => vec![a, b],
        CommandKind::Delete(nodes)
        | CommandKind::Simplify(nodes)
        | CommandKind::Spill(nodes)
        | CommandKind::Freeze(nodes)
        | CommandKind::Coalesce(_, nodes) => nodes.iter().collect(),
        _ => Vec::new(),
    }
}

/// Reports a refused command, underlining the references to the nodes the error is about.
fn refused(session: &Session, command: &Command, err: AllocError) -> Diagnostic {
    let culprits = err.culprits();
    let mut builder = DiagnosticBuilder::new(command.span);
    for node in node_refs(&command.kind) {
        match &node.target {
            Target::Label(text) if culprits.iter().any(|c| c.as_str() == text.as_str()) => {
                builder.add_additional_span(node.span, None);
            }
            Target::Id(id) => {
                let label = label(session, *id);
                if culprits.contains(&&label) {
                    builder.add_additional_span(node.span, Some(format!("this is {label}")));
                }
            }
            Target::Label(_) => {}
        }
    }
    builder.build_alloc_error(&err)
}

fn run_command(
    session: &mut Session,
    command: &Command,
    import_root: Option<&Path>,
) -> Result<String, Diagnostic> {
    let report = match &command.kind {
        CommandKind::SetK(k) => {
            session.set_k(*k);
            format!("K = {k}")
        }
        CommandKind::Node(position) => {
            let id = session.add_node(position.unwrap_or_default());
            format!("added node {} ({id})", label(session, id))
        }
        CommandKind::Precoloured => {
            let ids = session.add_precoloured_nodes(session.k());
            let labels: Vec<_> = ids.iter().map(|&id| label(session, id)).collect();
            match labels.is_empty() {
                true => "added no pre-coloured nodes".to_owned(),
                false => format!("added pre-coloured nodes {}", join(&labels)),
            }
        }
        CommandKind::Interfere(a, b) => {
            let (a, b) = (resolve(session, a)?, resolve(session, b)?);
            let added = session
                .add_interference_edge(a, b)
                .map_err(|err| refused(&*session, command, err))?;
            let (a, b) = (label(session, a), label(session, b));
            match added {
                true => format!("added interference edge {a} -- {b}"),
                false => format!("{a} and {b} already interfere"),
            }
        }
        CommandKind::Move(a, b) => {
            let (a, b) = (resolve(session, a)?, resolve(session, b)?);
            let added = session
                .add_move_edge(a, b)
                .map_err(|err| refused(&*session, command, err))?;
            let (a, b) = (label(session, a), label(session, b));
            match added {
                true => format!("added move edge {a} -- {b}"),
                false => format!("{a} and {b} are already move-related"),
            }
        }
        CommandKind::Delete(nodes) => {
            let ids = resolve_all(session, nodes)?;
            let deleted = session.delete(&ids);
            match deleted.is_empty() {
                true => "nothing to delete".to_owned(),
                false => format!("deleted {}", join(&deleted)),
            }
        }
        CommandKind::Simplify(nodes) => {
            let ids = resolve_all(session, nodes)?;
            session
                .simplify(&ids)
                .map_err(|err| refused(&*session, command, err))?
                .to_string()
        }
        CommandKind::Spill(nodes) => {
            let ids = resolve_all(session, nodes)?;
            session
                .candidate_spill(&ids)
                .map_err(|err| refused(&*session, command, err))?
                .to_string()
        }
        CommandKind::Freeze(nodes) => {
            let ids = resolve_all(session, nodes)?;
            session
                .freeze(&ids)
                .map_err(|err| refused(&*session, command, err))?
                .to_string()
        }
        CommandKind::Coalesce(heuristic, nodes) => {
            let ids = resolve_all(session, nodes)?;
            session
                .coalesce(&ids, *heuristic)
                .map_err(|err| refused(&*session, command, err))?
                .to_string()
        }
        CommandKind::Select => match session
            .select()
            .map_err(|err| refused(&*session, command, err))?
        {
            Some(selected) => selected.to_string(),
            None => "nothing to select".to_owned(),
        },
        CommandKind::Precolour => session
            .assign_precolours()
            .map_err(|err| refused(&*session, command, err))?
            .to_string(),
        CommandKind::Import(path) => {
            let full_path = match import_root {
                Some(root) => root.join(path),
                None => Path::new(path).to_path_buf(),
            };
            let import_failed = |err: &dyn std::fmt::Display| {
                DiagnosticBuilder::new(command.span).build_import_failed(path, err)
            };
            let document = Document::load(&full_path).map_err(|err| import_failed(&err))?;
            session.import(&document).map_err(|err| import_failed(&err))?;
            format!(
                "imported {} nodes and {} edges from {path}, K = {}",
                session.graph().len(),
                session.graph().edge_count(),
                session.k()
            )
        }
        CommandKind::Clear => {
            session.clear();
            "cleared the graph".to_owned()
        }
    };
    Ok(report)
}

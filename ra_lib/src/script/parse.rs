use super::{Command, CommandKind, NodeRef, Target};
use crate::{
    diagnostic::{AggregateResult, Diagnostic, DiagnosticBuilder, Span},
    heuristic::Heuristic,
};
use igraph::{NodeId, Position};

/// A whitespace separated word and where it is in the source.
#[derive(Debug, Clone, Copy)]
struct Word<'s> {
    text: &'s str,
    span: Span,
}

/// Splits `line` (starting at byte `offset` of the source) into words, dropping a `#` comment.
fn words(line: &str, offset: usize) -> Vec<Word<'_>> {
    let line = line.split('#').next().unwrap_or_default();
    let mut words = Vec::new();
    let mut start = None;
    for (i, c) in line.char_indices().chain([(line.len(), ' ')]) {
        match (start, c.is_whitespace()) {
            (None, false) => start = Some(i),
            (Some(s), true) => {
                words.push(Word {
                    text: &line[s..i],
                    span: Span::from(offset + s..offset + i),
                });
                start = None;
            }
            _ => {}
        }
    }
    words
}

/// Parses a whole script. Every malformed line is reported; commands are only returned if there
/// are none.
pub fn parse(source: &str) -> AggregateResult<Vec<Command>> {
    let mut res = AggregateResult::new_ok(Vec::new());
    let mut offset = 0;
    for line in source.split_inclusive('\n') {
        let words = words(line, offset);
        let line_offset = offset;
        offset += line.len();

        let Some((name, args)) = words.split_first() else {
            continue;
        };
        let span = args.last().map_or(name.span, |last| name.span.join(last.span));
        let source_line = SourceLine {
            text: line,
            offset: line_offset,
        };
        match parse_command(name, args, span, source_line) {
            Ok(kind) => {
                if let Some(commands) = res.value_mut() {
                    commands.push(Command { kind, span });
                }
            }
            Err(diagnostic) => res.add_err(diagnostic),
        }
    }
    res
}

#[derive(Debug, Clone, Copy)]
struct SourceLine<'s> {
    text: &'s str,
    offset: usize,
}

impl<'s> SourceLine<'s> {
    /// The text covered by `span`, which must lie on this line.
    fn slice(&self, span: Span) -> &'s str {
        &self.text[span.start() - self.offset..span.excl_end() - self.offset]
    }
}

fn parse_command(
    name: &Word,
    args: &[Word],
    span: Span,
    line: SourceLine,
) -> Result<CommandKind, Diagnostic> {
    let arity = |expected: &str| {
        DiagnosticBuilder::new(span).build_wrong_arity(name.text, expected, args.len())
    };

    let kind = match name.text {
        "k" => match args {
            [n] => CommandKind::SetK(parse_number(n)?),
            _ => return Err(arity("one number")),
        },
        "node" => match args {
            [] => CommandKind::Node(None),
            [x, y] => CommandKind::Node(Some(Position::new(parse_coordinate(x)?, parse_coordinate(y)?))),
            _ => return Err(arity("no arguments or an x and y coordinate")),
        },
        "interfere" | "move" => match args {
            [a, b] => {
                let (a, b) = (parse_node_ref(a)?, parse_node_ref(b)?);
                match name.text {
                    "interfere" => CommandKind::Interfere(a, b),
                    _ => CommandKind::Move(a, b),
                }
            }
            _ => return Err(arity("two nodes")),
        },
        "delete" => CommandKind::Delete(parse_node_refs(args)?),
        "simplify" => CommandKind::Simplify(parse_node_refs(args)?),
        "spill" => CommandKind::Spill(parse_node_refs(args)?),
        "freeze" => CommandKind::Freeze(parse_node_refs(args)?),
        "briggs" => CommandKind::Coalesce(Heuristic::Briggs, parse_node_refs(args)?),
        "george" => CommandKind::Coalesce(Heuristic::George, parse_node_refs(args)?),
        "import" => {
            let Some(first) = args.first() else {
                return Err(arity("a path"));
            };
            // Paths may contain spaces.
            let path = Span::from(first.span.start()..span.excl_end());
            CommandKind::Import(line.slice(path).to_owned())
        }
        "precoloured" | "select" | "precolour" | "clear" => {
            if !args.is_empty() {
                return Err(arity("no arguments"));
            }
            match name.text {
                "precoloured" => CommandKind::Precoloured,
                "select" => CommandKind::Select,
                "precolour" => CommandKind::Precolour,
                _ => CommandKind::Clear,
            }
        }
        unknown => return Err(DiagnosticBuilder::new(name.span).build_unknown_command(unknown)),
    };
    Ok(kind)
}

fn parse_number<T: std::str::FromStr>(word: &Word) -> Result<T, Diagnostic> {
    word.text
        .parse()
        .map_err(|_| DiagnosticBuilder::new(word.span).build_invalid_number(word.text))
}

/// Like [`parse_number`], but `nan` and `inf` are refused as they have no JSON form.
fn parse_coordinate(word: &Word) -> Result<f64, Diagnostic> {
    match parse_number::<f64>(word)? {
        coordinate if coordinate.is_finite() => Ok(coordinate),
        _ => Err(DiagnosticBuilder::new(word.span).build_invalid_number(word.text)),
    }
}

fn parse_node_ref(word: &Word) -> Result<NodeRef, Diagnostic> {
    let target = match word.text.strip_prefix('@') {
        Some(id) => Target::Id(NodeId(parse_number(&Word {
            text: id,
            span: word.span,
        })?)),
        None => Target::Label(word.text.to_owned()),
    };
    Ok(NodeRef {
        target,
        span: word.span,
    })
}

fn parse_node_refs(words: &[Word]) -> Result<Vec<NodeRef>, Diagnostic> {
    words.iter().map(parse_node_ref).collect()
}

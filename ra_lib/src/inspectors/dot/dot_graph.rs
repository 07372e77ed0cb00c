/// An undirected Graphviz graph.
#[derive(Debug, Default)]
pub struct DotGraph {
    caption: Option<String>,
    nodes: Vec<(String, Vec<(&'static str, String)>)>,
    edges: Vec<(String, String, Vec<(&'static str, String)>)>,
}

impl DotGraph {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_caption(&mut self, caption: String) {
        self.caption = Some(caption);
    }

    pub fn add_node(&mut self, id: String, attributes: Vec<(&'static str, String)>) {
        self.nodes.push((id, attributes));
    }

    pub fn add_edge(&mut self, from: String, to: String, attributes: Vec<(&'static str, String)>) {
        self.edges.push((from, to, attributes));
    }
}

fn write_attributes(
    f: &mut std::fmt::Formatter<'_>,
    attributes: &[(&'static str, String)],
) -> std::fmt::Result {
    if attributes.is_empty() {
        return Ok(());
    }
    f.write_str(" [")?;
    for (i, (name, value)) in attributes.iter().enumerate() {
        if i > 0 {
            f.write_str(", ")?;
        }
        write!(f, "{name}=\"{}\"", value.replace('"', "\\\""))?;
    }
    f.write_str("]")
}

impl std::fmt::Display for DotGraph {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "graph interference {{")?;
        writeln!(f, " node [shape=\"circle\", style=\"filled\"];")?;
        if let Some(caption) = &self.caption {
            writeln!(f, " label=\"{}\";", caption.replace('"', "\\\""))?;
        }
        for (id, attributes) in &self.nodes {
            write!(f, " \"{id}\"")?;
            write_attributes(f, attributes)?;
            writeln!(f, ";")?;
        }
        for (from, to, attributes) in &self.edges {
            write!(f, " \"{from}\" -- \"{to}\"")?;
            write_attributes(f, attributes)?;
            writeln!(f, ";")?;
        }
        writeln!(f, "}}")
    }
}

use crate::{
    diagnostic::{AggregateResult, Code, DiagnosticBuilder},
    inspectors,
    interchange::Document,
    script,
    session::Session,
};
use igraph::PALETTE_LEN;
use std::{
    collections::HashSet,
    path::{Path, PathBuf},
};

pub const DEFAULT_K: u32 = 3;

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum OutputFormat {
    Transcript,
    Json,
    Dot,
    SessionRustDbg,
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            OutputFormat::Transcript => "transcript",
            OutputFormat::Json => "json",
            OutputFormat::Dot => "dot",
            OutputFormat::SessionRustDbg => "session rust dbg",
        };
        write!(f, "{name}")
    }
}

#[derive(Debug, Clone)]
pub struct RunOpts {
    output_format: OutputFormat,
    k: u32,
    import: Option<PathBuf>,
    import_root: Option<PathBuf>,
    upgrade_to_err: HashSet<Code>,
}

#[derive(Debug, Clone)]
pub struct RunOptsBuilder {
    output_format: OutputFormat,
    k: u32,
    import: Option<PathBuf>,
    import_root: Option<PathBuf>,
    upgrade_to_err: HashSet<Code>,
}

#[derive(Debug, Clone)]
pub enum RunOptsErr {
    KTooLarge(u32),
}

impl std::fmt::Display for RunOptsErr {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RunOptsErr::KTooLarge(k) => {
                write!(f, "Can't use K = {k}, there are only {PALETTE_LEN} colours.")
            }
        }
    }
}

impl std::error::Error for RunOptsErr {}

impl Default for RunOptsBuilder {
    fn default() -> Self {
        Self {
            output_format: OutputFormat::Transcript,
            k: DEFAULT_K,
            import: None,
            import_root: None,
            upgrade_to_err: HashSet::default(),
        }
    }
}

impl RunOptsBuilder {
    /// Output a transcript, with K = 3 and not upgrading any diagnostics.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn output_format(mut self, format: OutputFormat) -> Self {
        self.output_format = format;
        self
    }

    pub fn k(mut self, k: u32) -> Self {
        self.k = k;
        self
    }

    /// Load a graph before running the script.
    pub fn import(mut self, path: impl Into<PathBuf>) -> Self {
        self.import = Some(path.into());
        self
    }

    /// Resolve the paths of `import` commands relative to this directory.
    pub fn import_root(mut self, dir: impl Into<PathBuf>) -> Self {
        self.import_root = Some(dir.into());
        self
    }

    /// Make every refused command an error.
    pub fn strict(mut self) -> Self {
        self.upgrade_to_err.extend(Code::RECOVERABLE);
        self
    }

    pub fn build(self) -> Result<RunOpts, RunOptsErr> {
        if self.k as usize > PALETTE_LEN {
            return Err(RunOptsErr::KTooLarge(self.k));
        }
        Ok(RunOpts {
            output_format: self.output_format,
            k: self.k,
            import: self.import,
            import_root: self.import_root,
            upgrade_to_err: self.upgrade_to_err,
        })
    }
}

/// Runs the script `source` and renders the result in the requested format.
pub fn run(source: &str, opts: &RunOpts) -> AggregateResult<Vec<u8>> {
    let mut res = run_script(source, opts);
    res.upgrade_diagnostics(|d| opts.upgrade_to_err.contains(d.code()));
    res
}

fn run_script(source: &str, opts: &RunOpts) -> AggregateResult<Vec<u8>> {
    let mut session = Session::new(opts.k);

    if let Some(path) = &opts.import {
        let imported = Document::load(path).and_then(|document| session.import(&document));
        if let Err(err) = imported {
            let name = path.display().to_string();
            return AggregateResult::new_err(
                DiagnosticBuilder::new(0..0).build_import_failed(&name, &err),
            );
        }
    }

    let import_root = opts.import_root.as_deref();
    let transcript = script::parse(source)
        .and_then(|commands| script::execute(&mut session, &commands, source, import_root));

    match opts.output_format {
        OutputFormat::Transcript => transcript.map(|t| t.to_string().into_bytes()),
        OutputFormat::Json => {
            transcript.map(|_| format!("{}\n", session.export().to_json()).into_bytes())
        }
        OutputFormat::Dot => {
            transcript.map(|_| inspectors::dot::inspect_session(&session).into_bytes())
        }
        OutputFormat::SessionRustDbg => {
            transcript.map(|_| format!("{session:#?}\n").into_bytes())
        }
    }
}

/// The directory a script at `path` should resolve its imports against.
pub fn script_dir(path: &Path) -> Option<&Path> {
    path.parent().filter(|dir| !dir.as_os_str().is_empty())
}

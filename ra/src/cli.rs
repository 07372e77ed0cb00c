use crate::util::PathOrStd;

use ra_lib::{RunOpts, RunOptsBuilder, RunOptsErr, DEFAULT_K};

use anyhow::{bail, Context};
use clap::{Parser, ValueEnum};
use codespan_reporting::files::SimpleFile;

use std::{fs::File, io::Read, path::PathBuf};

#[derive(Debug, Copy, Clone, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Transcript,
    Json,
    Dot,
    SessionRustDbg,
}

#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// The command script, use `-` for std in.
    #[arg(default_value = "-")]
    input_path: PathOrStd,

    /// The number of registers, until the script or an import changes it.
    #[arg(short = 'k', value_name = "K", default_value_t = DEFAULT_K)]
    k: u32,

    /// A JSON graph to load before running the script.
    #[arg(long = "import", value_name = "FILE")]
    import: Option<PathBuf>,

    /// The output format.
    #[arg(short = 'e', long, value_name = "FORMAT", value_enum, default_value = "transcript")]
    emit: OutputFormat,

    /// Treat refused allocator commands as errors.
    #[arg(long)]
    strict: bool,

    /// The output file, use `-` for std out.
    #[arg(short = 'o', long = "output", default_value = "-")]
    output_path: PathOrStd,
}

pub fn open_input_source(args: &Args) -> anyhow::Result<SimpleFile<String, String>> {
    match &args.input_path {
        PathOrStd::Path(path) => {
            if !path.exists() {
                bail!("Input file `{}` doesn't exist", path.display());
            }
            let mut handle = File::open(path)
                .with_context(|| format!("Failed to open input file `{}`", path.display()))?;
            let mut s = String::new();
            handle
                .read_to_string(&mut s)
                .with_context(|| format!("Failed to read from input file `{}`", path.display()))?;

            let name = path
                .file_name()
                .map_or_else(|| path.display().to_string(), |n| n.to_string_lossy().into_owned());
            Ok(SimpleFile::new(name, s))
        }
        PathOrStd::StdStream => {
            let mut handle = std::io::stdin().lock();
            let mut s = String::new();
            handle
                .read_to_string(&mut s)
                .context("Failed to read from stdin")?;

            Ok(SimpleFile::new("stdin stream".to_owned(), s))
        }
    }
}

pub fn extract_run_opts(args: &Args) -> Result<RunOpts, RunOptsErr> {
    let format = match args.emit {
        OutputFormat::Transcript => ra_lib::OutputFormat::Transcript,
        OutputFormat::Json => ra_lib::OutputFormat::Json,
        OutputFormat::Dot => ra_lib::OutputFormat::Dot,
        OutputFormat::SessionRustDbg => ra_lib::OutputFormat::SessionRustDbg,
    };
    let opts = RunOptsBuilder::new().output_format(format).k(args.k);

    let opts = match &args.import {
        Some(path) => opts.import(path),
        None => opts,
    };

    // Imports in a script file are relative to that file.
    let opts = match &args.input_path {
        PathOrStd::Path(path) => match ra_lib::script_dir(path) {
            Some(dir) => opts.import_root(dir),
            None => opts,
        },
        PathOrStd::StdStream => opts,
    };

    let opts = if args.strict { opts.strict() } else { opts };
    opts.build()
}

pub fn open_output(args: &Args) -> anyhow::Result<Box<dyn std::io::Write>> {
    match &args.output_path {
        PathOrStd::Path(path) => std::fs::OpenOptions::new()
            .write(true)
            .truncate(true)
            .create(true)
            .open(path)
            .map(|f| Box::new(f) as Box<dyn std::io::Write>)
            .with_context(|| format!("Failed to open output file `{}`", path.display())),
        PathOrStd::StdStream => Ok(Box::new(std::io::stdout().lock())),
    }
}

mod cli;
mod report;
mod util;

use anyhow::{bail, Context, Result};
use clap::Parser;
use log::debug;

use std::io::Write;

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let args = cli::Args::parse();
    debug!("{args:?}");

    let source = cli::open_input_source(&args)?;

    let run_opts = cli::extract_run_opts(&args)?;
    let res = ra_lib::run(source.source(), &run_opts);

    if !res.is_ok() {
        report::eprint_aggregate(&res, &source);
    }

    let Some(output) = res.into_value() else {
        bail!("couldn't run the script due to the previous errors");
    };

    cli::open_output(&args)?
        .write_all(&output)
        .with_context(|| "Failed to write to output".to_string())?;

    Ok(())
}

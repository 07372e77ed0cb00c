//! Hand-driven Chaitin-Briggs register allocation.
//!
//! A [`Session`] holds an interference graph, the work stack and `K`. Every allocator step
//! (simplify, spill, freeze, coalesce, select) is a method that either changes the session or
//! refuses with an [`AllocError`] explaining which precondition failed.

pub mod diagnostic;
pub mod error;
pub mod heuristic;
pub mod inspectors;
pub mod interchange;
mod run;
pub mod script;
pub mod session;
pub mod stack;
mod util;

pub use error::AllocError;
pub use heuristic::Heuristic;
pub use run::{run, script_dir, OutputFormat, RunOpts, RunOptsBuilder, RunOptsErr, DEFAULT_K};
pub use session::Session;

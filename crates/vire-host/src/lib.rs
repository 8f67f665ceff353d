//! Orchestration of the full compile-and-run flow.
//!
//! One driver sequences everything: load the backend session, run the
//! pipeline stages in order (short-circuiting at the first failure), extract
//! the compiled bytes, provision a fresh import environment, instantiate,
//! and invoke the entry point. Backend and environment differences are
//! injected through [`CompilerBackend`] and [`EnvConfig`] rather than
//! duplicated per host flavor.

pub mod orchestrator;

pub use orchestrator::{compile_and_run, run_pipeline};
pub use vire_core::{abi, CompileOptions, EnvConfig, Error, Result, Stage};
pub use vire_runtime::{ExecutionResult, Runtime};
pub use vire_session::{CompilerBackend, Session};

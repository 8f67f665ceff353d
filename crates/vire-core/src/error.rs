//! Error types for the host runtime.

use crate::stage::Stage;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("backend initialization failed: {0}")]
    BackendInit(String),

    #[error("{attempted} attempted before {required} succeeded")]
    StageOrder { attempted: Stage, required: Stage },

    #[error("{0} stage failed")]
    StageFailed(Stage),

    #[error("module has not been compiled")]
    NotCompiled,

    #[error("module byte sequence is empty")]
    EmptyModule,

    #[error("unresolved import: {module}::{name}")]
    UnresolvedImport { module: String, name: String },

    #[error("missing entry point: {0}")]
    MissingEntryPoint(String),

    #[error("WASM error: {0}")]
    Wasm(String),
}

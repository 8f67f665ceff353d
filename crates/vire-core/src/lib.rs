//! Core types shared across the Vire host runtime.

pub mod abi;
pub mod config;
pub mod error;
pub mod stage;

pub use config::{CompileOptions, EnvConfig, HostFnDecl};
pub use error::{Error, Result};
pub use stage::{Stage, StageState, StageStatus};

//! Bare WASM execution environment for compiled Vire modules.
//!
//! This crate provides the execution side of the host:
//! - Import environment provisioning (memory, stack pointer, table, host
//!   functions)
//! - Host-call recording (the only observable output channel)
//! - Module instantiation and entry-point invocation

pub mod environment;
pub mod host_calls;
pub mod invoker;

pub use environment::ImportEnvironment;
pub use host_calls::{CallLog, HostCall};
pub use invoker::ExecutionResult;

use vire_core::{EnvConfig, Error, Result};
use wasmtime::{Config, Engine};

/// The WASM runtime manager.
pub struct Runtime {
    engine: Engine,
}

impl Runtime {
    pub fn new() -> Result<Self> {
        let config = Config::new();
        let engine = Engine::new(&config)
            .map_err(|e| Error::Wasm(format!("failed to create engine: {e}")))?;
        Ok(Self { engine })
    }

    pub fn engine(&self) -> &Engine {
        &self.engine
    }

    /// Build a fresh import environment against this runtime's engine.
    pub fn build_environment(&self, config: &EnvConfig) -> Result<ImportEnvironment> {
        ImportEnvironment::build(&self.engine, config)
    }

    /// Instantiate `bytes` against `env` and invoke the `entry` export.
    ///
    /// The environment is consumed: one environment, one execution.
    pub fn instantiate_and_run(
        &self,
        env: ImportEnvironment,
        bytes: &[u8],
        entry: &str,
    ) -> Result<ExecutionResult> {
        invoker::instantiate_and_run(env, bytes, entry)
    }
}

//! The compiler session state machine.

use crate::backend::CompilerBackend;
use vire_core::{Result, Stage, StageState, StageStatus};

/// One compiler instance plus its pipeline state.
///
/// Stage methods take `&mut self`, so at most one pipeline can be in flight
/// per session. A session only exists once the backend has finished loading,
/// so no stage call can race backend initialization.
#[derive(Debug)]
pub struct Session<B: CompilerBackend> {
    backend: B,
    source: String,
    target: String,
    status: StageStatus,
}

impl<B: CompilerBackend> Session<B> {
    /// Load the backend and return a ready-to-use session.
    pub async fn load(source: &str, target: &str) -> Result<Self> {
        let backend = B::load_from_text(source, target).await?;
        tracing::info!(target_triple = target, "compiler backend loaded");
        Ok(Self {
            backend,
            source: source.to_string(),
            target: target.to_string(),
            status: StageStatus::default(),
        })
    }

    /// Replace the source text and restart the pipeline from scratch.
    ///
    /// Previous stage outcomes never leak forward: after this call the
    /// session behaves as if freshly loaded with the new source.
    pub fn set_source(&mut self, source: &str) {
        self.backend.set_source_code(source);
        self.backend.reset_ast();
        self.source = source.to_string();
        self.status.reset();
    }

    /// Run the parse stage.
    pub fn parse(&mut self) -> bool {
        let ok = self.backend.parse_source_module();
        self.status.record(Stage::Parse, ok);
        tracing::debug!(ok, "parse stage finished");
        ok
    }

    /// Run the verify stage. Requires a successful parse.
    pub fn verify(&mut self) -> Result<bool> {
        self.status.require(Stage::Verify)?;
        let ok = self.backend.verify_source_module();
        self.status.record(Stage::Verify, ok);
        tracing::debug!(ok, "verify stage finished");
        Ok(ok)
    }

    /// Run the compile stage. Requires a successful verify.
    ///
    /// `options` and `flag` are forwarded to the backend untouched.
    pub fn compile(&mut self, options: &str, flag: bool) -> Result<bool> {
        self.status.require(Stage::Compile)?;
        let ok = self.backend.compile_source_module(options, flag);
        self.status.record(Stage::Compile, ok);
        tracing::debug!(ok, "compile stage finished");
        Ok(ok)
    }

    pub fn status(&self) -> StageStatus {
        self.status
    }

    pub fn stage_state(&self, stage: Stage) -> StageState {
        self.status.get(stage)
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn target(&self) -> &str {
        &self.target
    }

    /// Direct access to the backend adapter.
    pub fn backend(&self) -> &B {
        &self.backend
    }
}

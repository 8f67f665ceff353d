//! Byte extraction from a compiled session.

use crate::backend::CompilerBackend;
use crate::session::Session;
use vire_core::{Error, Result, Stage, StageState};

/// Copy the compiled module out of the session.
///
/// Valid only after a successful compile stage; fails with
/// [`Error::NotCompiled`] otherwise. This is a pure read: stage statuses are
/// untouched and the session can be extracted from again.
pub fn extract<B: CompilerBackend>(session: &Session<B>) -> Result<Vec<u8>> {
    if session.stage_state(Stage::Compile) != StageState::Succeeded {
        return Err(Error::NotCompiled);
    }
    let bytes = session.backend().byte_output();
    tracing::debug!(len = bytes.len(), "extracted compiled module");
    Ok(bytes)
}

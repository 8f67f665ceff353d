//! Adapter trait for the external source-to-WebAssembly compiler.

use std::future::Future;
use vire_core::Result;

/// The staged API of the external compiler backend.
///
/// One narrow interface covers every host variant; concrete adapters only
/// bridge to whatever embedding the backend ships with. The backend is
/// treated as opaque and already correct: stage methods report success as a
/// plain boolean, and richer diagnostics stay the compiler's concern.
pub trait CompilerBackend: Sized + Send {
    /// Load the backend with an initial source text and target triple.
    ///
    /// Backend loading is the one asynchronous, one-time operation in the
    /// pipeline; everything after it is synchronous. Fails with
    /// [`vire_core::Error::BackendInit`] if the backend cannot be brought up.
    fn load_from_text(
        source: &str,
        target: &str,
    ) -> impl Future<Output = Result<Self>> + Send;

    /// Replace the source text under compilation.
    fn set_source_code(&mut self, source: &str);

    /// Discard any syntax tree built from a previous source.
    fn reset_ast(&mut self);

    /// Lexical and syntactic analysis.
    fn parse_source_module(&mut self) -> bool;

    /// Semantic checks over the parsed module.
    fn verify_source_module(&mut self) -> bool;

    /// Code generation. `options` and `flag` are opaque pass-through
    /// configuration defined entirely by the backend.
    fn compile_source_module(&mut self, options: &str, flag: bool) -> bool;

    /// The compiled module, as an owned buffer of known length.
    ///
    /// Only meaningful after a successful compile; callers gate on the
    /// session's stage status before asking.
    fn byte_output(&self) -> Vec<u8>;
}

//! Compiler session management.
//!
//! Owns one external-compiler instance's lifecycle and drives its staged
//! pipeline (parse → verify → compile). The compiler itself is opaque and is
//! reached only through the [`CompilerBackend`] adapter trait.

pub mod backend;
pub mod extract;
pub mod session;

pub use backend::CompilerBackend;
pub use extract::extract;
pub use session::Session;

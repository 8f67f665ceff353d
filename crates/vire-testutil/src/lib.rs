//! Test support: a scripted compiler backend and canned WebAssembly modules
//! targeting the bare host ABI.

pub mod backend;
pub mod modules;

pub use backend::ScriptedBackend;
pub use modules::{counter_module, print_module};

/// Install a fmt subscriber honoring `RUST_LOG`, once per test binary.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

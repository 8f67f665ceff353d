//! The bare ABI contract between the compiler's output and the host.
//!
//! Compiled modules are freestanding: they import their linear memory, stack
//! pointer, and indirect call table from the host instead of defining their
//! own, and reach the outside world only through the `env` host functions.
//! These names must match what the compiler emits byte for byte.

/// Import module every ABI item lives under.
pub const IMPORT_MODULE: &str = "env";

/// Linear memory import name.
pub const LINEAR_MEMORY: &str = "__linear_memory";

/// Mutable stack-pointer global import name.
pub const STACK_POINTER: &str = "__stack_pointer";

/// Indirect function table import name.
pub const INDIRECT_TABLE: &str = "__indirect_function_table";

/// Print-integer host function name.
pub const PRINT_INT: &str = "puti";

/// Entry-point export invoked to run a module.
pub const ENTRY_POINT: &str = "main";

/// The single compilation target the backend supports.
pub const TARGET_TRIPLE: &str = "wasm32";

/// Default linear memory size, in 64 KiB pages (16 MiB, fixed).
pub const DEFAULT_MEMORY_PAGES: u32 = 256;

/// Initial value of the stack-pointer global.
pub const DEFAULT_STACK_POINTER_BASE: i32 = 16;

/// Default initial indirect-table entries.
pub const DEFAULT_TABLE_INITIAL: u32 = 2;

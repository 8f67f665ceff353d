//! Configuration types for the host runtime.

use crate::abi;
use serde::{Deserialize, Serialize};

/// A host function to expose to compiled modules.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum HostFnDecl {
    /// `(i32) -> i32`: records the printed value and returns it.
    PrintInt { symbol: String },
    /// `() -> ()`: ignored hook, for lock/stack-overflow style imports
    /// that need a symbol but no behavior.
    Noop { symbol: String },
}

impl HostFnDecl {
    pub fn symbol(&self) -> &str {
        match self {
            HostFnDecl::PrintInt { symbol } | HostFnDecl::Noop { symbol } => symbol,
        }
    }
}

/// Import environment configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnvConfig {
    /// Initial linear memory size (64 KiB pages)
    pub memory_initial_pages: u32,
    /// Maximum linear memory size (pages); `None` means unbounded
    pub memory_maximum_pages: Option<u32>,
    /// Initial value of the mutable stack-pointer global
    pub stack_pointer_base: i32,
    /// Initial indirect function table entries
    pub table_initial: u32,
    /// Maximum indirect function table entries; `None` means unbounded
    pub table_maximum: Option<u32>,
    /// Host functions to expose under the `env` module
    pub host_functions: Vec<HostFnDecl>,
}

impl Default for EnvConfig {
    fn default() -> Self {
        Self {
            memory_initial_pages: abi::DEFAULT_MEMORY_PAGES,
            memory_maximum_pages: Some(abi::DEFAULT_MEMORY_PAGES),
            stack_pointer_base: abi::DEFAULT_STACK_POINTER_BASE,
            table_initial: abi::DEFAULT_TABLE_INITIAL,
            table_maximum: None,
            host_functions: vec![HostFnDecl::PrintInt {
                symbol: abi::PRINT_INT.to_string(),
            }],
        }
    }
}

/// Options passed through to the backend's compile stage.
///
/// Both fields are opaque to the host: their meaning is defined entirely by
/// the external compiler.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CompileOptions {
    pub options: String,
    pub flag: bool,
}

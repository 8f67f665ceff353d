//! Import environment provisioning.
//!
//! A freestanding compiled module imports everything it needs to run: its
//! linear memory, a mutable stack-pointer global, an indirect call table,
//! and the host functions. Building an environment only prepares those
//! resources; no instantiation happens here.

use crate::host_calls::{self, CallLog};
use vire_core::{abi, EnvConfig, Error, Result};
use wasmtime::{
    Engine, Global, GlobalType, Linker, Memory, MemoryType, Mutability, Ref, RefType, Store,
    Table, TableType, Val, ValType,
};

/// The import environment one execution runs against.
///
/// Owns its store, so two environments share no memory, table, or global
/// state. Constructed fresh per execution.
pub struct ImportEnvironment {
    pub(crate) store: Store<CallLog>,
    pub(crate) linker: Linker<CallLog>,
    memory: Memory,
    stack_pointer: Global,
    table: Table,
}

impl ImportEnvironment {
    /// Prepare memory, stack pointer, table, and host functions per `config`
    /// and register them under the `env` import module.
    pub fn build(engine: &Engine, config: &EnvConfig) -> Result<Self> {
        let log = CallLog::new();
        let mut store = Store::new(engine, log);
        let mut linker: Linker<CallLog> = Linker::new(engine);

        let memory = Memory::new(
            &mut store,
            MemoryType::new(config.memory_initial_pages, config.memory_maximum_pages),
        )
        .map_err(|e| Error::Wasm(format!("failed to create linear memory: {e}")))?;

        let stack_pointer = Global::new(
            &mut store,
            GlobalType::new(ValType::I32, Mutability::Var),
            Val::I32(config.stack_pointer_base),
        )
        .map_err(|e| Error::Wasm(format!("failed to create stack pointer: {e}")))?;

        let table = Table::new(
            &mut store,
            TableType::new(RefType::FUNCREF, config.table_initial, config.table_maximum),
            Ref::Func(None),
        )
        .map_err(|e| Error::Wasm(format!("failed to create indirect table: {e}")))?;

        host_calls::add_to_linker(&mut linker, &config.host_functions)
            .map_err(|e| Error::Wasm(format!("failed to add host functions: {e}")))?;

        linker
            .define(&store, abi::IMPORT_MODULE, abi::LINEAR_MEMORY, memory)
            .map_err(|e| Error::Wasm(format!("failed to define linear memory: {e}")))?;
        linker
            .define(&store, abi::IMPORT_MODULE, abi::STACK_POINTER, stack_pointer)
            .map_err(|e| Error::Wasm(format!("failed to define stack pointer: {e}")))?;
        linker
            .define(&store, abi::IMPORT_MODULE, abi::INDIRECT_TABLE, table)
            .map_err(|e| Error::Wasm(format!("failed to define indirect table: {e}")))?;

        tracing::debug!(
            memory_pages = config.memory_initial_pages,
            stack_pointer_base = config.stack_pointer_base,
            table_initial = config.table_initial,
            host_functions = config.host_functions.len(),
            "import environment built"
        );

        Ok(Self {
            store,
            linker,
            memory,
            stack_pointer,
            table,
        })
    }

    /// Handle to the shared host-call log.
    pub fn call_log(&self) -> CallLog {
        self.store.data().clone()
    }

    pub fn memory(&self) -> Memory {
        self.memory
    }

    pub fn stack_pointer(&self) -> Global {
        self.stack_pointer
    }

    pub fn table(&self) -> Table {
        self.table
    }
}

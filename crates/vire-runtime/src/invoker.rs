//! Module instantiation and entry-point invocation.

use crate::environment::ImportEnvironment;
use crate::host_calls::HostCall;
use vire_core::{Error, Result};
use wasmtime::Module;

/// Side-effect record of one execution: every host call, in order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExecutionResult {
    pub calls: Vec<HostCall>,
}

impl ExecutionResult {
    /// Arguments of every recorded call to `symbol`, flattened in order.
    pub fn args_for(&self, symbol: &str) -> Vec<i32> {
        self.calls
            .iter()
            .filter(|call| call.symbol == symbol)
            .flat_map(|call| call.args.iter().copied())
            .collect()
    }
}

/// Instantiate `bytes` against `env` and invoke the `entry` export.
///
/// Import resolution is checked before instantiation so a mismatch between
/// the compiled module and the environment fails deterministically with the
/// offending import's name, never after a partial run. A resolution or
/// instantiation failure performs zero entry-point invocations.
pub fn instantiate_and_run(
    mut env: ImportEnvironment,
    bytes: &[u8],
    entry: &str,
) -> Result<ExecutionResult> {
    if bytes.is_empty() {
        return Err(Error::EmptyModule);
    }

    let engine = env.store.engine().clone();
    let module = Module::new(&engine, bytes)
        .map_err(|e| Error::Wasm(format!("failed to compile module: {e}")))?;

    for import in module.imports() {
        if env
            .linker
            .get(&mut env.store, import.module(), import.name())
            .is_none()
        {
            return Err(Error::UnresolvedImport {
                module: import.module().to_string(),
                name: import.name().to_string(),
            });
        }
    }

    let instance = env
        .linker
        .instantiate(&mut env.store, &module)
        .map_err(|e| Error::Wasm(format!("failed to instantiate: {e}")))?;

    let entry_func = instance
        .get_func(&mut env.store, entry)
        .ok_or_else(|| Error::MissingEntryPoint(entry.to_string()))?;
    let entry_func = entry_func
        .typed::<(), ()>(&env.store)
        .map_err(|e| Error::Wasm(format!("entry point {entry} has wrong signature: {e}")))?;

    tracing::info!(entry, "invoking entry point");
    entry_func
        .call(&mut env.store, ())
        .map_err(|e| Error::Wasm(format!("entry point trapped: {e}")))?;

    let calls = env.store.data().take();
    tracing::debug!(host_calls = calls.len(), "execution finished");
    Ok(ExecutionResult { calls })
}

#[cfg(test)]
mod tests {
    use super::*;
    use vire_core::{abi, EnvConfig};
    use vire_testutil::{counter_module, print_module};
    use wasmtime::Engine;

    fn run(
        config: &EnvConfig,
        bytes: &[u8],
        entry: &str,
    ) -> (Result<ExecutionResult>, crate::CallLog) {
        let engine = Engine::default();
        let env = ImportEnvironment::build(&engine, config).unwrap();
        let log = env.call_log();
        (instantiate_and_run(env, bytes, entry), log)
    }

    #[test]
    fn test_print_module_records_single_call() {
        let (result, _) = run(&EnvConfig::default(), &print_module(10), abi::ENTRY_POINT);
        let result = result.unwrap();
        assert_eq!(
            result.calls,
            vec![HostCall {
                symbol: "puti".to_string(),
                args: vec![10],
            }]
        );
        assert_eq!(result.args_for("puti"), vec![10]);
    }

    #[test]
    fn test_empty_bytes() {
        let (result, _) = run(&EnvConfig::default(), &[], abi::ENTRY_POINT);
        assert!(matches!(result, Err(Error::EmptyModule)));
    }

    #[test]
    fn test_unresolved_import_invokes_nothing() {
        let config = EnvConfig {
            host_functions: Vec::new(),
            ..EnvConfig::default()
        };
        let (result, log) = run(&config, &print_module(10), abi::ENTRY_POINT);
        match result {
            Err(Error::UnresolvedImport { module, name }) => {
                assert_eq!(module, "env");
                assert_eq!(name, "puti");
            }
            other => panic!("expected UnresolvedImport, got {other:?}"),
        }
        assert!(log.is_empty());
    }

    #[test]
    fn test_missing_entry_point() {
        let (result, log) = run(&EnvConfig::default(), &print_module(10), "start");
        assert!(matches!(result, Err(Error::MissingEntryPoint(name)) if name == "start"));
        assert!(log.is_empty());
    }

    #[test]
    fn test_environment_isolation_across_executions() {
        let engine = Engine::default();
        let bytes = counter_module();

        for _ in 0..2 {
            let env = ImportEnvironment::build(&engine, &EnvConfig::default()).unwrap();
            let result = instantiate_and_run(env, &bytes, abi::ENTRY_POINT).unwrap();
            // A fresh environment always sees a zeroed memory cell.
            assert_eq!(result.args_for("puti"), vec![1]);
        }
    }
}

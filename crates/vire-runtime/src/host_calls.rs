//! Host function implementations and call recording.
//!
//! Compiled modules have no return channel beyond what host functions
//! observe, so every host-function invocation is recorded in order and
//! surfaced as the execution result.

use parking_lot::RwLock;
use std::sync::Arc;
use vire_core::{abi, HostFnDecl};
use wasmtime::{Caller, Linker};

/// One observed host-function invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HostCall {
    pub symbol: String,
    pub args: Vec<i32>,
}

/// Ordered record of host calls made during one execution.
///
/// Lives as the store data of an execution's `Store`; cloning shares the
/// underlying log.
#[derive(Clone, Default)]
pub struct CallLog {
    calls: Arc<RwLock<Vec<HostCall>>>,
}

impl CallLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&self, symbol: &str, args: Vec<i32>) {
        self.calls.write().push(HostCall {
            symbol: symbol.to_string(),
            args,
        });
    }

    pub fn len(&self) -> usize {
        self.calls.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.calls.read().is_empty()
    }

    /// Drain the log, leaving it empty.
    pub fn take(&self) -> Vec<HostCall> {
        std::mem::take(&mut *self.calls.write())
    }
}

/// Register the configured host functions under the `env` import module.
pub fn add_to_linker(
    linker: &mut Linker<CallLog>,
    host_functions: &[HostFnDecl],
) -> Result<(), anyhow::Error> {
    for decl in host_functions {
        match decl {
            HostFnDecl::PrintInt { symbol: name } => {
                let symbol = name.clone();
                linker.func_wrap(
                    abi::IMPORT_MODULE,
                    name,
                    move |caller: Caller<'_, CallLog>, n: i32| -> i32 {
                        tracing::debug!(symbol = %symbol, n, "host print call");
                        caller.data().record(&symbol, vec![n]);
                        n
                    },
                )?;
            }
            HostFnDecl::Noop { symbol } => {
                linker.func_wrap(abi::IMPORT_MODULE, symbol, || {})?;
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_call_log_records_in_order() {
        let log = CallLog::new();
        log.record("puti", vec![1]);
        log.record("puti", vec![2]);

        let calls = log.take();
        assert_eq!(
            calls,
            vec![
                HostCall {
                    symbol: "puti".to_string(),
                    args: vec![1],
                },
                HostCall {
                    symbol: "puti".to_string(),
                    args: vec![2],
                },
            ]
        );
        assert!(log.is_empty());
    }

    #[test]
    fn test_clone_shares_log() {
        let log = CallLog::new();
        let shared = log.clone();
        shared.record("puti", vec![7]);
        assert_eq!(log.len(), 1);
    }
}

//! A scripted stand-in for the external compiler backend.

use crate::modules::print_module;
use vire_core::{Error, Result};
use vire_session::CompilerBackend;

/// Fake backend whose stage outcomes are scripted through the source text.
///
/// Directives the backend reacts to:
/// - `fail:load` — backend initialization fails;
/// - `fail:parse` / `fail:verify` / `fail:compile` — that stage returns
///   false;
/// - a `puti(...)` call site — a successful compile emits a module whose
///   `main` prints the call's argument: either an integer literal, or an
///   identifier resolved through its `let <ident>:int = N` binding. The
///   `extern puti(...)` declaration is not a call site. Without a call the
///   module prints 0.
///
/// Stage invocations are counted so tests can assert which stages were
/// reached.
#[derive(Debug)]
pub struct ScriptedBackend {
    source: String,
    target: String,
    compiled: Option<Vec<u8>>,
    pub parse_calls: usize,
    pub verify_calls: usize,
    pub compile_calls: usize,
    pub reset_calls: usize,
}

impl ScriptedBackend {
    pub fn target(&self) -> &str {
        &self.target
    }

    fn printed_value(&self) -> i32 {
        for (pos, _) in self.source.match_indices("puti(") {
            // The extern declaration of puti is not a call site.
            if self.source[..pos].trim_end().ends_with("extern") {
                continue;
            }
            let rest = &self.source[pos + "puti(".len()..];
            let Some(end) = rest.find(')') else {
                continue;
            };
            let arg = rest[..end].trim();
            return match arg.parse() {
                Ok(n) => n,
                Err(_) => self.binding_value(arg),
            };
        }
        0
    }

    /// Resolve an identifier argument through its `let <ident>:int = N`
    /// binding.
    fn binding_value(&self, ident: &str) -> i32 {
        let needle = format!("let {ident}");
        let Some(pos) = self.source.find(&needle) else {
            return 0;
        };
        let rest = &self.source[pos + needle.len()..];
        let Some(eq) = rest.find('=') else {
            return 0;
        };
        rest[eq + 1..]
            .split(';')
            .next()
            .unwrap_or("")
            .trim()
            .parse()
            .unwrap_or(0)
    }
}

impl CompilerBackend for ScriptedBackend {
    async fn load_from_text(source: &str, target: &str) -> Result<Self> {
        if source.contains("fail:load") {
            return Err(Error::BackendInit("scripted load failure".to_string()));
        }
        Ok(Self {
            source: source.to_string(),
            target: target.to_string(),
            compiled: None,
            parse_calls: 0,
            verify_calls: 0,
            compile_calls: 0,
            reset_calls: 0,
        })
    }

    fn set_source_code(&mut self, source: &str) {
        self.source = source.to_string();
    }

    fn reset_ast(&mut self) {
        self.reset_calls += 1;
        self.compiled = None;
    }

    fn parse_source_module(&mut self) -> bool {
        self.parse_calls += 1;
        !self.source.contains("fail:parse")
    }

    fn verify_source_module(&mut self) -> bool {
        self.verify_calls += 1;
        !self.source.contains("fail:verify")
    }

    fn compile_source_module(&mut self, _options: &str, _flag: bool) -> bool {
        self.compile_calls += 1;
        if self.source.contains("fail:compile") {
            self.compiled = None;
            return false;
        }
        self.compiled = Some(print_module(self.printed_value()));
        true
    }

    fn byte_output(&self) -> Vec<u8> {
        self.compiled.clone().unwrap_or_default()
    }
}

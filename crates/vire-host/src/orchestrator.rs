//! The pipeline driver.

use vire_core::{CompileOptions, EnvConfig, Error, Result, Stage};
use vire_runtime::{ExecutionResult, Runtime};
use vire_session::{extract, CompilerBackend, Session};

/// Run parse, verify, and compile in order and extract the compiled bytes.
///
/// The pipeline halts at the first stage that reports failure; later stages
/// are never attempted and no partial byte output is surfaced.
pub fn run_pipeline<B: CompilerBackend>(
    session: &mut Session<B>,
    options: &CompileOptions,
) -> Result<Vec<u8>> {
    if !session.parse() {
        tracing::warn!("parse stage failed");
        return Err(Error::StageFailed(Stage::Parse));
    }
    tracing::info!("parse succeeded");

    if !session.verify()? {
        tracing::warn!("verify stage failed");
        return Err(Error::StageFailed(Stage::Verify));
    }
    tracing::info!("verification succeeded");

    if !session.compile(&options.options, options.flag)? {
        tracing::warn!("compile stage failed");
        return Err(Error::StageFailed(Stage::Compile));
    }
    tracing::info!("compilation succeeded");

    extract(session)
}

/// Full flow: load a session, compile `source`, and run the result.
///
/// A fresh import environment is built for this execution alone, so nothing
/// is shared with any other run.
pub async fn compile_and_run<B: CompilerBackend>(
    source: &str,
    target: &str,
    options: &CompileOptions,
    env_config: &EnvConfig,
    entry: &str,
) -> Result<ExecutionResult> {
    let mut session = Session::<B>::load(source, target).await?;
    let bytes = run_pipeline(&mut session, options)?;

    let runtime = Runtime::new()?;
    let env = runtime.build_environment(env_config)?;
    runtime.instantiate_and_run(env, &bytes, entry)
}

#[cfg(test)]
mod tests {
    use super::*;
    use vire_core::abi;
    use vire_testutil::{init_tracing, ScriptedBackend};

    const PRINT_TEN: &str =
        "extern puti(n:int) returns int; func main() returns int { let a:int = 10; puti(a); }";

    #[tokio::test]
    async fn test_compile_and_run_prints_ten() {
        init_tracing();
        let result = compile_and_run::<ScriptedBackend>(
            PRINT_TEN,
            abi::TARGET_TRIPLE,
            &CompileOptions::default(),
            &EnvConfig::default(),
            abi::ENTRY_POINT,
        )
        .await
        .unwrap();

        assert_eq!(result.calls.len(), 1);
        assert_eq!(result.calls[0].symbol, "puti");
        assert_eq!(result.calls[0].args, vec![10]);
    }

    #[tokio::test]
    async fn test_pipeline_extracts_backend_output_exactly() {
        let mut session =
            Session::<ScriptedBackend>::load(PRINT_TEN, abi::TARGET_TRIPLE)
                .await
                .unwrap();
        let bytes = run_pipeline(&mut session, &CompileOptions::default()).unwrap();
        assert!(!bytes.is_empty());
        assert_eq!(bytes, session.backend().byte_output());
    }

    #[tokio::test]
    async fn test_pipeline_halts_after_verify_failure() {
        let mut session = Session::<ScriptedBackend>::load(
            "func main() returns int { fail:verify }",
            abi::TARGET_TRIPLE,
        )
        .await
        .unwrap();

        let err = run_pipeline(&mut session, &CompileOptions::default()).unwrap_err();
        assert!(matches!(err, Error::StageFailed(Stage::Verify)));
        assert_eq!(session.backend().parse_calls, 1);
        assert_eq!(session.backend().verify_calls, 1);
        assert_eq!(session.backend().compile_calls, 0);
    }

    #[tokio::test]
    async fn test_pipeline_halts_after_parse_failure() {
        let mut session = Session::<ScriptedBackend>::load(
            "fail:parse",
            abi::TARGET_TRIPLE,
        )
        .await
        .unwrap();

        let err = run_pipeline(&mut session, &CompileOptions::default()).unwrap_err();
        assert!(matches!(err, Error::StageFailed(Stage::Parse)));
        assert_eq!(session.backend().verify_calls, 0);
    }

    #[tokio::test]
    async fn test_backend_load_failure() {
        let err = Session::<ScriptedBackend>::load("fail:load", abi::TARGET_TRIPLE)
            .await
            .unwrap_err();
        assert!(matches!(err, Error::BackendInit(_)));
    }

    #[tokio::test]
    async fn test_missing_print_import_aborts_before_invocation() {
        let env_config = EnvConfig {
            host_functions: Vec::new(),
            ..EnvConfig::default()
        };
        let err = compile_and_run::<ScriptedBackend>(
            PRINT_TEN,
            abi::TARGET_TRIPLE,
            &CompileOptions::default(),
            &env_config,
            abi::ENTRY_POINT,
        )
        .await
        .unwrap_err();

        assert!(matches!(
            err,
            Error::UnresolvedImport { name, .. } if name == "puti"
        ));
    }

    #[tokio::test]
    async fn test_set_source_restarts_pipeline() {
        let mut session = Session::<ScriptedBackend>::load(
            "func main() returns int { fail:verify }",
            abi::TARGET_TRIPLE,
        )
        .await
        .unwrap();
        assert!(run_pipeline(&mut session, &CompileOptions::default()).is_err());

        // Correct the source and rerun from scratch.
        session.set_source(PRINT_TEN);
        let bytes = run_pipeline(&mut session, &CompileOptions::default()).unwrap();
        assert!(!bytes.is_empty());
        assert_eq!(session.backend().reset_calls, 1);
    }
}

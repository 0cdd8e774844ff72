//! Test: Variable Substitution in Commands
//!
//! Tests that command lines are interpolated correctly:
//! - Global variables from the document
//! - Step-local `with` bindings taking precedence
//! - The injected `pwd` variable and relative path rewriting
//! - Undefined variables aborting the run before anything executes

use crate::helpers::*;
use runner::RunnerError;

/// Test basic variable substitution with global variables
#[tokio::test]
async fn test_variable_substitution_global() {
    let yaml = r#"
name: "Test: Variable Substitution - Global"

variables:
  FOO: bar

jobs:
  main:
    steps:
      - name: greet
        run: echo $FOO
"#;

    let executor = MockExecutor::new();
    let result = run_with_mock(yaml, &options_at("/tmp"), executor.clone())
        .await
        .unwrap();

    assert_output(&result, "bar");
    assert_eq!(executor.calls(), vec![argv(&["echo", "bar"])]);
}

/// Step bindings shadow globals for that step only
#[tokio::test]
async fn test_with_bindings_shadow_globals() {
    let yaml = r#"
name: shadow
variables:
  TARGET: world
jobs:
  main:
    steps:
      - name: local
        with:
          TARGET: step
        run: echo hello $TARGET
      - name: global
        run: echo hello $TARGET
"#;

    let result = run_with_mock(yaml, &options_at("/tmp"), MockExecutor::new())
        .await
        .unwrap();

    assert_output(&result, "hello step\nhello world");
}

/// `$pwd` resolves to the absolute working directory
#[tokio::test]
async fn test_pwd_variable() {
    let yaml = r#"
name: where
variables:
  pwd: ./app
jobs:
  main:
    steps:
      - run: echo $pwd
"#;

    let result = run_with_mock(yaml, &options_at("/proj"), MockExecutor::new())
        .await
        .unwrap();

    assert_output(&result, "/proj/app");
}

/// Relative script paths are rewritten against pwd
#[tokio::test]
async fn test_relative_path_rewriting() {
    let yaml = r#"
name: paths
jobs:
  main:
    steps:
      - run: ./scripts/build.sh --release
"#;

    let executor = MockExecutor::new();
    run_with_mock(yaml, &options_at("/proj"), executor.clone())
        .await
        .unwrap();

    assert_eq!(
        executor.calls(),
        vec![argv(&["/proj/scripts/build.sh", "--release"])]
    );
}

/// An undefined variable aborts before any command runs, in any job
#[tokio::test]
async fn test_undefined_variable_aborts_run() {
    let yaml = r#"
name: missing
jobs:
  first:
    steps:
      - run: echo before
  second:
    steps:
      - run: echo $MISSING
      - run: echo after
"#;

    let executor = MockExecutor::new();
    let result = run_with_mock(yaml, &options_at("/tmp"), executor.clone()).await;

    match result {
        Err(RunnerError::UndefinedVariable { name, .. }) => assert_eq!(name, "MISSING"),
        other => panic!("Expected UndefinedVariable, got {:?}", other),
    }
    assert!(executor.calls().is_empty());
}

/// Quoted words survive interpolation as single arguments
#[tokio::test]
async fn test_quoted_arguments() {
    let yaml = r#"
name: quotes
variables:
  WHO: the team
jobs:
  main:
    steps:
      - run: sh -c "echo hi $WHO"
"#;

    let executor = MockExecutor::new();
    run_with_mock(yaml, &options_at("/tmp"), executor.clone())
        .await
        .unwrap();

    assert_eq!(executor.calls(), vec![argv(&["sh", "-c", "echo hi the team"])]);
}

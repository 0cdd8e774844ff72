//! Test: Document validation
//!
//! Invalid documents are reported through `ProcessorResult.error` and no
//! command is ever executed.

use crate::helpers::*;

#[tokio::test]
async fn test_missing_name_runs_nothing() {
    let yaml = r#"
jobs:
  build:
    steps:
      - name: hello
        run: echo hi
"#;

    let executor = MockExecutor::new();
    let result = run_with_mock(yaml, &options_at("/tmp"), executor.clone())
        .await
        .unwrap();

    assert_rejected(&result, "Please provide name");
    assert!(executor.calls().is_empty());
}

#[tokio::test]
async fn test_empty_jobs_runs_nothing() {
    let executor = MockExecutor::new();
    let result = run_with_mock("name: empty\njobs: {}\n", &options_at("/tmp"), executor.clone())
        .await
        .unwrap();

    assert_rejected(&result, "No job found");
    assert!(executor.calls().is_empty());
}

#[tokio::test]
async fn test_missing_jobs_key() {
    let result = run_with_mock("name: nothing\n", &options_at("/tmp"), MockExecutor::new())
        .await
        .unwrap();

    assert_rejected(&result, "No job found");
}

#[tokio::test]
async fn test_unparseable_document_is_an_error() {
    let result = run_with_mock("name: [unclosed\n", &options_at("/tmp"), MockExecutor::new()).await;
    assert!(matches!(result, Err(runner::RunnerError::Parse(_))));
}

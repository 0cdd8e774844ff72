//! Test: Output rendering
//!
//! Plain, prefixed and table output, `return: false` suppression and
//! steps without a `run`.

use crate::helpers::*;
use runner::core::OutputOverrides;
use runner::RunOptions;

const DOC: &str = r#"
name: release
jobs:
  build:
    steps:
      - name: compile
        description: Compile sources
        run: echo built
      - name: announce
  ship:
    steps:
      - name: upload
        run:
          script: echo s3://bucket/key
          return: false
          default: uploaded
"#;

fn with_output(output: OutputOverrides) -> RunOptions {
    options_at("/tmp").with_output(output)
}

#[tokio::test]
async fn test_plain_output_drops_blank_steps() {
    let result = run_with_mock(DOC, &options_at("/tmp"), MockExecutor::new())
        .await
        .unwrap();

    assert_output(&result, "built\nuploaded");
}

#[tokio::test]
async fn test_prefixed_output() {
    let options = with_output(OutputOverrides {
        prefix: Some("name".to_string()),
        ..Default::default()
    });
    let result = run_with_mock(DOC, &options, MockExecutor::new()).await.unwrap();

    assert_output(&result, "compile: built\nannounce: \nupload: uploaded");
}

#[tokio::test]
async fn test_prefix_selects_step_field() {
    let options = with_output(OutputOverrides {
        prefix: Some("description".to_string()),
        ..Default::default()
    });
    let result = run_with_mock(DOC, &options, MockExecutor::new()).await.unwrap();

    assert_output(&result, "Compile sources: built\nuploaded");
}

#[tokio::test]
async fn test_suppressed_step_still_runs() {
    let executor = MockExecutor::new();
    let result = run_with_mock(DOC, &options_at("/tmp"), executor.clone())
        .await
        .unwrap();

    assert!(!result.output.unwrap().contains("s3://"));
    assert!(executor
        .calls()
        .contains(&argv(&["echo", "s3://bucket/key"])));
}

#[tokio::test]
async fn test_table_output() {
    let options = with_output(OutputOverrides {
        prefix: Some("name".to_string()),
        table: Some(true),
        ..Default::default()
    });
    let result = run_with_mock(DOC, &options, MockExecutor::new()).await.unwrap();
    let output = result.output.unwrap();

    assert!(output.contains("| Step     | Output   |"));
    assert!(output.contains("| compile  | built    |"));
    assert!(output.contains("| upload   | uploaded |"));
}

#[tokio::test]
async fn test_document_output_settings_apply() {
    let yaml = r#"
name: styled
variables:
  output:
    prefix: name
    pretty: true
jobs:
  main:
    steps:
      - name: hello
        run: echo hi
"#;

    let result = run_with_mock(yaml, &options_at("/tmp"), MockExecutor::new())
        .await
        .unwrap();

    assert_output(&result, "styled\n======\nhello: hi");
}

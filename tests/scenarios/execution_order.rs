//! Test: Execution order
//!
//! Steps within a job start together but are reported in declaration
//! order; jobs run one after another.

use crate::helpers::*;
use std::time::Duration;

#[tokio::test]
async fn test_step_results_keep_declaration_order() {
    let yaml = r#"
name: order
jobs:
  main:
    steps:
      - run: echo S1
      - run: echo S2
      - run: echo S3
"#;

    let executor = MockExecutor::new()
        .delayed("S1", Duration::from_millis(80))
        .delayed("S3", Duration::from_millis(40));
    let result = run_with_mock(yaml, &options_at("/tmp"), executor.clone())
        .await
        .unwrap();

    assert_output(&result, "S1\nS2\nS3");

    // S2 had no delay, so it finished first
    assert_eq!(executor.calls()[0], argv(&["echo", "S2"]));
}

#[tokio::test]
async fn test_jobs_run_sequentially() {
    let yaml = r#"
name: jobs
jobs:
  first:
    steps:
      - run: echo slow
  second:
    steps:
      - run: echo fast
"#;

    let executor = MockExecutor::new().delayed("slow", Duration::from_millis(50));
    let result = run_with_mock(yaml, &options_at("/tmp"), executor.clone())
        .await
        .unwrap();

    assert_output(&result, "slow\nfast");
    assert_eq!(
        executor.calls(),
        vec![argv(&["echo", "slow"]), argv(&["echo", "fast"])]
    );
}

#[tokio::test]
async fn test_commands_within_a_step_are_sequential() {
    let yaml = r#"
name: lines
jobs:
  main:
    steps:
      - run: |
          echo one
          echo two
          echo three
"#;

    let executor = MockExecutor::new().delayed("one", Duration::from_millis(30));
    let result = run_with_mock(yaml, &options_at("/tmp"), executor.clone())
        .await
        .unwrap();

    assert_output(&result, "one\ntwo\nthree");
    assert_eq!(executor.calls().len(), 3);
    assert_eq!(executor.calls()[0], argv(&["echo", "one"]));
}

#[tokio::test]
async fn test_repeat_runs_are_identical() {
    let yaml = r#"
name: idempotent
variables:
  X: "1"
jobs:
  a:
    steps:
      - name: first
        run: echo $X
      - name: second
        run: echo two
"#;

    let first = run_with_mock(yaml, &options_at("/tmp"), MockExecutor::new())
        .await
        .unwrap();
    let second = run_with_mock(yaml, &options_at("/tmp"), MockExecutor::new())
        .await
        .unwrap();

    assert_eq!(first, second);
}

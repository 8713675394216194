// tests/log_lifecycle.rs

use std::error::Error;

use script_runner::errors::RunnerError;
use script_runner_test_utils::{Sandbox, init_tracing};

type TestResult = Result<(), Box<dyn Error>>;

fn numbered(n: usize) -> String {
    (1..=n).map(|i| format!("line {i}\n")).collect()
}

#[tokio::test]
async fn read_returns_every_line_in_order() -> TestResult {
    init_tracing();
    let sb = Sandbox::new();
    sb.add_log("app.log", &numbered(3));

    let lines = sb.runner.read_log("app.log").await?;
    assert_eq!(lines, vec!["line 1", "line 2", "line 3"]);
    Ok(())
}

#[tokio::test]
async fn tail_larger_than_file_returns_whole_file() -> TestResult {
    let sb = Sandbox::new();
    sb.add_log("app.log", &numbered(4));

    let full = sb.runner.read_log("app.log").await?;
    assert_eq!(sb.runner.tail_log("app.log", Some(4)).await?, full);
    assert_eq!(sb.runner.tail_log("app.log", Some(400)).await?, full);
    Ok(())
}

#[tokio::test]
async fn tail_zero_default_and_negative() -> TestResult {
    let sb = Sandbox::new();
    sb.add_log("app.log", &numbered(25));

    assert!(sb.runner.tail_log("app.log", Some(0)).await?.is_empty());

    let default = sb.runner.tail_log("app.log", None).await?;
    assert_eq!(default.len(), 10);
    assert_eq!(default[0], "line 16");
    assert_eq!(default[9], "line 25");

    let err = sb.runner.tail_log("app.log", Some(-2)).await.unwrap_err();
    assert!(matches!(err, RunnerError::InvalidArgument(_)));
    Ok(())
}

#[tokio::test]
async fn tail_of_missing_log_is_not_found() {
    let sb = Sandbox::new();
    assert!(matches!(
        sb.runner.tail_log("nope.log", None).await,
        Err(RunnerError::LogNotFound(_))
    ));
}

#[tokio::test]
async fn clear_then_read_is_empty_and_clear_repeats() -> TestResult {
    let sb = Sandbox::new();
    sb.add_log("app.log", &numbered(5));

    let confirmation = sb.runner.clear_log("app.log").await?;
    assert!(confirmation.contains("app.log"));
    assert!(sb.runner.read_log("app.log").await?.is_empty());

    sb.runner.clear_log("app.log").await?;
    assert_eq!(sb.log_bytes("app.log").map(|b| b.len()), Some(0));
    Ok(())
}

#[tokio::test]
async fn clear_of_missing_log_is_not_found() {
    let sb = Sandbox::new();
    let err = sb.runner.clear_log("ghost.log").await.unwrap_err();
    assert!(matches!(err, RunnerError::LogNotFound(_)));
    assert!(sb.log_bytes("ghost.log").is_none());
}

#[tokio::test]
async fn listings_contain_only_top_level_regular_files() -> TestResult {
    let sb = Sandbox::new();
    sb.add_log("b.log", "b\n");
    sb.add_log("a.log", "a\n");
    sb.add_log("old/nested.log", "n\n");
    sb.add_script("deploy.sh", "true\n");
    sb.add_script("lib/common.sh", "true\n");

    assert_eq!(sb.runner.list_logs().await?, vec!["a.log", "b.log"]);
    assert_eq!(sb.runner.list_scripts().await?, vec!["deploy.sh"]);
    Ok(())
}

#[tokio::test]
async fn empty_roots_list_nothing() -> TestResult {
    let sb = Sandbox::new();
    assert!(sb.runner.list_logs().await?.is_empty());
    assert!(sb.runner.list_scripts().await?.is_empty());
    Ok(())
}

#[tokio::test]
async fn stat_reports_current_length() -> TestResult {
    let sb = Sandbox::new();
    sb.add_log("size.log", "12345\n");

    let file = sb.runner.logs().stat("size.log").await?;
    assert_eq!(file.len, 6);
    assert_eq!(file.name, "size.log");
    Ok(())
}

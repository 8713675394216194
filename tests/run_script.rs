// tests/run_script.rs

#![cfg(unix)]

use std::error::Error;
use std::time::Duration;

use script_runner::errors::{ExecFailure, RunnerError};
use script_runner_test_utils::{Sandbox, init_tracing, with_timeout};

type TestResult = Result<(), Box<dyn Error>>;

#[tokio::test]
async fn run_appends_output_after_prior_content() -> TestResult {
    init_tracing();
    let sb = Sandbox::new();
    sb.add_script("greet.sh", "echo hello from greet\n");
    sb.add_log("greet.sh.log", "earlier line\n");

    let result = sb.runner.run_script("greet.sh").await?;
    assert_eq!(result.exit_code, Some(0));
    assert!(result.success);
    assert!(result.message.contains("greet.sh"));

    let lines = sb.runner.read_log("greet.sh.log").await?;
    assert_eq!(lines, vec!["earlier line", "hello from greet"]);
    Ok(())
}

#[tokio::test]
async fn running_twice_appends_twice() -> TestResult {
    init_tracing();
    let sb = Sandbox::new();
    sb.add_script("tick.sh", "printf 'tick\\n'\n");

    sb.runner.run_script("tick.sh").await?;
    sb.runner.run_script("tick.sh").await?;

    assert_eq!(sb.log_bytes("tick.sh.log").as_deref(), Some(&b"tick\ntick\n"[..]));
    Ok(())
}

#[tokio::test]
async fn concurrent_runs_of_one_script_do_not_interleave() -> TestResult {
    init_tracing();
    let sb = Sandbox::new();
    sb.add_script(
        "burst.sh",
        "for i in 1 2 3 4 5; do echo \"$$ line $i\"; sleep 0.02; done\n",
    );

    let (a, b, c) = with_timeout(async {
        tokio::join!(
            sb.runner.run_script("burst.sh"),
            sb.runner.run_script("burst.sh"),
            sb.runner.run_script("burst.sh"),
        )
    })
    .await;
    a?;
    b?;
    c?;

    let lines = sb.runner.read_log("burst.sh.log").await?;
    assert_eq!(lines.len(), 15);

    // Each run's five lines are contiguous and in order.
    for block in lines.chunks(5) {
        let pid = block[0].split_whitespace().next().unwrap_or_default();
        for (i, line) in block.iter().enumerate() {
            assert_eq!(line, &format!("{pid} line {}", i + 1));
        }
    }
    Ok(())
}

#[tokio::test]
async fn non_zero_exit_is_a_result_not_an_error() -> TestResult {
    let sb = Sandbox::new();
    sb.add_script("fail.sh", "echo failing >&2\nexit 7\n");

    let result = sb.runner.run_script("fail.sh").await?;
    assert_eq!(result.exit_code, Some(7));
    assert!(!result.success);
    assert_eq!(sb.runner.read_log("fail.sh.log").await?, vec!["failing"]);
    Ok(())
}

#[tokio::test]
async fn missing_script_creates_no_log() {
    let sb = Sandbox::new();

    let err = sb.runner.run_script("missing.sh").await.unwrap_err();
    assert!(matches!(err, RunnerError::ScriptNotFound(_)));
    assert!(sb.log_bytes("missing.sh.log").is_none());
}

#[tokio::test]
async fn unsupported_type_leaves_logs_alone() {
    let sb = Sandbox::new();
    sb.add_script("script.py", "print('hi')\n");
    sb.add_log("script.py.log", "untouched\n");

    let err = sb.runner.run_script("script.py").await.unwrap_err();
    assert!(matches!(err, RunnerError::UnsupportedScriptType(_)));
    assert_eq!(sb.log_bytes("script.py.log").as_deref(), Some(&b"untouched\n"[..]));

    assert!(matches!(
        sb.runner.run_script("noext").await,
        Err(RunnerError::ScriptNotFound(_))
    ));
}

#[tokio::test]
async fn shell_metacharacters_in_names_are_not_interpreted() -> TestResult {
    let sb = Sandbox::new();
    let marker = sb.scripts.path().join("pwned");
    let name = "odd; touch pwned #.sh";
    sb.add_script(name, "echo safe\n");

    let result = sb.runner.run_script(name).await?;
    assert!(result.success);
    assert!(!marker.exists());
    assert_eq!(sb.runner.read_log(&format!("{name}.log")).await?, vec!["safe"]);
    Ok(())
}

#[tokio::test]
async fn timeout_is_reported_as_execution_error() {
    init_tracing();
    let sb = Sandbox::new();
    sb.add_script("hang.sh", "sleep 30\n");

    let err = with_timeout(
        sb.runner
            .run_script_with_timeout("hang.sh", Duration::from_millis(200)),
    )
    .await
    .unwrap_err();

    assert!(matches!(err, RunnerError::Execution(ExecFailure::Timeout { .. })));
    assert!(err.public_message().contains("timed out"));
}

#[tokio::test]
async fn empty_name_is_a_missing_parameter() {
    let sb = Sandbox::new();
    let err = sb.runner.run_script("").await.unwrap_err();
    assert!(matches!(err, RunnerError::InvalidName(_)));
    assert_eq!(err.status().code(), 401);
}

#[tokio::test]
async fn timed_out_run_leaves_no_writers_behind() -> TestResult {
    init_tracing();
    let sb = Sandbox::new();
    sb.add_script("slow.sh", "sh -c 'sleep 1; echo late'\n");

    let err = sb
        .runner
        .run_script_with_timeout("slow.sh", Duration::from_millis(200))
        .await
        .unwrap_err();
    assert!(matches!(err, RunnerError::Execution(ExecFailure::Timeout { .. })));

    sb.runner.clear_log("slow.sh.log").await?;
    tokio::time::sleep(Duration::from_millis(1500)).await;

    assert_eq!(sb.log_bytes("slow.sh.log").as_deref(), Some(&b""[..]));
    Ok(())
}

/*!
 * Hook Runner Tests
 * Hook execution against real commands
 */

use procwrap::hooks::HookError;
use procwrap::{ExitStatusSource, HookPoint, HookRunner, HookSpec};
use tempfile::TempDir;

#[tokio::test]
async fn test_hook_sees_supervisor_environment() {
    let dir = TempDir::new().unwrap();
    let out = dir.path().join("home");
    let hook = HookSpec::new(
        HookPoint::PostStart,
        format!("sh -c 'printf %s \"$HOME\" > {}'", out.display()),
    );

    let outcome = HookRunner::new(false).run(&hook).await;

    assert!(outcome.succeeded());
    let written = std::fs::read_to_string(&out).unwrap();
    assert_eq!(written, std::env::var("HOME").unwrap_or_default());
}

#[tokio::test]
async fn test_hook_stdin_is_closed() {
    // `read` hits end of input immediately instead of waiting on a terminal
    let hook = HookSpec::new(HookPoint::PreStart, "sh -c 'read line'");

    let outcome = HookRunner::new(false).run(&hook).await;

    assert!(outcome.executed());
    assert!(!outcome.succeeded());
}

#[tokio::test]
async fn test_signal_killed_hook_has_no_exit_code() {
    let hook = HookSpec::new(HookPoint::PostStop, "sh -c 'kill -9 $$'");

    let err = HookRunner::new(false)
        .run(&hook)
        .await
        .into_result()
        .unwrap_err();

    assert!(matches!(err, HookError::Exited { .. }));
    assert_eq!(err.exit_code(), None);
}

#[tokio::test]
async fn test_hook_failure_is_labelled_with_its_point() {
    let hook = HookSpec::new(HookPoint::Sigterm, "false");

    let err = HookRunner::new(true)
        .run(&hook)
        .await
        .into_result()
        .unwrap_err();

    assert_eq!(err.hook(), HookPoint::Sigterm);
    assert_eq!(err.exit_code(), Some(1));
    assert!(err.to_string().starts_with("SIGTERM hook exited unsuccessfully"));
}

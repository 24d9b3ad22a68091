/*!
 * Hook Runner
 * Executes one lifecycle hook to completion and relays its output
 */

use super::types::{HookError, HookOutcome};
use crate::config::{HookPoint, HookSpec};
use crate::monitoring::HookSpan;
use std::process::Stdio;
use tokio::io::{AsyncWrite, AsyncWriteExt};
use tokio::process::Command;
use tracing::{info, warn};

/// Runs hook command lines
///
/// Hook output is captured while the hook runs and written out in one piece
/// afterwards, so it never interleaves with the surrounding log lines.
#[derive(Debug, Clone, Copy, Default)]
pub struct HookRunner {
    verbose: bool,
}

impl HookRunner {
    pub fn new(verbose: bool) -> Self {
        Self { verbose }
    }

    /// Run a hook; an unconfigured hook is skipped
    pub async fn run(&self, spec: &HookSpec) -> HookOutcome {
        let Some(command_line) = spec.command() else {
            return HookOutcome::Skipped;
        };
        let hook = spec.point();

        let Some((program, args)) = split_command(command_line) else {
            let err = HookError::InvalidCommand {
                hook,
                command: command_line.to_string(),
            };
            info!(hook = %hook, error = %err, "hook not run");
            if self.verbose {
                let description = describe_command(command_line, &[]);
                write_line(tokio::io::stderr(), &failure_line(hook, &description, &err)).await;
            }
            return HookOutcome::Failed(err);
        };

        let span = HookSpan::new(hook, &program);

        let outcome = match Command::new(&program)
            .args(&args)
            .stdin(Stdio::null())
            .output()
            .await
        {
            Ok(output) => {
                relay(tokio::io::stdout(), &output.stdout).await;
                relay(tokio::io::stderr(), &output.stderr).await;

                if output.status.success() {
                    HookOutcome::Succeeded
                } else {
                    HookOutcome::Failed(HookError::Exited {
                        hook,
                        status: output.status,
                    })
                }
            }
            Err(source) => HookOutcome::Failed(HookError::Spawn {
                hook,
                program: program.clone(),
                source,
            }),
        };

        match outcome.error() {
            Some(err) => {
                span.record_error(&err.to_string());
                info!(hook = %hook, error = %err, "hook failed");
            }
            None => span.record_result(true),
        }

        if self.verbose {
            let description = describe_command(&program, &args);
            match outcome.error() {
                None => {
                    write_line(tokio::io::stdout(), &success_line(hook, &description)).await
                }
                Some(err) => {
                    write_line(tokio::io::stderr(), &failure_line(hook, &description, err)).await
                }
            }
        }

        outcome
    }
}

/// Split a hook command line into program and arguments using shell quoting rules
pub fn split_command(command_line: &str) -> Option<(String, Vec<String>)> {
    let mut words = shlex::split(command_line)?.into_iter();
    let program = words.next()?;
    Some((program, words.collect()))
}

/// Render a program and its arguments as a quoted list, e.g. `["echo", "hi"]`
pub fn describe_command(program: &str, args: &[String]) -> String {
    let quoted: Vec<String> = std::iter::once(program)
        .chain(args.iter().map(String::as_str))
        .map(|word| format!("{:?}", word))
        .collect();
    format!("[{}]", quoted.join(", "))
}

fn success_line(hook: HookPoint, description: &str) -> String {
    format!("{} SUCCESS: {}\n", hook, description)
}

fn failure_line(hook: HookPoint, description: &str, err: &HookError) -> String {
    format!("{} FAILURE: {}\n  {}\n", hook, description, err)
}

async fn relay<W: AsyncWrite + Unpin>(mut out: W, bytes: &[u8]) {
    if bytes.is_empty() {
        return;
    }
    if let Err(e) = write_all_flush(&mut out, bytes).await {
        warn!(error = %e, "failed to relay hook output");
    }
}

async fn write_line<W: AsyncWrite + Unpin>(mut out: W, line: &str) {
    if let Err(e) = write_all_flush(&mut out, line.as_bytes()).await {
        warn!(error = %e, "failed to write hook summary");
    }
}

async fn write_all_flush<W: AsyncWrite + Unpin>(out: &mut W, bytes: &[u8]) -> std::io::Result<()> {
    out.write_all(bytes).await?;
    out.flush().await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::exit::ExitStatusSource;

    #[test]
    fn test_split_command_respects_quotes() {
        let (program, args) = split_command(r#"sh -c "echo 'a b'" extra"#).unwrap();
        assert_eq!(program, "sh");
        assert_eq!(args, vec!["-c", "echo 'a b'", "extra"]);
    }

    #[test]
    fn test_split_command_rejects_blank_and_unbalanced() {
        assert!(split_command("   ").is_none());
        assert!(split_command("echo 'oops").is_none());
    }

    #[test]
    fn test_describe_command() {
        assert_eq!(
            describe_command("echo", &["hello world".to_string(), "\"q\"".to_string()]),
            r#"["echo", "hello world", "\"q\""]"#
        );
        assert_eq!(describe_command("true", &[]), r#"["true"]"#);
    }

    #[test]
    fn test_summary_lines() {
        assert_eq!(
            success_line(HookPoint::PostStart, r#"["true"]"#),
            "POSTSTART SUCCESS: [\"true\"]\n"
        );

        let err = HookError::InvalidCommand {
            hook: HookPoint::PreStart,
            command: "'".into(),
        };
        let line = failure_line(HookPoint::PreStart, r#"["'"]"#, &err);
        assert!(line.starts_with("PRESTART FAILURE: [\"'\"]\n  "));
        assert!(line.ends_with('\n'));
    }

    #[tokio::test]
    async fn test_unconfigured_hook_is_skipped() {
        let runner = HookRunner::new(false);
        let outcome = runner.run(&HookSpec::none(HookPoint::PreStart)).await;
        assert!(!outcome.executed());
    }

    #[tokio::test]
    async fn test_successful_hook() {
        let runner = HookRunner::new(false);
        let outcome = runner.run(&HookSpec::new(HookPoint::PostStart, "true")).await;
        assert!(outcome.executed());
        assert!(outcome.succeeded());
    }

    #[tokio::test]
    async fn test_failing_hook_reports_exit_status() {
        let runner = HookRunner::new(true);
        let outcome = runner
            .run(&HookSpec::new(HookPoint::PreStart, "sh -c 'exit 7'"))
            .await;

        let err = outcome.into_result().unwrap_err();
        assert_eq!(err.hook(), HookPoint::PreStart);
        assert_eq!(err.exit_code(), Some(7));
    }

    #[tokio::test]
    async fn test_missing_hook_program_is_spawn_failure() {
        let runner = HookRunner::new(false);
        let outcome = runner
            .run(&HookSpec::new(
                HookPoint::PostStop,
                "/nonexistent/procwrap-hook --flag",
            ))
            .await;

        assert!(outcome.executed());
        assert!(matches!(outcome.error(), Some(HookError::Spawn { .. })));
        assert_eq!(outcome.error().and_then(|e| e.exit_code()), None);
    }

    #[tokio::test]
    async fn test_invalid_command_line_counts_as_executed() {
        let runner = HookRunner::new(false);
        let outcome = runner.run(&HookSpec::new(HookPoint::Sigterm, "  ")).await;

        assert!(outcome.executed());
        assert!(matches!(
            outcome.error(),
            Some(HookError::InvalidCommand { .. })
        ));
    }
}

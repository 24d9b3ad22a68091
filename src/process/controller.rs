/*!
 * Process Controller
 * Launches the supervised program and reports its termination
 */

use super::types::{
    ChildHandle, ProcessError, ProcessResult, TerminationOutcome, TerminationReceiver,
};
use std::io;
use std::process::Stdio;
use tokio::process::Command;
use tokio::sync::oneshot;
use tracing::{debug, info};

/// Starts the one program a supervisor run owns
///
/// `start` consumes the controller, so a run can never hold two children.
#[derive(Debug, Clone)]
pub struct ProcessController {
    program: String,
    args: Vec<String>,
}

impl ProcessController {
    pub fn new(program: impl Into<String>, args: Vec<String>) -> Self {
        Self {
            program: program.into(),
            args,
        }
    }

    /// Spawn the program with its output attached to ours
    ///
    /// On success a background task waits for the child and sends exactly one
    /// outcome to the returned receiver. Must be called within a tokio runtime.
    pub fn start(self) -> ProcessResult<(ChildHandle, TerminationReceiver)> {
        let mut child = Command::new(&self.program)
            .args(&self.args)
            .stdin(Stdio::null())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .kill_on_drop(false)
            .spawn()
            .map_err(|source| ProcessError::Spawn {
                program: self.program.clone(),
                source,
            })?;

        // Only missing once the child has been polled to completion
        let os_pid = child.id().ok_or_else(|| ProcessError::Spawn {
            program: self.program.clone(),
            source: io::Error::new(io::ErrorKind::Other, "child exited before its pid was read"),
        })?;
        let handle = ChildHandle::new(os_pid);

        info!(program = %self.program, os_pid, "started program");

        let (tx, rx) = oneshot::channel();
        let program = self.program;
        tokio::spawn(async move {
            let outcome: TerminationOutcome = match child.wait().await {
                Ok(status) if status.success() => Ok(()),
                Ok(status) => Err(ProcessError::Exited(status)),
                Err(e) => Err(ProcessError::Wait(e)),
            };

            debug!(program = %program, os_pid, ok = outcome.is_ok(), "program terminated");
            let _ = tx.send(outcome);
        });

        Ok((handle, TerminationReceiver::new(rx)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::exit::ExitStatusSource;

    #[tokio::test]
    async fn test_clean_exit() {
        let controller = ProcessController::new("true", vec![]);
        let (handle, result) = controller.start().unwrap();

        assert!(handle.os_pid() > 0);
        assert!(result.wait().await.is_ok());
    }

    #[tokio::test]
    async fn test_exit_code_is_reported() {
        let controller =
            ProcessController::new("sh", vec!["-c".to_string(), "exit 42".to_string()]);
        let (_, result) = controller.start().unwrap();

        let err = result.wait().await.unwrap_err();
        assert_eq!(err.exit_code(), Some(42));
    }

    #[tokio::test]
    async fn test_missing_program_fails_to_start() {
        let controller = ProcessController::new("/nonexistent/procwrap-target", vec![]);

        let err = controller.start().unwrap_err();
        assert!(matches!(err, ProcessError::Spawn { .. }));
        assert_eq!(err.exit_code(), None);
    }

    #[tokio::test]
    async fn test_signal_death_has_no_exit_code() {
        let controller =
            ProcessController::new("sh", vec!["-c".to_string(), "kill -9 $$".to_string()]);
        let (_, result) = controller.start().unwrap();

        let err = result.wait().await.unwrap_err();
        assert!(matches!(err, ProcessError::Exited(_)));
        assert_eq!(err.exit_code(), None);
    }
}

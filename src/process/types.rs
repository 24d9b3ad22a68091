/*!
 * Process Types
 * Child handle, termination outcome and process errors
 */

use crate::exit::ExitStatusSource;
use miette::Diagnostic;
use std::io;
use std::process::ExitStatus;
use thiserror::Error;
use tokio::sync::oneshot;

/// Process operation result
pub type ProcessResult<T> = Result<T, ProcessError>;

/// What the supervised program's run produced; `Ok` means it exited zero
pub type TerminationOutcome = ProcessResult<()>;

/// Process errors
#[derive(Error, Debug, Diagnostic)]
pub enum ProcessError {
    #[error("Spawn failed: {program}: {source}")]
    #[diagnostic(
        code(process::spawn_failed),
        help("Check that the program exists, is executable and is on PATH.")
    )]
    Spawn {
        program: String,
        #[source]
        source: io::Error,
    },

    #[error("Program exited unsuccessfully: {0}")]
    #[diagnostic(code(process::exited))]
    Exited(ExitStatus),

    #[error("Failed to wait for program: {0}")]
    #[diagnostic(code(process::wait_failed))]
    Wait(#[source] io::Error),

    #[error("Termination result was lost before it could be delivered")]
    #[diagnostic(code(process::result_lost))]
    ResultLost,
}

impl ExitStatusSource for ProcessError {
    fn exit_code(&self) -> Option<i32> {
        match self {
            ProcessError::Exited(status) => status.code(),
            _ => None,
        }
    }
}

/// Reference to the running program, used only to deliver signals
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChildHandle {
    os_pid: u32,
}

impl ChildHandle {
    pub(crate) fn new(os_pid: u32) -> Self {
        Self { os_pid }
    }

    /// OS-level process ID
    pub fn os_pid(&self) -> u32 {
        self.os_pid
    }
}

/// One-shot notification of the program's termination
///
/// The outcome is buffered, so it is not lost if nobody is waiting yet.
#[derive(Debug)]
pub struct TerminationReceiver {
    rx: oneshot::Receiver<TerminationOutcome>,
}

impl TerminationReceiver {
    pub(crate) fn new(rx: oneshot::Receiver<TerminationOutcome>) -> Self {
        Self { rx }
    }

    /// Wait until the program has terminated
    pub async fn wait(self) -> TerminationOutcome {
        self.rx.await.unwrap_or(Err(ProcessError::ResultLost))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_dropped_sender_reports_lost_result() {
        let (tx, rx) = oneshot::channel();
        drop(tx);

        let outcome = TerminationReceiver::new(rx).wait().await;
        assert!(matches!(outcome, Err(ProcessError::ResultLost)));
    }

    #[tokio::test]
    async fn test_outcome_sent_before_waiting_is_kept() {
        let (tx, rx) = oneshot::channel();
        tx.send(Ok(())).unwrap();

        assert!(TerminationReceiver::new(rx).wait().await.is_ok());
    }

    #[test]
    fn test_only_exited_errors_carry_a_code() {
        assert_eq!(ProcessError::ResultLost.exit_code(), None);
        assert_eq!(
            ProcessError::Wait(io::Error::from(io::ErrorKind::Interrupted)).exit_code(),
            None
        );
    }
}

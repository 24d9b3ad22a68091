/*!
 * Hook Types
 * Hook outcomes and failure types
 */

use crate::config::HookPoint;
use crate::exit::ExitStatusSource;
use miette::Diagnostic;
use std::io;
use std::process::ExitStatus;
use thiserror::Error;

/// Hook errors
#[derive(Error, Debug, Diagnostic)]
pub enum HookError {
    #[error("{hook} hook has an invalid command line: {command:?}")]
    #[diagnostic(
        code(hook::invalid_command),
        help("The command line is split with POSIX shell quoting rules. Check for unbalanced quotes.")
    )]
    InvalidCommand { hook: HookPoint, command: String },

    #[error("{hook} hook failed to start {program}: {source}")]
    #[diagnostic(
        code(hook::spawn_failed),
        help("Check that the hook program exists and is executable.")
    )]
    Spawn {
        hook: HookPoint,
        program: String,
        #[source]
        source: io::Error,
    },

    #[error("{hook} hook exited unsuccessfully: {status}")]
    #[diagnostic(code(hook::exited))]
    Exited { hook: HookPoint, status: ExitStatus },
}

impl HookError {
    /// Lifecycle point of the failing hook
    pub fn hook(&self) -> HookPoint {
        match self {
            HookError::InvalidCommand { hook, .. }
            | HookError::Spawn { hook, .. }
            | HookError::Exited { hook, .. } => *hook,
        }
    }
}

impl ExitStatusSource for HookError {
    fn exit_code(&self) -> Option<i32> {
        match self {
            HookError::Exited { status, .. } => status.code(),
            _ => None,
        }
    }
}

/// Result of running one hook
#[derive(Debug)]
pub enum HookOutcome {
    /// No command configured for this point
    Skipped,
    /// Ran and exited zero
    Succeeded,
    /// Attempted and did not succeed
    Failed(HookError),
}

impl HookOutcome {
    /// Whether a configured command was attempted
    pub fn executed(&self) -> bool {
        !matches!(self, HookOutcome::Skipped)
    }

    pub fn succeeded(&self) -> bool {
        matches!(self, HookOutcome::Succeeded)
    }

    pub fn error(&self) -> Option<&HookError> {
        match self {
            HookOutcome::Failed(err) => Some(err),
            _ => None,
        }
    }

    /// Collapse to a result; a skipped hook is not an error
    pub fn into_result(self) -> Result<(), HookError> {
        match self {
            HookOutcome::Failed(err) => Err(err),
            _ => Ok(()),
        }
    }
}

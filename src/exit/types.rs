/*!
 * Exit Types
 * Lifecycle phases and reserved exit codes
 */

use std::fmt;

/// Returned when the pre-start hook fails and its exit status cannot be determined
pub const PRESTART_FAILURE: i32 = 417_000;

/// Returned when the program fails to launch and no exit status exists
pub const START_FAILURE: i32 = 417_001;

/// Returned when the run fails after launch without a recoverable exit status
pub const EXEC_FAILURE: i32 = 417_002;

/// Supervisor lifecycle position
///
/// Only used to pick the fallback exit code and to label diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Phase {
    /// Running the pre-start hook
    PreStart,
    /// Launching the program
    Start,
    /// Running the post-start hook
    PostStart,
    /// Waiting for the program to exit while relaying signals
    Running,
    /// Program exited, signal relay shutting down
    Stopping,
    /// Running the post-stop hook
    PostStop,
    /// Lifecycle finished
    Done,
}

impl Phase {
    /// Sentinel used when a failure in this phase carries no exit status
    pub fn sentinel(self) -> i32 {
        match self {
            Phase::PreStart => PRESTART_FAILURE,
            Phase::Start => START_FAILURE,
            _ => EXEC_FAILURE,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Phase::PreStart => "prestart",
            Phase::Start => "start",
            Phase::Running => "running",
            Phase::PostStart => "poststart",
            Phase::Stopping => "stopping",
            Phase::PostStop => "poststop",
            Phase::Done => "done",
        }
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

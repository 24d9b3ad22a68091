/*!
 * Exit Status Resolution
 * Maps the outcome of a lifecycle phase to the supervisor's exit code
 */

use super::traits::ExitStatusSource;
use super::types::Phase;
use tracing::debug;

/// Resolve the exit code for a phase outcome
///
/// A real exit status always wins over the phase sentinel, so callers that
/// inspect the code see the wrapped program's own status whenever it exists.
/// A process killed by a signal has no exit status, so its death resolves to
/// the phase sentinel (`EXEC_FAILURE` once the program has launched) rather
/// than a shell-style `128 + signal` code.
pub fn resolve<E: ExitStatusSource>(phase: Phase, result: Result<(), E>) -> i32 {
    match result {
        Ok(()) => 0,
        Err(err) => match err.exit_code() {
            Some(code) => code,
            None => {
                debug!(phase = %phase, "no exit status available, using sentinel");
                phase.sentinel()
            }
        },
    }
}

/// Exit code as observed by a waiting parent on Unix (low 8 bits)
pub fn reported_code(code: i32) -> i32 {
    code & 0xff
}

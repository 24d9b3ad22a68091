/*!
 * Exit Traits
 * Extraction of a numeric exit status from lifecycle failures
 */

use std::process::ExitStatus;

/// A failure that may carry the exit status of a process that really ran
pub trait ExitStatusSource {
    /// Numeric status reported by the OS, if the failure has one
    fn exit_code(&self) -> Option<i32>;
}

impl ExitStatusSource for ExitStatus {
    fn exit_code(&self) -> Option<i32> {
        self.code()
    }
}

impl<T: ExitStatusSource + ?Sized> ExitStatusSource for &T {
    fn exit_code(&self) -> Option<i32> {
        (**self).exit_code()
    }
}

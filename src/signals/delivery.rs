/*!
 * Signal Delivery
 * OS-level signal delivery to the supervised program
 */

use super::traits::SignalTarget;
use super::types::{SignalError, SignalResult};
use crate::process::ChildHandle;
use nix::sys::signal::{kill, Signal};
use nix::unistd::Pid as NixPid;

impl SignalTarget for ChildHandle {
    fn deliver(&self, signal: Signal) -> SignalResult<()> {
        kill(NixPid::from_raw(self.os_pid() as i32), signal).map_err(|source| {
            SignalError::Delivery {
                signal,
                os_pid: self.os_pid(),
                source,
            }
        })
    }
}

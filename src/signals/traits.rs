/*!
 * Signal Traits
 * Signal delivery abstraction
 */

use super::types::SignalResult;
use nix::sys::signal::Signal;

/// Something signals can be relayed to
pub trait SignalTarget: Send + Sync {
    /// Deliver a signal unmodified
    fn deliver(&self, signal: Signal) -> SignalResult<()>;
}

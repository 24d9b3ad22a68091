/*!
 * Signals Module
 * Interception of OS signals and relay to the supervised program
 */

mod delivery;
mod forwarder;
mod listener;
pub mod traits;
pub mod types;

// Re-export public API
pub use forwarder::{ForwarderHandle, SignalForwarder};
pub use listener::SignalListener;
pub use traits::SignalTarget;
pub use types::{
    default_signals, is_termination, ForwarderStats, SignalError, SignalResult,
    INTERCEPTED_SIGNALS, RELAYED_SIGNALS, SIGNAL_BUFFER,
};
pub use nix::sys::signal::Signal;

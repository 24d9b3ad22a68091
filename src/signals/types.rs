/*!
 * Signal Types
 * Relayed signal sets, forwarder statistics and signal errors
 */

use miette::Diagnostic;
use nix::sys::signal::Signal;
use std::io;
use thiserror::Error;

/// Signal operation result
pub type SignalResult<T> = Result<T, SignalError>;

/// Capacity of the incoming signal queue; bursts up to this size are not dropped
pub const SIGNAL_BUFFER: usize = 64;

/// Termination-class signals, which may be handled by the SIGTERM hook
pub const INTERCEPTED_SIGNALS: [Signal; 2] = [Signal::SIGINT, Signal::SIGTERM];

/// Signals always relayed to the program unmodified
pub const RELAYED_SIGNALS: [Signal; 5] = [
    Signal::SIGHUP,
    Signal::SIGQUIT,
    Signal::SIGUSR1,
    Signal::SIGUSR2,
    Signal::SIGWINCH,
];

/// Every signal the supervisor subscribes to
pub fn default_signals() -> Vec<Signal> {
    INTERCEPTED_SIGNALS
        .iter()
        .chain(RELAYED_SIGNALS.iter())
        .copied()
        .collect()
}

/// Whether a signal belongs to the interrupt/terminate class
pub fn is_termination(signal: Signal) -> bool {
    INTERCEPTED_SIGNALS.contains(&signal)
}

/// Signal errors
#[derive(Error, Debug, Diagnostic)]
pub enum SignalError {
    #[error("Failed to install handler for {signal}: {source}")]
    #[diagnostic(
        code(signal::install_failed),
        help("Signal handlers can only be installed from within a tokio runtime.")
    )]
    Install {
        signal: Signal,
        #[source]
        source: io::Error,
    },

    #[error("Failed to deliver {signal} to OS PID {os_pid}: {source}")]
    #[diagnostic(code(signal::delivery_failed))]
    Delivery {
        signal: Signal,
        os_pid: u32,
        #[source]
        source: nix::Error,
    },
}

/// Counters for one forwarder run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ForwarderStats {
    /// Signals taken from the queue
    pub received: u64,
    /// Signals delivered to the program
    pub forwarded: u64,
    /// Termination signals absorbed by a successful SIGTERM hook
    pub handled_by_hook: u64,
    /// Deliveries the OS rejected
    pub delivery_failures: u64,
}

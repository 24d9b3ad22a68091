/*!
 * Signal Forwarder
 * Relays queued signals to the supervised program while it runs
 *
 * The forwarder is ACTIVE until the stop notification fires, then STOPPED.
 * Termination-class signals first go to the SIGTERM hook; the signal is only
 * withheld from the program when that hook ran and succeeded.
 */

use super::traits::SignalTarget;
use super::types::{is_termination, ForwarderStats};
use crate::config::HookSpec;
use crate::hooks::HookRunner;
use nix::sys::signal::Signal;
use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

/// Signal relay loop for one child
pub struct SignalForwarder<T: SignalTarget> {
    target: T,
    runner: HookRunner,
    sigterm_hook: HookSpec,
}

impl<T: SignalTarget + 'static> SignalForwarder<T> {
    pub fn new(target: T, runner: HookRunner, sigterm_hook: HookSpec) -> Self {
        Self {
            target,
            runner,
            sigterm_hook,
        }
    }

    /// Run the relay loop on its own task
    pub fn spawn(self, signals: mpsc::Receiver<Signal>) -> ForwarderHandle {
        let (stop_tx, stop_rx) = oneshot::channel();
        let task = tokio::spawn(self.run(stop_rx, signals));

        ForwarderHandle {
            stop: Some(stop_tx),
            task,
        }
    }

    /// Relay signals until `stop` fires or its sender is dropped
    pub async fn run(
        self,
        mut stop: oneshot::Receiver<()>,
        mut signals: mpsc::Receiver<Signal>,
    ) -> ForwarderStats {
        let mut stats = ForwarderStats::default();
        let mut queue_open = true;

        loop {
            tokio::select! {
                _ = &mut stop => break,
                received = signals.recv(), if queue_open => match received {
                    Some(sig) => self.handle(sig, &mut stats).await,
                    None => {
                        debug!("signal queue closed, waiting for stop");
                        queue_open = false;
                    }
                },
            }
        }

        debug!(?stats, "signal forwarder stopped");
        stats
    }

    async fn handle(&self, sig: Signal, stats: &mut ForwarderStats) {
        stats.received += 1;

        if is_termination(sig) {
            let outcome = self.runner.run(&self.sigterm_hook).await;
            let handled = outcome.executed() && outcome.succeeded();
            if handled {
                info!(signal = %sig, "signal handled by SIGTERM hook, not forwarded");
                stats.handled_by_hook += 1;
                return;
            }
        }

        match self.target.deliver(sig) {
            Ok(()) => {
                debug!(signal = %sig, "signal forwarded");
                stats.forwarded += 1;
            }
            Err(e) => {
                warn!(error = %e, "signal not forwarded");
                stats.delivery_failures += 1;
            }
        }
    }
}

/// Handle to a running forwarder
pub struct ForwarderHandle {
    stop: Option<oneshot::Sender<()>>,
    task: JoinHandle<ForwarderStats>,
}

impl ForwarderHandle {
    /// Stop relaying and wait until the loop has fully exited
    pub async fn shutdown(mut self) -> ForwarderStats {
        if let Some(stop) = self.stop.take() {
            let _ = stop.send(());
        }

        match (&mut self.task).await {
            Ok(stats) => stats,
            Err(e) => {
                warn!(error = %e, "signal forwarder task failed");
                ForwarderStats::default()
            }
        }
    }
}

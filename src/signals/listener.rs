/*!
 * Signal Listener
 * Subscribes to OS signals and queues them for the forwarder
 */

use super::types::{SignalError, SignalResult, SIGNAL_BUFFER};
use futures::stream::{self, StreamExt};
use nix::sys::signal::Signal;
use tokio::signal::unix::{signal, SignalKind};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio_stream::wrappers::SignalStream;
use tracing::debug;

/// Pumps subscribed OS signals into a bounded queue
///
/// Dropping the listener stops the pump. The process keeps ignoring the
/// default action of the subscribed signals afterwards, as tokio never
/// restores the original disposition.
pub struct SignalListener {
    pump: JoinHandle<()>,
}

impl SignalListener {
    /// Subscribe to `signals` and return the queue they arrive on
    ///
    /// Must be called within a tokio runtime.
    pub fn install(signals: &[Signal]) -> SignalResult<(Self, mpsc::Receiver<Signal>)> {
        let mut streams = Vec::with_capacity(signals.len());
        for &sig in signals {
            let kind = SignalKind::from_raw(sig as i32);
            let os_stream =
                signal(kind).map_err(|source| SignalError::Install { signal: sig, source })?;
            streams.push(SignalStream::new(os_stream).map(move |()| sig).boxed());
        }

        let (tx, rx) = mpsc::channel(SIGNAL_BUFFER);
        let mut merged = stream::select_all(streams);

        let pump = tokio::spawn(async move {
            while let Some(sig) = merged.next().await {
                debug!(signal = %sig, "signal received");
                if tx.send(sig).await.is_err() {
                    break;
                }
            }
        });

        debug!(count = signals.len(), "signal listener installed");

        Ok((Self { pump }, rx))
    }
}

impl Drop for SignalListener {
    fn drop(&mut self) {
        self.pump.abort();
    }
}

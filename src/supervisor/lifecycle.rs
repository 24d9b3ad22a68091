/*!
 * Supervisor Lifecycle
 *
 * Drives one program through the fixed hook lifecycle and decides the exit code.
 *
 * # Lifecycle
 *
 * 1. PRESTART hook; a failure ends the run before anything is launched
 * 2. Launch the program
 * 3. POSTSTART hook; failures are reported only
 * 4. Relay signals while waiting for the program to exit (`Running`)
 * 5. Stop the relay and wait for it to quiesce (`Stopping`)
 * 6. POSTSTOP hook; failures are reported only
 *
 * # Example
 *
 * ```ignore
 * let config = Cli::parse().into_config(HookSet::from_env())?;
 * let code = Supervisor::new(config).run().await;
 * std::process::exit(code);
 * ```
 */

use crate::config::{Config, HookSpec};
use crate::exit::{resolve, Phase};
use crate::hooks::HookRunner;
use crate::monitoring::generate_run_id;
use crate::process::{ChildHandle, ProcessController, TerminationOutcome, TerminationReceiver};
use crate::signals::{default_signals, Signal, SignalForwarder, SignalListener};
use tracing::{debug, error, info, info_span, warn, Instrument};

/// Single-child supervisor
pub struct Supervisor {
    config: Config,
    runner: HookRunner,
    signals: Vec<Signal>,
    phase: Phase,
    run_id: String,
}

impl Supervisor {
    pub fn new(config: Config) -> Self {
        let runner = HookRunner::new(config.verbose);
        Self {
            config,
            runner,
            signals: default_signals(),
            phase: Phase::PreStart,
            run_id: generate_run_id(),
        }
    }

    /// Override the set of signals intercepted while the program runs
    pub fn with_signals(mut self, signals: Vec<Signal>) -> Self {
        self.signals = signals;
        self
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn run_id(&self) -> &str {
        &self.run_id
    }

    /// Run the full lifecycle and return the exit code for this process
    pub async fn run(mut self) -> i32 {
        let span = info_span!(
            "supervisor",
            run_id = %self.run_id,
            program = %self.config.program,
            hooks = self.config.hooks.configured(),
        );
        self.run_lifecycle().instrument(span).await
    }

    async fn run_lifecycle(&mut self) -> i32 {
        let hooks = self.config.hooks.clone();

        self.enter(Phase::PreStart);
        if let Err(err) = self.runner.run(&hooks.pre_start).await.into_result() {
            info!(error = %err, "prestart hook failed, program not started");
            return resolve(Phase::PreStart, Err(err));
        }

        self.enter(Phase::Start);
        let controller = ProcessController::new(&self.config.program, self.config.args.clone());
        let (child, termination) = match controller.start() {
            Ok(started) => started,
            Err(err) => {
                error!(error = %err, "program could not be started");
                return resolve(Phase::Start, Err(err));
            }
        };

        self.enter(Phase::PostStart);
        self.run_nonfatal(&hooks.post_start).await;

        self.enter(Phase::Running);
        let outcome = self.relay_until_exit(child, termination, hooks.sigterm).await;

        self.enter(Phase::PostStop);
        self.run_nonfatal(&hooks.post_stop).await;

        self.enter(Phase::Done);
        resolve(Phase::Running, outcome)
    }

    /// Relay signals to `child` until it exits; returns once relay has stopped
    async fn relay_until_exit(
        &mut self,
        child: ChildHandle,
        termination: TerminationReceiver,
        sigterm_hook: HookSpec,
    ) -> TerminationOutcome {
        let relay = match SignalListener::install(&self.signals) {
            Ok((listener, queue)) => {
                let forwarder = SignalForwarder::new(child, self.runner, sigterm_hook);
                Some((listener, forwarder.spawn(queue)))
            }
            Err(err) => {
                warn!(error = %err, "signal relay unavailable");
                None
            }
        };

        let outcome = termination.wait().await;
        self.enter(Phase::Stopping);

        if let Some((listener, forwarder)) = relay {
            let stats = forwarder.shutdown().await;
            drop(listener);
            debug!(?stats, "signal relay quiesced");
        }

        outcome
    }

    async fn run_nonfatal(&self, hook: &HookSpec) {
        if let Some(err) = self.runner.run(hook).await.error() {
            info!(hook = %hook.point(), error = %err, "hook failed, continuing");
        }
    }

    fn enter(&mut self, phase: Phase) {
        debug!(from = %self.phase, to = %phase, "phase transition");
        self.phase = phase;
    }
}

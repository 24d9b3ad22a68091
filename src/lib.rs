/*!
 * procwrap Library
 * Single-child process supervisor with lifecycle hooks and signal relay
 */

pub mod config;
pub mod exit;
pub mod hooks;
pub mod monitoring;
pub mod process;
pub mod signals;
pub mod supervisor;

// Re-exports
pub use config::{Cli, Config, ConfigError, HookPoint, HookSet, HookSpec};
pub use exit::{resolve, ExitStatusSource, Phase, EXEC_FAILURE, PRESTART_FAILURE, START_FAILURE};
pub use hooks::{HookError, HookOutcome, HookRunner};
pub use monitoring::init_tracing;
pub use process::{ChildHandle, ProcessController, ProcessError};
pub use signals::{SignalForwarder, SignalListener, SignalTarget};
pub use supervisor::Supervisor;

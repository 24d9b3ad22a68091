/*!
 * Configuration Module
 * Invocation and environment configuration, read once at startup
 */

mod cli;
pub mod types;

pub use cli::Cli;
pub use types::{Config, ConfigError, ConfigResult, HookPoint, HookSet, HookSpec};

/*!
 * Hooks Module
 * Lifecycle hook execution
 */

mod runner;
pub mod types;

pub use runner::{describe_command, split_command, HookRunner};
pub use types::{HookError, HookOutcome};

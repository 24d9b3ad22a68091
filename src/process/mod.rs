/*!
 * Process Module
 * Launching and observing the supervised program
 */

mod controller;
pub mod types;

pub use controller::ProcessController;
pub use types::{
    ChildHandle, ProcessError, ProcessResult, TerminationOutcome, TerminationReceiver,
};

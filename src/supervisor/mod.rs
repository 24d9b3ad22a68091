/*!
 * Supervisor Module
 * Lifecycle orchestration for one supervised program
 */

mod lifecycle;

pub use lifecycle::Supervisor;

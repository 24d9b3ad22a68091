/*!
 * Monitoring
 * Structured diagnostics for the supervisor
 */

mod tracer;

pub use tracer::{generate_run_id, init_tracing, HookSpan};

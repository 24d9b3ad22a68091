/*!
 * Exit Module
 * Exit-code derivation for the supervisor
 */

mod status;
pub mod traits;
pub mod types;

pub use status::{reported_code, resolve};
pub use traits::ExitStatusSource;
pub use types::{Phase, EXEC_FAILURE, PRESTART_FAILURE, START_FAILURE};

/*!
 * procwrap - Main Entry Point
 *
 * Runs one program between lifecycle hooks:
 * - PRESTART before launch
 * - POSTSTART after launch
 * - SIGTERM in place of relaying an interrupt/terminate signal
 * - POSTSTOP after the program and signal relay have stopped
 */

use clap::Parser;
use procwrap::{init_tracing, Cli, HookSet, Supervisor};

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_tracing();

    let config = match cli.into_config(HookSet::from_env()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{:?}", miette::Report::new(e));
            std::process::exit(2);
        }
    };

    let code = Supervisor::new(config).run().await;
    std::process::exit(code);
}

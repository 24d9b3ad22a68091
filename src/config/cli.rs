/*!
 * Command Line
 * Invocation parsing for the supervisor binary
 */

use super::types::{Config, ConfigResult, HookSet};
use clap::Parser;

/// Run a program between lifecycle hooks, relaying signals to it
///
/// Hooks are read from the PRESTART, POSTSTART, SIGTERM and POSTSTOP
/// environment variables.
#[derive(Debug, Parser)]
#[command(name = "procwrap", version)]
pub struct Cli {
    /// Print a SUCCESS/FAILURE line after each hook
    #[arg(short, long)]
    pub verbose: bool,

    /// Program to supervise, followed by its arguments
    #[arg(
        value_name = "PROGRAM",
        required = true,
        num_args = 1..,
        trailing_var_arg = true,
        allow_hyphen_values = true
    )]
    pub command: Vec<String>,
}

impl Cli {
    /// Combine the parsed invocation with hooks from the environment
    pub fn into_config(self, hooks: HookSet) -> ConfigResult<Config> {
        Config::new(self.command, self.verbose, hooks)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("procwrap").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn test_verbose_flag_before_program() {
        let cli = parse(&["-v", "nginx", "-g", "daemon off;"]);
        assert!(cli.verbose);
        assert_eq!(cli.command, vec!["nginx", "-g", "daemon off;"]);
    }

    #[test]
    fn test_flags_after_program_belong_to_program() {
        let cli = parse(&["sh", "-v", "-c", "true"]);
        assert!(!cli.verbose);
        assert_eq!(cli.command, vec!["sh", "-v", "-c", "true"]);
    }

    #[test]
    fn test_program_is_required() {
        assert!(Cli::try_parse_from(["procwrap"]).is_err());
        assert!(Cli::try_parse_from(["procwrap", "-v"]).is_err());
    }

    #[test]
    fn test_into_config() {
        let config = parse(&["echo", "hi"])
            .into_config(HookSet::default())
            .unwrap();
        assert_eq!(config.program, "echo");
        assert_eq!(config.args, vec!["hi"]);
        assert!(!config.verbose);
    }
}

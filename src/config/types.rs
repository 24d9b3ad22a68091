/*!
 * Configuration Types
 * Hook definitions and the immutable run configuration
 */

use miette::Diagnostic;
use std::fmt;
use thiserror::Error;

/// Configuration result
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Configuration errors
#[derive(Error, Debug, Clone, PartialEq, Eq, Diagnostic)]
pub enum ConfigError {
    #[error("No program given to supervise")]
    #[diagnostic(
        code(config::missing_program),
        help("Usage: procwrap [-v] <program> [args...]")
    )]
    MissingProgram,
}

/// Fixed lifecycle points a hook can be attached to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HookPoint {
    /// Before the program is launched; failure aborts the run
    PreStart,
    /// After the program has been launched
    PostStart,
    /// Replaces relaying of an interrupt/terminate signal when it succeeds
    Sigterm,
    /// After the program has exited and signal relay has stopped
    PostStop,
}

impl HookPoint {
    pub const ALL: [HookPoint; 4] = [
        HookPoint::PreStart,
        HookPoint::PostStart,
        HookPoint::Sigterm,
        HookPoint::PostStop,
    ];

    /// Environment variable holding this hook's command line.
    /// Also used as the label in verbose summaries.
    pub fn env_var(self) -> &'static str {
        match self {
            HookPoint::PreStart => "PRESTART",
            HookPoint::PostStart => "POSTSTART",
            HookPoint::Sigterm => "SIGTERM",
            HookPoint::PostStop => "POSTSTOP",
        }
    }
}

impl fmt::Display for HookPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.env_var())
    }
}

/// A hook command line bound to a lifecycle point
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HookSpec {
    point: HookPoint,
    command: Option<String>,
}

impl HookSpec {
    /// Create a hook; an empty command line means "not configured"
    pub fn new(point: HookPoint, command: impl Into<String>) -> Self {
        let command = command.into();
        Self {
            point,
            command: if command.is_empty() {
                None
            } else {
                Some(command)
            },
        }
    }

    /// A hook point with nothing attached
    pub fn none(point: HookPoint) -> Self {
        Self {
            point,
            command: None,
        }
    }

    pub fn point(&self) -> HookPoint {
        self.point
    }

    pub fn command(&self) -> Option<&str> {
        self.command.as_deref()
    }

    pub fn is_configured(&self) -> bool {
        self.command.is_some()
    }
}

/// The four hooks of one run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HookSet {
    pub pre_start: HookSpec,
    pub post_start: HookSpec,
    pub sigterm: HookSpec,
    pub post_stop: HookSpec,
}

impl HookSet {
    /// Build from any variable lookup; missing keys mean "no hook"
    pub fn from_lookup<F>(mut lookup: F) -> Self
    where
        F: FnMut(&str) -> Option<String>,
    {
        let mut spec = |point: HookPoint| match lookup(point.env_var()) {
            Some(command) => HookSpec::new(point, command),
            None => HookSpec::none(point),
        };

        Self {
            pre_start: spec(HookPoint::PreStart),
            post_start: spec(HookPoint::PostStart),
            sigterm: spec(HookPoint::Sigterm),
            post_stop: spec(HookPoint::PostStop),
        }
    }

    /// Read hooks from the process environment
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Look up the hook attached to a lifecycle point
    pub fn get(&self, point: HookPoint) -> &HookSpec {
        match point {
            HookPoint::PreStart => &self.pre_start,
            HookPoint::PostStart => &self.post_start,
            HookPoint::Sigterm => &self.sigterm,
            HookPoint::PostStop => &self.post_stop,
        }
    }

    /// Number of configured hooks
    pub fn configured(&self) -> usize {
        HookPoint::ALL
            .iter()
            .filter(|p| self.get(**p).is_configured())
            .count()
    }
}

impl Default for HookSet {
    fn default() -> Self {
        Self::from_lookup(|_| None)
    }
}

/// Everything a supervisor run needs, built once at startup
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub program: String,
    pub args: Vec<String>,
    pub verbose: bool,
    pub hooks: HookSet,
}

impl Config {
    /// Build from a command vector (`program` followed by its arguments)
    pub fn new(command: Vec<String>, verbose: bool, hooks: HookSet) -> ConfigResult<Self> {
        let mut command = command.into_iter();
        let program = command.next().ok_or(ConfigError::MissingProgram)?;

        Ok(Self {
            program,
            args: command.collect(),
            verbose,
            hooks,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_empty_command_is_unconfigured() {
        let spec = HookSpec::new(HookPoint::PostStop, "");
        assert!(!spec.is_configured());
        assert_eq!(spec.command(), None);
    }

    #[test]
    fn test_hook_set_from_lookup() {
        let vars: HashMap<&str, &str> = [("PRESTART", "echo pre"), ("SIGTERM", "")]
            .into_iter()
            .collect();

        let hooks = HookSet::from_lookup(|k| vars.get(k).map(|v| v.to_string()));

        assert_eq!(hooks.pre_start.command(), Some("echo pre"));
        assert!(!hooks.sigterm.is_configured());
        assert!(!hooks.post_start.is_configured());
        assert_eq!(hooks.configured(), 1);
        assert_eq!(hooks.get(HookPoint::PreStart).point(), HookPoint::PreStart);
    }

    #[test]
    fn test_config_splits_program_and_args() {
        let config = Config::new(
            vec!["sleep".into(), "1".into()],
            true,
            HookSet::default(),
        )
        .unwrap();

        assert_eq!(config.program, "sleep");
        assert_eq!(config.args, vec!["1".to_string()]);
        assert!(config.verbose);
    }

    #[test]
    fn test_config_requires_program() {
        let err = Config::new(vec![], false, HookSet::default()).unwrap_err();
        assert_eq!(err, ConfigError::MissingProgram);
    }

    #[test]
    fn test_labels_match_env_names() {
        let labels: Vec<String> = HookPoint::ALL.iter().map(|p| p.to_string()).collect();
        assert_eq!(labels, ["PRESTART", "POSTSTART", "SIGTERM", "POSTSTOP"]);
    }
}

use std::ffi::OsStr;
use std::io::{BufRead, BufReader};
use std::ops::ControlFlow;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use indexmap::IndexMap;
use tracing::{debug, warn};

use super::control::ControlCommand;
use crate::config::Config;
use crate::error::{PulseError, Result};
use crate::parser::{parse_event, parse_info, parse_listing, parse_stat, Event, MemoryStats};
use crate::types::{Entity, EntityKind, PropertyList};

/// Runs the pactl binary and parses what it prints.
#[derive(Debug, Clone)]
pub struct Pactl {
    program: PathBuf,
}

impl Default for Pactl {
    fn default() -> Self {
        Self::new("pactl")
    }
}

impl Pactl {
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(&config.pactl)
    }

    pub fn program(&self) -> &Path {
        &self.program
    }

    /// Run pactl with `args` and return its stdout.
    ///
    /// A non-zero exit becomes [`PulseError::CommandFailed`] carrying the
    /// trimmed stderr.
    pub fn output<I, S>(&self, args: I) -> Result<String>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<OsStr>,
    {
        let args: Vec<S> = args.into_iter().collect();
        let command = args
            .iter()
            .map(|a| a.as_ref().to_string_lossy())
            .collect::<Vec<_>>()
            .join(" ");
        debug!(program = %self.program.display(), %command, "running");

        let output = Command::new(&self.program).args(&args).output()?;

        if output.status.success() {
            Ok(String::from_utf8_lossy(&output.stdout).into_owned())
        } else {
            let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
            let message = if stderr.is_empty() {
                output.status.to_string()
            } else {
                stderr
            };
            Err(PulseError::CommandFailed {
                command,
                message,
                help: None,
            })
        }
    }

    /// `pactl list [kind]`, parsed.
    pub fn list(&self, kind: Option<EntityKind>) -> Result<Vec<Entity>> {
        let mut args = vec!["list"];
        if let Some(kind) = kind {
            args.push(kind.list_name());
        }

        parse_listing(&self.output(args)?)
    }

    pub fn info(&self) -> Result<IndexMap<String, String>> {
        Ok(parse_info(&self.output(["info"])?))
    }

    pub fn stat(&self) -> Result<MemoryStats> {
        parse_stat(&self.output(["stat"])?)
    }

    pub fn run(&self, command: &ControlCommand) -> Result<String> {
        self.output(command.args())
    }

    /// Load a module and return its index.
    pub fn load_module(&self, name: &str, arguments: PropertyList) -> Result<u32> {
        let command = ControlCommand::LoadModule {
            name: name.to_string(),
            arguments,
        };
        self.run_load(&command)
    }

    /// Run a `load-module` command and return the new module index.
    pub fn run_load(&self, command: &ControlCommand) -> Result<u32> {
        let output = self.run(command)?;
        let id = output.trim();

        id.parse()
            .map_err(|_| PulseError::malformed("module index", id))
    }

    /// Follow `pactl subscribe`, handing each event to `on_event` until it
    /// returns [`ControlFlow::Break`] or pactl exits.
    pub fn subscribe<F>(&self, on_event: F) -> Result<()>
    where
        F: FnMut(Event) -> ControlFlow<()>,
    {
        self.stream(["subscribe"], on_event)
    }

    fn stream<I, S, F>(&self, args: I, mut on_event: F) -> Result<()>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<OsStr>,
        F: FnMut(Event) -> ControlFlow<()>,
    {
        debug!(program = %self.program.display(), "subscribing");

        let mut child = Command::new(&self.program)
            .args(args)
            .stdout(Stdio::piped())
            .stderr(Stdio::inherit())
            .spawn()?;

        let Some(stdout) = child.stdout.take() else {
            let _ = child.kill();
            return Err(PulseError::CommandFailed {
                command: "subscribe".to_string(),
                message: "no stdout".to_string(),
                help: None,
            });
        };

        let mut outcome: Result<()> = Ok(());
        for line in BufReader::new(stdout).lines() {
            let line = match line {
                Ok(line) => line,
                Err(e) => {
                    outcome = Err(e.into());
                    break;
                }
            };
            if line.is_empty() {
                continue;
            }

            match parse_event(&line) {
                Ok(event) => {
                    if on_event(event).is_break() {
                        break;
                    }
                }
                Err(e) => {
                    outcome = Err(e);
                    break;
                }
            }
        }

        if let Err(e) = child.kill() {
            // Already exited.
            debug!(error = %e, "subscribe process gone");
        }
        match child.wait() {
            Ok(status) if !status.success() && outcome.is_ok() => {
                warn!(%status, "pactl subscribe exited");
            }
            Ok(_) => {}
            Err(e) => debug!(error = %e, "failed to reap subscribe process"),
        }

        outcome
    }
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;

    #[test]
    fn test_output_returns_stdout() {
        let pactl = Pactl::new("echo");

        assert_eq!(pactl.output(["hello", "world"]).unwrap(), "hello world\n");
    }

    #[test]
    fn test_failure_carries_stderr() {
        let pactl = Pactl::new("sh");

        let err = pactl
            .output(["-c", "echo '  Failure: No such entity  ' >&2; exit 1"])
            .unwrap_err();

        match err {
            PulseError::CommandFailed { message, .. } => {
                assert_eq!(message, "Failure: No such entity");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_missing_binary_is_io_error() {
        let pactl = Pactl::new("/nonexistent/bin/pactl");

        assert!(matches!(pactl.output(["info"]), Err(PulseError::IoError(_))));
    }

    #[test]
    fn test_list_parses_output() {
        // echo prints "list sinks", which has no entity header.
        let pactl = Pactl::new("echo");

        assert!(pactl.list(Some(EntityKind::Sink)).unwrap().is_empty());
    }

    #[test]
    fn test_load_module_rejects_non_numeric_output() {
        let pactl = Pactl::new("echo");

        let err = pactl
            .load_module("module-null-sink", PropertyList::new())
            .unwrap_err();

        assert!(matches!(err, PulseError::MalformedField { .. }));
    }

    #[test]
    fn test_stream_stops_on_break() {
        let pactl = Pactl::new("sh");
        let script = "printf \"Event 'new' on sink #1\\n\\nEvent 'change' on sink-input #42\\nEvent 'remove' on client #3\\n\"";
        let mut seen = Vec::new();

        pactl
            .stream(["-c", script], |event| {
                seen.push(event);
                if seen.len() == 2 {
                    ControlFlow::Break(())
                } else {
                    ControlFlow::Continue(())
                }
            })
            .unwrap();

        assert_eq!(seen.len(), 2);
        assert_eq!(seen[1].facility, "sink-input");
        assert_eq!(seen[1].id, 42);
    }

    #[test]
    fn test_stream_rejects_unknown_line() {
        let pactl = Pactl::new("sh");

        let err = pactl
            .stream(["-c", "echo 'Connection failure'"], |_| ControlFlow::Continue(()))
            .unwrap_err();

        assert!(matches!(err, PulseError::MalformedEvent { .. }));
    }
}

//! Argument builders for the pactl commands that change server state.
//!
//! Each [`ControlCommand`] renders to the argument vector pactl expects; the
//! [`Pactl`](super::Pactl) runner executes it.

use std::fmt;
use std::str::FromStr;

use crate::types::{Format, PropertyList};

/// A sink, source, card or module addressed by index or by name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Target {
    Id(u32),
    Name(String),
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Target::Id(id) => write!(f, "{}", id),
            Target::Name(name) => f.write_str(name),
        }
    }
}

impl FromStr for Target {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s.parse::<u32>() {
            Ok(id) => Target::Id(id),
            Err(_) => Target::Name(s.to_string()),
        })
    }
}

impl From<u32> for Target {
    fn from(id: u32) -> Self {
        Target::Id(id)
    }
}

impl From<&str> for Target {
    fn from(name: &str) -> Self {
        Target::Name(name.to_string())
    }
}

/// The four entity types that carry volume and mute controls.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum Endpoint {
    Sink,
    Source,
    SinkInput,
    SourceOutput,
}

impl Endpoint {
    /// The noun pactl uses in `set-<noun>-volume` and friends.
    pub fn noun(self) -> &'static str {
        match self {
            Endpoint::Sink => "sink",
            Endpoint::Source => "source",
            Endpoint::SinkInput => "sink-input",
            Endpoint::SourceOutput => "source-output",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum MuteAction {
    On,
    Off,
    #[default]
    Toggle,
}

impl MuteAction {
    fn as_arg(self) -> &'static str {
        match self {
            MuteAction::On => "1",
            MuteAction::Off => "0",
            MuteAction::Toggle => "toggle",
        }
    }
}

impl From<bool> for MuteAction {
    fn from(muted: bool) -> Self {
        if muted {
            MuteAction::On
        } else {
            MuteAction::Off
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ControlCommand {
    LoadModule {
        name: String,
        arguments: PropertyList,
    },
    UnloadModule(Target),
    MoveSinkInput {
        input: u32,
        sink: Target,
    },
    MoveSourceOutput {
        output: u32,
        source: Target,
    },
    SuspendSink {
        sink: Target,
        suspend: bool,
    },
    SuspendSource {
        source: Target,
        suspend: bool,
    },
    SetCardProfile {
        card: Target,
        profile: String,
    },
    SetDefaultSink(String),
    SetDefaultSource(String),
    SetSinkPort {
        sink: Target,
        port: String,
    },
    SetSourcePort {
        source: Target,
        port: String,
    },
    SetPortLatencyOffset {
        card: Target,
        port: String,
        offset: i64,
    },
    /// Volumes are passed through as pactl accepts them: `65536`, `50%`, `+5%`, `-3dB`.
    SetVolume {
        endpoint: Endpoint,
        target: Target,
        volumes: Vec<String>,
    },
    SetMute {
        endpoint: Endpoint,
        target: Target,
        action: MuteAction,
    },
    SetSinkFormats {
        sink: u32,
        formats: Vec<Format>,
    },
}

impl ControlCommand {
    pub fn resume_sink(sink: impl Into<Target>) -> Self {
        ControlCommand::SuspendSink {
            sink: sink.into(),
            suspend: false,
        }
    }

    pub fn resume_source(source: impl Into<Target>) -> Self {
        ControlCommand::SuspendSource {
            source: source.into(),
            suspend: false,
        }
    }

    /// The pactl subcommand this renders to.
    pub fn name(&self) -> String {
        match self {
            ControlCommand::LoadModule { .. } => "load-module".into(),
            ControlCommand::UnloadModule(_) => "unload-module".into(),
            ControlCommand::MoveSinkInput { .. } => "move-sink-input".into(),
            ControlCommand::MoveSourceOutput { .. } => "move-source-output".into(),
            ControlCommand::SuspendSink { .. } => "suspend-sink".into(),
            ControlCommand::SuspendSource { .. } => "suspend-source".into(),
            ControlCommand::SetCardProfile { .. } => "set-card-profile".into(),
            ControlCommand::SetDefaultSink(_) => "set-default-sink".into(),
            ControlCommand::SetDefaultSource(_) => "set-default-source".into(),
            ControlCommand::SetSinkPort { .. } => "set-sink-port".into(),
            ControlCommand::SetSourcePort { .. } => "set-source-port".into(),
            ControlCommand::SetPortLatencyOffset { .. } => "set-port-latency-offset".into(),
            ControlCommand::SetVolume { endpoint, .. } => format!("set-{}-volume", endpoint.noun()),
            ControlCommand::SetMute { endpoint, .. } => format!("set-{}-mute", endpoint.noun()),
            ControlCommand::SetSinkFormats { .. } => "set-sink-formats".into(),
        }
    }

    /// Full argument vector, subcommand first.
    pub fn args(&self) -> Vec<String> {
        let mut args = vec![self.name()];

        match self {
            ControlCommand::LoadModule { name, arguments } => {
                args.push(name.clone());
                args.extend(stringify_props(arguments));
            }
            ControlCommand::UnloadModule(module) => args.push(module.to_string()),
            ControlCommand::MoveSinkInput { input, sink } => {
                args.extend([input.to_string(), sink.to_string()]);
            }
            ControlCommand::MoveSourceOutput { output, source } => {
                args.extend([output.to_string(), source.to_string()]);
            }
            ControlCommand::SuspendSink { sink: target, suspend }
            | ControlCommand::SuspendSource {
                source: target,
                suspend,
            } => {
                args.push(target.to_string());
                args.push(if *suspend { "1" } else { "0" }.to_string());
            }
            ControlCommand::SetCardProfile { card, profile } => {
                args.extend([card.to_string(), profile.clone()]);
            }
            ControlCommand::SetDefaultSink(name) | ControlCommand::SetDefaultSource(name) => {
                args.push(name.clone());
            }
            ControlCommand::SetSinkPort { sink: target, port }
            | ControlCommand::SetSourcePort {
                source: target,
                port,
            } => {
                args.extend([target.to_string(), port.clone()]);
            }
            ControlCommand::SetPortLatencyOffset { card, port, offset } => {
                args.extend([card.to_string(), port.clone(), offset.to_string()]);
            }
            ControlCommand::SetVolume { target, volumes, .. } => {
                args.push(target.to_string());
                args.extend(volumes.iter().cloned());
            }
            ControlCommand::SetMute { target, action, .. } => {
                args.extend([target.to_string(), action.as_arg().to_string()]);
            }
            ControlCommand::SetSinkFormats { sink, formats } => {
                args.push(sink.to_string());
                args.push(stringify_formats(formats));
            }
        }

        args
    }
}

/// Render a property list as `key=value` arguments.
pub fn stringify_props(props: &PropertyList) -> Vec<String> {
    props.iter().map(|(key, value)| format!("{}={}", key, value)).collect()
}

/// `pcm, format.rate=44100; ac3-iec61937` as accepted by `set-sink-formats`.
fn stringify_formats(formats: &[Format]) -> String {
    formats
        .iter()
        .map(|format| match &format.properties {
            Some(props) if !props.is_empty() => {
                format!("{}, {}", format.encoding, stringify_props(props).join(", "))
            }
            _ => format.encoding.clone(),
        })
        .collect::<Vec<_>>()
        .join("; ")
}

/// `module-null-sink` arguments for a sink shown as `description`.
///
/// Module arguments are split on whitespace, so the sink name swaps spaces
/// for underscores while the description keeps them inside quotes.
pub fn null_sink(description: &str) -> ControlCommand {
    let mut arguments = PropertyList::new();
    arguments.insert("sink_name".to_string(), description.replace(' ', "_"));
    arguments.insert(
        "sink_properties".to_string(),
        format!("device.description=\"{}\"", description.replace('"', "\\\"")),
    );

    ControlCommand::LoadModule {
        name: "module-null-sink".to_string(),
        arguments,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn props(pairs: &[(&str, &str)]) -> PropertyList {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_target_from_str() {
        assert_eq!("42".parse::<Target>().unwrap(), Target::Id(42));
        assert_eq!(
            "alsa_output.pci".parse::<Target>().unwrap(),
            Target::Name("alsa_output.pci".into())
        );
    }

    #[test]
    fn test_load_module_args() {
        let cmd = ControlCommand::LoadModule {
            name: "module-loopback".into(),
            arguments: props(&[("source", "mic"), ("latency_msec", "20")]),
        };

        assert_eq!(
            cmd.args(),
            vec!["load-module", "module-loopback", "source=mic", "latency_msec=20"]
        );
    }

    #[test]
    fn test_move_sink_input_args() {
        let cmd = ControlCommand::MoveSinkInput {
            input: 12,
            sink: Target::Name("speakers".into()),
        };

        assert_eq!(cmd.args(), vec!["move-sink-input", "12", "speakers"]);
    }

    #[test]
    fn test_suspend_and_resume() {
        let suspend = ControlCommand::SuspendSource {
            source: 3.into(),
            suspend: true,
        };

        assert_eq!(suspend.args(), vec!["suspend-source", "3", "1"]);
        assert_eq!(ControlCommand::resume_sink(1).args(), vec!["suspend-sink", "1", "0"]);
    }

    #[test]
    fn test_port_latency_offset() {
        let cmd = ControlCommand::SetPortLatencyOffset {
            card: 0.into(),
            port: "analog-output".into(),
            offset: -2500,
        };

        assert_eq!(
            cmd.args(),
            vec!["set-port-latency-offset", "0", "analog-output", "-2500"]
        );
    }

    #[test]
    fn test_volume_per_endpoint() {
        let cmd = ControlCommand::SetVolume {
            endpoint: Endpoint::SourceOutput,
            target: 7.into(),
            volumes: vec!["50%".into(), "+5%".into()],
        };

        assert_eq!(cmd.args(), vec!["set-source-output-volume", "7", "50%", "+5%"]);
    }

    #[test]
    fn test_mute_actions() {
        let toggle = ControlCommand::SetMute {
            endpoint: Endpoint::Sink,
            target: "speakers".into(),
            action: MuteAction::Toggle,
        };
        let on = ControlCommand::SetMute {
            endpoint: Endpoint::SinkInput,
            target: 9.into(),
            action: true.into(),
        };

        assert_eq!(toggle.args(), vec!["set-sink-mute", "speakers", "toggle"]);
        assert_eq!(on.args(), vec!["set-sink-input-mute", "9", "1"]);
    }

    #[test]
    fn test_sink_formats() {
        let cmd = ControlCommand::SetSinkFormats {
            sink: 1,
            formats: vec![
                Format {
                    encoding: "pcm".into(),
                    properties: Some(props(&[("format.rate", "44100")])),
                },
                Format {
                    encoding: "ac3-iec61937".into(),
                    properties: None,
                },
            ],
        };

        assert_eq!(
            cmd.args(),
            vec!["set-sink-formats", "1", "pcm, format.rate=44100; ac3-iec61937"]
        );
    }

    #[test]
    fn test_null_sink() {
        let args = null_sink("Null sink 42").args();

        assert_eq!(
            args,
            vec![
                "load-module",
                "module-null-sink",
                "sink_name=Null_sink_42",
                "sink_properties=device.description=\"Null sink 42\"",
            ]
        );
    }
}

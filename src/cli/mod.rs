pub mod completions;
pub mod events;
pub mod inspect;
pub mod list;
pub mod mute;
pub mod null_sink;
pub mod route;

use std::path::PathBuf;

use clap::{ArgAction, Parser, Subcommand};

use crate::config::Config;
use crate::error::Result;
use crate::output::Printer;

/// pulsecontrol - Inspect and control a PulseAudio server through pactl
#[derive(Parser, Debug)]
#[command(name = "pulsecontrol")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Config file (default: ./pulsecontrol.yaml when present)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Log parser and pactl activity to stderr (-vv for trace)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List sinks, sources, streams and the other server entities
    List(list::ListArgs),

    /// Parse saved `pactl list` output without contacting the server
    Inspect(inspect::InspectArgs),

    /// Move a playback stream to another sink
    Move(route::MoveArgs),

    /// Mute, unmute or toggle a sink, source or stream
    Mute(mute::MuteArgs),

    /// Create a null sink
    NullSink(null_sink::NullSinkArgs),

    /// Print server events as they happen
    Events(events::EventsArgs),

    /// Generate shell completions
    Completions(completions::CompletionsArgs),
}

/// Load configuration and run the selected command.
pub fn run(cli: Cli) -> Result<()> {
    let printer = Printer::new();
    let cwd = std::env::current_dir()?;
    let config = Config::discover(cli.config.as_deref(), &cwd)?;

    match cli.command {
        Commands::List(args) => list::run(args, &config, &printer),
        Commands::Inspect(args) => inspect::run(args, &config, &printer),
        Commands::Move(args) => route::run(args, &config, &printer),
        Commands::Mute(args) => mute::run(args, &config, &printer),
        Commands::NullSink(args) => null_sink::run(args, &config, &printer),
        Commands::Events(args) => events::run(args, &config, &printer),
        Commands::Completions(args) => completions::run(args),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pactl::{Endpoint, MuteAction, Target};
    use crate::types::EntityKind;

    #[test]
    fn test_cli_is_well_formed() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_list_with_kind() {
        let cli = Cli::parse_from(["pulsecontrol", "list", "sink-inputs", "--json"]);

        match cli.command {
            Commands::List(args) => {
                assert_eq!(args.kind, Some(EntityKind::SinkInput));
                assert!(args.json);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_parse_mute_defaults_to_toggle() {
        let cli = Cli::parse_from(["pulsecontrol", "-v", "mute", "source-output", "12"]);

        assert_eq!(cli.verbose, 1);
        match cli.command {
            Commands::Mute(args) => {
                assert_eq!(args.endpoint, Endpoint::SourceOutput);
                assert_eq!(args.target, Target::Id(12));
                assert_eq!(args.action, MuteAction::Toggle);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_parse_move_by_sink_name() {
        let cli = Cli::parse_from(["pulsecontrol", "move", "4", "alsa_output.usb"]);

        match cli.command {
            Commands::Move(args) => {
                assert_eq!(args.stream, 4);
                assert_eq!(args.sink, Target::Name("alsa_output.usb".into()));
                assert!(!args.recording);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }
}

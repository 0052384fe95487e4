//! Move command: reroute a playback or recording stream.

use clap::Args;

use crate::config::Config;
use crate::error::Result;
use crate::output::Printer;
use crate::pactl::{ControlCommand, Pactl, Target};

/// Move a stream to another sink (or source)
#[derive(Args, Debug)]
pub struct MoveArgs {
    /// Sink input index (source output index with --recording)
    pub stream: u32,

    /// Destination sink (or source) index or name
    pub sink: Target,

    /// Move a recording stream to another source
    #[arg(long)]
    pub recording: bool,
}

pub fn run(args: MoveArgs, config: &Config, printer: &Printer) -> Result<()> {
    let command = command_for(&args);
    Pactl::from_config(config).run(&command)?;

    let (stream, device) = if args.recording {
        ("source output", "source")
    } else {
        ("sink input", "sink")
    };
    printer.success(
        "Moved",
        &format!(
            "{} #{} {} {} {}",
            stream,
            args.stream,
            printer.dim("->"),
            device,
            args.sink
        ),
    );

    Ok(())
}

fn command_for(args: &MoveArgs) -> ControlCommand {
    if args.recording {
        ControlCommand::MoveSourceOutput {
            output: args.stream,
            source: args.sink.clone(),
        }
    } else {
        ControlCommand::MoveSinkInput {
            input: args.stream,
            sink: args.sink.clone(),
        }
    }
}

//! Events command: follow `pactl subscribe`.

use std::ops::ControlFlow;

use clap::Args;

use crate::config::Config;
use crate::error::Result;
use crate::output::Printer;
use crate::pactl::Pactl;
use crate::parser::Event;

/// Print server events as they happen
#[derive(Args, Debug)]
pub struct EventsArgs {
    /// Stop after this many events
    #[arg(short = 'n', long)]
    pub count: Option<usize>,

    /// Print one JSON object per line
    #[arg(long)]
    pub json: bool,
}

pub fn run(args: EventsArgs, config: &Config, printer: &Printer) -> Result<()> {
    let pactl = Pactl::from_config(config);
    let json = args.json || config.json;
    printer.info("Listening", &format!("for events from {}", pactl.program().display()));

    let mut seen = 0;
    pactl.subscribe(|event| {
        println!("{}", render(&event, json));
        seen += 1;
        match args.count {
            Some(limit) if seen >= limit => ControlFlow::Break(()),
            _ => ControlFlow::Continue(()),
        }
    })?;

    if args.count.map_or(true, |limit| seen < limit) {
        printer.warning("Stopped", "pactl subscribe exited");
    }

    Ok(())
}

fn render(event: &Event, json: bool) -> String {
    if json {
        serde_json::json!({
            "event": event.event,
            "facility": event.facility,
            "id": event.id,
        })
        .to_string()
    } else {
        format!("{} {} #{}", event.event, event.facility, event.id)
    }
}

use clap::Args;

use crate::config::Config;
use crate::error::Result;
use crate::output::Printer;
use crate::pactl::{ControlCommand, Endpoint, MuteAction, Pactl, Target};

/// Mute, unmute or toggle
#[derive(Args, Debug)]
pub struct MuteArgs {
    /// What to mute
    #[arg(value_enum)]
    pub endpoint: Endpoint,

    /// Index or name
    pub target: Target,

    #[arg(value_enum, default_value_t = MuteAction::Toggle)]
    pub action: MuteAction,
}

pub fn run(args: MuteArgs, config: &Config, printer: &Printer) -> Result<()> {
    let command = ControlCommand::SetMute {
        endpoint: args.endpoint,
        target: args.target.clone(),
        action: args.action,
    };
    Pactl::from_config(config).run(&command)?;

    let verb = match args.action {
        MuteAction::On => "Muted",
        MuteAction::Off => "Unmuted",
        MuteAction::Toggle => "Toggled",
    };
    printer.success(verb, &format!("{} {}", args.endpoint.noun(), args.target));

    Ok(())
}

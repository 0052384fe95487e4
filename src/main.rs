use clap::Parser;
use miette::{IntoDiagnostic, Result};
use pulsecontrol::cli::Cli;
use tracing_subscriber::filter::Directive;
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    let cli = Cli::parse();

    let directive: Directive = match cli.verbose {
        0 => "pulsecontrol=warn",
        1 => "pulsecontrol=debug",
        _ => "pulsecontrol=trace",
    }
    .parse()
    .into_diagnostic()?;

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(EnvFilter::from_default_env().add_directive(directive))
        .init();

    pulsecontrol::cli::run(cli)?;

    Ok(())
}

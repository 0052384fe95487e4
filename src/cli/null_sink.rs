//! Null sink creation through `module-null-sink`.

use clap::Args;
use uuid::Uuid;

use crate::config::Config;
use crate::error::Result;
use crate::output::Printer;
use crate::pactl::{null_sink, Pactl};

/// Create a null sink
#[derive(Args, Debug)]
pub struct NullSinkArgs {
    /// Sink description (default: the configured prefix plus a random suffix)
    pub name: Option<String>,
}

pub fn run(args: NullSinkArgs, config: &Config, printer: &Printer) -> Result<()> {
    let description = args
        .name
        .filter(|name| !name.trim().is_empty())
        .unwrap_or_else(|| generated_name(&config.null_sink_prefix));

    let id = Pactl::from_config(config).run_load(&null_sink(&description))?;
    printer.success(
        "Loaded",
        &format!("null sink {} as module #{}", printer.bold(&description), id),
    );

    Ok(())
}

fn generated_name(prefix: &str) -> String {
    let suffix = Uuid::new_v4().simple().to_string();
    format!("{} {}", prefix, &suffix[..6])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generated_name_uses_prefix() {
        let name = generated_name("Null sink");

        assert!(name.starts_with("Null sink "));
        assert_eq!(name.len(), "Null sink ".len() + 6);
    }

    #[test]
    fn test_generated_names_differ() {
        assert_ne!(generated_name("x"), generated_name("x"));
    }
}

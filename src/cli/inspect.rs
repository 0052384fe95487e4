//! Inspect command: parse `pactl list` output saved to a file or piped in.

use std::io::Read;
use std::path::{Path, PathBuf};

use clap::Args;

use crate::config::Config;
use crate::error::{PulseError, Result};
use crate::output::Printer;
use crate::parser::parse_listing;

/// Parse saved pactl list output
#[derive(Args, Debug)]
pub struct InspectArgs {
    /// File holding `pactl list` output, or `-` for stdin
    pub file: PathBuf,

    /// Print JSON instead of summary lines
    #[arg(long)]
    pub json: bool,
}

pub fn run(args: InspectArgs, config: &Config, printer: &Printer) -> Result<()> {
    let text = read_input(&args.file)?;
    let entities = parse_listing(&text)?;

    super::list::print_entities(&entities, args.json || config.json, printer)
}

fn read_input(file: &Path) -> Result<String> {
    if file.as_os_str() == "-" {
        let mut text = String::new();
        std::io::stdin().read_to_string(&mut text)?;
        return Ok(text);
    }

    std::fs::read_to_string(file).map_err(|e| PulseError::Io {
        path: file.to_path_buf(),
        message: format!("Failed to read listing: {}", e),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::NamedTempFile;

    #[test]
    fn test_read_input_from_file() {
        let file = NamedTempFile::new().unwrap();
        std::fs::write(file.path(), "Module #0\n").unwrap();

        assert_eq!(read_input(file.path()).unwrap(), "Module #0\n");
    }

    #[test]
    fn test_read_input_missing_file() {
        let missing = PathBuf::from("/nonexistent/listing.txt");

        assert!(matches!(read_input(&missing), Err(PulseError::Io { .. })));
    }
}

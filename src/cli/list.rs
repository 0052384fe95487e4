//! List command implementation.
//!
//! Runs `pactl list` and prints one summary line per entity, or JSON.

use clap::Args;

use crate::config::Config;
use crate::error::Result;
use crate::output::{plural, to_json, Printer};
use crate::pactl::Pactl;
use crate::types::{ChannelVolumeList, Entity, EntityKind};

/// List server entities
#[derive(Args, Debug)]
pub struct ListArgs {
    /// Only list this entity type (default: everything, or `default_list` from config)
    #[arg(value_enum)]
    pub kind: Option<EntityKind>,

    /// Print JSON instead of summary lines
    #[arg(long)]
    pub json: bool,
}

pub fn run(args: ListArgs, config: &Config, printer: &Printer) -> Result<()> {
    let kind = args.kind.or(config.default_list);
    let entities = Pactl::from_config(config).list(kind)?;

    print_entities(&entities, args.json || config.json, printer)
}

/// Print entities to stdout and a count to stderr.
pub(crate) fn print_entities(entities: &[Entity], json: bool, printer: &Printer) -> Result<()> {
    if json {
        println!("{}", to_json(entities)?);
        return Ok(());
    }

    if entities.is_empty() {
        printer.warning("Empty", "no entities found");
        return Ok(());
    }

    for entity in entities {
        println!("{}", summarize(entity));
    }
    printer.info("Listed", &plural(entities.len(), "entity", "entities"));

    Ok(())
}

/// One line per entity: `Sink #1  Built-in Audio  65%`.
pub(crate) fn summarize(entity: &Entity) -> String {
    let detail = match entity {
        Entity::Sink(sink) => mixer(&sink.volume, sink.mute),
        Entity::Source(source) => mixer(&source.volume, source.mute),
        Entity::SinkInput(input) => {
            format!("-> sink #{}  {}", input.sink, mixer(&input.volume, input.mute))
        }
        Entity::SourceOutput(output) => {
            format!("<- source #{}  {}", output.source, mixer(&output.volume, output.mute))
        }
        Entity::Sample(sample) => format!("{} bytes", sample.size),
        Entity::Card(card) => card
            .active_profile
            .as_deref()
            .map(|profile| format!("profile {}", profile))
            .unwrap_or_default(),
        Entity::Module(_) | Entity::Client(_) => String::new(),
    };

    let mut line = format!("{} #{}  {}", entity.kind().keyword(), entity.id(), entity.label());
    if !detail.is_empty() {
        line.push_str("  ");
        line.push_str(&detail);
    }
    line
}

fn mixer(volume: &ChannelVolumeList, mute: bool) -> String {
    let level = volume
        .average_percentage()
        .map(|p| format!("{:.0}%", p))
        .unwrap_or_else(|| "-".to_string());

    if mute {
        format!("{} muted", level)
    } else {
        level
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse_listing;

    #[test]
    fn test_summarize_client() {
        let text = "Client #7\n\tDriver: protocol-native.c\n\tOwner Module: 9\n\tProperties:\n\t\tapplication.name = \"Firefox\"\n";
        let entities = parse_listing(text).unwrap();

        assert_eq!(summarize(&entities[0]), "Client #7  Firefox");
    }

    #[test]
    fn test_mixer_levels() {
        assert_eq!(mixer(&ChannelVolumeList::default(), false), "-");
        assert_eq!(mixer(&ChannelVolumeList::default(), true), "- muted");
    }
}

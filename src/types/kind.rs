//! Entity kinds as they appear in `pactl list` output.

use std::fmt;

use serde::{Deserialize, Serialize};

/// The eight entity sections `pactl list` emits.
///
/// Serializes (and parses as a CLI value) using the plural filter names that
/// `pactl list <filter>` accepts, e.g. `sink-inputs`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, clap::ValueEnum)]
pub enum EntityKind {
    #[serde(rename = "modules")]
    #[value(name = "modules")]
    Module,
    #[serde(rename = "sinks")]
    #[value(name = "sinks")]
    Sink,
    #[serde(rename = "sources")]
    #[value(name = "sources")]
    Source,
    #[serde(rename = "sink-inputs")]
    #[value(name = "sink-inputs")]
    SinkInput,
    #[serde(rename = "source-outputs")]
    #[value(name = "source-outputs")]
    SourceOutput,
    #[serde(rename = "clients")]
    #[value(name = "clients")]
    Client,
    #[serde(rename = "samples")]
    #[value(name = "samples")]
    Sample,
    #[serde(rename = "cards")]
    #[value(name = "cards")]
    Card,
}

impl EntityKind {
    pub const ALL: [EntityKind; 8] = [
        EntityKind::Module,
        EntityKind::Sink,
        EntityKind::Source,
        EntityKind::SinkInput,
        EntityKind::SourceOutput,
        EntityKind::Client,
        EntityKind::Sample,
        EntityKind::Card,
    ];

    /// The header keyword introducing a block, e.g. `Sink Input` in `Sink Input #12`.
    pub fn keyword(self) -> &'static str {
        match self {
            EntityKind::Module => "Module",
            EntityKind::Sink => "Sink",
            EntityKind::Source => "Source",
            EntityKind::SinkInput => "Sink Input",
            EntityKind::SourceOutput => "Source Output",
            EntityKind::Client => "Client",
            EntityKind::Sample => "Sample",
            EntityKind::Card => "Card",
        }
    }

    /// Look up a kind by its header keyword. Unknown keywords yield `None`.
    pub fn from_keyword(keyword: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.keyword() == keyword)
    }

    /// The filter argument for `pactl list`.
    pub fn list_name(self) -> &'static str {
        match self {
            EntityKind::Module => "modules",
            EntityKind::Sink => "sinks",
            EntityKind::Source => "sources",
            EntityKind::SinkInput => "sink-inputs",
            EntityKind::SourceOutput => "source-outputs",
            EntityKind::Client => "clients",
            EntityKind::Sample => "samples",
            EntityKind::Card => "cards",
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.keyword())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keyword_round_trip() {
        for kind in EntityKind::ALL {
            assert_eq!(EntityKind::from_keyword(kind.keyword()), Some(kind));
        }
    }

    #[test]
    fn test_unknown_keyword() {
        assert_eq!(EntityKind::from_keyword("Sink Inputs"), None);
        assert_eq!(EntityKind::from_keyword("sink"), None);
    }

    #[test]
    fn test_list_name_matches_serde() {
        let json = serde_json::to_string(&EntityKind::SourceOutput).unwrap();
        assert_eq!(json, "\"source-outputs\"");

        let kind: EntityKind = serde_yaml::from_str("sink-inputs").unwrap();
        assert_eq!(kind.list_name(), "sink-inputs");
    }
}

//! Typed records for `pactl list` output.
//!
//! - `Entity` - the closed set of listed things (sinks, streams, cards, ...)
//! - `Volume`, `ChannelVolumeList`, `Latency`, `SampleSpecification`, `Format`
//! - `Port`, `CardPort`, `Profile` - members of detailed lists

mod device;
mod entity;
mod kind;
mod measure;

use indexmap::IndexMap;

pub use device::{Available, CardPort, Port, Profile};
pub use entity::{Card, Client, Entity, Module, Sample, Sink, SinkInput, Source, SourceOutput};
pub use kind::EntityKind;
pub use measure::{ChannelVolumeList, Format, Latency, SampleSpecification, Volume};

/// Ordered `key = "value"` properties. Keys keep their first-seen position;
/// a repeated key overwrites the earlier value.
pub type PropertyList = IndexMap<String, String>;

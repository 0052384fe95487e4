//! The eight entity records produced by `pactl list`.

use indexmap::IndexMap;
use serde::Serialize;

use super::{CardPort, ChannelVolumeList, EntityKind, Format, Latency, Port, Profile, PropertyList};
use super::{SampleSpecification, Volume};

/// A loaded server module.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Module {
    pub id: u32,
    pub name: String,
    pub argument: String,
    pub usage_counter: Option<i64>,
    pub properties: PropertyList,
    #[serde(skip_serializing_if = "IndexMap::is_empty")]
    pub extra: IndexMap<String, String>,
}

/// An output device.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Sink {
    pub id: u32,
    pub state: String,
    pub name: String,
    pub description: Option<String>,
    pub driver: Option<String>,
    pub sample_specification: Option<SampleSpecification>,
    pub channel_map: Vec<String>,
    pub owner_module: u32,
    pub mute: bool,
    pub volume: ChannelVolumeList,
    pub base_volume: Volume,
    pub monitor_source: Option<String>,
    pub latency: Latency,
    pub flags: Vec<String>,
    pub properties: PropertyList,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ports: Option<IndexMap<String, Port>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub active_port: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub formats: Option<Vec<Format>>,
    #[serde(skip_serializing_if = "IndexMap::is_empty")]
    pub extra: IndexMap<String, String>,
}

/// An input device, including monitor sources of sinks.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Source {
    pub id: u32,
    pub state: String,
    pub name: String,
    pub description: Option<String>,
    pub driver: Option<String>,
    pub sample_specification: Option<SampleSpecification>,
    pub channel_map: Vec<String>,
    pub owner_module: u32,
    pub mute: bool,
    pub volume: ChannelVolumeList,
    pub base_volume: Volume,
    pub monitor_of_sink: Option<String>,
    pub latency: Latency,
    pub flags: Vec<String>,
    pub properties: PropertyList,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ports: Option<IndexMap<String, Port>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub active_port: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub formats: Option<Vec<Format>>,
    #[serde(skip_serializing_if = "IndexMap::is_empty")]
    pub extra: IndexMap<String, String>,
}

/// A playback stream routed into a sink.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SinkInput {
    pub id: u32,
    pub driver: Option<String>,
    pub owner_module: Option<u32>,
    pub client: Option<u32>,
    pub sink: u32,
    pub sample_specification: Option<SampleSpecification>,
    pub channel_map: Vec<String>,
    pub format: Option<Format>,
    pub corked: bool,
    pub mute: bool,
    pub volume: ChannelVolumeList,
    /// Unit: usec.
    pub buffer_latency: i64,
    /// Unit: usec.
    pub sink_latency: i64,
    pub resample_method: Option<String>,
    pub properties: PropertyList,
    #[serde(skip_serializing_if = "IndexMap::is_empty")]
    pub extra: IndexMap<String, String>,
}

/// A capture stream routed from a source.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SourceOutput {
    pub id: u32,
    pub driver: Option<String>,
    pub owner_module: Option<u32>,
    pub client: Option<u32>,
    pub source: u32,
    pub sample_specification: Option<SampleSpecification>,
    pub channel_map: Vec<String>,
    pub format: Option<Format>,
    pub corked: bool,
    pub mute: bool,
    pub volume: ChannelVolumeList,
    /// Unit: usec.
    pub buffer_latency: i64,
    /// Unit: usec.
    pub source_latency: i64,
    pub resample_method: Option<String>,
    pub properties: PropertyList,
    #[serde(skip_serializing_if = "IndexMap::is_empty")]
    pub extra: IndexMap<String, String>,
}

/// A connected client.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Client {
    pub id: u32,
    pub driver: Option<String>,
    pub owner_module: Option<u32>,
    pub properties: PropertyList,
    #[serde(skip_serializing_if = "IndexMap::is_empty")]
    pub extra: IndexMap<String, String>,
}

/// A sample in the server's sample cache.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Sample {
    pub id: u32,
    pub name: String,
    pub sample_specification: Option<SampleSpecification>,
    pub channel_map: Option<Vec<String>>,
    pub volume: ChannelVolumeList,
    /// Unit: seconds.
    pub duration: f64,
    /// Unit: bytes.
    pub size: u64,
    pub lazy: bool,
    pub filename: Option<String>,
    pub properties: PropertyList,
    #[serde(skip_serializing_if = "IndexMap::is_empty")]
    pub extra: IndexMap<String, String>,
}

/// A sound card with its profiles and ports.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Card {
    pub id: u32,
    pub name: String,
    pub driver: Option<String>,
    pub owner_module: Option<u32>,
    pub properties: PropertyList,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub profiles: Option<IndexMap<String, Profile>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub active_profile: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ports: Option<IndexMap<String, CardPort>>,
    #[serde(skip_serializing_if = "IndexMap::is_empty")]
    pub extra: IndexMap<String, String>,
}

/// One parsed block of `pactl list` output, tagged by its header keyword.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type")]
pub enum Entity {
    Module(Module),
    Sink(Sink),
    Source(Source),
    #[serde(rename = "Sink Input")]
    SinkInput(SinkInput),
    #[serde(rename = "Source Output")]
    SourceOutput(SourceOutput),
    Client(Client),
    Sample(Sample),
    Card(Card),
}

impl Entity {
    pub fn kind(&self) -> EntityKind {
        match self {
            Entity::Module(_) => EntityKind::Module,
            Entity::Sink(_) => EntityKind::Sink,
            Entity::Source(_) => EntityKind::Source,
            Entity::SinkInput(_) => EntityKind::SinkInput,
            Entity::SourceOutput(_) => EntityKind::SourceOutput,
            Entity::Client(_) => EntityKind::Client,
            Entity::Sample(_) => EntityKind::Sample,
            Entity::Card(_) => EntityKind::Card,
        }
    }

    /// The `#<id>` from the block header.
    pub fn id(&self) -> u32 {
        match self {
            Entity::Module(m) => m.id,
            Entity::Sink(s) => s.id,
            Entity::Source(s) => s.id,
            Entity::SinkInput(s) => s.id,
            Entity::SourceOutput(s) => s.id,
            Entity::Client(c) => c.id,
            Entity::Sample(s) => s.id,
            Entity::Card(c) => c.id,
        }
    }

    pub fn properties(&self) -> &PropertyList {
        match self {
            Entity::Module(m) => &m.properties,
            Entity::Sink(s) => &s.properties,
            Entity::Source(s) => &s.properties,
            Entity::SinkInput(s) => &s.properties,
            Entity::SourceOutput(s) => &s.properties,
            Entity::Client(c) => &c.properties,
            Entity::Sample(s) => &s.properties,
            Entity::Card(c) => &c.properties,
        }
    }

    /// A short human label: the description or name where the record has one,
    /// otherwise the `media.name` or `application.name` property.
    pub fn label(&self) -> &str {
        let named = match self {
            Entity::Module(m) => Some(m.name.as_str()),
            Entity::Sink(s) => s.description.as_deref().or(Some(s.name.as_str())),
            Entity::Source(s) => s.description.as_deref().or(Some(s.name.as_str())),
            Entity::Sample(s) => Some(s.name.as_str()),
            Entity::Card(c) => Some(c.name.as_str()),
            Entity::SinkInput(_) | Entity::SourceOutput(_) | Entity::Client(_) => None,
        };

        named
            .or_else(|| self.properties().get("media.name").map(String::as_str))
            .or_else(|| self.properties().get("application.name").map(String::as_str))
            .unwrap_or("")
    }
}

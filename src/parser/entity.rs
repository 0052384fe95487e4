//! Entity dispatch: `<Type> #<id>` headers and the field table for each type.

use std::sync::OnceLock;

use indexmap::IndexMap;
use regex::Regex;
use tracing::{debug, trace};

use crate::error::Result;
use crate::types::{
    Card, CardPort, Client, Entity, EntityKind, Module, Port, Profile, Sample, Sink, SinkInput,
    Source, SourceOutput,
};

use super::block::{read_block, FieldReader, FieldTable, Fields, Primitive, Structured};
use super::cursor::{normalize_balance_indent, Cursor};

const TEXT: FieldReader = FieldReader::Primitive(Primitive::Text);
const OPTIONAL_TEXT: FieldReader = FieldReader::Primitive(Primitive::OptionalText);
const INTEGER: FieldReader = FieldReader::Primitive(Primitive::Integer);
const OPTIONAL_INTEGER: FieldReader = FieldReader::Primitive(Primitive::OptionalInteger);
const FLOAT: FieldReader = FieldReader::Primitive(Primitive::Float);
const BOOLEAN: FieldReader = FieldReader::Primitive(Primitive::Boolean);
const BYTES: FieldReader = FieldReader::Primitive(Primitive::Bytes);
const COMMA_LIST: FieldReader = FieldReader::Primitive(Primitive::CommaList);
const OPTIONAL_COMMA_LIST: FieldReader = FieldReader::Primitive(Primitive::OptionalCommaList);
const SPACE_LIST: FieldReader = FieldReader::Primitive(Primitive::SpaceList);
const SAMPLE_SPEC: FieldReader = FieldReader::Structured(Structured::SampleSpec);
const VOLUME: FieldReader = FieldReader::Structured(Structured::Volume);
const CHANNEL_VOLUMES: FieldReader = FieldReader::Structured(Structured::ChannelVolumes);
const LATENCY: FieldReader = FieldReader::Structured(Structured::Latency);
const FORMAT: FieldReader = FieldReader::Structured(Structured::Format);
const FORMAT_LIST: FieldReader = FieldReader::Structured(Structured::FormatList);
const PROPERTIES: FieldReader = FieldReader::PropertyList;

// Field names follow pactl's `list` output, normalized (`Owner Module` -> `ownerModule`).

static PORT_FIELDS: FieldTable = FieldTable::new(&[("priority", INTEGER)]);

static PROFILE_FIELDS: FieldTable = FieldTable::new(&[
    ("sinks", INTEGER),
    ("sources", INTEGER),
    ("priority", INTEGER),
    ("available", BOOLEAN),
]);

static CARD_PORT_FIELDS: FieldTable = FieldTable::new(&[
    ("priority", INTEGER),
    // Printed as `<n> usec`; the unit is fixed.
    ("latencyOffset", INTEGER),
    ("properties", PROPERTIES),
    ("partOfProfiles", COMMA_LIST),
]);

static MODULE_FIELDS: FieldTable = FieldTable::new(&[
    ("name", TEXT),
    ("argument", TEXT),
    ("usageCounter", OPTIONAL_INTEGER),
    ("properties", PROPERTIES),
]);

static SINK_FIELDS: FieldTable = FieldTable::new(&[
    ("description", OPTIONAL_TEXT),
    ("driver", OPTIONAL_TEXT),
    ("sampleSpecification", SAMPLE_SPEC),
    ("channelMap", COMMA_LIST),
    ("ownerModule", INTEGER),
    ("mute", BOOLEAN),
    ("volume", CHANNEL_VOLUMES),
    ("baseVolume", VOLUME),
    ("monitorSource", OPTIONAL_TEXT),
    ("latency", LATENCY),
    ("flags", SPACE_LIST),
    ("properties", PROPERTIES),
    ("ports", FieldReader::DetailedList(&PORT_FIELDS)),
    ("formats", FORMAT_LIST),
]);

static SOURCE_FIELDS: FieldTable = FieldTable::new(&[
    ("description", OPTIONAL_TEXT),
    ("driver", OPTIONAL_TEXT),
    ("sampleSpecification", SAMPLE_SPEC),
    ("channelMap", COMMA_LIST),
    ("ownerModule", INTEGER),
    ("mute", BOOLEAN),
    ("volume", CHANNEL_VOLUMES),
    ("baseVolume", VOLUME),
    ("monitorOfSink", OPTIONAL_TEXT),
    ("latency", LATENCY),
    ("flags", SPACE_LIST),
    ("properties", PROPERTIES),
    ("ports", FieldReader::DetailedList(&PORT_FIELDS)),
    ("formats", FORMAT_LIST),
]);

static SINK_INPUT_FIELDS: FieldTable = FieldTable::new(&[
    ("driver", OPTIONAL_TEXT),
    ("ownerModule", OPTIONAL_INTEGER),
    ("client", OPTIONAL_INTEGER),
    ("sink", INTEGER),
    ("sampleSpecification", SAMPLE_SPEC),
    ("channelMap", COMMA_LIST),
    ("format", FORMAT),
    ("corked", BOOLEAN),
    ("mute", BOOLEAN),
    ("volume", CHANNEL_VOLUMES),
    ("bufferLatency", INTEGER),
    ("sinkLatency", INTEGER),
    ("resampleMethod", OPTIONAL_TEXT),
    ("properties", PROPERTIES),
]);

static SOURCE_OUTPUT_FIELDS: FieldTable = FieldTable::new(&[
    ("driver", OPTIONAL_TEXT),
    ("ownerModule", OPTIONAL_INTEGER),
    ("client", OPTIONAL_INTEGER),
    ("source", INTEGER),
    ("sampleSpecification", SAMPLE_SPEC),
    ("channelMap", COMMA_LIST),
    ("format", FORMAT),
    ("corked", BOOLEAN),
    ("mute", BOOLEAN),
    ("volume", CHANNEL_VOLUMES),
    ("bufferLatency", INTEGER),
    ("sourceLatency", INTEGER),
    ("resampleMethod", OPTIONAL_TEXT),
    ("properties", PROPERTIES),
]);

static CLIENT_FIELDS: FieldTable = FieldTable::new(&[
    ("driver", OPTIONAL_TEXT),
    ("ownerModule", OPTIONAL_INTEGER),
    ("properties", PROPERTIES),
]);

static SAMPLE_FIELDS: FieldTable = FieldTable::new(&[
    ("sampleSpecification", SAMPLE_SPEC),
    ("channelMap", OPTIONAL_COMMA_LIST),
    ("volume", CHANNEL_VOLUMES),
    ("duration", FLOAT),
    ("size", BYTES),
    ("lazy", BOOLEAN),
    ("filename", OPTIONAL_TEXT),
    ("properties", PROPERTIES),
]);

static CARD_FIELDS: FieldTable = FieldTable::new(&[
    ("driver", OPTIONAL_TEXT),
    ("ownerModule", OPTIONAL_INTEGER),
    ("properties", PROPERTIES),
    ("profiles", FieldReader::DetailedList(&PROFILE_FIELDS)),
    ("ports", FieldReader::DetailedList(&CARD_PORT_FIELDS)),
]);

/// The field table for one entity type.
pub fn field_table(kind: EntityKind) -> &'static FieldTable {
    match kind {
        EntityKind::Module => &MODULE_FIELDS,
        EntityKind::Sink => &SINK_FIELDS,
        EntityKind::Source => &SOURCE_FIELDS,
        EntityKind::SinkInput => &SINK_INPUT_FIELDS,
        EntityKind::SourceOutput => &SOURCE_OUTPUT_FIELDS,
        EntityKind::Client => &CLIENT_FIELDS,
        EntityKind::Sample => &SAMPLE_FIELDS,
        EntityKind::Card => &CARD_FIELDS,
    }
}

static HEADER_RE: OnceLock<Regex> = OnceLock::new();
fn header_re() -> &'static Regex {
    HEADER_RE.get_or_init(|| Regex::new(r"^([A-Za-z][A-Za-z ]*) #(\d+)$").expect("valid pattern"))
}

/// Match a `<Type> #<id>` header line.
///
/// Returns the raw keyword and id; the keyword may name a type this crate
/// does not know about.
pub fn match_header(line: &str) -> Option<(&str, u32)> {
    let captures = header_re().captures(line)?;
    let id = captures[2].parse().ok()?;
    let keyword = captures.get(1)?.as_str();
    Some((keyword, id))
}

/// Parse a whole `pactl list` document into its entities, in document order.
///
/// Headers of unknown types are skipped together with their blocks. Any
/// malformed field fails the whole parse.
pub fn parse_listing(text: &str) -> Result<Vec<Entity>> {
    let normalized = normalize_balance_indent(text);
    let mut cursor = Cursor::new(&normalized);
    let mut entities = Vec::new();

    while let Some(line) = cursor.next_line() {
        let Some((keyword, id)) = match_header(line) else {
            continue;
        };
        let Some(kind) = EntityKind::from_keyword(keyword) else {
            debug!(keyword, id, "skipping unknown section");
            continue;
        };

        trace!(%kind, id, line = cursor.position(), "reading entity");
        let mut fields = Fields::new(format!("{} #{}", kind.keyword(), id));
        read_block(&mut cursor, 1, field_table(kind), &mut fields)?;
        entities.push(build_entity(kind, id, fields)?);
    }

    debug!(count = entities.len(), "parsed listing");
    Ok(entities)
}

fn build_entity(kind: EntityKind, id: u32, fields: Fields) -> Result<Entity> {
    Ok(match kind {
        EntityKind::Module => Entity::Module(build_module(id, fields)?),
        EntityKind::Sink => Entity::Sink(build_sink(id, fields)?),
        EntityKind::Source => Entity::Source(build_source(id, fields)?),
        EntityKind::SinkInput => Entity::SinkInput(build_sink_input(id, fields)?),
        EntityKind::SourceOutput => Entity::SourceOutput(build_source_output(id, fields)?),
        EntityKind::Client => Entity::Client(build_client(id, fields)?),
        EntityKind::Sample => Entity::Sample(build_sample(id, fields)?),
        EntityKind::Card => Entity::Card(build_card(id, fields)?),
    })
}

fn build_module(id: u32, mut fields: Fields) -> Result<Module> {
    Ok(Module {
        id,
        name: fields.require("name")?,
        argument: fields.optional("argument")?.unwrap_or_default(),
        usage_counter: fields.nullable("usageCounter")?,
        properties: fields.optional("properties")?.unwrap_or_default(),
        extra: fields.into_extra(),
    })
}

fn build_sink(id: u32, mut fields: Fields) -> Result<Sink> {
    Ok(Sink {
        id,
        state: fields.require("state")?,
        name: fields.require("name")?,
        description: fields.nullable("description")?,
        driver: fields.nullable("driver")?,
        sample_specification: fields.require("sampleSpecification")?,
        channel_map: fields.require("channelMap")?,
        owner_module: fields.require("ownerModule")?,
        mute: fields.require("mute")?,
        volume: fields.require("volume")?,
        base_volume: fields.require("baseVolume")?,
        monitor_source: fields.nullable("monitorSource")?,
        latency: fields.require("latency")?,
        flags: fields.optional("flags")?.unwrap_or_default(),
        properties: fields.optional("properties")?.unwrap_or_default(),
        ports: build_members(fields.optional("ports")?, build_port)?,
        active_port: fields.optional("activePort")?,
        formats: fields.optional("formats")?,
        extra: fields.into_extra(),
    })
}

fn build_source(id: u32, mut fields: Fields) -> Result<Source> {
    Ok(Source {
        id,
        state: fields.require("state")?,
        name: fields.require("name")?,
        description: fields.nullable("description")?,
        driver: fields.nullable("driver")?,
        sample_specification: fields.require("sampleSpecification")?,
        channel_map: fields.require("channelMap")?,
        owner_module: fields.require("ownerModule")?,
        mute: fields.require("mute")?,
        volume: fields.require("volume")?,
        base_volume: fields.require("baseVolume")?,
        monitor_of_sink: fields.nullable("monitorOfSink")?,
        latency: fields.require("latency")?,
        flags: fields.optional("flags")?.unwrap_or_default(),
        properties: fields.optional("properties")?.unwrap_or_default(),
        ports: build_members(fields.optional("ports")?, build_port)?,
        active_port: fields.optional("activePort")?,
        formats: fields.optional("formats")?,
        extra: fields.into_extra(),
    })
}

fn build_sink_input(id: u32, mut fields: Fields) -> Result<SinkInput> {
    Ok(SinkInput {
        id,
        driver: fields.nullable("driver")?,
        owner_module: fields.nullable("ownerModule")?,
        client: fields.nullable("client")?,
        sink: fields.require("sink")?,
        sample_specification: fields.require("sampleSpecification")?,
        channel_map: fields.require("channelMap")?,
        format: fields.nullable("format")?,
        corked: fields.require("corked")?,
        mute: fields.require("mute")?,
        volume: fields.require("volume")?,
        buffer_latency: fields.require("bufferLatency")?,
        sink_latency: fields.require("sinkLatency")?,
        resample_method: fields.nullable("resampleMethod")?,
        properties: fields.optional("properties")?.unwrap_or_default(),
        extra: fields.into_extra(),
    })
}

fn build_source_output(id: u32, mut fields: Fields) -> Result<SourceOutput> {
    Ok(SourceOutput {
        id,
        driver: fields.nullable("driver")?,
        owner_module: fields.nullable("ownerModule")?,
        client: fields.nullable("client")?,
        source: fields.require("source")?,
        sample_specification: fields.require("sampleSpecification")?,
        channel_map: fields.require("channelMap")?,
        format: fields.nullable("format")?,
        corked: fields.require("corked")?,
        mute: fields.require("mute")?,
        volume: fields.require("volume")?,
        buffer_latency: fields.require("bufferLatency")?,
        source_latency: fields.require("sourceLatency")?,
        resample_method: fields.nullable("resampleMethod")?,
        properties: fields.optional("properties")?.unwrap_or_default(),
        extra: fields.into_extra(),
    })
}

fn build_client(id: u32, mut fields: Fields) -> Result<Client> {
    Ok(Client {
        id,
        driver: fields.nullable("driver")?,
        owner_module: fields.nullable("ownerModule")?,
        properties: fields.optional("properties")?.unwrap_or_default(),
        extra: fields.into_extra(),
    })
}

fn build_sample(id: u32, mut fields: Fields) -> Result<Sample> {
    Ok(Sample {
        id,
        name: fields.require("name")?,
        sample_specification: fields.nullable("sampleSpecification")?,
        channel_map: fields.nullable("channelMap")?,
        volume: fields.require("volume")?,
        duration: fields.require("duration")?,
        size: fields.require("size")?,
        lazy: fields.require("lazy")?,
        filename: fields.nullable("filename")?,
        properties: fields.optional("properties")?.unwrap_or_default(),
        extra: fields.into_extra(),
    })
}

fn build_card(id: u32, mut fields: Fields) -> Result<Card> {
    Ok(Card {
        id,
        name: fields.require("name")?,
        driver: fields.nullable("driver")?,
        owner_module: fields.nullable("ownerModule")?,
        properties: fields.optional("properties")?.unwrap_or_default(),
        profiles: build_members(fields.optional("profiles")?, build_profile)?,
        active_profile: fields.optional("activeProfile")?,
        ports: build_members(fields.optional("ports")?, build_card_port)?,
        extra: fields.into_extra(),
    })
}

fn build_members<T>(
    members: Option<IndexMap<String, Fields>>,
    build: fn(Fields) -> Result<T>,
) -> Result<Option<IndexMap<String, T>>> {
    let Some(members) = members else {
        return Ok(None);
    };

    members
        .into_iter()
        .map(|(name, fields)| build(fields).map(|built| (name, built)))
        .collect::<Result<IndexMap<_, _>>>()
        .map(Some)
}

fn build_port(mut fields: Fields) -> Result<Port> {
    Ok(Port {
        description: fields.require("description")?,
        port_type: fields.optional("type")?,
        priority: fields.require("priority")?,
        availability_group: fields.optional("availabilityGroup")?,
        available: fields.available()?,
        extra: fields.into_extra(),
    })
}

fn build_card_port(mut fields: Fields) -> Result<CardPort> {
    Ok(CardPort {
        description: fields.require("description")?,
        port_type: fields.optional("type")?,
        priority: fields.require("priority")?,
        latency_offset: fields.require("latencyOffset")?,
        availability_group: fields.optional("availabilityGroup")?,
        available: fields.available()?,
        properties: fields.optional("properties")?.unwrap_or_default(),
        part_of_profiles: fields.optional("partOfProfiles")?.unwrap_or_default(),
        extra: fields.into_extra(),
    })
}

fn build_profile(mut fields: Fields) -> Result<Profile> {
    Ok(Profile {
        description: fields.require("description")?,
        sinks: fields.nullable("sinks")?,
        sources: fields.nullable("sources")?,
        priority: fields.require("priority")?,
        available: fields.available()?,
        extra: fields.into_extra(),
    })
}

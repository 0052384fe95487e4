//! Colon blocks: runs of `Key: Value` / `Key:` lines at one indentation.
//!
//! Each key is normalized and dispatched through a [`FieldTable`] to a
//! [`FieldReader`]; readers that own nested lines recurse one level deeper.
//! The results are collected into a [`Fields`] builder, which the entity
//! and detailed-list builders then convert into typed records.

use std::sync::OnceLock;

use indexmap::IndexMap;
use regex::Regex;
use tracing::trace;

use crate::error::{PulseError, Result};
use crate::types::{
    Available, ChannelVolumeList, Format, Latency, PropertyList, SampleSpecification, Volume,
};

use super::cursor::Cursor;
use super::detailed::read_detailed_list;
use super::primitive::{self, normalize_name};
use super::proplist::read_properties;
use super::structured;

/// Readers that turn a single value token into a value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Primitive {
    Text,
    OptionalText,
    Integer,
    OptionalInteger,
    Float,
    Boolean,
    Bytes,
    CommaList,
    OptionalCommaList,
    SpaceList,
}

/// Readers for fixed-shape composite values. Some consume extra lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Structured {
    SampleSpec,
    Volume,
    ChannelVolumes,
    Latency,
    Format,
    FormatList,
}

/// How the value of one field is read.
#[derive(Debug, Clone, Copy)]
pub enum FieldReader {
    Primitive(Primitive),
    Structured(Structured),
    /// Named members with a parenthesized attribute list, read with the
    /// given table for their attributes and nested fields.
    DetailedList(&'static FieldTable),
    PropertyList,
}

/// Readers for the fields of one record type, keyed by normalized name.
#[derive(Debug)]
pub struct FieldTable {
    fields: &'static [(&'static str, FieldReader)],
}

impl FieldTable {
    pub const fn new(fields: &'static [(&'static str, FieldReader)]) -> Self {
        Self { fields }
    }

    /// The reader for `key`. Fields missing from the table are plain text.
    pub fn reader_for(&self, key: &str) -> FieldReader {
        self.fields
            .iter()
            .find(|(name, _)| *name == key)
            .map(|(_, reader)| *reader)
            .unwrap_or(FieldReader::Primitive(Primitive::Text))
    }
}

/// A value produced by a [`FieldReader`].
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Text(String),
    OptionalText(Option<String>),
    Integer(i64),
    OptionalInteger(Option<i64>),
    Float(f64),
    Boolean(bool),
    Bytes(u64),
    List(Vec<String>),
    OptionalList(Option<Vec<String>>),
    Available(Available),
    SampleSpec(Option<SampleSpecification>),
    Volume(Volume),
    ChannelVolumes(ChannelVolumeList),
    Latency(Latency),
    Format(Option<Format>),
    Formats(Vec<Format>),
    Properties(PropertyList),
    Members(IndexMap<String, Fields>),
}

/// Conversion out of a [`FieldValue`] into the type a record field holds.
pub trait FromFieldValue: Sized {
    fn from_field_value(value: FieldValue) -> std::result::Result<Self, FieldValue>;
}

macro_rules! from_field_value {
    ($ty:ty, $variant:ident) => {
        impl FromFieldValue for $ty {
            fn from_field_value(value: FieldValue) -> std::result::Result<Self, FieldValue> {
                match value {
                    FieldValue::$variant(inner) => Ok(inner),
                    other => Err(other),
                }
            }
        }
    };
}

from_field_value!(String, Text);
from_field_value!(Option<String>, OptionalText);
from_field_value!(i64, Integer);
from_field_value!(Option<i64>, OptionalInteger);
from_field_value!(f64, Float);
from_field_value!(bool, Boolean);
from_field_value!(u64, Bytes);
from_field_value!(Vec<String>, List);
from_field_value!(Option<Vec<String>>, OptionalList);
from_field_value!(Option<SampleSpecification>, SampleSpec);
from_field_value!(Volume, Volume);
from_field_value!(ChannelVolumeList, ChannelVolumes);
from_field_value!(Latency, Latency);
from_field_value!(Option<Format>, Format);
from_field_value!(Vec<Format>, Formats);
from_field_value!(PropertyList, Properties);
from_field_value!(IndexMap<String, Fields>, Members);

impl FromFieldValue for u32 {
    fn from_field_value(value: FieldValue) -> std::result::Result<Self, FieldValue> {
        match value {
            FieldValue::Integer(i) => u32::try_from(i).map_err(|_| FieldValue::Integer(i)),
            other => Err(other),
        }
    }
}

impl FromFieldValue for Option<u32> {
    fn from_field_value(value: FieldValue) -> std::result::Result<Self, FieldValue> {
        match value {
            FieldValue::OptionalInteger(None) => Ok(None),
            FieldValue::OptionalInteger(Some(i)) => u32::try_from(i)
                .map(Some)
                .map_err(|_| FieldValue::OptionalInteger(Some(i))),
            // Attribute readers hand back plain integers for counts like `sinks: 1`.
            FieldValue::Integer(i) => u32::try_from(i)
                .map(Some)
                .map_err(|_| FieldValue::Integer(i)),
            other => Err(other),
        }
    }
}

/// Values collected for one record, in first-seen order.
#[derive(Debug, Clone, PartialEq)]
pub struct Fields {
    owner: String,
    values: IndexMap<String, FieldValue>,
}

impl Fields {
    /// `owner` names the record in error messages, e.g. `Sink #3`.
    pub fn new(owner: impl Into<String>) -> Self {
        Self {
            owner: owner.into(),
            values: IndexMap::new(),
        }
    }

    pub fn owner(&self) -> &str {
        &self.owner
    }

    /// Store a value; a repeated key keeps its position and takes the new value.
    pub fn insert(&mut self, key: impl Into<String>, value: FieldValue) {
        self.values.insert(key.into(), value);
    }

    pub fn get(&self, key: &str) -> Option<&FieldValue> {
        self.values.get(key)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Remove and convert a field that must be present.
    pub fn require<T: FromFieldValue>(&mut self, field: &'static str) -> Result<T> {
        match self.optional(field)? {
            Some(value) => Ok(value),
            None => Err(PulseError::MissingField {
                owner: self.owner.clone(),
                field,
            }),
        }
    }

    /// Remove and convert a field that may be absent.
    pub fn optional<T: FromFieldValue>(&mut self, field: &'static str) -> Result<Option<T>> {
        match self.values.shift_remove(field) {
            None => Ok(None),
            Some(value) => T::from_field_value(value)
                .map(Some)
                .map_err(|other| PulseError::malformed(field, format!("{:?}", other))),
        }
    }

    /// Remove a field whose reader yields an optional value, folding
    /// "absent" and "null sentinel" together.
    pub fn nullable<T>(&mut self, field: &'static str) -> Result<Option<T>>
    where
        Option<T>: FromFieldValue,
    {
        Ok(self.optional::<Option<T>>(field)?.flatten())
    }

    /// Remove the availability tri-state, from either a port flag or a
    /// profile's `available: yes` attribute. Absent means unknown.
    pub fn available(&mut self) -> Result<Available> {
        match self.values.shift_remove("available") {
            None => Ok(None),
            Some(FieldValue::Available(available)) => Ok(available),
            Some(FieldValue::Boolean(b)) => Ok(Some(b)),
            Some(other) => Err(PulseError::malformed("available", format!("{:?}", other))),
        }
    }

    /// Whatever plain-text fields remain once the typed fields are taken.
    pub fn into_extra(self) -> IndexMap<String, String> {
        let owner = self.owner;
        self.values
            .into_iter()
            .filter_map(|(key, value)| match value {
                FieldValue::Text(text) => Some((key, text)),
                other => {
                    trace!(owner = %owner, field = %key, value = ?other, "dropping unclaimed field");
                    None
                }
            })
            .collect()
    }
}

static COLON_LINE_RE: OnceLock<Regex> = OnceLock::new();
fn colon_line_re() -> &'static Regex {
    COLON_LINE_RE.get_or_init(|| Regex::new(r"^(\t*)(.+?):(?:$| (.*)$)").expect("valid pattern"))
}

/// Consume a `Key: Value` or `Key:` line at exactly `indent`.
///
/// Returns the raw key and the value, if any. A line with a different
/// indentation or another shape is left in place and `None` is returned.
pub fn read_colon<'a>(cursor: &mut Cursor<'a>, indent: usize) -> Option<(&'a str, Option<&'a str>)> {
    let line = cursor.peek()?;
    let captures = colon_line_re().captures(line)?;

    if captures[1].len() != indent {
        return None;
    }
    cursor.next_line();

    let key = captures.get(2).map(|m| m.as_str())?;
    let value = captures
        .get(3)
        .map(|m| m.as_str())
        .filter(|v| !v.is_empty());

    Some((key, value))
}

/// Read a colon block at `indent` into `fields` using `table`.
///
/// The block ends silently at the first line that is not a colon line at
/// exactly `indent`.
pub fn read_block(cursor: &mut Cursor<'_>, indent: usize, table: &FieldTable, fields: &mut Fields) -> Result<()> {
    while let Some((raw_key, value)) = read_colon(cursor, indent) {
        let key = normalize_name(raw_key);
        let parsed = read_field(cursor, indent + 1, table.reader_for(&key), &key, value)?;
        fields.insert(key, parsed);
    }

    Ok(())
}

/// Run one reader. `indent` is the level nested lines are expected at.
pub fn read_field(
    cursor: &mut Cursor<'_>,
    indent: usize,
    reader: FieldReader,
    key: &str,
    value: Option<&str>,
) -> Result<FieldValue> {
    Ok(match reader {
        FieldReader::Primitive(primitive) => read_primitive(primitive, key, value)?,
        FieldReader::Structured(Structured::SampleSpec) => {
            FieldValue::SampleSpec(structured::read_sample_spec(value)?)
        }
        FieldReader::Structured(Structured::Volume) => {
            FieldValue::Volume(structured::read_volume(value)?)
        }
        FieldReader::Structured(Structured::ChannelVolumes) => {
            FieldValue::ChannelVolumes(structured::read_channel_volumes(cursor, value)?)
        }
        FieldReader::Structured(Structured::Latency) => {
            FieldValue::Latency(structured::read_latency(value)?)
        }
        FieldReader::Structured(Structured::Format) => FieldValue::Format(
            value
                .map(|text| structured::read_format(cursor, text))
                .transpose()?,
        ),
        FieldReader::Structured(Structured::FormatList) => {
            FieldValue::Formats(structured::read_format_list(cursor, indent)?)
        }
        FieldReader::PropertyList => FieldValue::Properties(read_properties(cursor, indent)?),
        FieldReader::DetailedList(table) => {
            FieldValue::Members(read_detailed_list(cursor, indent, table)?)
        }
    })
}

/// Run a reader that only looks at the value token.
pub fn read_primitive(primitive: Primitive, key: &str, value: Option<&str>) -> Result<FieldValue> {
    Ok(match primitive {
        Primitive::Text => FieldValue::Text(primitive::read_string(value)),
        Primitive::OptionalText => FieldValue::OptionalText(primitive::read_optional_string(value)),
        Primitive::Integer => FieldValue::Integer(primitive::read_integer(key, value)?),
        Primitive::OptionalInteger => {
            FieldValue::OptionalInteger(primitive::read_optional_integer(key, value)?)
        }
        Primitive::Float => FieldValue::Float(primitive::read_float(key, value)?),
        Primitive::Boolean => FieldValue::Boolean(primitive::read_boolean(value)),
        Primitive::Bytes => FieldValue::Bytes(primitive::read_bytes(key, value)?),
        Primitive::CommaList => FieldValue::List(primitive::read_comma_list(value)),
        Primitive::OptionalCommaList => {
            FieldValue::OptionalList(primitive::read_optional_comma_list(value))
        }
        Primitive::SpaceList => FieldValue::List(primitive::read_space_list(value)),
    })
}

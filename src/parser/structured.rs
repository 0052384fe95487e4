//! Fixed-shape composite values: sample specs, volumes, latencies, formats.

use std::sync::OnceLock;

use indexmap::IndexMap;
use regex::Regex;

use crate::error::{PulseError, Result};
use crate::types::{ChannelVolumeList, Format, Latency, SampleSpecification, Volume};

use super::cursor::{indent_of, Cursor};
use super::proplist::read_inline_proplist;

static SAMPLE_SPEC_RE: OnceLock<Regex> = OnceLock::new();
fn sample_spec_re() -> &'static Regex {
    SAMPLE_SPEC_RE.get_or_init(|| Regex::new(r"^(\S+) (\d+)ch (\d+)Hz$").expect("valid pattern"))
}

static VOLUME_RE: OnceLock<Regex> = OnceLock::new();
fn volume_re() -> &'static Regex {
    VOLUME_RE.get_or_init(|| {
        Regex::new(r"^(\d+) / +(\d+)% / +(-inf|-?\d+(?:\.\d+)?) dB$").expect("valid pattern")
    })
}

static BALANCE_RE: OnceLock<Regex> = OnceLock::new();
fn balance_re() -> &'static Regex {
    BALANCE_RE.get_or_init(|| Regex::new(r"^\s*balance (-?\d+(?:\.\d+)?)\s*$").expect("valid pattern"))
}

static CHANNEL_SEPARATOR_RE: OnceLock<Regex> = OnceLock::new();
fn channel_separator_re() -> &'static Regex {
    CHANNEL_SEPARATOR_RE.get_or_init(|| Regex::new(r",\s+").expect("valid pattern"))
}

static LATENCY_RE: OnceLock<Regex> = OnceLock::new();
fn latency_re() -> &'static Regex {
    LATENCY_RE.get_or_init(|| Regex::new(r"^(\d+) usec, configured (\d+) usec$").expect("valid pattern"))
}

static ENCODING_RE: OnceLock<Regex> = OnceLock::new();
fn encoding_re() -> &'static Regex {
    ENCODING_RE.get_or_init(|| Regex::new(r"^(\t*([^,\t][^,]*)(, )?)").expect("valid pattern"))
}

fn parse_number<T: std::str::FromStr>(field: &str, token: &str, digits: &str) -> Result<T> {
    digits.parse().map_err(|_| PulseError::malformed(field, token))
}

/// `s16le 2ch 44100Hz`, or `n/a` for none.
pub fn read_sample_spec(value: Option<&str>) -> Result<Option<SampleSpecification>> {
    let token = match value {
        None | Some("n/a") => return Ok(None),
        Some(token) => token,
    };

    let captures = sample_spec_re()
        .captures(token)
        .ok_or_else(|| PulseError::malformed("sample specification", token))?;

    Ok(Some(SampleSpecification {
        format: captures[1].to_string(),
        channels: parse_number("sample specification", token, &captures[2])?,
        sampling_rate: parse_number("sample specification", token, &captures[3])?,
    }))
}

/// `65536 / 100% / 0.00 dB`; `-inf` decibels read as negative infinity.
pub fn read_volume(value: Option<&str>) -> Result<Volume> {
    let token = value.unwrap_or_default();
    let captures = volume_re()
        .captures(token)
        .ok_or_else(|| PulseError::malformed("volume", token))?;

    let decibels = match &captures[3] {
        "-inf" => f64::NEG_INFINITY,
        db => parse_number("volume", token, db)?,
    };

    Ok(Volume {
        raw: parse_number("volume", token, &captures[1])?,
        percentage: parse_number("volume", token, &captures[2])?,
        decibels,
    })
}

/// Per-channel volumes followed by a mandatory `balance <float>` line.
///
/// `(invalid)` stands for an empty channel set; the balance line is still
/// required.
pub fn read_channel_volumes(cursor: &mut Cursor<'_>, value: Option<&str>) -> Result<ChannelVolumeList> {
    let balance_line = cursor.take("channel volume balance")?;
    let balance = balance_re()
        .captures(balance_line)
        .ok_or_else(|| PulseError::malformed("balance", balance_line))
        .and_then(|captures| parse_number("balance", balance_line, &captures[1]))?;

    let mut channels = IndexMap::new();

    if let Some(list) = value.filter(|v| *v != "(invalid)") {
        for channel_info in channel_separator_re().split(list) {
            let (channel, volume) = channel_info
                .split_once(": ")
                .ok_or_else(|| PulseError::malformed("channel volume", channel_info))?;

            channels.insert(channel.to_string(), read_volume(Some(volume))?);
        }
    }

    Ok(ChannelVolumeList { channels, balance })
}

/// `<actual> usec, configured <configured> usec`.
pub fn read_latency(value: Option<&str>) -> Result<Latency> {
    let token = value.unwrap_or_default();
    let captures = latency_re()
        .captures(token)
        .ok_or_else(|| PulseError::malformed("latency", token))?;

    Ok(Latency {
        actual: parse_number("latency", token, &captures[1])?,
        configured: parse_number("latency", token, &captures[2])?,
    })
}

/// An encoding, optionally followed by `, ` and an inline property list.
///
/// `text` may carry leading tabs when it is a whole line from a `Formats:`
/// block; property offsets are measured from the start of `text`.
pub fn read_format(cursor: &mut Cursor<'_>, text: &str) -> Result<Format> {
    let captures = encoding_re()
        .captures(text)
        .ok_or_else(|| PulseError::malformed("format", text))?;

    let encoding = captures[2].to_string();
    let properties = match captures.get(3) {
        Some(_) => {
            let start = captures[1].chars().count();
            Some(read_inline_proplist(cursor, text, start)?)
        }
        None => None,
    };

    Ok(Format { encoding, properties })
}

/// One format per line at exactly `indent`, as printed under `Formats:`.
pub fn read_format_list(cursor: &mut Cursor<'_>, indent: usize) -> Result<Vec<Format>> {
    let mut formats = Vec::new();

    while let Some(line) = cursor.peek() {
        if indent_of(line) != indent || line.len() == indent {
            break;
        }
        cursor.take("format")?;
        formats.push(read_format(cursor, line)?);
    }

    Ok(formats)
}

//! Scalar measurements shared by devices and streams.

use indexmap::IndexMap;
use serde::Serialize;

use super::PropertyList;

/// A single volume reading as printed by pactl: `65536 / 100% / 0.00 dB`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Volume {
    /// Raw value. 100% corresponds to 65536.
    pub raw: u32,
    pub percentage: f64,
    /// Value in decibels. Can be negative infinity.
    pub decibels: f64,
}

impl Volume {
    /// Whether this reading is silence (`-inf dB`).
    pub fn is_silent(&self) -> bool {
        self.decibels == f64::NEG_INFINITY
    }
}

/// Per-channel volumes plus the balance line that follows them.
///
/// An `(invalid)` channel set produces an empty map; `balance` is always present.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct ChannelVolumeList {
    #[serde(flatten)]
    pub channels: IndexMap<String, Volume>,
    pub balance: f64,
}

impl ChannelVolumeList {
    pub fn get(&self, channel: &str) -> Option<&Volume> {
        self.channels.get(channel)
    }

    /// Average percentage across channels, or `None` for an empty set.
    pub fn average_percentage(&self) -> Option<f64> {
        if self.channels.is_empty() {
            return None;
        }
        let total: f64 = self.channels.values().map(|v| v.percentage).sum();
        Some(total / self.channels.len() as f64)
    }
}

/// Latency in microseconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Latency {
    pub actual: u64,
    pub configured: u64,
}

/// Sample format, channel count and rate: `s16le 2ch 44100Hz`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SampleSpecification {
    pub format: String,
    pub channels: u32,
    pub sampling_rate: u32,
}

/// An encoding format with its optional inline property list.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Format {
    pub encoding: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub properties: Option<PropertyList>,
}

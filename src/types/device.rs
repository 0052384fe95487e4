//! Detailed-list members: ports and profiles.

use indexmap::IndexMap;
use serde::Serialize;

use super::PropertyList;

/// Availability tri-state: `Some(true)`, `Some(false)` or unknown.
pub type Available = Option<bool>;

/// A sink or source port.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Port {
    pub description: String,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub port_type: Option<String>,
    pub priority: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub availability_group: Option<String>,
    pub available: Available,
    #[serde(skip_serializing_if = "IndexMap::is_empty")]
    pub extra: IndexMap<String, String>,
}

/// A card port. Carries its own properties and the profiles it belongs to.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CardPort {
    pub description: String,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub port_type: Option<String>,
    pub priority: i64,
    /// Unit: usec.
    pub latency_offset: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub availability_group: Option<String>,
    pub available: Available,
    pub properties: PropertyList,
    pub part_of_profiles: Vec<String>,
    #[serde(skip_serializing_if = "IndexMap::is_empty")]
    pub extra: IndexMap<String, String>,
}

/// A card profile.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sinks: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sources: Option<u32>,
    pub priority: i64,
    pub available: Available,
    #[serde(skip_serializing_if = "IndexMap::is_empty")]
    pub extra: IndexMap<String, String>,
}

//! `pactl subscribe` event lines: `Event 'change' on sink-input #29896`.

use std::sync::OnceLock;

use regex::Regex;
use serde::Serialize;

use crate::error::{PulseError, Result};

/// One subscription event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Event {
    /// `new`, `change` or `remove`.
    pub event: String,
    /// The facility the event concerns, e.g. `sink-input` or `server`.
    pub facility: String,
    pub id: u32,
}

static EVENT_RE: OnceLock<Regex> = OnceLock::new();
fn event_re() -> &'static Regex {
    EVENT_RE.get_or_init(|| Regex::new(r"^Event '([^']+)' on ([^ ]+) #(\d+)$").expect("valid pattern"))
}

pub fn parse_event(line: &str) -> Result<Event> {
    let malformed = || PulseError::MalformedEvent {
        line: line.to_string(),
    };
    let captures = event_re().captures(line).ok_or_else(malformed)?;

    Ok(Event {
        event: captures[1].to_string(),
        facility: captures[2].to_string(),
        id: captures[3].parse().map_err(|_| malformed())?,
    })
}

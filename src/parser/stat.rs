//! `pactl info` and `pactl stat` output.

use std::sync::OnceLock;

use indexmap::IndexMap;
use regex::Regex;
use serde::Serialize;

use crate::error::{PulseError, Result};

use super::primitive::{normalize_name, read_bytes};

/// Memory block statistics from `pactl stat`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MemoryStats {
    pub used_blocks: u64,
    pub used_bytes: u64,
    pub lifetime_blocks: u64,
    pub lifetime_bytes: u64,
    pub sample_cache_bytes: u64,
}

static INFO_LINE_RE: OnceLock<Regex> = OnceLock::new();
fn info_line_re() -> &'static Regex {
    INFO_LINE_RE.get_or_init(|| Regex::new(r"^\s*([\w ]+): (.+)$").expect("valid pattern"))
}

static STAT_RE: OnceLock<Regex> = OnceLock::new();
fn stat_re() -> &'static Regex {
    STAT_RE.get_or_init(|| {
        Regex::new(concat!(
            r"Currently in use: (\d+) blocks containing (\d+(?:\.\d+)? \w+) bytes total\.\n",
            r"Allocated during whole lifetime: (\d+) blocks containing (\d+(?:\.\d+)? \w+) bytes total\.\n",
            r"Sample cache size: (\d+(?:\.\d+)? \w+)",
        ))
        .expect("valid pattern")
    })
}

/// Every `Key: value` line of `pactl info`, keyed by normalized name.
pub fn parse_info(text: &str) -> IndexMap<String, String> {
    text.lines()
        .filter_map(|line| info_line_re().captures(line))
        .map(|captures| (normalize_name(captures[1].trim()), captures[2].to_string()))
        .collect()
}

pub fn parse_stat(text: &str) -> Result<MemoryStats> {
    let captures = stat_re()
        .captures(text)
        .ok_or_else(|| PulseError::malformed("stat", text.trim()))?;

    let count = |i: usize| -> Result<u64> {
        captures[i]
            .parse()
            .map_err(|_| PulseError::malformed("stat", &captures[i]))
    };

    Ok(MemoryStats {
        used_blocks: count(1)?,
        used_bytes: read_bytes("used bytes", Some(&captures[2]))?,
        lifetime_blocks: count(3)?,
        lifetime_bytes: read_bytes("lifetime bytes", Some(&captures[4]))?,
        sample_cache_bytes: read_bytes("sample cache size", Some(&captures[5]))?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const STAT: &str = "Currently in use: 31 blocks containing 1.5 MiB bytes total.\n\
Allocated during whole lifetime: 4096 blocks containing 2 GiB bytes total.\n\
Sample cache size: 0 B\n";

    #[test]
    fn test_parse_stat() {
        let stats = parse_stat(STAT).unwrap();

        assert_eq!(stats.used_blocks, 31);
        assert_eq!(stats.used_bytes, 1_572_864);
        assert_eq!(stats.lifetime_blocks, 4096);
        assert_eq!(stats.lifetime_bytes, 2 << 30);
        assert_eq!(stats.sample_cache_bytes, 0);
    }

    #[test]
    fn test_parse_stat_malformed() {
        assert!(matches!(parse_stat("nothing here"), Err(PulseError::MalformedField { .. })));
    }

    #[test]
    fn test_parse_info() {
        let text = "Server String: /run/user/1000/pulse/native\nLibrary Protocol Version: 35\nDefault Sink: alsa_output.pci-0000_00_1f.3.analog-stereo\n";

        let info = parse_info(text);

        assert_eq!(info["serverString"], "/run/user/1000/pulse/native");
        assert_eq!(info["libraryProtocolVersion"], "35");
        assert_eq!(info["defaultSink"], "alsa_output.pci-0000_00_1f.3.analog-stereo");
    }
}

//! `pactl info`, `pactl stat` and `pactl subscribe` output.

use pretty_assertions::assert_eq;
use pulsecontrol::{parse_event, parse_info, parse_stat, MemoryStats, PulseError};

#[test]
fn test_info_keys() {
    let info = parse_info(include_str!("fixtures/info.txt"));

    assert_eq!(info.len(), 15);
    assert_eq!(info.get_index(0).map(|(k, _)| k.as_str()), Some("serverString"));
    assert_eq!(info["isLocal"], "yes");
    assert_eq!(info["defaultSampleSpecification"], "s16le 2ch 44100Hz");
    assert_eq!(info["cookie"], "2fb4:97c1");
}

#[test]
fn test_stat() {
    let stats = parse_stat(include_str!("fixtures/stat.txt")).unwrap();

    assert_eq!(
        stats,
        MemoryStats {
            used_blocks: 112,
            used_bytes: 3_250_586,
            lifetime_blocks: 9215,
            lifetime_bytes: 230_267_290,
            sample_cache_bytes: 36_147,
        }
    );
}

#[test]
fn test_subscribe_lines() {
    let lines = [
        "Event 'new' on sink-input #29896",
        "Event 'change' on server #4294967295",
        "Event 'remove' on client #12",
    ];

    let events: Vec<(String, String, u32)> = lines
        .iter()
        .map(|line| parse_event(line).unwrap())
        .map(|e| (e.event, e.facility, e.id))
        .collect();

    assert_eq!(
        events,
        vec![
            ("new".to_string(), "sink-input".to_string(), 29896),
            ("change".to_string(), "server".to_string(), u32::MAX),
            ("remove".to_string(), "client".to_string(), 12),
        ]
    );
}

#[test]
fn test_unknown_event_line() {
    assert!(matches!(
        parse_event("Event on nothing"),
        Err(PulseError::MalformedEvent { .. })
    ));
}

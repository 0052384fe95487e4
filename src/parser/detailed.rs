//! Detailed lists: ports and profiles.
//!
//! ```text
//! 	Ports:
//! 		analog-output-speaker: Speakers (type: Speaker, priority: 10000, not available)
//! 			Properties:
//! 				port.type = "speaker"
//! 			Part of profile(s): output:analog-stereo
//! ```
//!
//! Each member is a colon line whose value is a description followed by a
//! parenthesized, comma-separated attribute cluster. Deeper colon lines add
//! further fields to the member.

use indexmap::IndexMap;
use tracing::trace;

use crate::error::{PulseError, Result};

use super::block::{read_block, read_colon, read_primitive, FieldReader, FieldTable, FieldValue, Fields};
use super::cursor::Cursor;
use super::primitive::normalize_name;

/// Read members at `indent` until a line does not match the member shape.
///
/// Member names are kept as printed; attribute and nested keys are normalized.
pub fn read_detailed_list(cursor: &mut Cursor<'_>, indent: usize, table: &FieldTable) -> Result<IndexMap<String, Fields>> {
    let mut members = IndexMap::new();

    while let Some((name, value)) = read_colon(cursor, indent) {
        let details = value.ok_or_else(|| PulseError::MissingDetail {
            name: name.to_string(),
            details: String::new(),
        })?;

        let (description, cluster) = split_details(details).ok_or_else(|| PulseError::MissingDetail {
            name: name.to_string(),
            details: details.to_string(),
        })?;

        let mut fields = Fields::new(name);
        fields.insert("description", FieldValue::Text(description.to_string()));

        for attribute in cluster.split(", ") {
            read_attribute(attribute, table, &mut fields)?;
        }

        read_block(cursor, indent + 1, table, &mut fields)?;
        members.insert(name.to_string(), fields);
    }

    Ok(members)
}

/// Split `Description (a, b: c)` at the last ` (` that leaves a non-empty
/// cluster closed by the final `)`.
fn split_details(details: &str) -> Option<(&str, &str)> {
    let inner = details.strip_suffix(')')?;

    inner
        .rmatch_indices(" (")
        .map(|(i, _)| (&inner[..i], &inner[i + 2..]))
        .find(|(description, cluster)| !description.is_empty() && !cluster.is_empty())
}

fn read_attribute(attribute: &str, table: &FieldTable, fields: &mut Fields) -> Result<()> {
    match attribute.split_once(": ") {
        None => {
            let available = match attribute {
                "available" => Some(true),
                "not available" => Some(false),
                "availability unknown" => None,
                flag => {
                    trace!(member = fields.owner(), flag, "ignoring unknown flag");
                    return Ok(());
                }
            };
            fields.insert("available", FieldValue::Available(available));
        }
        Some((name, value)) => {
            let key = normalize_name(name);
            let parsed = match table.reader_for(&key) {
                FieldReader::Primitive(primitive) => read_primitive(primitive, &key, Some(value))?,
                // Attributes live on the header line and cannot own nested lines.
                _ => FieldValue::Text(value.to_string()),
            };
            fields.insert(key, parsed);
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::block::Primitive;

    static PROFILE: FieldTable = FieldTable::new(&[
        ("sinks", FieldReader::Primitive(Primitive::Integer)),
        ("sources", FieldReader::Primitive(Primitive::Integer)),
        ("priority", FieldReader::Primitive(Primitive::Integer)),
        ("available", FieldReader::Primitive(Primitive::Boolean)),
    ]);

    static CARD_PORT: FieldTable = FieldTable::new(&[
        ("priority", FieldReader::Primitive(Primitive::Integer)),
        ("latencyOffset", FieldReader::Primitive(Primitive::Integer)),
        ("properties", FieldReader::PropertyList),
        ("partOfProfiles", FieldReader::Primitive(Primitive::CommaList)),
    ]);

    #[test]
    fn test_profile_member() {
        let mut cursor = Cursor::new("\t\tanalog-stereo: Analog Stereo (priority: 6500, available: yes)");

        let members = read_detailed_list(&mut cursor, 2, &PROFILE).unwrap();
        let member = &members["analog-stereo"];

        assert_eq!(member.get("description"), Some(&FieldValue::Text("Analog Stereo".to_string())));
        assert_eq!(member.get("priority"), Some(&FieldValue::Integer(6500)));
        assert_eq!(member.get("available"), Some(&FieldValue::Boolean(true)));
    }

    #[test]
    fn test_port_flags() {
        let text = "\t\ta: A (priority: 1, not available)\n\t\tb: B (priority: 2, available)\n\t\tc: C (priority: 3, availability unknown)";
        let mut cursor = Cursor::new(text);

        let members = read_detailed_list(&mut cursor, 2, &CARD_PORT).unwrap();

        assert_eq!(members["a"].get("available"), Some(&FieldValue::Available(Some(false))));
        assert_eq!(members["b"].get("available"), Some(&FieldValue::Available(Some(true))));
        assert_eq!(members["c"].get("available"), Some(&FieldValue::Available(None)));
    }

    #[test]
    fn test_member_with_nested_block() {
        let text = concat!(
            "\t\tanalog-input-mic: Microphone (type: Mic, priority: 8700, latency offset: 0 usec, availability group: Legacy 1, not available)\n",
            "\t\t\tProperties:\n",
            "\t\t\t\tport.type = \"mic\"\n",
            "\t\t\tPart of profile(s): input:analog-stereo, output:analog-stereo+input:analog-stereo\n",
            "\tActive Profile: off",
        );
        let mut cursor = Cursor::new(text);

        let members = read_detailed_list(&mut cursor, 2, &CARD_PORT).unwrap();
        let mic = &members["analog-input-mic"];

        assert_eq!(mic.get("type"), Some(&FieldValue::Text("Mic".to_string())));
        assert_eq!(mic.get("latencyOffset"), Some(&FieldValue::Integer(0)));
        assert_eq!(mic.get("availabilityGroup"), Some(&FieldValue::Text("Legacy 1".to_string())));
        assert!(matches!(mic.get("properties"), Some(FieldValue::Properties(p)) if p["port.type"] == "mic"));
        assert_eq!(
            mic.get("partOfProfiles"),
            Some(&FieldValue::List(vec![
                "input:analog-stereo".to_string(),
                "output:analog-stereo+input:analog-stereo".to_string(),
            ]))
        );
        assert_eq!(cursor.peek(), Some("\tActive Profile: off"));
    }

    #[test]
    fn test_member_name_kept_verbatim() {
        let mut cursor = Cursor::new("\t\toutput:HiFi: HiFi (priority: 1)");

        let members = read_detailed_list(&mut cursor, 2, &PROFILE).unwrap();

        assert!(members.contains_key("output:HiFi"));
    }

    #[test]
    fn test_missing_cluster() {
        let mut cursor = Cursor::new("\t\tanalog-stereo: Analog Stereo");

        let err = read_detailed_list(&mut cursor, 2, &PROFILE).unwrap_err();

        assert!(matches!(err, PulseError::MissingDetail { ref name, .. } if name == "analog-stereo"));
    }

    #[test]
    fn test_missing_value() {
        let mut cursor = Cursor::new("\t\tanalog-stereo:");

        assert!(matches!(
            read_detailed_list(&mut cursor, 2, &PROFILE),
            Err(PulseError::MissingDetail { .. })
        ));
    }

    #[test]
    fn test_split_details_uses_last_cluster() {
        assert_eq!(
            split_details("Line Out (rear) (priority: 1)"),
            Some(("Line Out (rear)", "priority: 1"))
        );
        assert_eq!(split_details("No cluster"), None);
        assert_eq!(split_details("Empty ()"), None);
    }
}

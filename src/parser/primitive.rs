//! Stateless readers converting a single value token into a typed value.

use std::sync::OnceLock;

use regex::Regex;

use crate::error::{PulseError, Result};

/// Tokens pactl prints for an unset value.
pub const NULL_SENTINELS: [&str; 2] = ["n/a", "(null)"];

/// Convert a human title such as `Owner Module` into `ownerModule`.
///
/// The first word is lower-cased, following words are capitalized, and
/// parentheses are dropped (`Part of profile(s)` becomes `partOfProfiles`).
pub fn normalize_name(title: &str) -> String {
    let mut name = String::with_capacity(title.len());

    for (i, word) in title.split(' ').filter(|w| !w.is_empty()).enumerate() {
        if i == 0 {
            name.push_str(&word.to_lowercase());
        } else {
            let mut chars = word.chars();
            if let Some(first) = chars.next() {
                name.extend(first.to_uppercase());
                name.push_str(&chars.as_str().to_lowercase());
            }
        }
    }

    name.retain(|c| c != '(' && c != ')');
    name
}

/// Absent values read as the empty string.
pub fn read_string(value: Option<&str>) -> String {
    value.unwrap_or_default().to_string()
}

pub fn read_optional_string(value: Option<&str>) -> Option<String> {
    value
        .filter(|v| !NULL_SENTINELS.contains(v))
        .map(str::to_string)
}

/// Read the leading integer of a token, ignoring any trailing unit (`0 usec`).
pub fn read_integer(field: &str, value: Option<&str>) -> Result<i64> {
    let token = value.unwrap_or_default();
    let trimmed = token.trim_start();
    let digits_end = numeric_prefix_len(trimmed, false);

    trimmed[..digits_end]
        .parse()
        .map_err(|_| PulseError::malformed(field, token))
}

/// Like [`read_integer`], but the `n/a` and `(null)` sentinels read as `None`.
pub fn read_optional_integer(field: &str, value: Option<&str>) -> Result<Option<i64>> {
    match value {
        None => Ok(None),
        Some(v) if NULL_SENTINELS.contains(&v) => Ok(None),
        Some(v) => read_integer(field, Some(v)).map(Some),
    }
}

/// Read the leading decimal number of a token (`0.1s` reads as `0.1`).
pub fn read_float(field: &str, value: Option<&str>) -> Result<f64> {
    let token = value.unwrap_or_default();
    let trimmed = token.trim_start();
    let end = numeric_prefix_len(trimmed, true);

    trimmed[..end]
        .parse()
        .map_err(|_| PulseError::malformed(field, token))
}

pub fn read_boolean(value: Option<&str>) -> bool {
    value == Some("yes")
}

static BYTES_RE: OnceLock<Regex> = OnceLock::new();
fn bytes_re() -> &'static Regex {
    BYTES_RE.get_or_init(|| Regex::new(r"^\s*(\d+(?:\.\d+)?) (\S+)\s*$").expect("valid pattern"))
}

/// Read a size like `1.5 MiB` into bytes, rounded to the nearest byte.
pub fn read_bytes(field: &str, value: Option<&str>) -> Result<u64> {
    let token = value.unwrap_or_default();
    let captures = bytes_re()
        .captures(token)
        .ok_or_else(|| PulseError::malformed(field, token))?;

    let magnitude: f64 = captures[1]
        .parse()
        .map_err(|_| PulseError::malformed(field, token))?;

    let multiplier: u64 = match &captures[2] {
        "B" => 1,
        "KiB" => 1024,
        "MiB" => 1024 * 1024,
        "GiB" => 1024 * 1024 * 1024,
        unit => {
            return Err(PulseError::UnknownByteUnit {
                unit: unit.to_string(),
                token: token.to_string(),
            })
        }
    };

    Ok((magnitude * multiplier as f64).round() as u64)
}

/// Read `a, b, c` (or `a,b,c`) into its non-empty items.
pub fn read_comma_list(value: Option<&str>) -> Vec<String> {
    value
        .unwrap_or_default()
        .split(',')
        .map(|item| item.trim_start_matches(' '))
        .filter(|item| !item.is_empty())
        .map(str::to_string)
        .collect()
}

/// Like [`read_comma_list`], with `n/a` reading as `None`.
pub fn read_optional_comma_list(value: Option<&str>) -> Option<Vec<String>> {
    match value {
        Some("n/a") => None,
        other => Some(read_comma_list(other)),
    }
}

/// Read `a b c` into its non-empty items.
pub fn read_space_list(value: Option<&str>) -> Vec<String> {
    value
        .unwrap_or_default()
        .split(' ')
        .filter(|item| !item.is_empty())
        .map(str::to_string)
        .collect()
}

/// Byte length of a leading `-?\d+` (or `-?\d+(\.\d+)?` when `fraction`).
fn numeric_prefix_len(s: &str, fraction: bool) -> usize {
    let bytes = s.as_bytes();
    let mut end = 0;

    if bytes.first() == Some(&b'-') {
        end = 1;
    }

    let int_start = end;
    while end < bytes.len() && bytes[end].is_ascii_digit() {
        end += 1;
    }
    if end == int_start {
        return 0;
    }

    if fraction && bytes.get(end) == Some(&b'.') {
        let frac_start = end + 1;
        let mut frac_end = frac_start;
        while frac_end < bytes.len() && bytes[frac_end].is_ascii_digit() {
            frac_end += 1;
        }
        if frac_end > frac_start {
            end = frac_end;
        }
    }

    end
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_name() {
        assert_eq!(normalize_name("Owner Module"), "ownerModule");
        assert_eq!(normalize_name("Sample Specification"), "sampleSpecification");
        assert_eq!(normalize_name("Resample method"), "resampleMethod");
        assert_eq!(normalize_name("Part of profile(s)"), "partOfProfiles");
        assert_eq!(normalize_name("Name"), "name");
        assert_eq!(normalize_name("availability group"), "availabilityGroup");
    }

    #[test]
    fn test_optional_string_sentinels() {
        assert_eq!(read_optional_string(Some("n/a")), None);
        assert_eq!(read_optional_string(Some("(null)")), None);
        assert_eq!(read_optional_string(None), None);
        assert_eq!(read_optional_string(Some("Built-in Audio")), Some("Built-in Audio".to_string()));
        assert_eq!(read_optional_string(Some("N/A")), Some("N/A".to_string()));
    }

    #[test]
    fn test_read_string_absent() {
        assert_eq!(read_string(None), "");
        assert_eq!(read_string(Some("module-null-sink")), "module-null-sink");
    }

    #[test]
    fn test_read_integer_with_unit() {
        assert_eq!(read_integer("bufferLatency", Some("0 usec")).unwrap(), 0);
        assert_eq!(read_integer("priority", Some("6500")).unwrap(), 6500);
        assert_eq!(read_integer("offset", Some("-120 usec")).unwrap(), -120);
    }

    #[test]
    fn test_read_integer_malformed() {
        let err = read_integer("ownerModule", Some("n/a")).unwrap_err();

        assert!(matches!(err, PulseError::MalformedField { ref token, .. } if token == "n/a"));
    }

    #[test]
    fn test_read_optional_integer() {
        assert_eq!(read_optional_integer("client", Some("n/a")).unwrap(), None);
        assert_eq!(read_optional_integer("client", Some("0")).unwrap(), Some(0));
        assert_eq!(read_optional_integer("client", Some("42")).unwrap(), Some(42));
        assert!(read_optional_integer("client", Some("lots")).is_err());
    }

    #[test]
    fn test_read_float() {
        assert_eq!(read_float("duration", Some("0.1s")).unwrap(), 0.1);
        assert_eq!(read_float("duration", Some("3")).unwrap(), 3.0);
        assert_eq!(read_float("balance", Some("-0.50")).unwrap(), -0.5);
        assert!(read_float("duration", Some("s")).is_err());
    }

    #[test]
    fn test_read_boolean() {
        assert!(read_boolean(Some("yes")));
        assert!(!read_boolean(Some("no")));
        assert!(!read_boolean(Some("Yes")));
        assert!(!read_boolean(None));
    }

    #[test]
    fn test_read_bytes() {
        assert_eq!(read_bytes("size", Some("1.5 MiB")).unwrap(), 1_572_864);
        assert_eq!(read_bytes("size", Some("512 B")).unwrap(), 512);
        assert_eq!(read_bytes("size", Some("2 KiB")).unwrap(), 2048);
        assert_eq!(read_bytes("size", Some("1 GiB")).unwrap(), 1 << 30);
    }

    #[test]
    fn test_read_bytes_unknown_unit() {
        let err = read_bytes("size", Some("3 KB")).unwrap_err();

        assert!(matches!(err, PulseError::UnknownByteUnit { ref unit, .. } if unit == "KB"));
    }

    #[test]
    fn test_read_bytes_malformed() {
        assert!(matches!(
            read_bytes("size", Some("lots")),
            Err(PulseError::MalformedField { .. })
        ));
    }

    #[test]
    fn test_comma_list() {
        assert_eq!(read_comma_list(Some("front-left,front-right")), vec!["front-left", "front-right"]);
        assert_eq!(read_comma_list(Some("a, b,  c,")), vec!["a", "b", "c"]);
        assert!(read_comma_list(None).is_empty());
        assert_eq!(read_optional_comma_list(Some("n/a")), None);
        assert_eq!(read_optional_comma_list(Some("mono")), Some(vec!["mono".to_string()]));
    }

    #[test]
    fn test_space_list() {
        assert_eq!(
            read_space_list(Some("HARDWARE  HW_MUTE_CTRL LATENCY ")),
            vec!["HARDWARE", "HW_MUTE_CTRL", "LATENCY"]
        );
    }
}

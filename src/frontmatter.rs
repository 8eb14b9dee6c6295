//! Front-matter block handling
//!
//! A recipe file opens with a `---` line, holds a YAML block, closes with
//! another `---` line and continues with the markdown body.

use serde_yaml::{Mapping, Value};

const DELIMITER: &str = "---";

pub const MISSING_DELIMITERS: &str = "missing valid frontmatter delimiters";

/// Split file content into `(frontmatter_block, body)`
///
/// Returns `None` when the opening or closing delimiter line is missing.
pub fn split(content: &str) -> Option<(&str, &str)> {
    let content = content.strip_prefix('\u{feff}').unwrap_or(content);

    let (first_line, rest) = match content.find('\n') {
        Some(idx) => (&content[..idx], &content[idx + 1..]),
        None => (content, ""),
    };
    if first_line.trim_end() != DELIMITER {
        return None;
    }

    let mut offset = 0;
    for line in rest.split_inclusive('\n') {
        if line.trim_end() == DELIMITER {
            let block = &rest[..offset];
            let body = &rest[offset + line.len()..];
            return Some((block, body));
        }
        offset += line.len();
    }

    None
}

/// Decode a front-matter block into a field mapping
///
/// An empty block yields an empty mapping. Anything other than a mapping at
/// the top level is rejected.
pub fn decode(block: &str) -> Result<Mapping, String> {
    let value: Value = serde_yaml::from_str(block).map_err(|e| e.to_string())?;

    match value {
        Value::Mapping(map) => Ok(map),
        Value::Null => Ok(Mapping::new()),
        _ => Err("frontmatter must be a mapping of field names to values".to_string()),
    }
}

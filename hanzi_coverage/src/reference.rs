//! Reference set extraction from the stroke-data file.
//!
//! The stroke-data file is usually a JS module (`const STROKE_DATA = { "人": {...} }`),
//! so the default strategy scans the raw text for `"<key>": {` instead of
//! parsing it. Files that are plain JSON objects can be parsed structurally.

use std::collections::BTreeSet;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::{CoverageError, Result};
use crate::extract::is_ideograph;
use crate::regexes::regex_entry_key;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ReferenceFormat {
    /// Textual scan for `"<key>": {` entries.
    #[default]
    Scan,
    /// Parse the file as a JSON object and read its top-level keys.
    Json,
}

/// Entry keys of the stroke-data file that start with an ideograph.
///
/// Every such key is kept and counted. Only one-character keys can match a
/// corpus character, so [`ReferenceSet::characters`] is what coverage uses.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ReferenceSet {
    keys: BTreeSet<String>,
}

impl ReferenceSet {
    fn from_keys<'a>(keys: impl Iterator<Item = &'a str>) -> Self {
        let keys: BTreeSet<String> = keys
            .filter(|key| key.chars().next().is_some_and(is_ideograph))
            .map(str::to_string)
            .collect();
        Self { keys }
    }

    /// Number of retained keys, multi-character ones included.
    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    pub fn keys(&self) -> &BTreeSet<String> {
        &self.keys
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.keys.contains(key)
    }

    /// Single-ideograph keys, the only ones a corpus character can match.
    pub fn characters(&self) -> BTreeSet<char> {
        self.keys
            .iter()
            .filter_map(|key| {
                let mut chars = key.chars();
                match (chars.next(), chars.next()) {
                    (Some(ch), None) => Some(ch),
                    _ => None,
                }
            })
            .collect()
    }
}

impl FromIterator<char> for ReferenceSet {
    fn from_iter<I: IntoIterator<Item = char>>(iter: I) -> Self {
        let keys: Vec<String> = iter.into_iter().map(String::from).collect();
        Self::from_keys(keys.iter().map(String::as_str))
    }
}

/// Ideograph-leading keys with an entry of the shape `"<key>": {` anywhere in `content`.
pub fn scan_reference_keys(content: &str) -> ReferenceSet {
    ReferenceSet::from_keys(
        regex_entry_key()
            .captures_iter(content)
            .filter_map(|caps| caps.get(1))
            .map(|m| m.as_str()),
    )
}

/// Ideograph-leading keys of a JSON object whose values are objects.
pub fn parse_reference_keys(content: &str) -> serde_json::Result<ReferenceSet> {
    let map: serde_json::Map<String, serde_json::Value> = serde_json::from_str(content)?;
    Ok(ReferenceSet::from_keys(
        map.iter()
            .filter(|(_, value)| value.is_object())
            .map(|(key, _)| key.as_str()),
    ))
}

pub fn try_load_reference(path: &Path, format: ReferenceFormat) -> Result<ReferenceSet> {
    let content = std::fs::read_to_string(path).map_err(|source| CoverageError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let set = match format {
        ReferenceFormat::Scan => scan_reference_keys(&content),
        ReferenceFormat::Json => {
            parse_reference_keys(&content).map_err(|source| CoverageError::Parse {
                path: path.to_path_buf(),
                source,
            })?
        }
    };
    debug!(
        keys = set.len(),
        characters = set.characters().len(),
        "reference keys extracted"
    );
    Ok(set)
}

/// Like [`try_load_reference`], but an unreadable file degrades to an empty set.
pub fn load_reference(path: &Path, format: ReferenceFormat) -> ReferenceSet {
    match try_load_reference(path, format) {
        Ok(set) => set,
        Err(err) => {
            warn!("{err}; continuing with an empty reference set");
            ReferenceSet::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    const STROKE_JS: &str = r#"
// Stroke order data
const STROKE_DATA = {
    "人": {
        "strokes": ["M 100 100 L 200 200"],
        "medians": [[[0, 0]]]
    },
    "大":{ "strokes": [] },
    "门" :  { "strokes": [] },
    "version": { "major": 1 },
    "meta": "not an entry",
    "人们": { "strokes": [] },
    "": { "strokes": [] }
};
"#;

    fn keys(set: &ReferenceSet) -> Vec<&str> {
        set.keys().iter().map(String::as_str).collect()
    }

    #[test]
    fn scan_keeps_every_ideograph_leading_key() {
        let set = scan_reference_keys(STROKE_JS);
        assert_eq!(keys(&set), vec!["人", "人们", "大"]);
        assert_eq!(set.len(), 3);
        assert!(set.contains_key("人们"));
    }

    #[test]
    fn compound_keys_count_but_never_match_characters() {
        let set = scan_reference_keys(r#"{ "人": {}, "人们": {}, "大家": {} }"#);
        assert_eq!(set.len(), 3);
        assert_eq!(set.characters(), ['人'].into_iter().collect());
    }

    #[test]
    fn scan_requires_colon_directly_after_key() {
        // `"门" :` has whitespace before the colon, which the entry shape does not allow
        assert!(!scan_reference_keys(STROKE_JS).contains_key("门"));
        assert!(scan_reference_keys(r#""门":{}"#).contains_key("门"));
        assert!(scan_reference_keys("\"门\":\n\t{}").contains_key("门"));
    }

    #[test]
    fn scan_of_unstructured_text_is_empty() {
        assert!(scan_reference_keys("").is_empty());
        assert!(scan_reference_keys("人大门 without any quotes").is_empty());
        assert!(scan_reference_keys(r#""人": ["array"]"#).is_empty());
    }

    #[test]
    fn parse_reads_top_level_object_keys() {
        let json = r#"{"人": {"strokes": []}, "大": {}, "大家": {}, "meta": {}, "门": "string value"}"#;
        let set = parse_reference_keys(json).unwrap();
        assert_eq!(keys(&set), vec!["人", "大", "大家"]);
        assert_eq!(set.characters(), ['人', '大'].into_iter().collect());
    }

    #[test]
    fn parse_rejects_non_json() {
        assert!(parse_reference_keys(STROKE_JS).is_err());
    }

    #[test]
    fn collects_from_characters() {
        let set: ReferenceSet = "门人a".chars().collect();
        assert_eq!(keys(&set), vec!["人", "门"]);
    }

    #[test]
    fn unreadable_file_degrades_to_empty() {
        let missing = Path::new("/nonexistent/stroke-data.js");
        assert!(try_load_reference(missing, ReferenceFormat::Scan).is_err());
        assert!(load_reference(missing, ReferenceFormat::Scan).is_empty());
    }

    #[test]
    fn json_mode_on_js_file_degrades_to_empty() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(STROKE_JS.as_bytes()).unwrap();
        assert!(load_reference(file.path(), ReferenceFormat::Json).is_empty());
        assert_eq!(load_reference(file.path(), ReferenceFormat::Scan).len(), 3);
    }
}

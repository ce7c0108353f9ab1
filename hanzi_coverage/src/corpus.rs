//! Corpus model and character collection.
//!
//! A corpus file is `{ chapters: [ { sentences: [ { simp?, trad? } ] } ] }`.
//! Every level is optional; absent or `null` fields simply contribute nothing.
//! A field of the wrong JSON type, or a list element that does not fit, is
//! skipped the same way instead of failing the whole corpus.

use std::collections::BTreeSet;
use std::path::Path;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

use crate::error::{CoverageError, Result};
use crate::extract::ideograph_set;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Corpus {
    #[serde(default, deserialize_with = "lenient_list")]
    pub chapters: Option<Vec<Chapter>>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Chapter {
    #[serde(default, deserialize_with = "lenient_list")]
    pub sentences: Option<Vec<Sentence>>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Sentence {
    /// Simplified-script text.
    #[serde(default, deserialize_with = "lenient_string")]
    pub simp: Option<String>,
    /// Traditional-script text.
    #[serde(default, deserialize_with = "lenient_string")]
    pub trad: Option<String>,
}

/// A JSON array keeps the elements that deserialize as `T`; anything else is `None`.
fn lenient_list<'de, D, T>(deserializer: D) -> std::result::Result<Option<Vec<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Array(items) => Some(
            items
                .into_iter()
                .filter_map(|item| T::deserialize(item).ok())
                .collect(),
        ),
        _ => None,
    })
}

fn lenient_string<'de, D>(deserializer: D) -> std::result::Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(text) => Some(text),
        _ => None,
    })
}

impl Corpus {
    pub fn from_json_str(content: &str) -> serde_json::Result<Self> {
        serde_json::from_str(content)
    }

    /// All sentences in chapter order, skipping chapters without a sentence list.
    pub fn sentences(&self) -> impl Iterator<Item = &Sentence> {
        self.chapters
            .iter()
            .flatten()
            .filter_map(|chapter| chapter.sentences.as_ref())
            .flatten()
    }
}

/// Read and parse a corpus file.
pub fn load_corpus(path: &Path) -> Result<Corpus> {
    let content = std::fs::read_to_string(path).map_err(|source| CoverageError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    Corpus::from_json_str(&content).map_err(|source| CoverageError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

/// Distinct ideographs across every sentence's simplified and traditional text.
pub fn collect_characters(corpus: &Corpus) -> BTreeSet<char> {
    let mut characters = BTreeSet::new();
    for sentence in corpus.sentences() {
        for text in [&sentence.simp, &sentence.trad].into_iter().flatten() {
            characters.append(&mut ideograph_set(text));
        }
    }
    characters
}

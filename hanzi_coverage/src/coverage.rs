//! Coverage analysis: which corpus characters already have stroke data.
//!
//! Everything here is pure. The same inputs always give the same
//! [`CoverageReport`], including the order of the frequency ranking.

use std::collections::BTreeSet;

use serde::Serialize;

use crate::reference::ReferenceSet;

/// Characters collected from one corpus, in configured corpus order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CorpusCharacters {
    pub name: String,
    pub characters: BTreeSet<char>,
    /// Set when the corpus could not be loaded; `characters` is then empty.
    pub load_error: Option<String>,
}

impl CorpusCharacters {
    pub fn loaded(name: impl Into<String>, characters: BTreeSet<char>) -> Self {
        Self {
            name: name.into(),
            characters,
            load_error: None,
        }
    }

    pub fn failed(name: impl Into<String>, error: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            characters: BTreeSet::new(),
            load_error: Some(error.into()),
        }
    }
}

/// Covered/missing split for one character set.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CoverageStats {
    pub total: usize,
    pub covered: BTreeSet<char>,
    pub missing: BTreeSet<char>,
    /// `None` when `total` is zero.
    pub ratio: Option<f64>,
}

impl CoverageStats {
    pub fn compute(characters: &BTreeSet<char>, reference: &BTreeSet<char>) -> Self {
        let covered: BTreeSet<char> = characters.intersection(reference).copied().collect();
        let missing: BTreeSet<char> = characters.difference(reference).copied().collect();
        Self {
            total: characters.len(),
            ratio: ratio(covered.len(), characters.len()),
            covered,
            missing,
        }
    }

    pub fn percent(&self) -> Option<f64> {
        self.ratio.map(|r| r * 100.0)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CorpusCoverage {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub load_error: Option<String>,
    #[serde(flatten)]
    pub stats: CoverageStats,
}

impl CorpusCoverage {
    pub fn is_loaded(&self) -> bool {
        self.load_error.is_none()
    }
}

/// A missing character and the corpora that use it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MissingRank {
    pub character: char,
    /// Number of distinct corpora containing the character.
    pub corpus_count: usize,
    pub corpora: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CoverageReport {
    /// Number of reference keys, compound keys included.
    pub reference_size: usize,
    pub reference: ReferenceSet,
    pub overall: CoverageStats,
    pub corpora: Vec<CorpusCoverage>,
    /// Sorted by `corpus_count` descending, then code point ascending.
    pub ranking: Vec<MissingRank>,
}

impl CoverageReport {
    /// Ranked entries used by at least `min_corpora` corpora.
    pub fn priority(&self, min_corpora: usize) -> impl Iterator<Item = &MissingRank> {
        self.ranking
            .iter()
            .filter(move |rank| rank.corpus_count >= min_corpora)
    }

    pub fn loaded_corpora(&self) -> usize {
        self.corpora.iter().filter(|c| c.is_loaded()).count()
    }
}

fn ratio(part: usize, whole: usize) -> Option<f64> {
    if whole == 0 {
        None
    } else {
        Some(part as f64 / whole as f64)
    }
}

pub fn aggregate(corpora: &[CorpusCharacters]) -> BTreeSet<char> {
    corpora
        .iter()
        .flat_map(|c| c.characters.iter().copied())
        .collect()
}

pub fn rank_missing(missing: &BTreeSet<char>, corpora: &[CorpusCharacters]) -> Vec<MissingRank> {
    let mut ranking: Vec<MissingRank> = missing
        .iter()
        .map(|&character| {
            let corpora: Vec<String> = corpora
                .iter()
                .filter(|c| c.characters.contains(&character))
                .map(|c| c.name.clone())
                .collect();
            MissingRank {
                character,
                corpus_count: corpora.len(),
                corpora,
            }
        })
        .collect();
    ranking.sort_by(|a, b| {
        b.corpus_count
            .cmp(&a.corpus_count)
            .then_with(|| a.character.cmp(&b.character))
    });
    ranking
}

pub fn analyze(corpora: &[CorpusCharacters], reference_set: &ReferenceSet) -> CoverageReport {
    let reference = &reference_set.characters();
    let overall = CoverageStats::compute(&aggregate(corpora), reference);
    let per_corpus = corpora
        .iter()
        .map(|c| CorpusCoverage {
            name: c.name.clone(),
            load_error: c.load_error.clone(),
            stats: CoverageStats::compute(&c.characters, reference),
        })
        .collect();
    let ranking = rank_missing(&overall.missing, corpora);
    CoverageReport {
        reference_size: reference_set.len(),
        reference: reference_set.clone(),
        overall,
        corpora: per_corpus,
        ranking,
    }
}

//! Configuration file support.
//!
//! Loads an optional `hanzi-coverage.toml`. Relative paths in the file are
//! resolved against `base_dir`, which itself is relative to the working
//! directory.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::warn;

use crate::error::{CoverageError, Result};
use crate::reference::ReferenceFormat;
use crate::report::RenderOptions;

pub const CONFIG_FILE_NAME: &str = "hanzi-coverage.toml";

/// A named corpus file.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CorpusSource {
    pub name: String,
    pub path: PathBuf,
}

impl CorpusSource {
    pub fn new(name: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        Self {
            name: name.into(),
            path: path.into(),
        }
    }

    /// Parse a `NAME=PATH` pair as given on the command line.
    pub fn parse_pair(raw: &str) -> std::result::Result<Self, String> {
        let (name, path) = raw
            .split_once('=')
            .ok_or_else(|| format!("expected NAME=PATH, got '{raw}'"))?;
        let name = name.trim();
        let path = path.trim();
        if name.is_empty() || path.is_empty() {
            return Err(format!("expected NAME=PATH, got '{raw}'"));
        }
        Ok(Self::new(name, path))
    }
}

/// Everything a run needs. No paths are hard-coded beyond these defaults.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    pub base_dir: PathBuf,
    /// Stroke-data file.
    pub reference: PathBuf,
    pub reference_format: ReferenceFormat,
    /// Report artifact path.
    pub output: PathBuf,
    /// Write the artifact at all.
    pub save: bool,
    #[serde(rename = "corpus")]
    pub corpora: Vec<CorpusSource>,
    pub report: RenderOptions,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            base_dir: PathBuf::from("."),
            reference: PathBuf::from("public/js/stroke-data.js"),
            reference_format: ReferenceFormat::Scan,
            output: PathBuf::from("character_analysis_result.txt"),
            save: true,
            corpora: vec![
                CorpusSource::new("sanzijing", "data/sanzijing.json"),
                CorpusSource::new("dizigui", "data/dizigui.json"),
                CorpusSource::new("daodejing", "data/daodejing.json"),
            ],
            report: RenderOptions::default(),
        }
    }
}

impl AnalysisConfig {
    pub fn from_toml_str(content: &str, origin: &Path) -> Result<Self> {
        let config: Self = toml::from_str(content).map_err(|e| CoverageError::Config {
            path: origin.to_path_buf(),
            message: e.to_string(),
        })?;
        config.validate(origin)?;
        Ok(config)
    }

    /// Load a config file that must exist and be valid.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|source| CoverageError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&content, path)
    }

    /// Load `hanzi-coverage.toml` from `dir` if present.
    /// Falls back to defaults when the file is missing or invalid.
    pub fn discover(dir: &Path) -> Self {
        let path = dir.join(CONFIG_FILE_NAME);
        if !path.exists() {
            return Self::default();
        }
        match Self::load(&path) {
            Ok(config) => config,
            Err(e) => {
                warn!("{e}; using built-in defaults");
                Self::default()
            }
        }
    }

    /// Reject corpora with an empty or repeated name. `origin` names the source in the error.
    pub fn validate(&self, origin: &Path) -> Result<()> {
        let mut seen = HashSet::new();
        for corpus in &self.corpora {
            if corpus.name.trim().is_empty() {
                return Err(CoverageError::Config {
                    path: origin.to_path_buf(),
                    message: format!("corpus at {} has an empty name", corpus.path.display()),
                });
            }
            if !seen.insert(corpus.name.as_str()) {
                return Err(CoverageError::Config {
                    path: origin.to_path_buf(),
                    message: format!("corpus '{}' is listed more than once", corpus.name),
                });
            }
        }
        Ok(())
    }

    pub fn resolve(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.base_dir.join(path)
        }
    }

    pub fn reference_path(&self) -> PathBuf {
        self.resolve(&self.reference)
    }

    pub fn output_path(&self) -> PathBuf {
        self.resolve(&self.output)
    }
}

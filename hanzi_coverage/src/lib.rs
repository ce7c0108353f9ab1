//! # hanzi-coverage
//!
//! **Stroke-data coverage for classical texts** - measures which characters
//! of a set of classical-text corpora already have stroke-order data.
//!
//! The pipeline is a single sequential pass:
//!
//! 1. Each configured corpus JSON file is loaded and reduced to its distinct
//!    CJK ideographs ([`corpus`], [`extract`]).
//! 2. The stroke-data file is scanned for ideograph entry keys ([`reference`]).
//! 3. Covered and missing sets, ratios and a ranking of missing characters by
//!    the number of corpora using them are computed ([`coverage`]).
//! 4. The result is rendered as text or JSON ([`report`]).
//!
//! ## Library Usage
//!
//! ```rust,no_run
//! use hanzi_coverage::config::AnalysisConfig;
//! use hanzi_coverage::report::{render_text, RenderOptions};
//! use hanzi_coverage::runner;
//! use std::path::Path;
//!
//! let config = AnalysisConfig::discover(Path::new("."));
//! let report = runner::run(&config);
//! print!("{}", render_text(&report, &RenderOptions::default()));
//! ```
//!
//! ## CLI Usage
//!
//! ```bash
//! hanzi-coverage                              # defaults or ./hanzi-coverage.toml
//! hanzi-coverage --base-dir ~/study --lang zh
//! hanzi-coverage --corpus lunyu=data/lunyu.json --min-corpora 2
//! hanzi-coverage --json --no-save
//! ```

/// Run configuration (`hanzi-coverage.toml`).
pub mod config;

/// Corpus model, loading and character collection.
pub mod corpus;

/// Covered/missing sets, ratios and the missing-character ranking.
pub mod coverage;

/// Error taxonomy.
pub mod error;

/// CJK ideograph extraction.
pub mod extract;

/// Reference set extraction from the stroke-data file.
pub mod reference;

mod regexes;

/// Text and JSON report rendering.
pub mod report;

/// The sequential analysis pipeline.
pub mod runner;

pub use config::{AnalysisConfig, CorpusSource};
pub use coverage::{CorpusCharacters, CoverageReport, MissingRank, analyze};
pub use error::CoverageError;
pub use extract::{extract_ideographs, is_ideograph};
pub use reference::{ReferenceFormat, ReferenceSet};

//! Sequential analysis pipeline: corpora, then reference, then coverage.

use tracing::{debug, info, warn};

use crate::config::{AnalysisConfig, CorpusSource};
use crate::corpus::{collect_characters, load_corpus};
use crate::coverage::{CorpusCharacters, CoverageReport, analyze};
use crate::reference::load_reference;

/// Load one corpus. A failed load yields an empty, marked entry instead of an error.
pub fn collect_corpus(config: &AnalysisConfig, source: &CorpusSource) -> CorpusCharacters {
    let path = config.resolve(&source.path);
    info!("analyzing {} ({})", source.name, path.display());
    match load_corpus(&path) {
        Ok(corpus) => {
            let characters = collect_characters(&corpus);
            info!("{}: {} unique characters", source.name, characters.len());
            CorpusCharacters::loaded(source.name.clone(), characters)
        }
        Err(err) => {
            warn!("{}: {}", source.name, err);
            CorpusCharacters::failed(source.name.clone(), err.to_string())
        }
    }
}

pub fn collect_corpora(config: &AnalysisConfig) -> Vec<CorpusCharacters> {
    config
        .corpora
        .iter()
        .map(|source| collect_corpus(config, source))
        .collect()
}

/// Run the whole analysis. Never fails; unreadable inputs degrade to empty sets.
pub fn run(config: &AnalysisConfig) -> CoverageReport {
    let corpora = collect_corpora(config);
    let reference_path = config.reference_path();
    let reference = load_reference(&reference_path, config.reference_format);
    info!(
        "{} characters with stroke data in {}",
        reference.len(),
        reference_path.display()
    );
    let report = analyze(&corpora, &reference);
    info!(
        "{}/{} corpora loaded",
        report.loaded_corpora(),
        report.corpora.len()
    );
    debug!(
        total = report.overall.total,
        covered = report.overall.covered.len(),
        missing = report.overall.missing.len(),
        "coverage computed"
    );
    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::path::PathBuf;
    use tempfile::TempDir;

    fn fixture_config(dir: &TempDir) -> AnalysisConfig {
        fs::create_dir_all(dir.path().join("data")).unwrap();
        fs::write(
            dir.path().join("data/a.json"),
            r#"{"chapters":[{"sentences":[{"simp":"门人"}]}]}"#,
        )
        .unwrap();
        fs::write(
            dir.path().join("data/b.json"),
            r#"{"chapters":[{"sentences":[{"simp":"人","trad":"大"}]}]}"#,
        )
        .unwrap();
        fs::write(
            dir.path().join("strokes.js"),
            "const STROKE_DATA = {\n  \"门\": { \"strokes\": [] }\n};\n",
        )
        .unwrap();
        AnalysisConfig {
            base_dir: dir.path().to_path_buf(),
            reference: PathBuf::from("strokes.js"),
            corpora: vec![
                CorpusSource::new("A", "data/a.json"),
                CorpusSource::new("B", "data/b.json"),
            ],
            ..AnalysisConfig::default()
        }
    }

    #[test]
    fn runs_against_fixture_files() {
        let temp = TempDir::new().expect("temp dir");
        let report = run(&fixture_config(&temp));
        assert_eq!(report.overall.total, 3);
        assert_eq!(report.reference_size, 1);
        assert_eq!(report.overall.missing.len(), 2);
        assert_eq!(report.ranking[0].character, '人');
        assert_eq!(report.ranking[0].corpus_count, 2);
    }

    #[test]
    fn missing_corpus_does_not_stop_the_run() {
        let temp = TempDir::new().expect("temp dir");
        let mut config = fixture_config(&temp);
        config
            .corpora
            .insert(1, CorpusSource::new("ghost", "data/ghost.json"));
        let report = run(&config);
        assert_eq!(report.corpora.len(), 3);
        assert!(!report.corpora[1].is_loaded());
        assert_eq!(report.overall.total, 3);
    }

    #[test]
    fn malformed_corpus_is_marked_failed() {
        let temp = TempDir::new().expect("temp dir");
        let config = fixture_config(&temp);
        fs::write(temp.path().join("data/b.json"), "{ not json").unwrap();
        let corpora = collect_corpora(&config);
        assert!(corpora[0].load_error.is_none());
        assert!(corpora[1].load_error.is_some());
        assert!(corpora[1].characters.is_empty());
    }

    #[test]
    fn unreadable_reference_means_zero_coverage() {
        let temp = TempDir::new().expect("temp dir");
        let mut config = fixture_config(&temp);
        config.reference = PathBuf::from("missing-strokes.js");
        let report = run(&config);
        assert_eq!(report.reference_size, 0);
        assert!(report.overall.covered.is_empty());
        assert_eq!(report.overall.ratio, Some(0.0));
        assert_eq!(report.overall.missing.len(), report.overall.total);
    }

    #[test]
    fn empty_corpus_list_is_not_applicable() {
        let temp = TempDir::new().expect("temp dir");
        let mut config = fixture_config(&temp);
        config.corpora.clear();
        let report = run(&config);
        assert_eq!(report.overall.ratio, None);
    }

    #[test]
    fn compound_reference_entries_are_counted() {
        let temp = TempDir::new().expect("temp dir");
        let config = fixture_config(&temp);
        fs::write(
            temp.path().join("strokes.js"),
            "const STROKE_DATA = {\n  \"门\": {},\n  \"人们\": {},\n  \"大家\": {}\n};\n",
        )
        .unwrap();
        let report = run(&config);
        assert_eq!(report.reference_size, 3);
        assert_eq!(report.overall.covered.len(), 1);
        assert_eq!(report.loaded_corpora(), 2);
    }

    #[test]
    fn repeated_runs_match() {
        let temp = TempDir::new().expect("temp dir");
        let config = fixture_config(&temp);
        assert_eq!(run(&config), run(&config));
    }
}

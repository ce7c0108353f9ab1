//! Text and JSON rendering of a [`CoverageReport`].
//!
//! The text form is what goes to stdout and to the saved artifact; both get
//! the exact same string.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::coverage::{CorpusCoverage, CoverageReport, CoverageStats};
use crate::error::{CoverageError, Result};

/// Characters per row in the missing-character list.
pub const ROW_WIDTH: usize = 20;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Lang {
    #[default]
    En,
    Zh,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct RenderOptions {
    pub lang: Lang,
    /// Only rank characters used by at least this many corpora.
    pub min_corpora: usize,
    /// List the reference characters after the summary.
    pub show_reference: bool,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            lang: Lang::En,
            min_corpora: 1,
            show_reference: false,
        }
    }
}

struct Labels {
    title: &'static str,
    total: &'static str,
    reference: &'static str,
    reference_list: &'static str,
    covered: &'static str,
    missing: &'static str,
    coverage: &'static str,
    not_applicable: &'static str,
    per_corpus: &'static str,
    corpus_total: &'static str,
    corpus_covered: &'static str,
    corpus_missing: &'static str,
    corpus_coverage: &'static str,
    corpus_missing_list: &'static str,
    load_failed: &'static str,
    missing_list: &'static str,
    ranking: &'static str,
    ranking_shared: &'static str,
    none_missing: &'static str,
    none_ranked: &'static str,
    unit: &'static str,
}

const EN: Labels = Labels {
    title: "Character Analysis Report",
    total: "Total unique characters",
    reference: "Existing stroke data",
    reference_list: "Existing characters",
    covered: "Covered characters",
    missing: "Missing characters",
    coverage: "Coverage rate",
    not_applicable: "N/A",
    per_corpus: "Detailed Statistics by Classic",
    corpus_total: "Total",
    corpus_covered: "Covered",
    corpus_missing: "Missing",
    corpus_coverage: "Coverage",
    corpus_missing_list: "Missing characters",
    load_failed: "Failed to load",
    missing_list: "Missing Characters",
    ranking: "Missing characters by number of classics",
    ranking_shared: "High-priority missing characters (appear in at least",
    none_missing: "All characters already have stroke data!",
    none_ranked: "No missing character reaches the threshold.",
    unit: "",
};

const ZH: Labels = Labels {
    title: "汉字笔画数据覆盖分析报告",
    total: "总计唯一汉字数量",
    reference: "已有笔画数据的汉字",
    reference_list: "已有汉字",
    covered: "已覆盖汉字数量",
    missing: "缺失笔画数据的汉字数量",
    coverage: "覆盖率",
    not_applicable: "不适用",
    per_corpus: "各经典详细统计",
    corpus_total: "总汉字数",
    corpus_covered: "已覆盖",
    corpus_missing: "缺失",
    corpus_coverage: "覆盖率",
    corpus_missing_list: "缺失汉字",
    load_failed: "加载失败",
    missing_list: "缺失笔画数据的汉字清单",
    ranking: "按出现频率排序（出现在多个经典中的汉字优先）",
    ranking_shared: "高优先级缺失汉字（至少出现在",
    none_missing: "所有汉字都已有笔画数据！",
    none_ranked: "没有达到阈值的缺失汉字。",
    unit: " 个",
};

fn labels(lang: Lang) -> &'static Labels {
    match lang {
        Lang::En => &EN,
        Lang::Zh => &ZH,
    }
}

/// Two-decimal percentage, or the not-applicable label for an empty set.
fn format_percent(stats: &CoverageStats, labels: &Labels) -> String {
    match stats.percent() {
        Some(pct) => format!("{:.2}%", pct),
        None => labels.not_applicable.to_string(),
    }
}

fn join_chars<'a>(chars: impl IntoIterator<Item = &'a char>) -> String {
    chars
        .into_iter()
        .map(|c| c.to_string())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Space-separated rows of at most [`ROW_WIDTH`] characters.
pub fn chunk_rows(chars: &[char]) -> Vec<String> {
    chars.chunks(ROW_WIDTH).map(|row| join_chars(row)).collect()
}

fn ranking_line(lang: Lang, character: char, count: usize, corpora: &[String]) -> String {
    match lang {
        Lang::En => {
            let noun = if count == 1 { "classic" } else { "classics" };
            format!(
                "  {}: appears in {} {} ({})",
                character,
                count,
                noun,
                corpora.join(", ")
            )
        }
        Lang::Zh => format!(
            "  {}: 出现在 {} 个经典中 ({})",
            character,
            count,
            corpora.join(", ")
        ),
    }
}

fn render_summary(out: &mut String, report: &CoverageReport, options: &RenderOptions) {
    let l = labels(options.lang);
    out.push_str(&format!("{}\n", l.title));
    out.push_str(&format!("{}\n\n", "=".repeat(50)));
    out.push_str(&format!("{}: {}\n", l.total, report.overall.total));
    out.push_str(&format!("{}: {}{}\n", l.reference, report.reference_size, l.unit));
    if options.show_reference {
        out.push_str(&format!(
            "{}: {}\n",
            l.reference_list,
            report
                .reference
                .keys()
                .iter()
                .map(String::as_str)
                .collect::<Vec<_>>()
                .join(" ")
        ));
    }
    out.push_str(&format!("{}: {}\n", l.covered, report.overall.covered.len()));
    out.push_str(&format!("{}: {}\n", l.missing, report.overall.missing.len()));
    out.push_str(&format!(
        "{}: {}\n",
        l.coverage,
        format_percent(&report.overall, l)
    ));
}

fn render_corpus(out: &mut String, corpus: &CorpusCoverage, l: &Labels) {
    out.push_str(&format!("\n{}:\n", corpus.name));
    if let Some(err) = &corpus.load_error {
        out.push_str(&format!("  {}: {}\n", l.load_failed, err));
        return;
    }
    let stats = &corpus.stats;
    out.push_str(&format!("  {}: {}\n", l.corpus_total, stats.total));
    out.push_str(&format!(
        "  {}: {}{}\n",
        l.corpus_covered,
        stats.covered.len(),
        l.unit
    ));
    out.push_str(&format!(
        "  {}: {}{}\n",
        l.corpus_missing,
        stats.missing.len(),
        l.unit
    ));
    out.push_str(&format!(
        "  {}: {}\n",
        l.corpus_coverage,
        format_percent(stats, l)
    ));
    if !stats.missing.is_empty() {
        out.push_str(&format!(
            "  {}: {}\n",
            l.corpus_missing_list,
            join_chars(&stats.missing)
        ));
    }
}

fn render_per_corpus(out: &mut String, report: &CoverageReport, options: &RenderOptions) {
    if report.corpora.is_empty() {
        return;
    }
    let l = labels(options.lang);
    out.push_str(&format!("\n{}:\n", l.per_corpus));
    for corpus in &report.corpora {
        render_corpus(out, corpus, l);
    }
}

fn render_missing_list(out: &mut String, report: &CoverageReport, options: &RenderOptions) {
    let l = labels(options.lang);
    let missing: Vec<char> = report.overall.missing.iter().copied().collect();
    if missing.is_empty() {
        // Nothing to list when there are no characters at all.
        if report.overall.total > 0 {
            out.push_str(&format!("\n{}\n", l.none_missing));
        }
        return;
    }
    out.push_str(&format!("\n{} ({}):\n", l.missing_list, missing.len()));
    for row in chunk_rows(&missing) {
        out.push_str(&format!("  {}\n", row));
    }
}

fn render_ranking(out: &mut String, report: &CoverageReport, options: &RenderOptions) {
    if report.ranking.is_empty() {
        return;
    }
    let l = labels(options.lang);
    if options.min_corpora > 1 {
        let suffix = match options.lang {
            Lang::En => format!(" {} classics)", options.min_corpora),
            Lang::Zh => format!(" {} 个经典中）", options.min_corpora),
        };
        out.push_str(&format!("\n{}{}:\n", l.ranking_shared, suffix));
    } else {
        out.push_str(&format!("\n{}:\n", l.ranking));
    }
    let mut any = false;
    for rank in report.priority(options.min_corpora) {
        any = true;
        out.push_str(&ranking_line(
            options.lang,
            rank.character,
            rank.corpus_count,
            &rank.corpora,
        ));
        out.push('\n');
    }
    if !any {
        out.push_str(&format!("  {}\n", l.none_ranked));
    }
}

/// Full human-readable report.
pub fn render_text(report: &CoverageReport, options: &RenderOptions) -> String {
    let mut out = String::new();
    render_summary(&mut out, report, options);
    render_per_corpus(&mut out, report, options);
    render_missing_list(&mut out, report, options);
    render_ranking(&mut out, report, options);
    out
}

/// Pretty-printed JSON form of the report.
pub fn render_json(report: &CoverageReport) -> serde_json::Result<String> {
    serde_json::to_string_pretty(report)
}

/// Write a rendered report, creating parent directories as needed.
pub fn write_artifact(path: &Path, content: &str) -> Result<()> {
    let to_write_error = |source| CoverageError::Write {
        path: path.to_path_buf(),
        source,
    };
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(to_write_error)?;
    }
    std::fs::write(path, content).map_err(to_write_error)
}

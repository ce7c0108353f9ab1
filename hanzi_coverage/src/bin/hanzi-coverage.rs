use std::any::Any;
use std::panic;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{error, info};

use hanzi_coverage::config::{AnalysisConfig, CorpusSource};
use hanzi_coverage::reference::ReferenceFormat;
use hanzi_coverage::report::{Lang, render_json, render_text, write_artifact};
use hanzi_coverage::runner;

/// Stroke-data coverage report for classical-text corpora.
///
/// Reads every configured corpus, collects its distinct CJK ideographs and
/// compares them with the entries of a stroke-data file. The report goes to
/// stdout and, unless `--no-save` is given, to the output file as well.
#[derive(Parser, Debug)]
#[command(name = "hanzi-coverage", author, version, about, long_about = None)]
struct Args {
    /// Configuration file. Defaults to ./hanzi-coverage.toml when present.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Directory that relative corpus, reference and output paths resolve against.
    #[arg(long)]
    base_dir: Option<PathBuf>,

    /// Stroke-data file.
    #[arg(short, long)]
    reference: Option<PathBuf>,

    /// How to read the stroke-data file.
    #[arg(long, value_enum)]
    reference_format: Option<ReferenceFormat>,

    /// Report artifact path.
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Print the report without writing the artifact.
    #[arg(long)]
    no_save: bool,

    /// Corpus as NAME=PATH. Repeat for several; replaces the configured list.
    #[arg(long = "corpus", value_name = "NAME=PATH", value_parser = CorpusSource::parse_pair)]
    corpora: Vec<CorpusSource>,

    /// Report label language.
    #[arg(long, value_enum)]
    lang: Option<Lang>,

    /// Only rank missing characters used by at least this many corpora.
    #[arg(long)]
    min_corpora: Option<usize>,

    /// List the characters that already have stroke data.
    #[arg(long)]
    show_reference: bool,

    /// Emit the report as JSON.
    #[arg(long)]
    json: bool,

    /// Log level when RUST_LOG is not set.
    #[arg(long, default_value = "info")]
    log_level: String,
}

fn install_broken_pipe_handler() {
    let default_hook = panic::take_hook();
    panic::set_hook(Box::new(move |info| {
        let payload = info.payload();
        let is_broken = <dyn Any>::downcast_ref::<&str>(payload)
            .is_some_and(|s| s.contains("Broken pipe"))
            || <dyn Any>::downcast_ref::<String>(payload)
                .is_some_and(|s| s.contains("Broken pipe"));

        if is_broken {
            std::process::exit(0);
        }

        default_hook(info);
    }));
}

fn init_logging(level: &str) {
    // Logs go to stderr; stdout carries only the report
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level)),
        )
        .init();
}

fn resolve_config(args: &Args) -> Result<AnalysisConfig> {
    let mut config = match &args.config {
        Some(path) => AnalysisConfig::load(path)
            .with_context(|| format!("Failed to load config {}", path.display()))?,
        None => AnalysisConfig::discover(Path::new(".")),
    };

    if let Some(dir) = &args.base_dir {
        config.base_dir = dir.clone();
    }
    if let Some(reference) = &args.reference {
        config.reference = reference.clone();
    }
    if let Some(format) = args.reference_format {
        config.reference_format = format;
    }
    if let Some(output) = &args.output {
        config.output = output.clone();
    }
    if args.no_save {
        config.save = false;
    }
    if !args.corpora.is_empty() {
        config.corpora = args.corpora.clone();
        config
            .validate(Path::new("--corpus"))
            .context("Invalid corpus list")?;
    }
    if let Some(lang) = args.lang {
        config.report.lang = lang;
    }
    if let Some(min) = args.min_corpora {
        config.report.min_corpora = min;
    }
    if args.show_reference {
        config.report.show_reference = true;
    }
    Ok(config)
}

fn run(args: Args) -> Result<()> {
    let config = resolve_config(&args)?;
    info!(
        "hanzi-coverage v{}: {} corpora",
        env!("CARGO_PKG_VERSION"),
        config.corpora.len()
    );

    let report = runner::run(&config);
    let rendered = if args.json {
        let mut json = render_json(&report).context("Failed to serialize report")?;
        json.push('\n');
        json
    } else {
        render_text(&report, &config.report)
    };

    print!("{}", rendered);

    if config.save {
        let path = config.output_path();
        match write_artifact(&path, &rendered) {
            Ok(()) => info!("results saved to {}", path.display()),
            Err(e) => error!("{e}"),
        }
    }
    Ok(())
}

fn main() -> ExitCode {
    install_broken_pipe_handler();

    let args = Args::parse();
    init_logging(&args.log_level);

    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("[hanzi-coverage] Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

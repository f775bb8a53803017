use std::io::Read;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use seo_lens::{render, Analyzer, AnalyzerError, HashingEmbedder, KeywordExtractor};

#[derive(Parser)]
#[command(
    name = "seo-lens",
    about = "Readability, keyphrase and engagement analysis for prose",
    version
)]
struct Cli {
    /// File to analyze (reads stdin if omitted)
    file: Option<PathBuf>,

    /// Print the report as JSON
    #[arg(long)]
    json: bool,

    /// Number of keyphrases to report
    #[arg(long)]
    top_n: Option<usize>,
}

fn read_input(file: Option<&PathBuf>) -> anyhow::Result<String> {
    match file {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("reading {}", path.display())),
        None => {
            let mut input = String::new();
            std::io::stdin()
                .read_to_string(&mut input)
                .context("reading stdin")?;
            Ok(input)
        }
    }
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let text = read_input(cli.file.as_ref())?;

    // Built once; every analysis shares the same model handle.
    let mut extractor = KeywordExtractor::new(Arc::new(HashingEmbedder::default()));
    if let Some(top_n) = cli.top_n {
        extractor = extractor.with_top_n(top_n);
    }
    let analyzer = Analyzer::new(extractor);

    match analyzer.analyze(&text) {
        Ok(report) if cli.json => println!("{}", render::json(&report)?),
        Ok(report) => print!("{}", render::text(&report)),
        Err(AnalyzerError::EmptyInput) => println!("Please paste some text to analyze."),
        Err(e) => return Err(e.into()),
    }
    Ok(())
}

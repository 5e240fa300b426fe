use std::env;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use titlelens_core::cloud::{show_cloud, write_cloud, write_preview};
use titlelens_core::{run_analysis, AnalysisConfig};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

mod report;

#[derive(Parser, Debug)]
#[command(author, version, about = "Word frequency and sentiment analysis of popular titles", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Analyze a tab-separated title table and draw its word cloud
    Analyze(AnalyzeArgs),
}

#[derive(Args, Debug, Default)]
struct AnalyzeArgs {
    /// Title table (falls back to TITLELENS_INPUT, then the config file)
    input: Option<PathBuf>,
    /// TOML configuration file
    #[arg(long)]
    config: Option<PathBuf>,
    /// Number of most popular titles to analyze
    #[arg(long)]
    top: Option<usize>,
    /// Minimum occurrences for a word to appear in the result table
    #[arg(long)]
    min_count: Option<u64>,
    /// Also keep the word cloud SVG at this path
    #[arg(long)]
    output: Option<PathBuf>,
    /// Do not open the word cloud in a viewer
    #[arg(long)]
    no_show: bool,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .json()
        .init();

    let cli = Cli::parse();

    match cli.command {
        Command::Analyze(args) => handle_analyze(args),
    }
}

fn handle_analyze(args: AnalyzeArgs) -> Result<()> {
    dotenvy::dotenv().ok();

    let show = !args.no_show;
    let config = resolve_config(args)?;
    let output_path = config.cloud.output_path.clone();

    let report = run_analysis(config).context("title analysis failed")?;

    println!("{}", report::result_table(&report.result)?);
    match report.mean_sentiment {
        Some(mean) => println!("Mean word sentiment: {mean:.3}"),
        None => println!("Mean word sentiment: n/a (no words left after filtering)"),
    }

    if let Some(path) = &output_path {
        write_cloud(path, &report.cloud_svg)
            .with_context(|| format!("failed to write word cloud to {}", path.display()))?;
        println!("Word cloud saved to {}", path.display());
    }
    if show {
        let shown = match &output_path {
            Some(path) => path.clone(),
            None => write_preview(&report.cloud_svg).context("failed to stage word cloud")?,
        };
        if let Err(err) = show_cloud(&shown) {
            warn!(error = %err, path = %shown.display(), "word cloud viewer unavailable");
            println!("Word cloud: {}", shown.display());
        }
    }

    info!(
        words = report.result.height(),
        placed = report.cloud.words.len(),
        "analysis finished"
    );
    Ok(())
}

fn resolve_config(args: AnalyzeArgs) -> Result<AnalysisConfig> {
    let mut config = match &args.config {
        Some(path) => AnalysisConfig::load(path)
            .with_context(|| format!("failed to load config {}", path.display()))?,
        None => AnalysisConfig::default(),
    };

    if let Some(input) = args
        .input
        .or_else(|| env::var_os("TITLELENS_INPUT").map(PathBuf::from))
    {
        config.input_path = Some(input);
    }
    if let Some(top) = args.top {
        config.top_k = top;
    }
    if let Some(min_count) = args.min_count {
        config.min_count = min_count;
    }
    if let Some(output) = args.output {
        config.cloud.output_path = Some(output);
    }

    config.validate()?;
    if config.input_path.is_none() {
        anyhow::bail!("no input given: pass a path, set TITLELENS_INPUT or set input_path in the config");
    }
    Ok(config)
}

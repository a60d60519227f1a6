/*!
 * Command-line interface for fsascan
 */

use std::process;
use std::sync::Arc;
use std::time::Instant;

use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{debug, error, warn};

use fsascan::analyzer::Analyzer;
use fsascan::classify::{InferSniffer, SignatureSniffer, TypeClassifier};
use fsascan::config::{Args, Config};
use fsascan::report::Reporter;
use fsascan::utils::count_files;

fn main() {
    // Logs go to stderr so table/JSON output stays clean on stdout
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = run() {
        error!("{}", e);
        process::exit(1);
    }
}

fn run() -> fsascan::Result<()> {
    // Parse command line arguments
    let args = Args::parse();

    // Create and validate configuration; both fail before any traversal
    let config = Config::from_args(args)?;
    config.validate()?;

    // Progress bar for the traversal
    let progress = ProgressBar::new(0);
    progress.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} {prefix:.bold.cyan} {wide_msg:.dim.white} {pos}/{len}")
            .unwrap_or_else(|_| ProgressStyle::default_bar()),
    );
    progress.enable_steady_tick(std::time::Duration::from_millis(100));
    progress.set_prefix("Categorizing");

    // Count files up front for progress tracking
    match count_files(&config.root) {
        Ok(count) => progress.set_length(count),
        Err(e) => warn!("failed to count files for progress tracking: {}", e),
    }

    // The sniffing decision is made once here and holds for the whole run
    let sniffer: Option<Box<dyn SignatureSniffer + Send + Sync>> = if config.extensions_only {
        None
    } else {
        Some(Box::new(InferSniffer))
    };
    let classifier = TypeClassifier::new(sniffer);
    let analyzer = Analyzer::new(config.clone(), classifier, Arc::new(progress.clone()));

    let start_time = Instant::now();
    let result = analyzer.analyze()?;
    let duration = start_time.elapsed();

    progress.finish_and_clear();
    debug!(
        "analyzed {} files under {} in {:.2?}",
        result.total_files(),
        config.root.display(),
        duration
    );

    let reporter = Reporter::new(config.format);
    reporter.print_report(&result)
}

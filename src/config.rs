/*!
 * Configuration handling for fsascan
 */

use std::path::PathBuf;

use clap::Parser;

use crate::ensure;
use crate::error::Result;
use crate::report::ReportFormat;
use crate::utils::parse_threshold;

/// Command-line arguments for fsascan
#[derive(Parser, Debug, Clone)]
#[clap(
    name = "fsa",
    version = env!("CARGO_PKG_VERSION"),
    about = "Categorize files in a directory tree and flag large or unusually permissioned ones",
    long_about = "Recursively scans a directory tree, classifies each regular file into a \
                  content category, totals sizes per category, and flags files above a size \
                  threshold or carrying unusual permission bits."
)]
pub struct Args {
    /// Directory to analyze
    #[clap(short = 'd', long = "directory", default_value = ".")]
    pub directory: String,

    /// Size threshold above which files are flagged as large
    /// (integer with optional B/KiB/MiB/GiB/TiB/PiB suffix)
    #[clap(short = 't', long = "threshold", default_value = "10MiB")]
    pub threshold: String,

    /// Classify by file extension only, skipping content-signature sniffing
    #[clap(long)]
    pub extensions_only: bool,

    /// Report output format
    #[clap(long, value_enum, default_value_t = ReportFormat::Table)]
    pub format: ReportFormat,
}

/// Validated application configuration
#[derive(Clone, Debug)]
pub struct Config {
    /// Root directory to analyze
    pub root: PathBuf,

    /// Large-file threshold in bytes
    pub threshold_bytes: u64,

    /// Skip content-signature sniffing for the whole run
    pub extensions_only: bool,

    /// Report output format
    pub format: ReportFormat,
}

impl Config {
    /// Create configuration from command-line arguments. Fails when the
    /// threshold string does not match the accepted grammar.
    pub fn from_args(args: Args) -> Result<Self> {
        Ok(Self {
            root: PathBuf::from(args.directory),
            threshold_bytes: parse_threshold(&args.threshold)?,
            extensions_only: args.extensions_only,
            format: args.format,
        })
    }

    /// Validate the configuration before any traversal starts.
    pub fn validate(&self) -> Result<()> {
        ensure!(
            self.root.exists(),
            Config,
            "target directory not found: {}",
            self.root.display()
        );
        ensure!(
            self.root.is_dir(),
            Config,
            "not a directory: {}",
            self.root.display()
        );
        Ok(())
    }
}

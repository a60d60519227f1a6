/*!
 * fsascan - categorize files in a directory tree and flag large or
 * unusually permissioned ones
 *
 * This library walks a filesystem subtree once, classifies every regular
 * file into a fixed content category (content signatures first, extensions
 * as fallback), accumulates per-category size totals, and records the files
 * that exceed a size threshold or carry unusual permission bits.
 */

pub mod analyzer;
pub mod classify;
pub mod config;
pub mod error;
pub mod permissions;
pub mod report;
pub mod types;
pub mod utils;


// Re-export main components for easier access
pub use analyzer::Analyzer;
pub use classify::{InferSniffer, Signature, SignatureSniffer, TypeClassifier};
pub use config::{Args, Config};
pub use error::{AnalyzerError, Result};
pub use permissions::{find_unusual_permissions, interpret};
pub use report::{ReportFormat, Reporter};
pub use types::{AnalysisResult, Category, CategoryBucket, FileRecord, PermissionSet, SubjectPerms};
pub use utils::{convert_size, count_files, format_size, format_size_with_bytes, parse_threshold};

/// Version of the library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

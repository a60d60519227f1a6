/*!
 * Directory traversal and accumulation
 *
 * Single-pass, pre-order depth-first walk that builds one `AnalysisResult`
 * per run. Symlinks are skipped outright, unreadable subtrees and vanished
 * entries are logged and skipped; only a root that cannot be opened at all
 * aborts the run.
 */

use std::fs::{self, DirEntry};
use std::os::unix::fs::PermissionsExt;
use std::path::Path;
use std::sync::Arc;

use indicatif::ProgressBar;
use tracing::warn;

use crate::classify::TypeClassifier;
use crate::config::Config;
use crate::error::{Result, ResultExt};
use crate::types::{AnalysisResult, FileRecord};

/// One-shot filesystem analyzer.
pub struct Analyzer {
    /// Analyzer configuration
    config: Config,
    /// Classifier with its strategy fixed for the whole run
    classifier: TypeClassifier,
    /// Progress bar
    pub progress: Arc<ProgressBar>,
}

impl Analyzer {
    /// Create a new analyzer. The classifier's sniffing decision is already
    /// baked in and holds for the entire traversal.
    pub fn new(config: Config, classifier: TypeClassifier, progress: Arc<ProgressBar>) -> Self {
        Self {
            config,
            classifier,
            progress,
        }
    }

    /// Walk the configured root and accumulate the full result.
    ///
    /// Fails only when the root directory itself cannot be opened;
    /// everything below that is per-entry recovery.
    pub fn analyze(&self) -> Result<AnalysisResult> {
        let mut result = AnalysisResult::new();
        self.traverse(&self.config.root, &mut result)?;
        Ok(result)
    }

    /// Recurse into `dir`, pre-order. Sibling order is whatever the
    /// directory listing yields; nothing here sorts.
    fn traverse(&self, dir: &Path, result: &mut AnalysisResult) -> Result<()> {
        let entries = fs::read_dir(dir)?;

        for entry in entries {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    warn!(dir = %dir.display(), error = %e, "skipping unreadable entry");
                    continue;
                }
            };
            let file_type = match entry.file_type() {
                Ok(file_type) => file_type,
                Err(e) => {
                    warn!(path = %entry.path().display(), error = %e, "skipping entry: cannot determine type");
                    continue;
                }
            };

            // Symlinks are neither followed nor recorded: following risks
            // cycles and double-counts shared targets.
            if file_type.is_symlink() {
                continue;
            }

            if file_type.is_dir() {
                if let Err(e) = self.traverse(&entry.path(), result) {
                    warn!(path = %entry.path().display(), error = %e, "skipping subtree");
                }
            } else if file_type.is_file() {
                if let Err(e) = self.process_file(&entry, result) {
                    if e.is_recoverable() {
                        warn!(path = %entry.path().display(), error = %e, "skipping file");
                    } else {
                        return Err(e);
                    }
                }
            }
            // Other node kinds (fifos, sockets, devices) are out of scope.
        }

        Ok(())
    }

    /// Stat, classify and record a single regular file.
    fn process_file(&self, entry: &DirEntry, result: &mut AnalysisResult) -> Result<()> {
        self.progress.inc(1);

        let path = entry.path();
        let file_name = path
            .file_name()
            .unwrap_or_default()
            .to_string_lossy()
            .to_string();
        self.progress
            .set_message(format!("Current file: {}", truncate_name(&file_name)));

        let metadata = entry
            .metadata()
            .with_context(|| format!("failed to stat {}", path.display()))?;
        let record = FileRecord::new(path.clone(), metadata.len(), metadata.permissions().mode());
        let category = self.classifier.classify(&path)?;

        result.record(category, record, self.config.threshold_bytes);
        Ok(())
    }
}

/// Truncate long file names for the progress line, always cutting on a
/// character boundary.
pub(crate) fn truncate_name(file_name: &str) -> String {
    if file_name.chars().count() <= 40 {
        return file_name.to_string();
    }
    let start = file_name
        .char_indices()
        .rev()
        .nth(36)
        .map(|(i, _)| i)
        .unwrap_or(0);
    format!("...{}", &file_name[start..])
}

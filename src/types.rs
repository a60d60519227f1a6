/*!
 * Core types and data structures for the fsascan analyzer
 */

use std::collections::BTreeMap;
use std::path::PathBuf;

use serde::Serialize;

use crate::permissions;
use crate::utils::format_size;

/// Content category a file can be assigned to.
///
/// Closed enumeration; both classifier tiers map into this set and neither
/// invents new members. Ordering follows declaration order, which is also
/// the report order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Text,
    Image,
    Audio,
    Video,
    Document,
    Presentation,
    Spreadsheet,
    Executable,
    Archive,
    Other,
}

impl Category {
    /// All categories in report order.
    pub const ALL: [Category; 10] = [
        Category::Text,
        Category::Image,
        Category::Audio,
        Category::Video,
        Category::Document,
        Category::Presentation,
        Category::Spreadsheet,
        Category::Executable,
        Category::Archive,
        Category::Other,
    ];

    /// Lowercase name used in tables and JSON output.
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Text => "text",
            Category::Image => "image",
            Category::Audio => "audio",
            Category::Video => "video",
            Category::Document => "document",
            Category::Presentation => "presentation",
            Category::Spreadsheet => "spreadsheet",
            Category::Executable => "executable",
            Category::Archive => "archive",
            Category::Other => "other",
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Read/write/execute flags for one permission subject.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SubjectPerms {
    pub read: bool,
    pub write: bool,
    pub execute: bool,
}

impl SubjectPerms {
    /// Granted letters only, e.g. `rw` or `rx` or empty.
    pub fn letters(&self) -> String {
        let mut s = String::with_capacity(3);
        if self.read {
            s.push('r');
        }
        if self.write {
            s.push('w');
        }
        if self.execute {
            s.push('x');
        }
        s
    }
}

/// Structured decode of the nine standard POSIX permission bits.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct PermissionSet {
    pub usr: SubjectPerms,
    pub grp: SubjectPerms,
    pub oth: SubjectPerms,
}

impl PermissionSet {
    /// Compact report rendering, e.g. `usr:rwx grp:rx oth:r`.
    pub fn compact(&self) -> String {
        format!(
            "usr:{} grp:{} oth:{}",
            self.usr.letters(),
            self.grp.letters(),
            self.oth.letters()
        )
    }
}

/// A single regular file observed during traversal.
///
/// Immutable once built from a stat. Formatted size and permission views are
/// derived on demand rather than stored redundantly.
#[derive(Debug, Clone, Serialize)]
pub struct FileRecord {
    /// Path as encountered during traversal
    pub path: PathBuf,
    /// Size in bytes
    pub size: u64,
    /// Raw `st_mode` bitmask
    pub mode: u32,
}

impl FileRecord {
    pub fn new(path: PathBuf, size: u64, mode: u32) -> Self {
        Self { path, size, mode }
    }

    /// Human-scaled size, e.g. `1.5 KiB`.
    pub fn formatted_size(&self) -> String {
        format_size(self.size)
    }

    /// Structured permission decode of `mode`.
    pub fn permissions(&self) -> PermissionSet {
        permissions::interpret(self.mode)
    }

    /// Unusual-permission findings for `mode`, in fixed order.
    pub fn unusual_permissions(&self) -> Vec<&'static str> {
        permissions::find_unusual_permissions(self.mode)
    }
}

/// Accumulator for one category: running byte total plus the files seen,
/// in traversal order.
#[derive(Debug, Clone, Default, Serialize)]
pub struct CategoryBucket {
    /// Sum of `files[].size`
    pub total_size: u64,
    /// Files in traversal order
    pub files: Vec<FileRecord>,
}

impl CategoryBucket {
    /// Human-scaled bucket total.
    pub fn formatted_total(&self) -> String {
        format_size(self.total_size)
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}

/// Complete output of one analysis run.
///
/// All ten categories are always present in `by_category`, even when empty.
#[derive(Debug, Clone, Serialize)]
pub struct AnalysisResult {
    /// Per-category accumulators, keyed in report order
    pub by_category: BTreeMap<Category, CategoryBucket>,
    /// Path -> formatted size, for files strictly above the threshold
    pub large_files: BTreeMap<PathBuf, String>,
    /// Path -> ordered finding names, for files with a non-empty finding list
    pub unusual_permission_files: BTreeMap<PathBuf, Vec<&'static str>>,
}

impl AnalysisResult {
    pub fn new() -> Self {
        let mut by_category = BTreeMap::new();
        for category in Category::ALL {
            by_category.insert(category, CategoryBucket::default());
        }
        Self {
            by_category,
            large_files: BTreeMap::new(),
            unusual_permission_files: BTreeMap::new(),
        }
    }

    /// Record a file in its category bucket and update the side lists.
    pub fn record(&mut self, category: Category, record: FileRecord, threshold: u64) {
        if record.size > threshold {
            self.large_files
                .insert(record.path.clone(), record.formatted_size());
        }
        let findings = record.unusual_permissions();
        if !findings.is_empty() {
            self.unusual_permission_files
                .insert(record.path.clone(), findings);
        }
        let bucket = self.by_category.entry(category).or_default();
        bucket.total_size += record.size;
        bucket.files.push(record);
    }

    /// Total number of files recorded across all buckets.
    pub fn total_files(&self) -> usize {
        self.by_category.values().map(|b| b.files.len()).sum()
    }
}

impl Default for AnalysisResult {
    fn default() -> Self {
        Self::new()
    }
}

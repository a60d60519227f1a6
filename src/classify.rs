/*!
 * File type classification
 *
 * Two-tier strategy: content-signature sniffing when a sniffer capability is
 * available, extension lookup otherwise. The sniffing decision is made once
 * at construction and holds for the whole run.
 */

use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::Path;

use once_cell::sync::Lazy;
use regex::Regex;
use tracing::warn;

use crate::error::{AnalyzerError, Result};
use crate::types::Category;

/// MIME-like signature read from a file's leading bytes.
#[derive(Debug, Clone)]
pub struct Signature {
    /// `major/minor` type string, e.g. `image/png`
    pub mime: String,
    /// Free-text description of the detected format
    pub description: String,
}

/// Content-signature sniffing capability.
///
/// Injected into the classifier so tests can substitute a mock and so the
/// present-or-absent decision is explicit rather than ambient state.
pub trait SignatureSniffer {
    /// Inspect the file's leading bytes. `Ok(None)` means the signature is
    /// not recognized, which is not an error.
    fn sniff(&self, path: &Path) -> Result<Option<Signature>>;
}

/// Sniffer backed by the `infer` signature database.
pub struct InferSniffer;

impl SignatureSniffer for InferSniffer {
    fn sniff(&self, path: &Path) -> Result<Option<Signature>> {
        match infer::get_from_path(path) {
            Ok(Some(kind)) => Ok(Some(Signature {
                mime: kind.mime_type().to_string(),
                description: describe_matcher(kind.matcher_type()),
            })),
            Ok(None) => Ok(None),
            Err(e) => Err(map_classify_io(path, e)),
        }
    }
}

/// Human-readable description for an `infer` matcher family, standing in
/// for the raw text a full signature database would produce.
fn describe_matcher(matcher: infer::MatcherType) -> String {
    match matcher {
        infer::MatcherType::App => "executable binary data",
        infer::MatcherType::Archive => "archive or compressed data",
        infer::MatcherType::Audio => "audio data",
        infer::MatcherType::Book => "electronic book document",
        infer::MatcherType::Doc => "office document",
        infer::MatcherType::Font => "font data",
        infer::MatcherType::Image => "image data",
        infer::MatcherType::Text => "text",
        infer::MatcherType::Video => "video data",
        _ => "data",
    }
    .to_string()
}

/// Exact `application/*` MIME to category lookups.
static APPLICATION_MIME_TO_CATEGORY: Lazy<HashMap<&'static str, Category>> = Lazy::new(|| {
    HashMap::from([
        ("application/pdf", Category::Document),
        ("application/msword", Category::Document),
        (
            "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
            Category::Document,
        ),
        ("application/vnd.oasis.opendocument.text", Category::Document),
        ("application/rtf", Category::Document),
        ("application/epub+zip", Category::Document),
        ("application/vnd.ms-powerpoint", Category::Presentation),
        (
            "application/vnd.openxmlformats-officedocument.presentationml.presentation",
            Category::Presentation,
        ),
        (
            "application/vnd.oasis.opendocument.presentation",
            Category::Presentation,
        ),
        ("application/vnd.ms-excel", Category::Spreadsheet),
        (
            "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet",
            Category::Spreadsheet,
        ),
        (
            "application/vnd.oasis.opendocument.spreadsheet",
            Category::Spreadsheet,
        ),
        ("application/zip", Category::Archive),
        ("application/gzip", Category::Archive),
        ("application/x-tar", Category::Archive),
        ("application/x-bzip2", Category::Archive),
        ("application/x-xz", Category::Archive),
        ("application/x-7z-compressed", Category::Archive),
        ("application/vnd.rar", Category::Archive),
        ("application/x-rar-compressed", Category::Archive),
        ("application/zstd", Category::Archive),
        ("application/x-executable", Category::Executable),
        ("application/x-pie-executable", Category::Executable),
        ("application/x-sharedlib", Category::Executable),
        ("application/x-mach-binary", Category::Executable),
        ("application/x-msdownload", Category::Executable),
        (
            "application/vnd.microsoft.portable-executable",
            Category::Executable,
        ),
        ("application/json", Category::Text),
        ("application/xml", Category::Text),
        ("application/javascript", Category::Text),
    ])
});

/// Category-indicating terms scanned in a sniffer's free-text description.
static TERM_TO_CATEGORY: Lazy<HashMap<&'static str, Category>> = Lazy::new(|| {
    HashMap::from([
        ("executable", Category::Executable),
        ("shared object", Category::Executable),
        ("script", Category::Executable),
        ("archive", Category::Archive),
        ("compressed", Category::Archive),
        ("document", Category::Document),
        ("spreadsheet", Category::Spreadsheet),
        ("presentation", Category::Presentation),
    ])
});

/// Leftmost case-insensitive match over the term table's keys.
static TERM_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?i)shared object|executable|script|archive|compressed|document|spreadsheet|presentation",
    )
    .unwrap()
});

/// File extension (with leading dot, case-sensitive) to category lookups.
static EXTENSION_TO_CATEGORY: Lazy<HashMap<&'static str, Category>> = Lazy::new(|| {
    HashMap::from([
        (".txt", Category::Text),
        (".md", Category::Text),
        (".log", Category::Text),
        (".json", Category::Text),
        (".xml", Category::Text),
        (".yaml", Category::Text),
        (".yml", Category::Text),
        (".toml", Category::Text),
        (".html", Category::Text),
        (".png", Category::Image),
        (".jpg", Category::Image),
        (".jpeg", Category::Image),
        (".gif", Category::Image),
        (".bmp", Category::Image),
        (".svg", Category::Image),
        (".webp", Category::Image),
        (".tiff", Category::Image),
        (".ico", Category::Image),
        (".mp3", Category::Audio),
        (".wav", Category::Audio),
        (".flac", Category::Audio),
        (".ogg", Category::Audio),
        (".aac", Category::Audio),
        (".m4a", Category::Audio),
        (".mp4", Category::Video),
        (".avi", Category::Video),
        (".mkv", Category::Video),
        (".mov", Category::Video),
        (".webm", Category::Video),
        (".wmv", Category::Video),
        (".pdf", Category::Document),
        (".doc", Category::Document),
        (".docx", Category::Document),
        (".odt", Category::Document),
        (".rtf", Category::Document),
        (".epub", Category::Document),
        (".ppt", Category::Presentation),
        (".pptx", Category::Presentation),
        (".odp", Category::Presentation),
        (".xls", Category::Spreadsheet),
        (".xlsx", Category::Spreadsheet),
        (".ods", Category::Spreadsheet),
        (".csv", Category::Spreadsheet),
        (".exe", Category::Executable),
        (".dll", Category::Executable),
        (".so", Category::Executable),
        (".msi", Category::Executable),
        (".bin", Category::Executable),
        (".sh", Category::Executable),
        (".zip", Category::Archive),
        (".tar", Category::Archive),
        (".gz", Category::Archive),
        (".tgz", Category::Archive),
        (".bz2", Category::Archive),
        (".xz", Category::Archive),
        (".7z", Category::Archive),
        (".rar", Category::Archive),
    ])
});

/// Classifier with a fixed strategy for the whole run.
pub struct TypeClassifier {
    sniffer: Option<Box<dyn SignatureSniffer + Send + Sync>>,
}

impl TypeClassifier {
    /// Build a classifier. Passing `None` selects the extension-based
    /// fallback for the entire run and emits a one-time warning.
    pub fn new(sniffer: Option<Box<dyn SignatureSniffer + Send + Sync>>) -> Self {
        if sniffer.is_none() {
            warn!(
                "file type inference by content signatures unavailable; \
                 falling back to extension-based classification"
            );
        }
        Self { sniffer }
    }

    /// Whether this classifier inspects content signatures.
    pub fn signature_based(&self) -> bool {
        self.sniffer.is_some()
    }

    /// Classify `path` into one of the fixed categories.
    ///
    /// Fails with `PathNotFound` when the file disappeared between listing
    /// and classification, with `Io` on any other read failure.
    pub fn classify(&self, path: &Path) -> Result<Category> {
        // Stat up front so both tiers report a vanished file the same way.
        fs::symlink_metadata(path).map_err(|e| map_classify_io(path, e))?;

        match &self.sniffer {
            Some(sniffer) => self.classify_by_signature(sniffer.as_ref(), path),
            None => Ok(self.classify_by_extension(path)),
        }
    }

    fn classify_by_signature(&self, sniffer: &dyn SignatureSniffer, path: &Path) -> Result<Category> {
        let signature = match sniffer.sniff(path)? {
            Some(s) => s,
            // Unrecognized leading bytes: fall through to the extension tier.
            None => return Ok(self.classify_by_extension(path)),
        };

        let major = signature.mime.split('/').next().unwrap_or_default();
        let category = match major {
            "text" => Category::Text,
            "image" => Category::Image,
            "audio" => Category::Audio,
            "video" => Category::Video,
            "application" => {
                match APPLICATION_MIME_TO_CATEGORY.get(signature.mime.as_str()) {
                    Some(category) => *category,
                    None => match match_description_terms(&signature.description) {
                        Some(category) => category,
                        None => self.classify_by_extension(path),
                    },
                }
            }
            _ => Category::Other,
        };
        Ok(category)
    }

    fn classify_by_extension(&self, path: &Path) -> Category {
        let extension = match path.extension().and_then(|e| e.to_str()) {
            Some(ext) => format!(".{}", ext),
            None => return Category::Other,
        };
        EXTENSION_TO_CATEGORY
            .get(extension.as_str())
            .copied()
            .unwrap_or(Category::Other)
    }
}

/// Scan a free-text signature description for a category-indicating term.
/// Leftmost match wins, case-insensitively.
fn match_description_terms(description: &str) -> Option<Category> {
    TERM_PATTERN
        .find(description)
        .and_then(|m| TERM_TO_CATEGORY.get(m.as_str().to_lowercase().as_str()))
        .copied()
}

fn map_classify_io(path: &Path, error: io::Error) -> AnalyzerError {
    if error.kind() == io::ErrorKind::NotFound {
        AnalyzerError::PathNotFound(path.display().to_string())
    } else {
        AnalyzerError::Io(error)
    }
}

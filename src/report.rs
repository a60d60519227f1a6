/*!
 * Reporting functionality for fsascan
 *
 * Renders an `AnalysisResult` either as console tables (one titled section
 * per non-empty category, then the large-file and unusual-permission lists)
 * or as JSON for downstream tooling.
 */

use clap::ValueEnum;
use tabled::{
    settings::{object::Columns, Alignment, Modify, Padding, Style},
    Table, Tabled,
};

use crate::error::Result;
use crate::types::AnalysisResult;

/// Format of the report output
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ReportFormat {
    /// Console table output
    Table,
    /// Machine-readable JSON on stdout
    Json,
}

/// Report generator for analysis results
pub struct Reporter {
    format: ReportFormat,
}

impl Reporter {
    /// Create a new reporter
    pub fn new(format: ReportFormat) -> Self {
        Self { format }
    }

    /// Generate a report string for an analysis result
    pub fn generate_report(&self, result: &AnalysisResult) -> Result<String> {
        match self.format {
            ReportFormat::Table => Ok(self.generate_console_report(result)),
            ReportFormat::Json => Ok(serde_json::to_string_pretty(result)?),
        }
    }

    /// Print the report to stdout
    pub fn print_report(&self, result: &AnalysisResult) -> Result<()> {
        println!("{}", self.generate_report(result)?);
        Ok(())
    }

    // One section per non-empty category, then the enumerated side lists.
    fn generate_console_report(&self, result: &AnalysisResult) -> String {
        #[derive(Tabled)]
        struct FileRow {
            #[tabled(rename = "Size")]
            size: String,

            #[tabled(rename = "File path")]
            path: String,

            #[tabled(rename = "Permissions")]
            permissions: String,
        }

        let mut sections = vec!["FILE SYSTEM ANALYSIS REPORT".to_string()];

        for (category, bucket) in &result.by_category {
            if bucket.is_empty() {
                continue;
            }

            let rows: Vec<FileRow> = bucket
                .files
                .iter()
                .map(|record| {
                    let mut path = record.path.display().to_string();
                    if result.large_files.contains_key(&record.path) {
                        path.push_str(" (large file)");
                    }
                    let mut permissions = record.permissions().compact();
                    if result.unusual_permission_files.contains_key(&record.path) {
                        permissions.push_str(" (unusual permissions)");
                    }
                    FileRow {
                        size: record.formatted_size(),
                        path,
                        permissions,
                    }
                })
                .collect();

            let mut table = Table::new(rows);
            table
                .with(Style::rounded())
                .with(Padding::new(1, 1, 0, 0))
                .with(Modify::new(Columns::new(..)).with(Alignment::left()));

            sections.push(format!(
                "{} - {}\n{}",
                capitalize(category.as_str()),
                bucket.formatted_total(),
                table
            ));
        }

        if !result.large_files.is_empty() {
            let mut section = String::from("Large files");
            for (i, (path, size)) in result.large_files.iter().enumerate() {
                section.push_str(&format!("\n{}. {}: {}", i + 1, path.display(), size));
            }
            sections.push(section);
        }

        if !result.unusual_permission_files.is_empty() {
            let mut section = String::from("Files with unusual permissions");
            for (i, (path, findings)) in result.unusual_permission_files.iter().enumerate() {
                section.push_str(&format!(
                    "\n{}. {}: {}",
                    i + 1,
                    path.display(),
                    findings.join(", ")
                ));
            }
            sections.push(section);
        }

        sections.join("\n\n")
    }
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}

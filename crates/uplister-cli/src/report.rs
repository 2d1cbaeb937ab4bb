//! Per-run report persistence.
//!
//! Entries stream to an append-only JSON-lines log as the run proceeds, so a
//! crash mid-batch loses nothing; the final summary document
//! `{name, totalUploaded, products}` is written once at the end. Both paths
//! derive from the feed filename and the run timestamp.

use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use uplister_core::{NormalizedProduct, SubmissionOutcome, SubmissionStatus};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportEntry {
    pub product_name: String,
    pub source_url: Option<String>,
    pub destination_url: Option<String>,
    pub status: SubmissionStatus,
}

/// The summary document for one feed-file run.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RunReport {
    pub name: String,
    /// Products that ended up on the destination: created plus updated.
    pub total_uploaded: usize,
    pub products: Vec<ReportEntry>,
}

pub struct ReportWriter {
    name: String,
    log_path: PathBuf,
    summary_path: PathBuf,
    log: File,
    entries: Vec<ReportEntry>,
}

impl ReportWriter {
    /// Opens the log for a new run. `feed_name` is the feed file stem.
    ///
    /// # Errors
    ///
    /// I/O failures creating the report directory or the log file.
    pub fn create(report_dir: &Path, feed_name: &str) -> std::io::Result<Self> {
        std::fs::create_dir_all(report_dir)?;
        let timestamp = chrono::Utc::now().format("%Y%m%d-%H%M%S");
        let stem = format!("{feed_name}-{timestamp}");
        let log_path = report_dir.join(format!("{stem}.jsonl"));
        let summary_path = report_dir.join(format!("{stem}.json"));
        let log = File::create(&log_path)?;
        Ok(Self {
            name: feed_name.to_string(),
            log_path,
            summary_path,
            log,
            entries: Vec::new(),
        })
    }

    #[must_use]
    pub fn log_path(&self) -> &Path {
        &self.log_path
    }

    /// Records one product outcome: appended to the log immediately,
    /// retained for the summary.
    ///
    /// # Errors
    ///
    /// I/O or serialization failures writing the log line.
    pub fn append(
        &mut self,
        product: &NormalizedProduct,
        outcome: &SubmissionOutcome,
    ) -> anyhow::Result<()> {
        let entry = ReportEntry {
            product_name: product.title.clone(),
            source_url: product.source_url.clone(),
            destination_url: outcome.resource_url.clone(),
            status: outcome.status,
        };
        let line = serde_json::to_string(&entry)?;
        writeln!(self.log, "{line}")?;
        self.log.flush()?;
        self.entries.push(entry);
        Ok(())
    }

    /// Writes the summary document and returns its path.
    ///
    /// # Errors
    ///
    /// I/O or serialization failures writing the summary.
    pub fn finalize(self) -> anyhow::Result<PathBuf> {
        let total_uploaded = self
            .entries
            .iter()
            .filter(|e| {
                matches!(
                    e.status,
                    SubmissionStatus::Created | SubmissionStatus::Updated
                )
            })
            .count();
        let report = RunReport {
            name: self.name,
            total_uploaded,
            products: self.entries,
        };
        std::fs::write(&self.summary_path, serde_json::to_string_pretty(&report)?)?;
        Ok(self.summary_path)
    }
}

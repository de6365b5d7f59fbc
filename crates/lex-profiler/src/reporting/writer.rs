use crate::error::Result;
use crate::types::DatasetReport;
use chrono::Local;
use serde::Serialize;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::info;

/// Report file contents: the profile plus when and from what it was made.
#[derive(Debug, Clone, Serialize)]
pub struct ReportEnvelope<'a> {
    /// Local timestamp, `YYYY-MM-DD HH:MM:SS`
    pub generated_at: String,
    pub input_file: String,
    pub report: &'a DatasetReport,
}

impl<'a> ReportEnvelope<'a> {
    pub fn new(input_file: impl Into<String>, report: &'a DatasetReport) -> Self {
        Self {
            generated_at: Local::now().format("%Y-%m-%d %H:%M:%S").to_string(),
            input_file: input_file.into(),
            report,
        }
    }
}

/// Writes profile reports as pretty-printed JSON files.
#[derive(Debug, Clone)]
pub struct ReportWriter {
    output_dir: PathBuf,
}

impl Default for ReportWriter {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("./outputs"),
        }
    }
}

impl ReportWriter {
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
        }
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Path the report for `report_base_name` is written to.
    ///
    /// For example, a base name of "train" gives `train_profile.json`.
    pub fn report_path(&self, report_base_name: &str) -> PathBuf {
        self.output_dir
            .join(format!("{}_profile.json", report_base_name))
    }

    /// Write a report to the output directory, creating it if needed.
    pub fn write_report_to_file(
        &self,
        envelope: &ReportEnvelope<'_>,
        report_base_name: &str,
    ) -> Result<PathBuf> {
        fs::create_dir_all(&self.output_dir)?;

        let report_path = self.report_path(report_base_name);
        let mut file = File::create(&report_path)?;
        file.write_all(serde_json::to_string_pretty(envelope)?.as_bytes())?;

        info!("Report saved: {}", report_path.display());

        Ok(report_path)
    }
}

//! Report output.
//!
//! A [`DatasetReport`](crate::types::DatasetReport) is wrapped in a
//! [`ReportEnvelope`] carrying the generation time and input file, then
//! written by [`ReportWriter`] as `<output_dir>/<name>_profile.json`.
//!
//! # Example
//!
//! ```rust,ignore
//! use lex_profiler::reporting::{ReportEnvelope, ReportWriter};
//!
//! let envelope = ReportEnvelope::new("data/train.csv", &report);
//! let path = ReportWriter::new("outputs").write_report_to_file(&envelope, "train")?;
//! ```

mod writer;

pub use writer::{ReportEnvelope, ReportWriter};

//! Rendering of audit reports.
//!
//! Emitters never stop early: every candidate's complete diagnostic list is
//! written before the overall [`ExitStatus`] is returned.

pub mod json;
pub mod terminal;

use crate::config::ReportFormat;
use crate::core::{AuditReport, ExitStatus};
use crate::formatting::FormattingConfig;
use std::io;

pub use json::JsonEmitter;
pub use terminal::TerminalEmitter;

pub trait ReportEmitter {
    /// Render the whole report and return the overall status.
    fn emit(&mut self, report: &AuditReport) -> io::Result<ExitStatus>;
}

/// Emit `report` to the process's standard streams in the requested format.
pub fn emit_report(
    report: &AuditReport,
    format: ReportFormat,
    formatting: FormattingConfig,
) -> io::Result<ExitStatus> {
    let stdout = io::stdout().lock();
    match format {
        ReportFormat::Terminal => {
            let stderr = io::stderr().lock();
            TerminalEmitter::new(stdout, stderr, formatting).emit(report)
        }
        ReportFormat::Json => JsonEmitter::new(stdout).emit(report),
    }
}

use super::ReportEmitter;
use crate::core::{AuditReport, CandidateOutcome, Diagnostic, ExitStatus};
use serde::Serialize;
use std::io::{self, Write};

#[derive(Debug, Serialize)]
struct JsonReport<'a> {
    status: u8,
    reference: JsonReference<'a>,
    candidates: Vec<JsonCandidate<'a>>,
}

#[derive(Debug, Serialize)]
struct JsonReference<'a> {
    id: &'a str,
    functions: usize,
}

#[derive(Debug, Serialize)]
struct JsonCandidate<'a> {
    candidate_id: &'a str,
    ok: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    diagnostics: Option<&'a [Diagnostic]>,
    #[serde(skip_serializing_if = "Option::is_none")]
    fatal: Option<JsonFatal>,
}

#[derive(Debug, Serialize)]
struct JsonFatal {
    category: &'static str,
    message: String,
}

impl<'a> From<&'a CandidateOutcome> for JsonCandidate<'a> {
    fn from(outcome: &'a CandidateOutcome) -> Self {
        match outcome {
            CandidateOutcome::Compared(result) => Self {
                candidate_id: &result.candidate_id,
                ok: result.ok,
                diagnostics: Some(result.diagnostics.as_slice()),
                fatal: None,
            },
            CandidateOutcome::Fatal {
                candidate_id,
                error,
            } => Self {
                candidate_id,
                ok: false,
                diagnostics: None,
                fatal: Some(JsonFatal {
                    category: error.category(),
                    message: error.to_string(),
                }),
            },
        }
    }
}

/// Machine-readable report written as one pretty-printed JSON document.
pub struct JsonEmitter<W: Write> {
    writer: W,
}

impl<W: Write> JsonEmitter<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> ReportEmitter for JsonEmitter<W> {
    fn emit(&mut self, report: &AuditReport) -> io::Result<ExitStatus> {
        let status = report.status();
        let document = JsonReport {
            status: status.code(),
            reference: JsonReference {
                id: &report.reference_id,
                functions: report.reference_count,
            },
            candidates: report.outcomes.iter().map(JsonCandidate::from).collect(),
        };
        serde_json::to_writer_pretty(&mut self.writer, &document)?;
        writeln!(self.writer)?;
        self.writer.flush()?;
        Ok(status)
    }
}

use super::ReportEmitter;
use crate::core::{AuditReport, CandidateOutcome, ComparisonResult, Diagnostic, ExitStatus};
use crate::errors::AuditError;
use crate::formatting::{ColoredStyle, FormattingConfig, ReportStyle, Stream};
use std::io::{self, Write};

/// Human-readable report: progress and success on `out`, every diagnostic
/// and fatal candidate on `err`. Each stream has its own style.
pub struct TerminalEmitter<O: Write, E: Write> {
    out: O,
    err: E,
    out_style: ColoredStyle,
    err_style: ColoredStyle,
}

impl<O: Write, E: Write> TerminalEmitter<O, E> {
    /// Styles resolved against the process's stdout and stderr.
    pub fn new(out: O, err: E, formatting: FormattingConfig) -> Self {
        Self::with_styles(
            out,
            err,
            ColoredStyle::new(formatting, Stream::Stdout),
            ColoredStyle::new(formatting, Stream::Stderr),
        )
    }

    pub fn with_styles(out: O, err: E, out_style: ColoredStyle, err_style: ColoredStyle) -> Self {
        Self {
            out,
            err,
            out_style,
            err_style,
        }
    }

    pub fn into_inner(self) -> (O, E) {
        (self.out, self.err)
    }

    fn write_comparison(&mut self, result: &ComparisonResult, expected: usize) -> io::Result<()> {
        if result.ok {
            writeln!(
                self.out,
                "{} {}: {} host functions match",
                self.out_style.pass_mark(),
                self.out_style.candidate(&result.candidate_id),
                expected
            )?;
            return Ok(());
        }

        for diagnostic in &result.diagnostics {
            let line = diagnostic_line(&result.candidate_id, diagnostic);
            writeln!(self.err, "{} {}", self.err_style.fail_mark(), line)?;
        }
        Ok(())
    }

    fn write_fatal(&mut self, candidate_id: &str, error: &AuditError) -> io::Result<()> {
        writeln!(
            self.err,
            "{} {}: {} error, not compared: {}",
            self.err_style.fail_mark(),
            candidate_id,
            error.category(),
            error
        )
    }
}

/// One diagnostic, tagged with the candidate it came from.
pub fn diagnostic_line(candidate_id: &str, diagnostic: &Diagnostic) -> String {
    match diagnostic.index {
        Some(index) => format!("{} [index {}]: {}", candidate_id, index, diagnostic.detail),
        None => format!(
            "{}: {}: {}",
            candidate_id, diagnostic.kind, diagnostic.detail
        ),
    }
}

impl<O: Write, E: Write> ReportEmitter for TerminalEmitter<O, E> {
    fn emit(&mut self, report: &AuditReport) -> io::Result<ExitStatus> {
        writeln!(
            self.out,
            "{}",
            self.out_style.progress(&format!(
                "Checking {} candidate(s) against {} host functions from {}",
                report.outcomes.len(),
                report.reference_count,
                report.reference_id
            ))
        )?;

        for outcome in &report.outcomes {
            match outcome {
                CandidateOutcome::Compared(result) => {
                    self.write_comparison(result, report.reference_count)?
                }
                CandidateOutcome::Fatal {
                    candidate_id,
                    error,
                } => self.write_fatal(candidate_id, error)?,
            }
        }

        let status = report.status();
        match status {
            ExitStatus::Success => writeln!(
                self.out,
                "{}",
                self.out_style.verdict(
                    status,
                    "All host functions match between the guest bindings and the host."
                )
            )?,
            ExitStatus::Failure => writeln!(
                self.err,
                "{}",
                self.err_style.verdict(
                    status,
                    &format!(
                        "{} mismatch(es) and {} fatal candidate(s) found.",
                        report.diagnostic_count(),
                        report.fatal_count()
                    )
                )
            )?,
        }
        self.out.flush()?;
        self.err.flush()?;
        Ok(status)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::DiagnosticKind;
    use crate::formatting::MarkStyle;

    fn emit(report: &AuditReport) -> (ExitStatus, String, String) {
        emit_with(
            report,
            TerminalEmitter::new(Vec::new(), Vec::new(), FormattingConfig::plain()),
        )
    }

    fn emit_with(
        report: &AuditReport,
        mut emitter: TerminalEmitter<Vec<u8>, Vec<u8>>,
    ) -> (ExitStatus, String, String) {
        let status = emitter.emit(report).unwrap();
        let (out, err) = emitter.into_inner();
        (
            status,
            String::from_utf8(out).unwrap(),
            String::from_utf8(err).unwrap(),
        )
    }

    fn compared(id: &str, diagnostics: Vec<Diagnostic>) -> CandidateOutcome {
        CandidateOutcome::Compared(ComparisonResult::from_diagnostics(id, diagnostics))
    }

    #[test]
    fn test_clean_report_goes_to_stdout() {
        let report = AuditReport {
            reference_id: "reference".into(),
            reference_count: 3,
            outcomes: vec![compared("host_bindings", vec![])],
        };
        let (status, out, err) = emit(&report);

        assert_eq!(status, ExitStatus::Success);
        assert!(out.contains("[OK] host_bindings: 3 host functions match"));
        assert!(out.contains("All host functions match"));
        assert!(err.is_empty());
    }

    #[test]
    fn test_every_diagnostic_of_every_candidate_is_printed() {
        let report = AuditReport {
            reference_id: "reference".into(),
            reference_count: 2,
            outcomes: vec![
                compared(
                    "host_bindings",
                    vec![
                        Diagnostic::at(0, DiagnosticKind::NameMismatch, "name mismatch: g != f"),
                        Diagnostic::at(1, DiagnosticKind::ReturnTypeMismatch, "return type"),
                    ],
                ),
                compared(
                    "host_bindings_for_testing",
                    vec![Diagnostic::set_level(DiagnosticKind::CountMismatch, "1 vs 2")],
                ),
            ],
        };
        let (status, out, err) = emit(&report);

        assert_eq!(status, ExitStatus::Failure);
        let lines: Vec<_> = err.lines().collect();
        assert_eq!(
            lines,
            vec![
                "[FAIL] host_bindings [index 0]: name mismatch: g != f",
                "[FAIL] host_bindings [index 1]: return type",
                "[FAIL] host_bindings_for_testing: count mismatch: 1 vs 2",
                "3 mismatch(es) and 0 fatal candidate(s) found.",
            ]
        );
        assert!(!out.contains("All host functions match"));
    }

    #[test]
    fn test_fatal_candidate_is_reported_with_others() {
        let report = AuditReport {
            reference_id: "reference".into(),
            reference_count: 1,
            outcomes: vec![
                CandidateOutcome::Fatal {
                    candidate_id: "host_bindings".into(),
                    error: AuditError::parse("host_bindings.rs", "no declarations found"),
                },
                compared("host_bindings_for_testing", vec![]),
            ],
        };
        let (status, out, err) = emit(&report);

        assert_eq!(status, ExitStatus::Failure);
        assert!(err.contains("host_bindings: parse error, not compared"));
        assert!(out.contains("[OK] host_bindings_for_testing"));
    }

    #[test]
    fn test_stdout_stays_plain_when_only_stderr_is_colored() {
        let report = AuditReport {
            reference_id: "reference".into(),
            reference_count: 1,
            outcomes: vec![
                compared("host_bindings", vec![]),
                compared(
                    "host_bindings_for_testing",
                    vec![Diagnostic::at(0, DiagnosticKind::NameMismatch, "g != f")],
                ),
            ],
        };
        let emitter = TerminalEmitter::with_styles(
            Vec::new(),
            Vec::new(),
            ColoredStyle::with_color(false, MarkStyle::Ascii),
            ColoredStyle::with_color(true, MarkStyle::Ascii),
        );
        let (_, out, err) = emit_with(&report, emitter);

        assert!(out.contains("[OK] host_bindings: 1 host functions match"));
        assert!(!out.contains('\x1b'));
        assert!(err.contains('\x1b'));
    }
}

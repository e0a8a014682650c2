//! Terminal styling for audit reports.
//!
//! Color follows the usual conventions: `NO_COLOR` and `CLICOLOR=0` turn it
//! off, `CLICOLOR_FORCE=1` turns it on, and otherwise each stream is colored
//! only when that stream is a terminal. `--plain` disables both color and
//! Unicode marks.

use crate::core::ExitStatus;
use colored::*;
use std::env;
use std::io::IsTerminal;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorMode {
    Auto,
    Always,
    Never,
}

/// The standard stream a report line is written to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stream {
    Stdout,
    Stderr,
}

impl ColorMode {
    pub fn should_use_color(&self, stream: Stream) -> bool {
        self.resolve(|| is_color_terminal(stream))
    }

    /// `Auto` defers to `is_terminal`; the other modes never consult it.
    pub fn resolve(&self, is_terminal: impl FnOnce() -> bool) -> bool {
        match self {
            Self::Always => true,
            Self::Never => false,
            Self::Auto => is_terminal(),
        }
    }
}

/// Whether pass/fail marks use Unicode glyphs or ASCII tags.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MarkStyle {
    Unicode,
    Ascii,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FormattingConfig {
    pub color: ColorMode,
    pub marks: MarkStyle,
}

impl Default for FormattingConfig {
    fn default() -> Self {
        Self {
            color: ColorMode::Auto,
            marks: MarkStyle::Unicode,
        }
    }
}

impl FormattingConfig {
    pub fn from_env() -> Self {
        Self::from_vars(|key| env::var(key).ok())
    }

    /// Resolve the color mode from environment lookups. Later rules win.
    pub fn from_vars(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();
        if lookup("NO_COLOR").is_some() {
            config.color = ColorMode::Never;
        }
        if lookup("CLICOLOR").as_deref() == Some("0") {
            config.color = ColorMode::Never;
        }
        if lookup("CLICOLOR_FORCE").as_deref() == Some("1") {
            config.color = ColorMode::Always;
        }
        config
    }

    /// No color and ASCII marks only.
    pub fn plain() -> Self {
        Self {
            color: ColorMode::Never,
            marks: MarkStyle::Ascii,
        }
    }
}

/// The styled pieces a report line is built from.
pub trait ReportStyle {
    fn pass_mark(&self) -> String;
    fn fail_mark(&self) -> String;
    fn candidate(&self, id: &str) -> String;
    fn progress(&self, text: &str) -> String;
    fn verdict(&self, status: ExitStatus, text: &str) -> String;
}

pub struct ColoredStyle {
    color: bool,
    marks: MarkStyle,
}

impl ColoredStyle {
    /// Style for lines written to `stream`.
    pub fn new(config: FormattingConfig, stream: Stream) -> Self {
        Self::with_color(config.color.should_use_color(stream), config.marks)
    }

    pub fn with_color(color: bool, marks: MarkStyle) -> Self {
        if color {
            // `colored` would otherwise apply its own stdout-only check
            colored::control::set_override(true);
        }
        Self { color, marks }
    }

    fn paint(&self, text: &str, paint: impl FnOnce(&str) -> ColoredString) -> String {
        if self.color {
            paint(text).to_string()
        } else {
            text.to_string()
        }
    }

    fn mark(&self, unicode: &'static str, ascii: &'static str) -> &'static str {
        match self.marks {
            MarkStyle::Unicode => unicode,
            MarkStyle::Ascii => ascii,
        }
    }
}

impl ReportStyle for ColoredStyle {
    fn pass_mark(&self) -> String {
        let mark = self.mark("✓", "[OK]");
        self.paint(mark, |t| t.green())
    }

    fn fail_mark(&self) -> String {
        let mark = self.mark("✗", "[FAIL]");
        self.paint(mark, |t| t.red())
    }

    fn candidate(&self, id: &str) -> String {
        self.paint(id, |t| t.bold())
    }

    fn progress(&self, text: &str) -> String {
        self.paint(text, |t| t.cyan())
    }

    fn verdict(&self, status: ExitStatus, text: &str) -> String {
        match status {
            ExitStatus::Success => self.paint(text, |t| t.green().bold()),
            ExitStatus::Failure => self.paint(text, |t| t.red().bold()),
        }
    }
}

fn is_color_terminal(stream: Stream) -> bool {
    if env::var("TERM").is_ok_and(|term| term == "dumb") {
        return false;
    }
    match stream {
        Stream::Stdout => std::io::stdout().is_terminal(),
        Stream::Stderr => std::io::stderr().is_terminal(),
    }
}

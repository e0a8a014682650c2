use crate::config::{AuditConfig, FatalMode, ReportFormat};
use crate::formatting::FormattingConfig;
use clap::Parser;

#[derive(Parser, Debug)]
#[command(name = "hostfn-audit")]
#[command(
    about = "Check that guest host function bindings match the native host's declarations",
    long_about = None
)]
#[command(version)]
pub struct Cli {
    /// Native host source tree: a local directory or a GitHub URL
    pub source_root: String,

    /// Directory the guest binding paths are relative to
    #[arg(long = "bindings-root")]
    pub bindings_root: Option<String>,

    /// What a fatal error in one candidate does to the run
    #[arg(long = "on-fatal", value_enum, default_value = "abort-run")]
    pub on_fatal: FatalMode,

    /// Output format
    #[arg(short, long, value_enum, default_value = "terminal")]
    pub format: ReportFormat,

    /// Disable colors and emoji
    #[arg(long)]
    pub plain: bool,
}

impl Cli {
    pub fn into_config(self) -> AuditConfig {
        let formatting = if self.plain {
            FormattingConfig::plain()
        } else {
            FormattingConfig::from_env()
        };
        let config = AuditConfig::new(self.source_root)
            .with_fatal_mode(self.on_fatal)
            .with_format(self.format)
            .with_formatting(formatting);
        match self.bindings_root {
            Some(root) => config.with_bindings_root(root),
            None => config,
        }
    }
}
